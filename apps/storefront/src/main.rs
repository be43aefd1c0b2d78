//! # TenantFlow Storefront Entry Point
//!
//! Runs the demo walkthrough: seeds the in-memory record store, opens a
//! storefront session, places an order, then works it from the owner
//! dashboard.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     TenantFlow Storefront                               │
//! │                                                                         │
//! │  main.rs ─────► tenantflow_storefront::run()                            │
//! │                                                                         │
//! │  run() ───────► config, tracing, seeded records, session file,         │
//! │                 storefront visit, owner dashboard, reports              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from `TENANTFLOW_STORE`, `TENANTFLOW_SESSION_DIR`
//! and `TENANTFLOW_LOG` (see `config.rs`).

fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(e) = tenantflow_storefront::run() {
        eprintln!("tenantflow-storefront: {}", e);
        std::process::exit(1);
    }
}
