//! # tenantflow-store: Data Layer for TenantFlow
//!
//! This crate provides record and session storage for TenantFlow.
//! Everything lives in process memory behind typed collections; the
//! only file it touches is the session snapshot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      TenantFlow Data Flow                               │
//! │                                                                         │
//! │  Service call (confirm_order, sales reports)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tenantflow-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │  MemoryStore  │    │  Repositories │    │   Sessions   │   │   │
//! │  │   │  (memory.rs)  │    │  (order.rs)   │    │ (session.rs) │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ Collection<T> │◄───│ ProductRepo   │    │ user + cart  │   │   │
//! │  │   │ per entity    │    │ OrderRepo     │    │ JSON file    │   │   │
//! │  │   │ (RwLock)      │    │ StoreRepo ... │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Process memory (records)  +  session.json (identity, cart)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - The lock-protected record collection primitive
//! - [`memory`] - The `MemoryStore` facade handing out repositories
//! - [`repository`] - Repository implementations (product, order, etc.)
//! - [`session`] - Session persistence (identity and cart snapshots)
//! - [`seed`] - Deterministic demo dataset
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tenantflow_store::{seed_demo, MemoryStore};
//!
//! // Create and populate the store
//! let store = MemoryStore::new();
//! seed_demo(&store)?;
//!
//! // Use repositories
//! let products = store.products().search("store-emporio", "picanha");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod seed;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use collection::{Collection, Record};
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryStore, StoreCounts};
pub use seed::seed_demo;
pub use session::{
    FileSessionStore, MemorySessionStore, SessionStore, SESSION_CART_KEY, SESSION_USER_KEY,
};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::order::OrderRepository;
pub use repository::payment::PaymentMethodRepository;
pub use repository::product::ProductRepository;
pub use repository::store::StoreRepository;
pub use repository::user::UserRepository;
