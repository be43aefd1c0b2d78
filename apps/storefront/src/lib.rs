//! # TenantFlow Storefront Library
//!
//! Service layer and demo walkthrough for the TenantFlow storefront.
//!
//! ## Module Organization
//! ```text
//! tenantflow_storefront/
//! ├── lib.rs          ◄─── You are here (wiring & demo run)
//! ├── config.rs       ◄─── Environment-driven configuration
//! ├── error.rs        ◄─── API error type for service results
//! └── services/
//!     ├── mod.rs      ◄─── Service exports
//!     ├── auth.rs     ◄─── Login / logout / identity restore
//!     ├── storefront.rs ◄─ Browse, cart and checkout
//!     └── dashboard.rs ◄── Owner console and reports
//! ```
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     TenantFlow Storefront                               │
//! │                                                                         │
//! │  Frontend (Next.js) ──► services/ ──► tenantflow-store ──► records     │
//! │                             │                                           │
//! │                             └──────► tenantflow-core (pure rules)      │
//! │                                                                         │
//! │  The demo binary drives the same services a web frontend would,        │
//! │  narrating one full visit: browse → cart → checkout → order →          │
//! │  dashboard → reports.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod services;

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use tenantflow_core::reports::{RankMetric, ReportPeriod};
use tenantflow_core::{CurrentUser, DeliveryMethod, OrderStatus, PaymentStatus, Quantity};
use tenantflow_store::{seed_demo, FileSessionStore, MemoryStore};

use config::AppConfig;
use services::auth::AuthService;
use services::dashboard::Dashboard;
use services::storefront::{OrderRequest, StorefrontSession};

pub use error::{ApiError, ApiResult, ErrorCode};

/// Runs the demo walkthrough.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration ───► env vars with development defaults         │
/// │  2. Initialize tracing ───► RUST_LOG > TENANTFLOW_LOG > default        │
/// │  3. Seed the record store ─► deterministic two-store demo dataset      │
/// │  4. Open the session file ─► platform data dir (or override)           │
/// │  5. Restore identity ──────► last run's login, if still valid          │
/// │  6. Storefront visit ──────► browse, cart, checkout, confirm           │
/// │  7. Owner dashboard ───────► order handling and reports                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_filter);

    info!("Starting TenantFlow storefront demo");

    let records = MemoryStore::new();
    let counts = seed_demo(&records)?;
    info!(
        stores = counts.stores,
        products = counts.products,
        orders = counts.orders,
        "Demo dataset seeded"
    );

    let session_path = config.session_file()?;
    info!(path = %session_path.display(), "Session file resolved");
    let session = Arc::new(FileSessionStore::new(session_path));

    let auth = AuthService::new(records.users(), session.clone());
    let identity = auth.restore();
    match &identity {
        Some(user) => info!(user = %user.name, "Identity restored from previous run"),
        None => info!("No persisted identity; visiting as a guest"),
    }

    let order_id = storefront_walkthrough(&records, &config, identity, session.clone())?;
    dashboard_walkthrough(&records, &config, &auth, &order_id)?;

    auth.logout();
    info!("Demo walkthrough complete");
    Ok(())
}

/// One customer visit: browse, fill a cart, check out, confirm an order.
fn storefront_walkthrough(
    records: &MemoryStore,
    config: &AppConfig,
    identity: Option<CurrentUser>,
    session: Arc<FileSessionStore>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut visit =
        StorefrontSession::open(records, &config.store_slug, identity, session)?;
    let store = visit.store()?;
    info!(store = %store.name, "Visiting storefront");

    let catalog = visit.catalog();
    info!(
        products = catalog.len(),
        categories = visit.categories().len(),
        "Browsing catalog"
    );

    // Put the two first catalog items in the cart, one unit each
    for product in catalog.iter().take(2) {
        let totals = visit.add_to_cart(&product.id, Quantity::from_units(1))?;
        info!(
            product = %product.name,
            subtotal_cents = totals.subtotal_cents,
            "Added to cart"
        );
    }

    visit.begin_checkout()?;

    let method = if store.offers(DeliveryMethod::Delivery) {
        DeliveryMethod::Delivery
    } else {
        DeliveryMethod::Pickup
    };
    visit.set_delivery_method(method)?;
    visit.set_observations("Entregar no período da tarde")?;

    let totals = visit.checkout_totals()?;
    info!(
        subtotal_cents = totals.subtotal_cents,
        delivery_fee_cents = totals.delivery_fee_cents,
        total_cents = totals.total_cents,
        "Checkout totals"
    );

    let payment = visit
        .payment_options()?
        .into_iter()
        .next()
        .ok_or("the store accepts no payment methods")?;

    let address = match method {
        DeliveryMethod::Delivery => Some("Rua do Comércio, 45".to_string()),
        DeliveryMethod::Pickup => None,
    };
    let order = visit.confirm_order(&OrderRequest {
        payment_method_id: payment.id,
        customer_name: Some("Cliente Balcão".to_string()),
        address,
        reference: None,
    })?;

    info!(
        order_id = %order.id,
        customer = %order.customer_name,
        payment = %order.payment_method,
        total_cents = order.total_cents,
        "Order confirmed"
    );

    Ok(order.id)
}

/// The owner's side: pick up the new order, work it, read the reports.
fn dashboard_walkthrough(
    records: &MemoryStore,
    config: &AppConfig,
    auth: &AuthService,
    order_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = records
        .stores()
        .find_by_slug(&config.store_slug)
        .ok_or("seeded store missing")?;
    let owner = records
        .users()
        .get_by_id(&store.owner_id)
        .ok_or("store owner missing")?;

    let operator = auth.login(&owner.email)?;
    let dash = Dashboard::open(records, &store.id, &operator)?;

    let order = dash.order(order_id)?;
    let order = dash.update_order_status(&order.id, OrderStatus::Processing, order.version)?;
    let order = dash.update_payment_status(&order.id, PaymentStatus::Paid, order.version)?;
    info!(
        order_id = %order.id,
        status = ?order.status,
        payment_status = ?order.payment_status,
        version = order.version,
        "Order worked in the dashboard"
    );

    let today = Utc::now().date_naive();
    let period = ReportPeriod::last_days(today, 30);

    let summary = dash.sales_summary(period);
    info!(
        orders = summary.order_count,
        revenue_cents = summary.revenue_cents,
        average_order_value_cents = summary.average_order_value_cents,
        "Last 30 days"
    );

    if let Some(best) = dash.top_products(period, RankMetric::Revenue).first() {
        info!(
            product = %best.name,
            revenue_cents = best.revenue_cents,
            "Best seller of the period"
        );
    }

    let comparison = dash.month_over_month(today.year(), today.month())?;
    info!(
        revenue_change_pct = comparison.revenue_change_pct,
        order_count_change_pct = comparison.order_count_change_pct,
        "Month over month"
    );

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tenantflow=trace` - Show trace for tenantflow crates only
/// - Otherwise the configured filter applies (default: info,tenantflow=debug)
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
