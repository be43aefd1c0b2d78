//! # tenantflow-core: Pure Business Logic for TenantFlow
//!
//! This crate is the **heart** of TenantFlow. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      TenantFlow Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (TypeScript Web App)                  │   │
//! │  │   Storefront UI ──► Cart UI ──► Checkout UI ──► Dashboard UI   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Storefront / Dashboard Services                │   │
//! │  │   browse_catalog, add_to_cart, confirm_order, sales reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ tenantflow-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  reports  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  summary  │  │   │
//! │  │   │   Order   │  │ Quantity× │  │ CartAction│  │  rankings │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RECORD STORE • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tenantflow-store (Data Layer)                    │   │
//! │  │         Record collections, repositories, sessions              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Store, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart reducer and its action vocabulary
//! - [`checkout`] - The staged checkout flow machine
//! - [`reports`] - Sales aggregation behind the dashboard
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Record store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tenantflow_core::money::Money;
//! use tenantflow_core::types::Quantity;
//!
//! // Create money from cents (never from floats!)
//! let per_kg = Money::from_cents(2599); // R$ 25,99 per kg
//!
//! // Fixed-point quantities: 1500 thousandths = 1.5 kg
//! let qty = Quantity::from_millis(1500);
//!
//! // Line totals round half up, once, to a whole centavo
//! assert_eq!(per_kg.multiply_quantity(qty).cents(), 3899);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tenantflow_core::Money` instead of
// `use tenantflow_core::money::Money`

pub use cart::{Cart, CartAction, CartItem, CartTotals};
pub use checkout::{checkout_total, CheckoutFlow, CheckoutStage};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line, in thousandths (999 units or kg)
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-store in future versions.
pub const MAX_LINE_QUANTITY_MILLIS: i64 = 999_000;

/// How many rows product/customer rankings return.
pub const TOP_RANKING_LIMIT: usize = 5;

/// Label of the report bucket for lines without a known category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
