//! # Error Types
//!
//! Domain-specific error types for tenantflow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tenantflow-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tenantflow-store errors (separate crate)                              │
//! │  └── StoreError       - Record store / session failures                │
//! │                                                                         │
//! │  Storefront API errors (in app)                                        │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (slug, ID, quantities)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::Quantity;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product ID doesn't exist in the catalog
    /// - Product was deactivated after the shopper loaded the page
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Insufficient stock to cover the requested quantity.
    ///
    /// ## When This Occurs
    /// - Shopper requests more than the tracked stock of a product
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Queijo Minas", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 Queijo Minas available"
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: Quantity,
        requested: Quantity,
    },

    /// Product belongs to a different store than the cart.
    ///
    /// Every cart is scoped to a single storefront; mixing catalogs would
    /// produce an order no single store could fulfil.
    #[error("Product {product_id} belongs to store {product_store}, cart is for store {cart_store}")]
    StoreMismatch {
        product_id: String,
        product_store: String,
        cart_store: String,
    },

    /// Cart has no items.
    ///
    /// ## When This Occurs
    /// - Trying to begin checkout with an empty cart
    /// - Trying to confirm an order after the cart was cleared elsewhere
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout flow is not in a stage that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Trying to confirm an order from the cart stage
    /// - Trying to re-enter checkout after the order succeeded
    #[error("Checkout flow is at stage {current}, cannot perform operation")]
    InvalidCheckoutStage { current: String },

    /// Cart has exceeded maximum allowed line count.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid slug, fractional unit count).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate store slug).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
