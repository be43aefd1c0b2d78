//! # Validation Module
//!
//! Input validation utilities for TenantFlow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront/Dashboard Service (Rust)                          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Record Store                                                 │
//! │  ├── Duplicate id / slug rejection                                     │
//! │  └── Non-empty order enforcement                                       │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use tenantflow_core::types::{ProductUnit, Quantity};
//! use tenantflow_core::validation::{validate_slug, validate_quantity};
//!
//! // Validate slug before store insert
//! validate_slug("emporio-central").unwrap();
//!
//! // Validate quantity before cart dispatch
//! validate_quantity(Quantity::from_units(5), ProductUnit::Unit).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{DeliveryMethod, DeliveryOption, ProductUnit, Quantity};
use crate::{MAX_CART_ITEMS, MAX_LINE_QUANTITY_MILLIS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a store slug.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Lowercase letters, digits and hyphens only (it becomes a URL segment)
///
/// ## Example
/// ```rust
/// use tenantflow_core::validation::validate_slug;
///
/// assert!(validate_slug("emporio-central").is_ok());
/// assert!(validate_slug("").is_err());
/// assert!(validate_slug("Empório Central").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: 50,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must contain only lowercase letters, digits, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a store display name (1 to 100 characters).
pub fn validate_store_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "store name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "store name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a category name (1 to 60 characters).
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "category name".to_string(),
        });
    }

    if name.len() > 60 {
        return Err(ValidationError::TooLong {
            field: "category name".to_string(),
            max: 60,
        });
    }

    Ok(())
}

/// Validates the customer name typed at a walk-in checkout (1 to 120 chars).
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a delivery address (1 to 300 characters).
pub fn validate_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if address.len() > 300 {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: 300,
        });
    }

    Ok(())
}

/// Validates a login email.
///
/// A format sanity check, not RFC compliance: identity arrives
/// pre-authenticated, the email is only a lookup key.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates the observations note left at checkout (max 500 characters).
pub fn validate_observations(note: &str) -> ValidationResult<()> {
    if note.trim().len() > 500 {
        return Err(ValidationError::TooLong {
            field: "observations".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity against the product's unit of measure.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed 999 units worth of thousandths
/// - Counted products (sold per piece) accept whole units only
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Storefront: Add to Cart                                                │
/// │                                                                         │
/// │  User enters quantity: 1.5 kg                                          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(1.500, Kilogram) ← THIS FUNCTION                    │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between ..."           │
/// │       │                                                                 │
/// │       ├── fractional but sold per piece? → Error: invalid format       │
/// │       │                                                                 │
/// │       └── OK → Proceed with CartAction::AddItem                        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: Quantity, unit: ProductUnit) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty.millis() > MAX_LINE_QUANTITY_MILLIS {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY_MILLIS,
        });
    }

    if !unit.is_weight_based() && !qty.is_whole() {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "counted products sell in whole units".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, promotions)
///
/// ## Example
/// ```rust
/// use tenantflow_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // R$ 10,99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tracked stock level in thousandths (negative stock is not
/// representable here; zero means sold out).
pub fn validate_stock_millis(millis: i64) -> ValidationResult<()> {
    if millis < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of distinct lines) before adding another.
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates a store's delivery option list.
///
/// ## Rules
/// - At most one option per delivery method
pub fn validate_delivery_options(options: &[DeliveryOption]) -> ValidationResult<()> {
    for (i, option) in options.iter().enumerate() {
        if options[..i].iter().any(|o| o.method == option.method) {
            let method = match option.method {
                DeliveryMethod::Pickup => "pickup",
                DeliveryMethod::Delivery => "delivery",
            };
            return Err(ValidationError::Duplicate {
                field: "delivery option".to_string(),
                value: method.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use tenantflow_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeliveryMethod, FeeType};

    #[test]
    fn test_validate_slug() {
        // Valid slugs
        assert!(validate_slug("emporio-central").is_ok());
        assert!(validate_slug("loja2").is_ok());

        // Invalid slugs
        assert!(validate_slug("").is_err());
        assert!(validate_slug("   ").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("Uppercase").is_err());
        assert!(validate_slug("under_score").is_err());
        assert!(validate_slug(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Queijo Minas 500g").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@nodot").is_err());
    }

    #[test]
    fn test_validate_quantity_counted_products() {
        assert!(validate_quantity(Quantity::from_units(1), ProductUnit::Unit).is_ok());
        assert!(validate_quantity(Quantity::from_units(999), ProductUnit::Unit).is_ok());

        assert!(validate_quantity(Quantity::zero(), ProductUnit::Unit).is_err());
        assert!(validate_quantity(Quantity::from_millis(-1000), ProductUnit::Unit).is_err());
        assert!(validate_quantity(Quantity::from_units(1000), ProductUnit::Unit).is_err());

        // Fractional pieces don't exist
        assert!(validate_quantity(Quantity::from_millis(1500), ProductUnit::Unit).is_err());
    }

    #[test]
    fn test_validate_quantity_weighed_products() {
        assert!(validate_quantity(Quantity::from_millis(1500), ProductUnit::Kilogram).is_ok());
        assert!(validate_quantity(Quantity::from_millis(250), ProductUnit::Gram).is_ok());
        assert!(validate_quantity(Quantity::zero(), ProductUnit::Kilogram).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_stock_millis() {
        assert!(validate_stock_millis(0).is_ok());
        assert!(validate_stock_millis(5000).is_ok());
        assert!(validate_stock_millis(-1).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }

    #[test]
    fn test_validate_delivery_options() {
        let pickup = DeliveryOption {
            method: DeliveryMethod::Pickup,
            enabled: true,
            fee_type: FeeType::Fixed,
            fee_cents: 0,
            details: None,
        };
        let delivery = DeliveryOption {
            method: DeliveryMethod::Delivery,
            enabled: true,
            fee_type: FeeType::Fixed,
            fee_cents: 800,
            details: None,
        };

        assert!(validate_delivery_options(&[]).is_ok());
        assert!(validate_delivery_options(&[pickup.clone()]).is_ok());
        assert!(validate_delivery_options(&[pickup.clone(), delivery]).is_ok());
        assert!(validate_delivery_options(&[pickup.clone(), pickup]).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_observations() {
        assert!(validate_observations("").is_ok());
        assert!(validate_observations("sem cebola").is_ok());
        assert!(validate_observations(&"x".repeat(501)).is_err());
    }
}
