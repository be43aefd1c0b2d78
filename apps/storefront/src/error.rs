//! # API Error Type
//!
//! Unified error type for service operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in TenantFlow                             │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  add_to_cart(productId, qty)                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Method                                                  │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ──── StoreError::VersionConflict ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule Violation? ── CoreError::InsufficientStock ─ ApiError ──► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await addToCart(productId, qty)                                      │
//! │  } catch (e) {                                                          │
//! │    // e.message = "Insufficient stock for Picanha Bovina: ..."          │
//! │    // e.code = "INSUFFICIENT_STOCK"                                     │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tenantflow_core::{CoreError, ValidationError};
use tenantflow_store::StoreError;

/// API error returned from service operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Store not found: emporio-central"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await updateOrderStatus(id, status, version);
/// } catch (e) {
///   switch (e.code) {
///     case 'VERSION_CONFLICT':
///       reloadOrder();
///       break;
///     case 'UNAUTHORIZED':
///       redirectToLogin();
///       break;
///     default:
///       showError(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (store slug, product, order)
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Record or session storage failed
    StorageError,

    /// Business rule violation (stage machine, status rules)
    BusinessLogic,

    /// Internal error
    Internal,

    /// Cart operation failed
    CartError,

    /// Insufficient stock
    InsufficientStock,

    /// Someone else updated the record first; reload and retry
    VersionConflict,

    /// Caller lacks the role or ownership the operation needs
    Unauthorized,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Duplicate { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            StoreError::InvalidRecord { reason } => {
                ApiError::new(ErrorCode::BusinessLogic, reason)
            }
            StoreError::VersionConflict { .. } => ApiError::new(
                ErrorCode::VersionConflict,
                "This record changed while you were editing. Reload and try again.",
            ),
            StoreError::Persistence(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Session persistence failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Saving the session failed")
            }
            StoreError::Serialization(e) => {
                tracing::error!("Payload serialization failed: {}", e);
                ApiError::new(ErrorCode::Internal, "Serialization failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    product, available, requested
                ),
            ),
            CoreError::StoreMismatch { product_id, .. } => ApiError::new(
                ErrorCode::CartError,
                format!("Product {} belongs to a different store", product_id),
            ),
            CoreError::EmptyCart => ApiError::cart("Cart is empty"),
            CoreError::InvalidCheckoutStage { current } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Checkout is at the {} stage; this step is not available", current),
            ),
            CoreError::CartTooLarge { max } => ApiError::new(
                ErrorCode::CartError,
                format!("Cart cannot have more than {} items", max),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Lets `?` lift bare field validation failures into API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for service operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let api: ApiError = StoreError::not_found("Order", "o1").into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Order not found: o1");

        let api: ApiError = StoreError::duplicate("slug", "emporio-central").into();
        assert_eq!(api.code, ErrorCode::ValidationError);

        let api: ApiError = StoreError::VersionConflict {
            entity: "Order".to_string(),
            id: "o1".to_string(),
            expected: 1,
            actual: 2,
        }
        .into();
        assert_eq!(api.code, ErrorCode::VersionConflict);
    }

    #[test]
    fn test_core_error_mapping() {
        let api: ApiError = CoreError::EmptyCart.into();
        assert_eq!(api.code, ErrorCode::CartError);

        let api: ApiError = CoreError::InvalidCheckoutStage {
            current: "success".to_string(),
        }
        .into();
        assert_eq!(api.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_serialized_shape() {
        let api = ApiError::not_found("Store", "padaria");
        let json = serde_json::to_string(&api).unwrap();
        assert_eq!(
            json,
            r#"{"code":"NOT_FOUND","message":"Store not found: padaria"}"#
        );
    }
}
