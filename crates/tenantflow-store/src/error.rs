//! # Store Error Types
//!
//! Error types for record and session storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Constraint check / session I/O                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront app) ← Serialized for frontend                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
///
/// Collections have no schema, so repositories enforce the constraints a
/// schema normally would and surface violations through these variants.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found in a collection.
    ///
    /// ## When This Occurs
    /// - Updating or removing a record by an ID that doesn't exist
    /// - Looking up a required relation (order's store, user's store)
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: String,
        id: String,
    },

    /// Uniqueness violation.
    ///
    /// ## When This Occurs
    /// - Inserting a store with a taken slug
    /// - Registering a user with a taken email
    /// - Appending a record whose ID already exists
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate {
        field: String,
        value: String,
    },

    /// Record rejected before it entered a collection.
    ///
    /// ## When This Occurs
    /// - Appending an order with no items
    /// - A relation pointing at a record that doesn't exist
    #[error("Invalid record: {reason}")]
    InvalidRecord {
        reason: String,
    },

    /// Optimistic concurrency check failed.
    ///
    /// ## When This Occurs
    /// - Two dashboard sessions update the same order; the second one
    ///   carries a stale version and must re-read before retrying
    #[error("{entity} {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        entity: String,
        id: String,
        expected: i64,
        actual: i64,
    },

    /// Session persistence failed.
    ///
    /// ## When This Occurs
    /// - Session file can't be read or written
    /// - Disk full, permissions issue
    ///
    /// Callers treat this as recoverable: the in-memory session stays
    /// valid, only its snapshot is stale.
    #[error("Session persistence failed: {0}")]
    Persistence(String),

    /// A stored payload failed to serialize or deserialize.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an InvalidRecord error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        StoreError::InvalidRecord {
            reason: reason.into(),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Order", "abc-123");
        assert_eq!(err.to_string(), "Order not found: abc-123");

        let err = StoreError::duplicate("slug", "emporio-central");
        assert_eq!(
            err.to_string(),
            "Duplicate slug: 'emporio-central' already exists"
        );

        let err = StoreError::VersionConflict {
            entity: "Order".to_string(),
            id: "o1".to_string(),
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Order o1 was modified concurrently (expected version 2, found 3)"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let bad: Result<i64, _> = serde_json::from_str("not json");
        let err: StoreError = bad.unwrap_err().into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
