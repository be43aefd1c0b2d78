//! # Payment Method Repository
//!
//! Record operations for the platform's payment method labels.
//!
//! One small global list ("Pix", "Dinheiro", "Cartão de Crédito").
//! Stores reference entries by id; orders freeze the chosen name.
//! The name doubles as a business key, so inserts keep it unique.

use tracing::debug;
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use tenantflow_core::PaymentMethodRecord;

/// Repository for payment method record operations.
#[derive(Debug, Clone)]
pub struct PaymentMethodRepository {
    methods: Collection<PaymentMethodRecord>,
}

impl PaymentMethodRepository {
    /// Creates a new PaymentMethodRepository.
    pub fn new(methods: Collection<PaymentMethodRecord>) -> Self {
        PaymentMethodRepository { methods }
    }

    /// Inserts a new payment method.
    ///
    /// ## Returns
    /// * `Ok(PaymentMethodRecord)` - The stored record
    /// * `Err(StoreError::Duplicate)` - ID or name already registered
    pub fn insert(&self, method: PaymentMethodRecord) -> StoreResult<PaymentMethodRecord> {
        debug!(id = %method.id, name = %method.name, "Inserting payment method");

        self.methods.with_write(|records| {
            if records.iter().any(|m| m.id == method.id) {
                return Err(StoreError::duplicate("id", &method.id));
            }
            if records
                .iter()
                .any(|m| m.name.eq_ignore_ascii_case(&method.name))
            {
                return Err(StoreError::duplicate("name", &method.name));
            }
            records.push(method.clone());
            Ok(())
        })?;
        Ok(method)
    }

    /// Gets a payment method by its ID.
    pub fn get_by_id(&self, id: &str) -> Option<PaymentMethodRecord> {
        self.methods.find_by_id(id)
    }

    /// Lists every payment method in registration order.
    ///
    /// Inactive entries included; checkout filters on `is_active`.
    pub fn list(&self) -> Vec<PaymentMethodRecord> {
        self.methods.all()
    }

    /// Finds a payment method by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<PaymentMethodRecord> {
        let needle = name.trim();
        self.methods.find(|m| m.name.eq_ignore_ascii_case(needle))
    }
}

/// Helper to generate a new payment method ID.
pub fn generate_payment_method_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn method(id: &str, name: &str) -> PaymentMethodRecord {
        PaymentMethodRecord {
            id: id.to_string(),
            name: name.to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_insert_list_find() {
        let repo = PaymentMethodRepository::new(Collection::new());
        repo.insert(method("pm1", "Pix")).unwrap();
        repo.insert(method("pm2", "Dinheiro")).unwrap();

        assert_eq!(repo.list().len(), 2);
        assert_eq!(repo.find_by_name("pix").unwrap().id, "pm1");
        assert!(repo.find_by_name("Cheque").is_none());
    }

    #[test]
    fn test_name_is_unique() {
        let repo = PaymentMethodRepository::new(Collection::new());
        repo.insert(method("pm1", "Pix")).unwrap();

        let err = repo.insert(method("pm2", "PIX")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }
}
