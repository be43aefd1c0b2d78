//! # Store Repository
//!
//! Record operations for tenant stores.
//!
//! ## Slug Uniqueness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Why Slugs Are Guarded Here                           │
//! │                                                                         │
//! │  The slug is the store's public address:                                │
//! │                                                                         │
//! │      /loja/emporio-central  ──►  find_by_slug("emporio-central")        │
//! │                                                                         │
//! │  Two stores sharing a slug would make that lookup ambiguous, so         │
//! │  insert and update scan every other store under the exclusive           │
//! │  lock before writing. Slugs arrive already validated (lowercase,        │
//! │  url-safe), so comparison is exact.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use tenantflow_core::Store;

/// Repository for store record operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = memory.stores();
///
/// // The storefront resolves the URL slug
/// let store = repo.find_by_slug("emporio-central");
/// ```
#[derive(Debug, Clone)]
pub struct StoreRepository {
    stores: Collection<Store>,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(stores: Collection<Store>) -> Self {
        StoreRepository { stores }
    }

    /// Inserts a new store.
    ///
    /// ## Returns
    /// * `Ok(Store)` - The stored record
    /// * `Err(StoreError::Duplicate)` - ID or slug already taken
    pub fn insert(&self, store: Store) -> StoreResult<Store> {
        debug!(id = %store.id, slug = %store.slug, "Inserting store");

        self.stores.with_write(|records| {
            if records.iter().any(|s| s.id == store.id) {
                return Err(StoreError::duplicate("id", &store.id));
            }
            if records.iter().any(|s| s.slug == store.slug) {
                return Err(StoreError::duplicate("slug", &store.slug));
            }
            records.push(store.clone());
            Ok(())
        })?;
        Ok(store)
    }

    /// Replaces an existing store's fields.
    ///
    /// Re-checks slug uniqueness against every other store, so renaming
    /// a slug onto a taken one fails the same way insert does. Stamps
    /// `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(Store)` - The store after the update
    /// * `Err(StoreError::NotFound)` - Store doesn't exist
    /// * `Err(StoreError::Duplicate)` - Slug taken by another store
    pub fn update(&self, store: Store) -> StoreResult<Store> {
        debug!(id = %store.id, slug = %store.slug, "Updating store");

        self.stores.with_write(|records| {
            if records
                .iter()
                .any(|s| s.id != store.id && s.slug == store.slug)
            {
                return Err(StoreError::duplicate("slug", &store.slug));
            }
            let record = records
                .iter_mut()
                .find(|s| s.id == store.id)
                .ok_or_else(|| StoreError::not_found("Store", &store.id))?;
            *record = store;
            record.updated_at = Utc::now();
            Ok(record.clone())
        })
    }

    /// Gets a store by its ID.
    pub fn get_by_id(&self, id: &str) -> Option<Store> {
        self.stores.find_by_id(id)
    }

    /// Finds a store by its public slug.
    ///
    /// A miss is the storefront's not-found page, not an error.
    pub fn find_by_slug(&self, slug: &str) -> Option<Store> {
        self.stores.find(|s| s.slug == slug)
    }

    /// Lists every store in registration order.
    pub fn list(&self) -> Vec<Store> {
        self.stores.all()
    }
}

/// Helper to generate a new store ID.
pub fn generate_store_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tenantflow_core::SocialLinks;

    fn store(id: &str, slug: &str) -> Store {
        Store {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            name: format!("Loja {id}"),
            slug: slug.to_string(),
            description: None,
            logo_url: None,
            phone: None,
            delivery_options: vec![],
            payment_method_ids: vec![],
            pix_key: None,
            social: SocialLinks::default(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn repo() -> StoreRepository {
        StoreRepository::new(Collection::new())
    }

    #[test]
    fn test_insert_and_find_by_slug() {
        let repo = repo();
        repo.insert(store("s1", "emporio-central")).unwrap();

        let found = repo.find_by_slug("emporio-central").unwrap();
        assert_eq!(found.id, "s1");
        assert!(repo.find_by_slug("nao-existe").is_none());
    }

    #[test]
    fn test_insert_rejects_taken_slug() {
        let repo = repo();
        repo.insert(store("s1", "emporio-central")).unwrap();

        let err = repo.insert(store("s2", "emporio-central")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(err.to_string(), "Duplicate slug: 'emporio-central' already exists");
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn test_update_keeps_own_slug() {
        let repo = repo();
        repo.insert(store("s1", "emporio-central")).unwrap();

        // Renaming without touching the slug must not collide with itself.
        let mut renamed = store("s1", "emporio-central");
        renamed.name = "Empório Central".to_string();
        let updated = repo.update(renamed).unwrap();
        assert_eq!(updated.name, "Empório Central");
    }

    #[test]
    fn test_update_rejects_stealing_slug() {
        let repo = repo();
        repo.insert(store("s1", "emporio-central")).unwrap();
        repo.insert(store("s2", "padaria-do-bairro")).unwrap();

        let grab = store("s2", "emporio-central");
        let err = repo.update(grab).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        // s2 keeps its original slug.
        assert_eq!(repo.get_by_id("s2").unwrap().slug, "padaria-do-bairro");
    }

    #[test]
    fn test_update_missing_store() {
        let repo = repo();
        let err = repo.update(store("ghost", "fantasma")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_slug_can_change_to_free_value() {
        let repo = repo();
        repo.insert(store("s1", "emporio-central")).unwrap();

        let moved = store("s1", "emporio-novo");
        repo.update(moved).unwrap();

        assert!(repo.find_by_slug("emporio-central").is_none());
        assert_eq!(repo.find_by_slug("emporio-novo").unwrap().id, "s1");
    }
}
