//! # Typed Record Collections
//!
//! The storage primitive every repository builds on. A [`Collection`] is an
//! append-ordered list of records behind a single lock.
//!
//! ## Lock Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Collection<T>                                       │
//! │                                                                         │
//! │   Arc<RwLock<Vec<T>>>                                                   │
//! │        │                                                                │
//! │        ├── reads:  find_by_id / filter / all   (shared lock)            │
//! │        │                                                                │
//! │        └── writes: append / update_with / remove  (exclusive lock)      │
//! │                                                                         │
//! │   Every write holds the exclusive lock for its whole                    │
//! │   check-then-mutate sequence, so read-modify-write is atomic            │
//! │   and lost updates cannot happen inside one collection.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Records keep their append order. Listings that want "newest first"
//! sort explicitly by timestamp instead of relying on position.

use std::sync::{Arc, RwLock};

use crate::error::{StoreError, StoreResult};
use tenantflow_core::{Category, Order, PaymentMethodRecord, Product, Store, User};

/// A record that can live in a [`Collection`].
pub trait Record: Clone {
    /// Entity label used in error messages ("Product", "Order").
    const ENTITY: &'static str;

    /// Collection key. Stable for the record's lifetime.
    fn id(&self) -> &str;
}

/// An append-ordered, lock-protected list of records.
///
/// Cloning a `Collection` clones the handle, not the data: all clones
/// see the same records. Repositories hold clones of the collections
/// they need, the same way database repositories share a pool.
#[derive(Debug)]
pub struct Collection<T: Record> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Collection {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Collection::new()
    }
}

impl<T: Record> Collection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Collection {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().expect("collection lock poisoned").len()
    }

    /// Checks if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of every record in append order.
    pub fn all(&self) -> Vec<T> {
        self.records
            .read()
            .expect("collection lock poisoned")
            .clone()
    }

    /// Finds a record by ID.
    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.records
            .read()
            .expect("collection lock poisoned")
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// Finds the first record matching a predicate.
    pub fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.records
            .read()
            .expect("collection lock poisoned")
            .iter()
            .find(|r| predicate(r))
            .cloned()
    }

    /// Returns every record matching a predicate, in append order.
    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.records
            .read()
            .expect("collection lock poisoned")
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Appends a record, rejecting a duplicate ID.
    pub fn append(&self, record: T) -> StoreResult<()> {
        let mut records = self.records.write().expect("collection lock poisoned");
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::duplicate("id", record.id()));
        }
        records.push(record);
        Ok(())
    }

    /// Mutates a record in place under the exclusive lock.
    ///
    /// The closure may fail (version checks do), aborting the update.
    /// Validate first, then mutate: a returned error keeps whatever the
    /// closure already wrote.
    ///
    /// ## Returns
    /// A clone of the record after the closure ran.
    pub fn update_with<F>(&self, id: &str, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut T) -> StoreResult<()>,
    {
        let mut records = self.records.write().expect("collection lock poisoned");
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))?;
        f(record)?;
        Ok(record.clone())
    }

    /// Removes a record by ID, returning it.
    pub fn remove(&self, id: &str) -> StoreResult<T> {
        let mut records = self.records.write().expect("collection lock poisoned");
        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))?;
        Ok(records.remove(position))
    }

    /// Runs a closure against the records under the shared lock.
    ///
    /// For multi-record reads that shouldn't pay per-record clones.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let records = self.records.read().expect("collection lock poisoned");
        f(&records)
    }

    /// Runs a closure against the records under the exclusive lock.
    ///
    /// For writes whose invariant spans more than one record, like
    /// slug uniqueness checked against every other store.
    pub fn with_write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let mut records = self.records.write().expect("collection lock poisoned");
        f(&mut records)
    }
}

// =============================================================================
// Record Implementations
// =============================================================================

impl Record for Product {
    const ENTITY: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Order {
    const ENTITY: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Store {
    const ENTITY: &'static str = "Store";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for User {
    const ENTITY: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    const ENTITY: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for PaymentMethodRecord {
    const ENTITY: &'static str = "Payment method";

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::Utc;
    use tenantflow_core::SocialLinks;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        body: String,
        version: i64,
    }

    impl Record for Note {
        const ENTITY: &'static str = "Note";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
            version: 0,
        }
    }

    #[test]
    fn test_append_and_find() {
        let notes: Collection<Note> = Collection::new();
        assert!(notes.is_empty());

        notes.append(note("n1", "first")).unwrap();
        notes.append(note("n2", "second")).unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes.find_by_id("n1").unwrap().body, "first");
        assert!(notes.find_by_id("missing").is_none());
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let notes: Collection<Note> = Collection::new();
        notes.append(note("n1", "first")).unwrap();

        let err = notes.append(note("n1", "again")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_filter_preserves_append_order() {
        let notes: Collection<Note> = Collection::new();
        notes.append(note("n1", "keep")).unwrap();
        notes.append(note("n2", "drop")).unwrap();
        notes.append(note("n3", "keep")).unwrap();

        let kept = notes.filter(|n| n.body == "keep");
        let ids: Vec<&str> = kept.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n3"]);
    }

    #[test]
    fn test_update_with_mutates_in_place() {
        let notes: Collection<Note> = Collection::new();
        notes.append(note("n1", "old")).unwrap();

        let updated = notes
            .update_with("n1", |n| {
                n.body = "new".to_string();
                n.version += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.body, "new");
        assert_eq!(updated.version, 1);
        assert_eq!(notes.find_by_id("n1").unwrap().body, "new");
    }

    #[test]
    fn test_update_with_missing_record() {
        let notes: Collection<Note> = Collection::new();
        let err = notes.update_with("ghost", |_| Ok(())).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_update_with_closure_error_propagates() {
        let notes: Collection<Note> = Collection::new();
        notes.append(note("n1", "body")).unwrap();

        let err = notes
            .update_with("n1", |n| {
                if n.version != 7 {
                    return Err(StoreError::VersionConflict {
                        entity: "Note".to_string(),
                        id: n.id.clone(),
                        expected: 7,
                        actual: n.version,
                    });
                }
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::VersionConflict { actual: 0, .. }));
    }

    #[test]
    fn test_remove() {
        let notes: Collection<Note> = Collection::new();
        notes.append(note("n1", "bye")).unwrap();

        let removed = notes.remove("n1").unwrap();
        assert_eq!(removed.body, "bye");
        assert!(notes.is_empty());

        let err = notes.remove("n1").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_clones_share_records() {
        let notes: Collection<Note> = Collection::new();
        let handle = notes.clone();

        notes.append(note("n1", "shared")).unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.find_by_id("n1").unwrap().body, "shared");
    }

    #[test]
    fn test_with_write_scans_atomically() {
        let notes: Collection<Note> = Collection::new();
        notes.append(note("n1", "taken")).unwrap();

        // Check-then-insert under one lock, the slug-uniqueness shape.
        let inserted = notes.with_write(|records| {
            if records.iter().any(|n| n.body == "taken") {
                return false;
            }
            records.push(note("n2", "taken"));
            true
        });

        assert!(!inserted);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_record_impl_for_domain_types() {
        let store = Store {
            id: "s1".to_string(),
            owner_id: "u1".to_string(),
            name: "Loja".to_string(),
            slug: "loja".to_string(),
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
        };
        assert_eq!(Record::id(&store), "s1");
        assert_eq!(Store::ENTITY, "Store");
    }
}
