//! # Order Repository
//!
//! Record operations for confirmed orders.
//!
//! ## Append-Only Log With Guarded Updates
//! Orders are written once at checkout and never edited afterwards,
//! except for two status fields the store owner drives. Those updates
//! are guarded by an optimistic version so two dashboard tabs can't
//! silently overwrite each other.
//!
//! ## Version Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Optimistic Concurrency Flow                             │
//! │                                                                         │
//! │  Tab A reads order (version 3)      Tab B reads order (version 3)       │
//! │       │                                  │                              │
//! │       ▼                                  │                              │
//! │  update_status(id, Shipped, 3)           │                              │
//! │  version matches → apply, version = 4    │                              │
//! │                                          ▼                              │
//! │                              update_status(id, Cancelled, 3)            │
//! │                              version is 4 ≠ 3                           │
//! │                              → StoreError::VersionConflict              │
//! │                                                                         │
//! │  Tab B reloads, sees "Shipped", decides again with fresh data.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use tenantflow_core::{Order, OrderStatus, PaymentStatus};

/// Repository for order record operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.orders();
///
/// // Checkout appends; the dashboard lists and updates
/// repo.append(order)?;
/// let open = repo.list_by_store("store-1");
/// repo.update_status(&id, OrderStatus::Processing, 0)?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    orders: Collection<Order>,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(orders: Collection<Order>) -> Self {
        OrderRepository { orders }
    }

    /// Appends a confirmed order.
    ///
    /// ## Arguments
    /// * `order` - Order to store (id and totals computed beforehand)
    ///
    /// ## Returns
    /// * `Ok(Order)` - The stored order
    /// * `Err(StoreError::InvalidRecord)` - Order has no items
    /// * `Err(StoreError::Duplicate)` - ID already exists
    pub fn append(&self, order: Order) -> StoreResult<Order> {
        if order.items.is_empty() {
            return Err(StoreError::invalid("an order must have at least one item"));
        }

        debug!(
            id = %order.id,
            store_id = %order.store_id,
            lines = order.items.len(),
            total_cents = order.total_cents,
            "Appending order"
        );

        self.orders.append(order.clone())?;
        Ok(order)
    }

    /// Gets an order by its ID.
    pub fn get_by_id(&self, id: &str) -> Option<Order> {
        self.orders.find_by_id(id)
    }

    /// Lists a store's orders, newest first.
    ///
    /// ## Usage
    /// The dashboard order queue; fresh orders sit on top.
    pub fn list_by_store(&self, store_id: &str) -> Vec<Order> {
        let mut orders = self.orders.filter(|o| o.store_id == store_id);
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Lists a customer's orders across stores, newest first.
    pub fn list_by_user(&self, user_id: &str) -> Vec<Order> {
        let mut orders = self
            .orders
            .filter(|o| o.customer_id.as_deref() == Some(user_id));
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Updates an order's fulfilment status.
    ///
    /// ## Version Guard
    /// `expected_version` must match the stored version; on success the
    /// version increments. A mismatch means someone else updated the
    /// order since the caller last read it.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The order after the update
    /// * `Err(StoreError::NotFound)` - Order doesn't exist
    /// * `Err(StoreError::VersionConflict)` - Stale `expected_version`
    pub fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        expected_version: i64,
    ) -> StoreResult<Order> {
        debug!(id = %id, status = ?status, expected_version, "Updating order status");

        self.orders.update_with(id, |order| {
            check_version(order, expected_version)?;
            order.status = status;
            order.version += 1;
            order.updated_at = Utc::now();
            Ok(())
        })
    }

    /// Updates an order's payment status.
    ///
    /// Same version guard as [`update_status`](Self::update_status).
    pub fn update_payment_status(
        &self,
        id: &str,
        payment_status: PaymentStatus,
        expected_version: i64,
    ) -> StoreResult<Order> {
        debug!(id = %id, payment_status = ?payment_status, expected_version, "Updating payment status");

        self.orders.update_with(id, |order| {
            check_version(order, expected_version)?;
            order.payment_status = payment_status;
            order.version += 1;
            order.updated_at = Utc::now();
            Ok(())
        })
    }

    /// Removes an order record entirely.
    ///
    /// Destructive; the order disappears from every listing and report.
    /// Prefer `update_status(.., Cancelled, ..)` to keep the history.
    pub fn remove(&self, id: &str) -> StoreResult<Order> {
        debug!(id = %id, "Removing order");
        self.orders.remove(id)
    }

    /// Counts a store's orders (for diagnostics).
    pub fn count_by_store(&self, store_id: &str) -> usize {
        self.orders.filter(|o| o.store_id == store_id).len()
    }
}

/// Version check shared by both status updates. Runs before any
/// mutation so a conflict leaves the order untouched.
fn check_version(order: &Order, expected_version: i64) -> StoreResult<()> {
    if order.version != expected_version {
        return Err(StoreError::VersionConflict {
            entity: "Order".to_string(),
            id: order.id.clone(),
            expected: expected_version,
            actual: order.version,
        });
    }
    Ok(())
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tenantflow_core::{DeliveryDetails, DeliveryMethod, OrderItem, ProductUnit};

    fn order(id: &str, store_id: &str, customer_id: Option<&str>, age_hours: i64) -> Order {
        let placed = Utc::now() - Duration::hours(age_hours);
        Order {
            id: id.to_string(),
            store_id: store_id.to_string(),
            customer_id: customer_id.map(str::to_string),
            customer_name: "Maria Silva".to_string(),
            items: vec![OrderItem {
                product_id: "p1".to_string(),
                name_snapshot: "Picanha Bovina".to_string(),
                unit: ProductUnit::Kilogram,
                unit_price_cents: 2599,
                quantity_millis: 1000,
                line_total_cents: 2599,
            }],
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: "Pix".to_string(),
            delivery: DeliveryDetails {
                method: DeliveryMethod::Pickup,
                address: None,
                reference: None,
                fee_cents: 0,
            },
            observations: None,
            subtotal_cents: 2599,
            total_cents: 2599,
            created_at: placed,
            updated_at: placed,
            version: 0,
        }
    }

    fn repo() -> OrderRepository {
        OrderRepository::new(Collection::new())
    }

    #[test]
    fn test_append_and_get() {
        let repo = repo();
        repo.append(order("o1", "s1", Some("u1"), 1)).unwrap();

        let found = repo.get_by_id("o1").unwrap();
        assert_eq!(found.customer_name, "Maria Silva");
    }

    #[test]
    fn test_append_rejects_empty_order() {
        let repo = repo();
        let mut empty = order("o1", "s1", None, 0);
        empty.items.clear();

        let err = repo.append(empty).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { .. }));
        assert!(repo.get_by_id("o1").is_none());
    }

    #[test]
    fn test_list_by_store_newest_first() {
        let repo = repo();
        repo.append(order("old", "s1", None, 48)).unwrap();
        repo.append(order("new", "s1", None, 1)).unwrap();
        repo.append(order("mid", "s1", None, 24)).unwrap();
        repo.append(order("other", "s2", None, 0)).unwrap();

        let ids: Vec<String> = repo
            .list_by_store("s1")
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_list_by_user_spans_stores() {
        let repo = repo();
        repo.append(order("o1", "s1", Some("u1"), 2)).unwrap();
        repo.append(order("o2", "s2", Some("u1"), 1)).unwrap();
        repo.append(order("o3", "s1", Some("u2"), 0)).unwrap();
        repo.append(order("o4", "s1", None, 0)).unwrap();

        let ids: Vec<String> = repo.list_by_user("u1").into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["o2", "o1"]);
    }

    #[test]
    fn test_update_status_bumps_version() {
        let repo = repo();
        repo.append(order("o1", "s1", None, 0)).unwrap();

        let updated = repo
            .update_status("o1", OrderStatus::Processing, 0)
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);
        assert_eq!(updated.version, 1);

        let updated = repo.update_status("o1", OrderStatus::Shipped, 1).unwrap();
        assert_eq!(updated.version, 2);
    }

    #[test]
    fn test_update_status_stale_version_conflicts() {
        let repo = repo();
        repo.append(order("o1", "s1", None, 0)).unwrap();
        repo.update_status("o1", OrderStatus::Processing, 0).unwrap();

        // A second tab still holding version 0 loses.
        let err = repo
            .update_status("o1", OrderStatus::Cancelled, 0)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::VersionConflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));

        // The conflicting write changed nothing.
        let stored = repo.get_by_id("o1").unwrap();
        assert_eq!(stored.status, OrderStatus::Processing);
        assert_eq!(stored.version, 1);
    }

    #[test]
    fn test_update_payment_status_guarded() {
        let repo = repo();
        repo.append(order("o1", "s1", None, 0)).unwrap();

        let updated = repo
            .update_payment_status("o1", PaymentStatus::Paid, 0)
            .unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(updated.version, 1);

        let err = repo
            .update_payment_status("o1", PaymentStatus::Rejected, 0)
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));
    }

    #[test]
    fn test_status_updates_interleave_on_one_version_counter() {
        let repo = repo();
        repo.append(order("o1", "s1", None, 0)).unwrap();

        repo.update_status("o1", OrderStatus::Processing, 0).unwrap();
        repo.update_payment_status("o1", PaymentStatus::Paid, 1)
            .unwrap();
        let stored = repo.update_status("o1", OrderStatus::Shipped, 2).unwrap();

        assert_eq!(stored.version, 3);
        assert_eq!(stored.status, OrderStatus::Shipped);
        assert_eq!(stored.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_remove() {
        let repo = repo();
        repo.append(order("o1", "s1", None, 0)).unwrap();

        repo.remove("o1").unwrap();
        assert!(repo.get_by_id("o1").is_none());

        let err = repo.remove("o1").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_update_missing_order() {
        let repo = repo();
        let err = repo
            .update_status("ghost", OrderStatus::Processing, 0)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
