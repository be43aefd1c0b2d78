//! # Cart Reducer
//!
//! The shopping cart and the action vocabulary that mutates it.
//!
//! ## Reducer Shape
//! The frontend dispatches tagged actions; the cart folds them in. Every
//! action is total: unknown product ids and redundant removals are no-ops,
//! never panics. Input validation (positive quantity, stock, line cap)
//! happens in the storefront service before an action is built.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Reducer Operations                              │
//! │                                                                         │
//! │  Frontend Action          CartAction               Cart State Change    │
//! │  ───────────────          ──────────               ─────────────────    │
//! │                                                                         │
//! │  Click Product ──────────► ADD_ITEM ─────────────► merge or push line  │
//! │                                                                         │
//! │  Change Quantity ────────► UPDATE_QUANTITY ──────► set qty (≤0 drops)  │
//! │                                                                         │
//! │  Click Remove ───────────► REMOVE_ITEM ──────────► retain others       │
//! │                                                                         │
//! │  Order Recorded ─────────► CLEAR_CART ───────────► items.clear()       │
//! │                            (internal only)                              │
//! │                                                                         │
//! │  NOTE: A cart belongs to exactly one store. Items keep frozen price    │
//! │        snapshots so catalog edits never change a cart in flight.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductUnit, Quantity};

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the product (for record lookup)
/// - Everything else is a frozen copy of product data at time of adding.
///   This ensures the cart displays consistent data even if the product
///   is updated in the catalog after being added to cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Product ID (UUID)
    pub product_id: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Unit of measure at time of adding (frozen)
    pub unit: ProductUnit,

    /// Price in cents at time of adding (frozen)
    /// This is critical: we lock in the price when added to cart
    pub unit_price_cents: i64,

    /// Quantity in cart, in thousandths
    pub quantity_millis: i64,

    /// When this item was added to cart
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item from a product and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the product price
    /// changes in the catalog, this cart item retains the original price.
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit: product.unit,
            unit_price_cents: product.price_cents,
            quantity_millis: quantity.millis(),
            added_at: Utc::now(),
        }
    }

    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the quantity in cart.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_millis(self.quantity_millis)
    }

    /// Calculates the line total (unit price × quantity, rounded half up).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price().multiply_quantity(self.quantity()).cents()
    }
}

// =============================================================================
// Cart Actions
// =============================================================================

/// The tagged action vocabulary of the cart reducer.
///
/// Serialized with an external `type` tag so a TypeScript frontend can
/// dispatch `{ "type": "ADD_ITEM", ... }` payloads directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add a product, merging quantity if the product is already present.
    AddItem { product: Product, quantity: Quantity },
    /// Replace a line's quantity. Zero or negative removes the line;
    /// an unknown product id is a no-op.
    UpdateQuantity {
        product_id: String,
        quantity: Quantity,
    },
    /// Drop a line. A no-op if the product is not in the cart.
    RemoveItem { product_id: String },
    /// Empty the cart. Dispatched internally once an order is recorded,
    /// never exposed as a storefront operation.
    ClearCart,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one storefront visit.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product merges quantity)
/// - All quantities are positive (an update to ≤0 removes the line)
/// - All items belong to `store_id` (the storefront service enforces it
///   before dispatching, alongside stock and line-cap checks)
/// - Line order is insertion order
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Store this cart shops at.
    pub store_id: String,

    /// Items in the cart
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart for a store.
    pub fn new(store_id: &str) -> Self {
        Cart {
            store_id: store_id.to_string(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Folds one action into the cart. Total: never fails, never panics.
    pub fn dispatch(&mut self, action: CartAction) {
        match action {
            CartAction::AddItem { product, quantity } => self.add_item(&product, quantity),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(&product_id, quantity),
            CartAction::RemoveItem { product_id } => self.remove_item(&product_id),
            CartAction::ClearCart => self.clear(),
        }
    }

    /// Adds a product to the cart or merges quantity if already present.
    ///
    /// Non-positive quantities are ignored; the caller validates before
    /// dispatching, this just keeps the positive-quantity invariant total.
    pub fn add_item(&mut self, product: &Product, quantity: Quantity) {
        if !quantity.is_positive() {
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity_millis += quantity.millis();
            return;
        }

        self.items.push(CartItem::from_product(product, quantity));
    }

    /// Replaces the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity ≤ 0: removes the line
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: Quantity) {
        if !quantity.is_positive() {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity_millis = quantity.millis();
        }
    }

    /// Removes a line by product ID. A no-op if absent.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the summed quantity across all lines.
    pub fn total_quantity(&self) -> Quantity {
        Quantity::from_millis(self.items.iter().map(|i| i.quantity_millis).sum())
    }

    /// Calculates the items subtotal in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Returns the items subtotal as Money.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity_millis: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity_millis: cart.total_quantity().millis(),
            subtotal_cents: cart.subtotal_cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            store_id: "store-1".to_string(),
            category_id: None,
            name: format!("Product {}", id),
            description: None,
            price_cents,
            unit: ProductUnit::Unit,
            image_url: None,
            stock_millis: 100_000,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn weighed_product(id: &str, price_cents: i64) -> Product {
        Product {
            unit: ProductUnit::Kilogram,
            ..test_product(id, price_cents)
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new("store-1");
        let product = test_product("1", 999); // R$ 9,99

        cart.dispatch(CartAction::AddItem {
            product,
            quantity: Quantity::from_units(2),
        });

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), Quantity::from_units(2));
        assert_eq!(cart.subtotal_cents(), 1998); // R$ 19,98
    }

    #[test]
    fn test_cart_add_same_product_merges_quantity() {
        let mut cart = Cart::new("store-1");
        let product = test_product("1", 999);

        cart.add_item(&product, Quantity::from_units(2));
        cart.add_item(&product, Quantity::from_units(3));

        assert_eq!(cart.item_count(), 1); // Still one line
        assert_eq!(cart.total_quantity(), Quantity::from_units(5));
    }

    #[test]
    fn test_cart_weighed_line_total() {
        let mut cart = Cart::new("store-1");
        let cheese = weighed_product("1", 2599); // R$ 25,99/kg

        cart.add_item(&cheese, Quantity::from_millis(1500)); // 1.5 kg

        assert_eq!(cart.subtotal_cents(), 3899); // rounded half up
    }

    #[test]
    fn test_cart_price_frozen_at_add_time() {
        let mut cart = Cart::new("store-1");
        let mut product = test_product("1", 999);

        cart.add_item(&product, Quantity::from_units(1));
        product.price_cents = 1299; // catalog edit after adding

        assert_eq!(cart.subtotal_cents(), 999);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 500), Quantity::from_units(2));

        cart.dispatch(CartAction::UpdateQuantity {
            product_id: "1".to_string(),
            quantity: Quantity::from_units(7),
        });

        assert_eq!(cart.total_quantity(), Quantity::from_units(7));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 500), Quantity::from_units(2));

        cart.dispatch(CartAction::UpdateQuantity {
            product_id: "1".to_string(),
            quantity: Quantity::zero(),
        });

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_negative_quantity_removes_line() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 500), Quantity::from_units(2));

        cart.update_quantity("1", Quantity::from_millis(-1000));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 500), Quantity::from_units(2));

        cart.dispatch(CartAction::UpdateQuantity {
            product_id: "missing".to_string(),
            quantity: Quantity::from_units(9),
        });

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), Quantity::from_units(2));
    }

    #[test]
    fn test_remove_item_and_redundant_remove() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 500), Quantity::from_units(1));
        cart.add_item(&test_product("2", 300), Quantity::from_units(1));

        cart.dispatch(CartAction::RemoveItem {
            product_id: "1".to_string(),
        });
        assert_eq!(cart.item_count(), 1);

        // Removing again is a no-op, not an error
        cart.dispatch(CartAction::RemoveItem {
            product_id: "1".to_string(),
        });
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].product_id, "2");
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 999), Quantity::from_units(2));
        assert!(!cart.is_empty());

        cart.dispatch(CartAction::ClearCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_non_positive_quantity_is_noop() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 999), Quantity::zero());

        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_order_is_insertion_order() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("b", 100), Quantity::from_units(1));
        cart.add_item(&test_product("a", 100), Quantity::from_units(1));
        cart.add_item(&test_product("b", 100), Quantity::from_units(1));

        let ids: Vec<&str> = cart.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_action_wire_tags() {
        let action = CartAction::RemoveItem {
            product_id: "p1".to_string(),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"REMOVE_ITEM\""));

        let clear: CartAction = serde_json::from_str("{\"type\":\"CLEAR_CART\"}").unwrap();
        assert!(matches!(clear, CartAction::ClearCart));
    }

    #[test]
    fn test_cart_totals_summary() {
        let mut cart = Cart::new("store-1");
        cart.add_item(&test_product("1", 999), Quantity::from_units(2));
        cart.add_item(&weighed_product("2", 1000), Quantity::from_millis(500));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity_millis, 2500);
        assert_eq!(totals.subtotal_cents, 1998 + 500);
    }
}
