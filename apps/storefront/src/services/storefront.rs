//! # Storefront Session
//!
//! One customer's visit to one store.
//!
//! ## Visit Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      /loja/{slug}                                       │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  open(slug) ──► resolve store ──► restore persisted cart               │
//! │                                   (foreign-store snapshot discarded)    │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  ┌────────── Cart stage ──────────┐   ┌─────── Checkout stage ──────┐  │
//! │  │  catalog / search / categories │   │  set_delivery_method        │  │
//! │  │  add_to_cart                   │──►│  set_observations           │  │
//! │  │  update_quantity               │◄──│  checkout_totals            │  │
//! │  │  remove_from_cart              │   │  confirm_order ──► Success  │  │
//! │  └────────────────────────────────┘   └─────────────────────────────┘  │
//! │                                                        │               │
//! │                       reset_flow ◄─────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validation Discipline
//! The cart itself is a total reducer; every business rule runs here,
//! before dispatching:
//! - product exists, is active and belongs to this store
//! - quantity is positive, whole for counted units, under the line cap
//! - merged line quantity fits current stock
//! - distinct-line cap
//!
//! Recording an order never mutates the catalog; stock changes only
//! through dashboard edits.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tenantflow_core::validation::{
    validate_address, validate_cart_size, validate_customer_name, validate_observations,
    validate_quantity, validate_search_query,
};
use tenantflow_core::{
    checkout_total, Cart, CartAction, CartTotals, Category, CheckoutFlow, CheckoutStage,
    CoreError, CurrentUser, DeliveryDetails, DeliveryMethod, Order, OrderItem, OrderStatus,
    PaymentMethodRecord, PaymentStatus, Product, Quantity, Store,
};
use tenantflow_store::repository::order::generate_order_id;
use tenantflow_store::{MemoryStore, SessionStore, SESSION_CART_KEY};

use crate::error::{ApiError, ApiResult, ErrorCode};

/// The checkout form payload submitted on confirmation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Chosen payment method id (must be accepted by the store).
    pub payment_method_id: String,

    /// Walk-in customer name. Ignored when a customer is signed in.
    pub customer_name: Option<String>,

    /// Destination address. Required when the delivery method is Delivery.
    pub address: Option<String>,

    /// Landmark note for the courier.
    pub reference: Option<String>,
}

/// The amounts shown on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}

/// A customer's visit to one storefront.
///
/// Holds the cart and checkout state for the visit and persists the cart
/// on every mutation, so a restart lands the customer where they left off.
pub struct StorefrontSession {
    records: MemoryStore,
    store_id: String,
    cart: Cart,
    flow: CheckoutFlow,
    customer: Option<CurrentUser>,
    session: Arc<dyn SessionStore>,
}

impl StorefrontSession {
    /// Opens a storefront by slug.
    ///
    /// ## Errors
    /// * `NOT_FOUND` - No active store answers to that slug
    ///
    /// A persisted cart snapshot is restored when it belongs to this
    /// store; snapshots from another store are discarded.
    pub fn open(
        records: &MemoryStore,
        slug: &str,
        customer: Option<CurrentUser>,
        session: Arc<dyn SessionStore>,
    ) -> ApiResult<Self> {
        let store = records
            .stores()
            .find_by_slug(slug)
            .filter(|s| s.is_active)
            .ok_or_else(|| ApiError::not_found("Store", slug))?;

        let cart = restore_cart(session.as_ref(), &store.id);

        info!(
            store_id = %store.id,
            slug = %slug,
            restored_lines = cart.item_count(),
            "Storefront session opened"
        );

        Ok(StorefrontSession {
            records: records.clone(),
            store_id: store.id,
            cart,
            flow: CheckoutFlow::new(),
            customer,
            session,
        })
    }

    // =========================================================================
    // Browse
    // =========================================================================

    /// The store being visited, read fresh so dashboard edits show up.
    pub fn store(&self) -> ApiResult<Store> {
        self.records
            .stores()
            .get_by_id(&self.store_id)
            .ok_or_else(|| ApiError::not_found("Store", &self.store_id))
    }

    /// The signed-in customer, if any.
    pub fn current_customer(&self) -> Option<&CurrentUser> {
        self.customer.as_ref()
    }

    /// The store's active products in catalog order.
    pub fn catalog(&self) -> Vec<Product> {
        self.records.products().list_by_store(&self.store_id)
    }

    /// The store's categories for the filter bar.
    pub fn categories(&self) -> Vec<Category> {
        self.records.categories().list_by_store(&self.store_id)
    }

    /// Active products in one category.
    pub fn catalog_in_category(&self, category_id: &str) -> Vec<Product> {
        self.records
            .products()
            .list_by_store(&self.store_id)
            .into_iter()
            .filter(|p| p.category_id.as_deref() == Some(category_id))
            .collect()
    }

    /// Case-insensitive product name search.
    pub fn search(&self, query: &str) -> ApiResult<Vec<Product>> {
        let query = validate_search_query(query)?;
        Ok(self.records.products().search(&self.store_id, &query))
    }

    /// One product's page. Inactive and foreign products read as missing.
    pub fn product(&self, product_id: &str) -> ApiResult<Product> {
        self.records
            .products()
            .get_by_id(product_id)
            .filter(|p| p.is_active && p.store_id == self.store_id)
            .ok_or_else(|| ApiError::not_found("Product", product_id))
    }

    /// Payment methods the customer can pick at checkout.
    ///
    /// The platform list filtered down to active entries this store
    /// accepts, in the store's configured order.
    pub fn payment_options(&self) -> ApiResult<Vec<PaymentMethodRecord>> {
        let store = self.store()?;
        let methods = self.records.payment_methods();

        Ok(store
            .payment_method_ids
            .iter()
            .filter_map(|id| methods.get_by_id(id))
            .filter(|m| m.is_active)
            .collect())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart totals for the header badge.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// Adds a product to the cart, merging with an existing line.
    ///
    /// ## Errors
    /// * `NOT_FOUND` - Unknown or inactive product
    /// * `CART_ERROR` - Product of another store, or distinct-line cap hit
    /// * `VALIDATION_ERROR` - Non-positive, fractional-counted or over-cap
    ///   quantity
    /// * `INSUFFICIENT_STOCK` - Merged line quantity exceeds stock
    pub fn add_to_cart(&mut self, product_id: &str, quantity: Quantity) -> ApiResult<CartTotals> {
        let product = self.sellable_product(product_id)?;

        validate_quantity(quantity, product.unit)?;

        let existing_millis = self
            .cart
            .items
            .iter()
            .find(|i| i.product_id == product.id)
            .map(|i| i.quantity_millis)
            .unwrap_or(0);
        let merged = Quantity::from_millis(existing_millis + quantity.millis());

        validate_quantity(merged, product.unit)?;

        if existing_millis == 0 {
            validate_cart_size(self.cart.item_count())?;
        }

        if !product.can_fulfill(merged) {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock(),
                requested: merged,
            }
            .into());
        }

        debug!(
            product_id = %product.id,
            quantity_millis = quantity.millis(),
            "Adding product to cart"
        );

        self.cart.dispatch(CartAction::AddItem { product, quantity });
        self.persist_cart();
        Ok(self.totals())
    }

    /// Replaces a line's quantity. Zero or less removes the line.
    ///
    /// Raising a quantity re-checks the live product, so a since-
    /// deactivated product can be removed but not increased.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: Quantity,
    ) -> ApiResult<CartTotals> {
        if quantity.is_positive() {
            let product = self.sellable_product(product_id)?;
            validate_quantity(quantity, product.unit)?;

            if !product.can_fulfill(quantity) {
                return Err(CoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock(),
                    requested: quantity,
                }
                .into());
            }
        }

        self.cart.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.to_string(),
            quantity,
        });
        self.persist_cart();
        Ok(self.totals())
    }

    /// Drops a line from the cart. A no-op when absent.
    pub fn remove_from_cart(&mut self, product_id: &str) -> CartTotals {
        self.cart.dispatch(CartAction::RemoveItem {
            product_id: product_id.to_string(),
        });
        self.persist_cart();
        self.totals()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// The current checkout stage.
    pub fn stage(&self) -> CheckoutStage {
        self.flow.stage
    }

    /// The currently selected delivery method.
    pub fn delivery_method(&self) -> DeliveryMethod {
        self.flow.delivery_method
    }

    /// Moves from Cart to Checkout.
    pub fn begin_checkout(&mut self) -> ApiResult<()> {
        self.flow.begin_checkout(&self.cart)?;
        debug!("Checkout started");
        Ok(())
    }

    /// Returns from Checkout to Cart for more editing.
    pub fn back_to_cart(&mut self) -> ApiResult<()> {
        self.flow.back_to_cart()?;
        Ok(())
    }

    /// Records the customer's delivery choice.
    ///
    /// ## Errors
    /// * `BUSINESS_LOGIC` - The store does not offer that method
    pub fn set_delivery_method(&mut self, method: DeliveryMethod) -> ApiResult<()> {
        let store = self.store()?;
        if !store.offers(method) {
            return Err(ApiError::new(
                ErrorCode::BusinessLogic,
                format!("This store does not offer {}", method_label(method)),
            ));
        }
        self.flow.set_delivery_method(method);
        Ok(())
    }

    /// Records the customer's checkout note.
    pub fn set_observations(&mut self, note: &str) -> ApiResult<()> {
        validate_observations(note)?;
        self.flow.set_observations(note);
        Ok(())
    }

    /// The amounts for the checkout screen under the chosen method.
    pub fn checkout_totals(&self) -> ApiResult<CheckoutTotals> {
        let store = self.store()?;
        let method = self.flow.delivery_method;

        let subtotal_cents = self.cart.subtotal_cents();
        let total_cents = checkout_total(&self.cart, &store, method).cents();

        Ok(CheckoutTotals {
            subtotal_cents,
            delivery_fee_cents: total_cents - subtotal_cents,
            total_cents,
        })
    }

    /// Records the order and moves the flow to Success.
    ///
    /// ## Steps
    /// 1. Stage and cart checks (must be in Checkout with a non-empty cart)
    /// 2. Delivery method still offered, payment method accepted
    /// 3. Identity: signed-in customer, or a validated walk-in name
    /// 4. Address required for delivery
    /// 5. Every line re-checked against the live catalog
    /// 6. Order appended, cart cleared and persisted, flow → Success
    ///
    /// ## Errors
    /// * `BUSINESS_LOGIC` - Wrong stage, or method no longer offered
    /// * `VALIDATION_ERROR` - Missing walk-in name, missing address,
    ///   payment method not accepted
    /// * `NOT_FOUND` / `INSUFFICIENT_STOCK` - A line no longer sellable
    pub fn confirm_order(&mut self, request: &OrderRequest) -> ApiResult<Order> {
        if self.flow.stage != CheckoutStage::Checkout {
            return Err(CoreError::InvalidCheckoutStage {
                current: self.flow.stage.as_str().to_string(),
            }
            .into());
        }
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let store = self.store()?;
        let method = self.flow.delivery_method;
        if !store.offers(method) {
            return Err(ApiError::new(
                ErrorCode::BusinessLogic,
                format!("This store no longer offers {}", method_label(method)),
            ));
        }

        let payment = self.accepted_payment(&store, &request.payment_method_id)?;
        let (customer_id, customer_name) = self.order_identity(request)?;
        let (address, reference) = delivery_fields(method, request)?;

        let fee_cents = store
            .delivery_option(method)
            .map(|option| option.checkout_fee().cents())
            .unwrap_or(0);

        // Stock may have moved since the lines were added
        for item in &self.cart.items {
            let product = self
                .records
                .products()
                .get_by_id(&item.product_id)
                .filter(|p| p.is_active)
                .ok_or_else(|| CoreError::ProductNotFound(item.product_id.clone()))?;

            if !product.can_fulfill(item.quantity()) {
                return Err(CoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock(),
                    requested: item.quantity(),
                }
                .into());
            }
        }

        let items: Vec<OrderItem> = self
            .cart
            .items
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id.clone(),
                name_snapshot: item.name.clone(),
                unit: item.unit,
                unit_price_cents: item.unit_price_cents,
                quantity_millis: item.quantity_millis,
                line_total_cents: item.line_total_cents(),
            })
            .collect();

        let subtotal_cents = self.cart.subtotal_cents();
        let now = Utc::now();

        let order = Order {
            id: generate_order_id(),
            store_id: store.id.clone(),
            customer_id,
            customer_name,
            items,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: payment.name,
            delivery: DeliveryDetails {
                method,
                address,
                reference,
                fee_cents,
            },
            observations: self.flow.observations_note(),
            subtotal_cents,
            total_cents: subtotal_cents + fee_cents,
            created_at: now,
            updated_at: now,
            version: 0,
        };

        let recorded = self.records.orders().append(order)?;

        self.cart.dispatch(CartAction::ClearCart);
        self.persist_cart();
        self.flow.complete()?;

        info!(
            order_id = %recorded.id,
            store_id = %recorded.store_id,
            total_cents = recorded.total_cents,
            "Order confirmed"
        );

        Ok(recorded)
    }

    /// Leaves the Success screen and starts a fresh visit.
    pub fn reset_flow(&mut self) {
        self.flow.reset();
    }

    /// The signed-in customer's orders at this store, newest first.
    ///
    /// Empty for anonymous visits; the page prompts a login instead.
    pub fn my_orders(&self) -> Vec<Order> {
        match &self.customer {
            Some(user) => self
                .records
                .orders()
                .list_by_user(&user.id)
                .into_iter()
                .filter(|o| o.store_id == self.store_id)
                .collect(),
            None => Vec::new(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Resolves a product that can be sold in this session.
    fn sellable_product(&self, product_id: &str) -> ApiResult<Product> {
        let product = self
            .records
            .products()
            .get_by_id(product_id)
            .filter(|p| p.is_active)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if product.store_id != self.store_id {
            return Err(CoreError::StoreMismatch {
                product_id: product.id.clone(),
                product_store: product.store_id.clone(),
                cart_store: self.store_id.clone(),
            }
            .into());
        }

        Ok(product)
    }

    /// Resolves the payment method the store accepts for this order.
    ///
    /// Unknown, inactive and unaccepted ids all read the same to the
    /// customer.
    fn accepted_payment(
        &self,
        store: &Store,
        payment_method_id: &str,
    ) -> ApiResult<PaymentMethodRecord> {
        self.records
            .payment_methods()
            .get_by_id(payment_method_id)
            .filter(|m| m.is_active && store.payment_method_ids.iter().any(|id| id == &m.id))
            .ok_or_else(|| {
                ApiError::validation("This store does not accept that payment method")
            })
    }

    /// Who the order is for: the signed-in customer, or a walk-in name.
    fn order_identity(&self, request: &OrderRequest) -> ApiResult<(Option<String>, String)> {
        if let Some(user) = &self.customer {
            return Ok((Some(user.id.clone()), user.name.clone()));
        }

        let raw = request.customer_name.as_deref().unwrap_or("");
        validate_customer_name(raw)?;
        Ok((None, raw.trim().to_string()))
    }

    /// Persists the cart snapshot, best-effort.
    ///
    /// A failed write keeps the in-memory cart authoritative; it only
    /// costs the restore after a restart.
    fn persist_cart(&self) {
        match serde_json::to_string(&self.cart) {
            Ok(json) => {
                if let Err(e) = self.session.set(SESSION_CART_KEY, &json) {
                    warn!("Could not persist cart snapshot: {}", e);
                }
            }
            Err(e) => warn!("Could not serialize cart snapshot: {}", e),
        }
    }
}

/// Restores the persisted cart for `store_id`, or starts a fresh one.
fn restore_cart(session: &dyn SessionStore, store_id: &str) -> Cart {
    let Some(json) = session.get(SESSION_CART_KEY) else {
        return Cart::new(store_id);
    };

    match serde_json::from_str::<Cart>(&json) {
        Ok(cart) if cart.store_id == store_id => {
            debug!(lines = cart.item_count(), "Restored persisted cart");
            cart
        }
        Ok(cart) => {
            debug!(
                snapshot_store = %cart.store_id,
                "Discarding cart persisted for another store"
            );
            Cart::new(store_id)
        }
        Err(e) => {
            warn!("Discarding unreadable cart snapshot: {}", e);
            Cart::new(store_id)
        }
    }
}

/// Address and reference fields for the chosen method.
///
/// Pickup ignores any submitted address; delivery requires one.
fn delivery_fields(
    method: DeliveryMethod,
    request: &OrderRequest,
) -> ApiResult<(Option<String>, Option<String>)> {
    match method {
        DeliveryMethod::Pickup => Ok((None, None)),
        DeliveryMethod::Delivery => {
            let raw = request.address.as_deref().unwrap_or("");
            validate_address(raw)?;

            let reference = request
                .reference
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from);

            Ok((Some(raw.trim().to_string()), reference))
        }
    }
}

const fn method_label(method: DeliveryMethod) -> &'static str {
    match method {
        DeliveryMethod::Pickup => "pickup",
        DeliveryMethod::Delivery => "delivery",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
