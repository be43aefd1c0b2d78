//! # Domain Types
//!
//! Core domain types used throughout TenantFlow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │      Store      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  store_id (FK)  │   │  store_id (FK)  │   │  slug (business)│       │
//! │  │  price_cents    │   │  status         │   │  delivery opts  │       │
//! │  │  unit           │   │  total_cents    │   │  payment ids    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Quantity     │   │   OrderStatus   │   │  PaymentStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  millis (i64)   │   │  Pending        │   │  Pending        │       │
//! │  │  1500 = 1.5 kg  │   │  Processing...  │   │  Paid           │       │
//! │  └─────────────────┘   │  Cancelled      │   │  Rejected       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for record relations
//! - Business ID where one exists: (store slug, user email) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Quantity
// =============================================================================

/// A product quantity in fixed-point thousandths.
///
/// ## Why Thousandths?
/// Weight-based products sell fractional amounts (1.5 kg, 0.25 kg) and
/// floats are banned from money math. One thousandth of a unit is the
/// finest granularity a scale produces here, so:
/// 1000 = 1 unit/kg/g, 1500 = 1.5, 250 = 0.25
///
/// Count-based products use whole multiples of 1000; validation enforces it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Quantity(millis)
    }

    /// Creates a whole-unit quantity (3 units, 2 kg).
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Returns the quantity in thousandths.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit part (truncated).
    #[inline]
    pub const fn whole_units(&self) -> i64 {
        self.0 / 1000
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the quantity is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the quantity is a whole number of units.
    ///
    /// Count-based products (sold per piece) must satisfy this.
    #[inline]
    pub const fn is_whole(&self) -> bool {
        self.0 % 1000 == 0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

/// Display trims trailing zeros: 1500 → "1.5", 3000 → "3", 1050 → "1.05".
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 1000).abs();
        let frac = (self.0 % 1000).abs();
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let frac = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, whole, frac.trim_end_matches('0'))
        }
    }
}

/// Addition of two quantities (cart line merging).
impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

// =============================================================================
// Product Unit
// =============================================================================

/// How a product is measured and sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductUnit {
    /// Sold per piece (whole quantities only).
    Unit,
    /// Sold by weight in kilograms.
    Kilogram,
    /// Sold by weight in grams.
    Gram,
}

impl ProductUnit {
    /// Checks if the product is sold by weight (fractional quantities allowed).
    #[inline]
    pub const fn is_weight_based(&self) -> bool {
        matches!(self, ProductUnit::Kilogram | ProductUnit::Gram)
    }

    /// Short label for receipts and logs.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductUnit::Unit => "un",
            ProductUnit::Kilogram => "kg",
            ProductUnit::Gram => "g",
        }
    }
}

impl Default for ProductUnit {
    fn default() -> Self {
        ProductUnit::Unit
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry offered by a store.
///
/// Products are immutable from the storefront's point of view: placing an
/// order never mutates one. Stock changes only through dashboard edits.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Store this product belongs to.
    pub store_id: String,

    /// Category for grouping and reports (None = uncategorized).
    pub category_id: Option<String>,

    /// Display name shown on the storefront.
    pub name: String,

    /// Optional description for the product page.
    pub description: Option<String>,

    /// Price in cents per unit of measure.
    pub price_cents: i64,

    /// How the product is measured (per piece or by weight).
    pub unit: ProductUnit,

    /// Image shown on the storefront card.
    pub image_url: Option<String>,

    /// Current stock in quantity thousandths, never negative.
    pub stock_millis: i64,

    /// Whether product is visible and purchasable (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the current stock as a Quantity.
    #[inline]
    pub fn stock(&self) -> Quantity {
        Quantity::from_millis(self.stock_millis)
    }

    /// Checks if the requested quantity can be fulfilled from stock.
    pub fn can_fulfill(&self, quantity: Quantity) -> bool {
        self.stock() >= quantity
    }
}

// =============================================================================
// Category
// =============================================================================

/// A per-store grouping of products, used by catalog filters and reports.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub store_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order was placed and awaits the store owner.
    Pending,
    /// Store owner is preparing the order.
    Processing,
    /// Order left the store (or awaits pickup).
    Shipped,
    /// Order reached the customer.
    Delivered,
    /// Order was cancelled; excluded from revenue reports.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Settlement status of an order's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting confirmation (Pix not yet received, cash on delivery).
    Pending,
    /// Payment confirmed by the store owner.
    Paid,
    /// Payment failed or was refused.
    Rejected,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Customer collects at the store.
    Pickup,
    /// Store delivers to the customer's address.
    Delivery,
}

impl Default for DeliveryMethod {
    fn default() -> Self {
        DeliveryMethod::Pickup
    }
}

/// How a delivery fee is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    /// A fixed amount charged at checkout.
    Fixed,
    /// Negotiated per order (distance based); nothing charged at checkout.
    Variable,
}

/// A delivery option a store offers.
///
/// A store configures at most one option per [`DeliveryMethod`]. The
/// dashboard may keep a configured option around but disabled; the
/// storefront treats a disabled option as absent.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryOption {
    pub method: DeliveryMethod,
    /// Whether customers may currently choose this option.
    pub enabled: bool,
    pub fee_type: FeeType,
    /// Fee in cents. Only meaningful for [`FeeType::Fixed`].
    pub fee_cents: i64,
    /// Free-form text shown at checkout ("Entrega em até 2h no centro").
    pub details: Option<String>,
}

impl DeliveryOption {
    /// Returns the fee as Money.
    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_cents(self.fee_cents)
    }

    /// The fee actually charged at checkout time.
    ///
    /// Charged only when the option is enabled with a fixed fee.
    /// Variable fees are settled outside the order total, so they
    /// contribute zero here.
    pub fn checkout_fee(&self) -> Money {
        if !self.enabled {
            return Money::zero();
        }
        match self.fee_type {
            FeeType::Fixed => self.fee(),
            FeeType::Variable => Money::zero(),
        }
    }
}

/// Delivery terms frozen onto an order at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryDetails {
    pub method: DeliveryMethod,
    /// Destination address. Required when method is Delivery.
    pub address: Option<String>,
    /// Landmark note helping the courier ("próximo à padaria").
    pub reference: Option<String>,
    /// Fee charged at checkout (frozen).
    pub fee_cents: i64,
}

impl DeliveryDetails {
    /// Returns the charged fee as Money.
    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_cents(self.fee_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product data at time of purchase.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub product_id: String,
    /// Product name at time of purchase (frozen).
    pub name_snapshot: String,
    /// Unit of measure at time of purchase (frozen).
    pub unit: ProductUnit,
    /// Unit price in cents at time of purchase (frozen).
    pub unit_price_cents: i64,
    /// Quantity purchased, in thousandths.
    pub quantity_millis: i64,
    /// Line total (unit_price × quantity, rounded half up).
    pub line_total_cents: i64,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the purchased quantity.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_millis(self.quantity_millis)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// A confirmed customer order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub store_id: String,
    /// Registered customer, if any (None = walk-in checkout).
    pub customer_id: Option<String>,
    /// Customer name at time of purchase (frozen).
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Chosen payment method name ("Pix", "Dinheiro"); opaque to the system.
    pub payment_method: String,
    pub delivery: DeliveryDetails,
    /// Free-form note the customer left at checkout.
    pub observations: Option<String>,
    /// Sum of line totals in cents.
    pub subtotal_cents: i64,
    /// Subtotal plus delivery fee in cents.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency version; bumped on every status update.
    pub version: i64,
}

impl Order {
    /// Returns the items subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the charged total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Number of distinct lines in the order.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Cancelled orders are excluded from every revenue report.
    #[inline]
    pub fn counts_for_reports(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }
}

// =============================================================================
// Store
// =============================================================================

/// Links a store shows on its public page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub facebook: Option<String>,
}

/// A tenant storefront.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Store {
    pub id: String,
    /// User who owns and administers this store.
    pub owner_id: String,
    pub name: String,
    /// URL-safe business identifier; unique across all stores.
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    /// Contact phone shown on the storefront (WhatsApp).
    pub phone: Option<String>,
    /// At most one option per delivery method.
    pub delivery_options: Vec<DeliveryOption>,
    /// Payment methods this store accepts, by record id.
    pub payment_method_ids: Vec<String>,
    /// Key customers transfer Pix payments to; shown at checkout.
    pub pix_key: Option<String>,
    pub social: SocialLinks,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Looks up the configured option for a delivery method, enabled
    /// or not. Dashboard editing wants the raw entry.
    pub fn delivery_option(&self, method: DeliveryMethod) -> Option<&DeliveryOption> {
        self.delivery_options.iter().find(|o| o.method == method)
    }

    /// Checks if customers may currently choose the given method.
    ///
    /// Pickup needs no configuration: a store with no Pickup entry
    /// still hands orders over the counter. Delivery must be
    /// configured and enabled.
    pub fn offers(&self, method: DeliveryMethod) -> bool {
        match self.delivery_option(method) {
            Some(option) => option.enabled,
            None => method == DeliveryMethod::Pickup,
        }
    }
}

// =============================================================================
// Users & Identity
// =============================================================================

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Store owner; manages one store's catalog and orders.
    Lojista,
    /// Shopper.
    Cliente,
}

impl Default for Role {
    fn default() -> Self {
        Role::Cliente
    }
}

/// A registered user account.
///
/// Credentials are out of scope here; identity arrives pre-authenticated.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Business identifier; unique across users.
    pub email: String,
    pub role: Role,
    /// The store this user owns (set for Lojista).
    pub store_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// The identity projection persisted in the session.
///
/// A deliberate subset of [`User`]: enough to render the header and
/// authorize dashboard calls, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub store_id: Option<String>,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        CurrentUser {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            store_id: user.store_id.clone(),
        }
    }
}

// =============================================================================
// Payment Methods
// =============================================================================

/// A payment method available on the platform ("Pix", "Dinheiro").
///
/// The system treats these as opaque labels: no processor integration.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentMethodRecord {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_from_units() {
        let qty = Quantity::from_units(3);
        assert_eq!(qty.millis(), 3000);
        assert_eq!(qty.whole_units(), 3);
        assert!(qty.is_whole());
    }

    #[test]
    fn test_quantity_fractional() {
        let qty = Quantity::from_millis(1500);
        assert_eq!(qty.whole_units(), 1);
        assert!(!qty.is_whole());
        assert!(qty.is_positive());
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from_units(3).to_string(), "3");
        assert_eq!(Quantity::from_millis(1500).to_string(), "1.5");
        assert_eq!(Quantity::from_millis(1050).to_string(), "1.05");
        assert_eq!(Quantity::from_millis(1005).to_string(), "1.005");
        assert_eq!(Quantity::from_millis(250).to_string(), "0.25");
        assert_eq!(Quantity::zero().to_string(), "0");
    }

    #[test]
    fn test_quantity_add() {
        let mut qty = Quantity::from_units(1);
        qty += Quantity::from_millis(500);
        assert_eq!(qty.millis(), 1500);
    }

    #[test]
    fn test_unit_predicates() {
        assert!(!ProductUnit::Unit.is_weight_based());
        assert!(ProductUnit::Kilogram.is_weight_based());
        assert!(ProductUnit::Gram.is_weight_based());
        assert_eq!(ProductUnit::Kilogram.label(), "kg");
    }

    #[test]
    fn test_product_can_fulfill() {
        let product = Product {
            id: "p1".to_string(),
            store_id: "s1".to_string(),
            category_id: None,
            name: "Queijo Minas".to_string(),
            description: None,
            price_cents: 2599,
            unit: ProductUnit::Kilogram,
            image_url: None,
            stock_millis: 2000,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(product.can_fulfill(Quantity::from_millis(1500)));
        assert!(product.can_fulfill(Quantity::from_millis(2000)));
        assert!(!product.can_fulfill(Quantity::from_millis(2001)));
        assert_eq!(product.stock().millis(), 2000);
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(DeliveryMethod::default(), DeliveryMethod::Pickup);
    }

    #[test]
    fn test_delivery_option_checkout_fee() {
        let fixed = DeliveryOption {
            method: DeliveryMethod::Delivery,
            enabled: true,
            fee_type: FeeType::Fixed,
            fee_cents: 800,
            details: None,
        };
        assert_eq!(fixed.checkout_fee().cents(), 800);

        let variable = DeliveryOption {
            method: DeliveryMethod::Delivery,
            enabled: true,
            fee_type: FeeType::Variable,
            fee_cents: 0,
            details: Some("Frete combinado pelo WhatsApp".to_string()),
        };
        assert!(variable.checkout_fee().is_zero());

        // Disabled options never charge, fixed fee or not
        let disabled = DeliveryOption {
            method: DeliveryMethod::Delivery,
            enabled: false,
            fee_type: FeeType::Fixed,
            fee_cents: 800,
            details: None,
        };
        assert!(disabled.checkout_fee().is_zero());
    }

    #[test]
    fn test_store_delivery_lookup() {
        let mut store = Store {
            id: "s1".to_string(),
            owner_id: "u1".to_string(),
            name: "Empório Central".to_string(),
            slug: "emporio-central".to_string(),
            description: None,
            logo_url: None,
            phone: None,
            delivery_options: vec![DeliveryOption {
                method: DeliveryMethod::Delivery,
                enabled: true,
                fee_type: FeeType::Fixed,
                fee_cents: 500,
                details: None,
            }],
            payment_method_ids: vec![],
            pix_key: Some("contato@emporio.com".to_string()),
            social: SocialLinks::default(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // Pickup needs no configured entry
        assert!(store.offers(DeliveryMethod::Pickup));
        assert!(store.offers(DeliveryMethod::Delivery));

        // A disabled entry turns the method off
        store.delivery_options[0].enabled = false;
        assert!(!store.offers(DeliveryMethod::Delivery));
        assert!(store.delivery_option(DeliveryMethod::Delivery).is_some());
    }

    #[test]
    fn test_current_user_projection() {
        let user = User {
            id: "u1".to_string(),
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Lojista,
            store_id: Some("s1".to_string()),
            created_at: Utc::now(),
        };

        let current = CurrentUser::from(&user);
        assert_eq!(current.id, "u1");
        assert_eq!(current.role, Role::Lojista);
        assert_eq!(current.store_id.as_deref(), Some("s1"));
    }
}
