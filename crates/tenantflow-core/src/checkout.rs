//! # Checkout Flow
//!
//! The staged state machine a storefront visit walks through to turn a
//! cart into an order.
//!
//! ## Stage Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Stages                                    │
//! │                                                                         │
//! │            begin_checkout()            complete()                       │
//! │   ┌──────┐ (cart not empty) ┌─────────┐ (order recorded) ┌─────────┐   │
//! │   │ Cart │ ───────────────► │Checkout │ ───────────────► │ Success │   │
//! │   └──────┘                  └─────────┘                  └─────────┘   │
//! │       ▲                          │                            │        │
//! │       │                          │ back_to_cart()             │        │
//! │       │◄─────────────────────────┘                            │        │
//! │       │                                                       │        │
//! │       │◄──────────────────────────────────────────────────────┘        │
//! │                             reset()                                     │
//! │                                                                         │
//! │   There is NO path from Success back to Checkout: a finished order     │
//! │   can only be followed by a fresh flow.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - `begin_checkout` requires a non-empty cart
//! - `complete` is called by the storefront service only AFTER the order
//!   append succeeded, so a store failure leaves the flow in Checkout with
//!   the cart intact and the customer can retry
//! - `reset` returns to Cart, reverts delivery to Pickup and clears the
//!   observations note

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DeliveryMethod, Store};

// =============================================================================
// Checkout Stage
// =============================================================================

/// Where a storefront visit currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Browsing and cart editing.
    Cart,
    /// Filling delivery, payment and contact details.
    Checkout,
    /// Order recorded; confirmation screen.
    Success,
}

impl CheckoutStage {
    /// Stable lowercase name, used in errors and logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Cart => "cart",
            CheckoutStage::Checkout => "checkout",
            CheckoutStage::Success => "success",
        }
    }
}

impl Default for CheckoutStage {
    fn default() -> Self {
        CheckoutStage::Cart
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// The checkout state machine plus the form state that survives stage
/// transitions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutFlow {
    pub stage: CheckoutStage,
    /// Delivery method the customer picked (defaults to Pickup).
    pub delivery_method: DeliveryMethod,
    /// Free-form note for the store owner ("no onions").
    pub observations: String,
}

impl CheckoutFlow {
    /// Creates a fresh flow at the Cart stage.
    pub fn new() -> Self {
        CheckoutFlow {
            stage: CheckoutStage::Cart,
            delivery_method: DeliveryMethod::Pickup,
            observations: String::new(),
        }
    }

    /// Moves from Cart to Checkout.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when the cart has no items
    /// - [`CoreError::InvalidCheckoutStage`] when called from Success
    ///
    /// Calling it while already in Checkout is a no-op.
    pub fn begin_checkout(&mut self, cart: &Cart) -> CoreResult<()> {
        match self.stage {
            CheckoutStage::Cart | CheckoutStage::Checkout => {
                if cart.is_empty() {
                    return Err(CoreError::EmptyCart);
                }
                self.stage = CheckoutStage::Checkout;
                Ok(())
            }
            CheckoutStage::Success => Err(self.stage_error()),
        }
    }

    /// Returns from Checkout to Cart so the customer can keep editing.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidCheckoutStage`] when called from Success
    pub fn back_to_cart(&mut self) -> CoreResult<()> {
        match self.stage {
            CheckoutStage::Cart | CheckoutStage::Checkout => {
                self.stage = CheckoutStage::Cart;
                Ok(())
            }
            CheckoutStage::Success => Err(self.stage_error()),
        }
    }

    /// Moves from Checkout to Success.
    ///
    /// Only the storefront service calls this, and only after the order
    /// append succeeded.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidCheckoutStage`] unless currently in Checkout
    pub fn complete(&mut self) -> CoreResult<()> {
        if self.stage != CheckoutStage::Checkout {
            return Err(self.stage_error());
        }
        self.stage = CheckoutStage::Success;
        Ok(())
    }

    /// Starts over: Cart stage, Pickup delivery, cleared observations.
    ///
    /// This is the only way out of Success.
    pub fn reset(&mut self) {
        self.stage = CheckoutStage::Cart;
        self.delivery_method = DeliveryMethod::Pickup;
        self.observations.clear();
    }

    /// Records the customer's delivery choice.
    pub fn set_delivery_method(&mut self, method: DeliveryMethod) {
        self.delivery_method = method;
    }

    /// Records the customer's note, trimming blanks to empty.
    pub fn set_observations(&mut self, note: &str) {
        self.observations = note.trim().to_string();
    }

    /// The observations note as an order field (None when blank).
    pub fn observations_note(&self) -> Option<String> {
        if self.observations.is_empty() {
            None
        } else {
            Some(self.observations.clone())
        }
    }

    fn stage_error(&self) -> CoreError {
        CoreError::InvalidCheckoutStage {
            current: self.stage.as_str().to_string(),
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// The amount charged at checkout: cart subtotal plus the delivery fee of
/// the chosen method.
///
/// A fee is charged only for an enabled Delivery option with a fixed fee.
/// Pickup, an unconfigured or disabled method, and variable-fee options
/// all contribute zero (variable fees are settled on fulfilment). Callers
/// reject unoffered methods before getting here; this stays total so
/// display code can call it on any state.
pub fn checkout_total(cart: &Cart, store: &Store, method: DeliveryMethod) -> Money {
    let fee = store
        .delivery_option(method)
        .map(|option| option.checkout_fee())
        .unwrap_or_else(Money::zero);
    cart.subtotal() + fee
}

// =============================================================================
// Unit Tests
// =============================================================================
