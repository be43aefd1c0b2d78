//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many storefront systems:                                            │
//! │    R$ 10,00 / 3 = R$ 3,33 (×3 = R$ 9,99)  → Lost R$ 0,01!              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    1000 centavos / 3 = 333 centavos (×3 = 999 centavos)                │
//! │    We KNOW we lost 1 centavo, and handle it explicitly                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tenantflow_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // R$ 10,99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // R$ 21,98
//! let total = price + Money::from_cents(500); // R$ 15,99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Quantity;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (centavos for BRL).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and comparisons
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price_cents ──┬──► CartItem.unit_price ──► CartItem.line_total │
/// │                        │                                                │
/// │                        └──► Displayed as "R$ 10,99" in UI               │
/// │                                                                         │
/// │  Cart.subtotal ──► Delivery Fee ──► Order.total ──► Report Revenue     │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tenantflow_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The record store, calculations, and API all use cents.
    /// Only the UI converts to reais for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (reais and centavos).
    ///
    /// ## Example
    /// ```rust
    /// use tenantflow_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -R$ 5,50 (refund)
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -R$ 5,50, not -R$ 4,50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    ///
    /// ## Example
    /// ```rust
    /// use tenantflow_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.reais(), 10);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.reais(), -5);
    /// ```
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use tenantflow_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.centavos_part(), 99);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.centavos_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a fixed-point quantity, rounding half up.
    ///
    /// ## Why Not Plain Multiplication?
    /// Weight-based products sell fractional amounts: 1.5 kg of cheese at
    /// R$ 25,99/kg is 38.985 reais, which has no exact centavo value. The
    /// line total must land on a whole centavo, so we round once here and
    /// every later sum is exact integer math.
    ///
    /// ## Implementation
    /// Quantities carry thousandths, so: `(cents * millis + 500) / 1000`
    /// The +500 provides rounding (500/1000 = 0.5). i128 prevents overflow
    /// on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use tenantflow_core::money::Money;
    /// use tenantflow_core::types::Quantity;
    ///
    /// let per_kg = Money::from_cents(2599);            // R$ 25,99 per kg
    /// let line = per_kg.multiply_quantity(Quantity::from_millis(1500)); // 1.5 kg
    /// assert_eq!(line.cents(), 3899);                  // R$ 38,99
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Queijo Minas R$ 25,99/kg
    /// Quantity: 1.5 kg
    ///      │
    ///      ▼
    /// multiply_quantity(1.500) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: R$ 38,99
    /// ```
    pub const fn multiply_quantity(&self, qty: Quantity) -> Self {
        let total = (self.0 as i128 * qty.millis() as i128 + 500) / 1000;
        Money(total as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            self.reais().abs(),
            self.centavos_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for whole-unit quantities).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
