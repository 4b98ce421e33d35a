//! # Money & Quantity
//!
//! Integer-based monetary and stock arithmetic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise + Integer Grams                            │
//! │    Prices are i64 paise per kilogram                                    │
//! │    Quantities and stock levels are i64 grams                            │
//! │    A line total is one integer multiplication with explicit rounding    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use veggie_core::money::{Money, Quantity};
//!
//! let price = Money::from_paise(2500);        // ₹25.00 per kg
//! let qty = Quantity::from_grams(250);        // 250 g
//! assert_eq!(price.line_total(qty).paise(), 625); // ₹6.25
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system (catalog price, inventory price,
/// line subtotal, bill totals, tax, discount) flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use veggie_core::money::Money;
    ///
    /// let price = Money::from_paise(2099); // ₹20.99
    /// assert_eq!(price.paise(), 2099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
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

    /// Computes a line total: this price (per kilogram) times a quantity.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding:
    /// `(price_paise * qty_grams + 500) / 1000`
    /// i128 intermediates prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use veggie_core::money::{Money, Quantity};
    ///
    /// let price = Money::from_paise(2000);   // ₹20.00 per kg
    /// let qty = Quantity::from_grams(5000);  // 5 kg
    /// assert_eq!(price.line_total(qty).paise(), 10_000); // ₹100.00
    ///
    /// // 333 g at ₹9.99/kg = ₹3.327 → rounds to ₹3.33
    /// let price = Money::from_paise(999);
    /// let qty = Quantity::from_grams(333);
    /// assert_eq!(price.line_total(qty).paise(), 333);
    /// ```
    pub fn line_total(&self, qty: Quantity) -> Money {
        let total = (self.0 as i128 * qty.grams() as i128 + 500) / 1000;
        Money::from_paise(total as i64)
    }
}

/// Computes a bill's grand total: `subtotal - discount + tax`.
///
/// ## Example
/// ```rust
/// use veggie_core::money::{grand_total, Money};
///
/// let total = grand_total(
///     Money::from_paise(10_000), // subtotal ₹100
///     Money::from_paise(500),    // discount ₹5
///     Money::from_paise(200),    // tax ₹2
/// );
/// assert_eq!(total.paise(), 9_700);
/// ```
pub fn grand_total(subtotal: Money, discount: Money, tax: Money) -> Money {
    subtotal - discount + tax
}

// =============================================================================
// Money Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and the PDF renderer. API responses carry raw paise.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A weight quantity in grams.
///
/// Stock levels and bill line quantities use this type. Grams are the
/// smallest unit a shop scale reports, so no fractional arithmetic is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from grams.
    #[inline]
    pub const fn from_grams(grams: i64) -> Self {
        Quantity(grams)
    }

    /// Creates a quantity from whole kilograms.
    #[inline]
    pub const fn from_kg(kg: i64) -> Self {
        Quantity(kg * 1000)
    }

    /// Returns the quantity in grams.
    #[inline]
    pub const fn grams(&self) -> i64 {
        self.0
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// Display follows the bill convention: grams below one kilogram,
/// kilograms (with decimals only when needed) above.
///
/// ## Example
/// ```rust
/// use veggie_core::money::Quantity;
///
/// assert_eq!(Quantity::from_grams(250).to_string(), "250 g");
/// assert_eq!(Quantity::from_grams(5000).to_string(), "5 kg");
/// assert_eq!(Quantity::from_grams(1500).to_string(), "1.5 kg");
/// ```
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.abs() < 1000 {
            write!(f, "{} g", self.0)
        } else if self.0 % 1000 == 0 {
            write!(f, "{} kg", self.0 / 1000)
        } else {
            write!(f, "{} kg", self.0 as f64 / 1000.0)
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(2099);
        assert_eq!(money.paise(), 2099);
        assert_eq!(money.rupees(), 20);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(2099)), "20.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);

        let mut c = a;
        c += b;
        assert_eq!(c.paise(), 1500);
    }

    #[test]
    fn test_line_total_whole_kg() {
        // ₹20.00/kg × 5 kg = ₹100.00 (the canonical shop scenario)
        let price = Money::from_paise(2000);
        let qty = Quantity::from_kg(5);
        assert_eq!(price.line_total(qty).paise(), 10_000);
    }

    #[test]
    fn test_line_total_fractional_with_rounding() {
        // ₹9.99/kg × 333 g = 332.667 paise → 333 paise (half-up)
        let price = Money::from_paise(999);
        let qty = Quantity::from_grams(333);
        assert_eq!(price.line_total(qty).paise(), 333);

        // ₹15.00/kg × 100 g = exactly 150 paise
        let price = Money::from_paise(1500);
        let qty = Quantity::from_grams(100);
        assert_eq!(price.line_total(qty).paise(), 150);
    }

    #[test]
    fn test_line_total_large_amounts_no_overflow() {
        // ₹10,000/kg × 1000 kg does not overflow the intermediate
        let price = Money::from_paise(1_000_000);
        let qty = Quantity::from_kg(1000);
        assert_eq!(price.line_total(qty).paise(), 1_000_000_000);
    }

    #[test]
    fn test_grand_total() {
        let total = grand_total(
            Money::from_paise(10_000),
            Money::from_paise(500),
            Money::from_paise(200),
        );
        assert_eq!(total.paise(), 9_700);

        // Defaults: no tax, no discount
        let total = grand_total(Money::from_paise(10_000), Money::zero(), Money::zero());
        assert_eq!(total.paise(), 10_000);
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from_grams(250).to_string(), "250 g");
        assert_eq!(Quantity::from_grams(999).to_string(), "999 g");
        assert_eq!(Quantity::from_grams(1000).to_string(), "1 kg");
        assert_eq!(Quantity::from_grams(5000).to_string(), "5 kg");
        assert_eq!(Quantity::from_grams(1500).to_string(), "1.5 kg");
        assert_eq!(Quantity::from_grams(1250).to_string(), "1.25 kg");
    }

    #[test]
    fn test_quantity_arithmetic() {
        let stock = Quantity::from_kg(50);
        let sold = Quantity::from_kg(5);
        assert_eq!((stock - sold).grams(), 45_000);
        assert!((sold - stock).is_negative());
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
        assert!(Quantity::zero().is_zero());
        assert!(Quantity::from_grams(1).is_positive());
    }
}
