//! # Money Module
//!
//! Provides the `Money` type for fine amounts and the `FineRate` type for
//! per-day overdue charges.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64 fines:                                                       │
//! │    3 days × 0.1 = 0.30000000000000004  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (cents)                             │
//! │    3 days × 10 cents = 30 cents                                        │
//! │    Rendered as "0.30" only at the edge                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The currency itself is abstract: `Display` renders `1.50`, never a symbol.
//!
//! ## Usage
//! ```rust
//! use lectern_core::money::{FineRate, Money};
//!
//! let rate = FineRate::from_cents_per_day(50); // 0.50 per day
//! let fine = rate.fine_for(3);
//! assert_eq!(fine, Money::from_cents(150));
//! assert_eq!(fine.to_string(), "1.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic never has to special-case subtraction
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use lectern_core::money::Money;
    ///
    /// let fine = Money::from_cents(250);
    /// assert_eq!(fine.cents(), 250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
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
}

// =============================================================================
// Fine Rate
// =============================================================================

/// Overdue charge per day, in cents.
///
/// ## Why Not f64?
/// Rates such as 0.30 or 0.80 are not exactly representable in binary
/// floating point. Storing 30 and 80 cents keeps every fine exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FineRate(i64);

impl FineRate {
    /// Creates a rate from cents per overdue day.
    #[inline]
    pub const fn from_cents_per_day(cents: i64) -> Self {
        FineRate(cents)
    }

    /// Returns the rate in cents per day.
    #[inline]
    pub const fn cents_per_day(&self) -> i64 {
        self.0
    }

    /// Returns the rate as a Money amount (the charge for one day).
    #[inline]
    pub const fn per_day(&self) -> Money {
        Money(self.0)
    }

    /// Calculates the fine for a number of overdue days.
    ///
    /// ## Example
    /// ```rust
    /// use lectern_core::money::FineRate;
    ///
    /// // Textbook: 0.30 per day, 5 days late
    /// let fine = FineRate::from_cents_per_day(30).fine_for(5);
    /// assert_eq!(fine.cents(), 150);
    /// ```
    #[inline]
    pub const fn fine_for(&self, days: u32) -> Money {
        Money(self.0 * days as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `major.minor` with two minor digits and no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl fmt::Display for FineRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/day", self.per_day())
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

/// Summing fines, e.g. the total a patron owes across overdue items.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
