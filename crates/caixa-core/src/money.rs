//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A register that drifts by centavos over a shift will never reconcile  │
//! │  against the physical drawer count at close.                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    R$ 10,00 is stored as 1000 - exact arithmetic, always                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caixa_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_centavos(1099); // R$ 10,99
//!
//! // Arithmetic operations
//! let total = price + Money::from_centavos(500); // R$ 15,99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: A drawer balance can legitimately go negative
///   (withdrawals exceeding cash received), and signed math keeps the
///   net-balance formula branch-free
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system (opening float, sale amounts,
/// withdrawal amounts, computed totals) flows through this type. The
/// database and all calculations use centavos; only `Display` converts
/// to a `R$` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use caixa_core::money::Money;
    ///
    /// let price = Money::from_centavos(1099); // R$ 10,99
    /// assert_eq!(price.centavos(), 1099);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// For negative amounts, only the reais part should be negative:
    /// `from_reais(-5, 50)` is `- R$ 5,50`, not `- R$ 4,50`.
    ///
    /// ## Example
    /// ```rust
    /// use caixa_core::money::Money;
    ///
    /// let price = Money::from_reais(10, 99);
    /// assert_eq!(price.centavos(), 1099);
    /// ```
    #[inline]
    pub const fn from_reais(reais: i64, centavos: i64) -> Self {
        if reais < 0 {
            Money(reais * 100 - centavos)
        } else {
            Money(reais * 100 + centavos)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion.
    ///
    /// ## Example
    /// ```rust
    /// use caixa_core::money::Money;
    ///
    /// assert_eq!(Money::from_centavos(1099).reais(), 10);
    /// assert_eq!(Money::from_centavos(-550).reais(), -5);
    /// ```
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
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
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation renders the Brazilian monetary format:
/// thousands separated by `.`, decimals by `,`.
///
/// ```text
/// 123456   → "R$ 1.234,56"
/// -550     → "- R$ 5,50"
/// 0        → "R$ 0,00"
/// ```
///
/// ## Note
/// This is the reference formatting used by reports and receipts.
/// Locale-aware rendering beyond pt-BR belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "- " } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            group_thousands(self.reais().abs()),
            self.centavos_part()
        )
    }
}

/// Formats a non-negative integer with `.` thousands separators.
fn group_thousands(mut value: i64) -> String {
    debug_assert!(value >= 0);
    if value == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000, value >= 1000));
        value /= 1000;
    }

    groups
        .iter()
        .rev()
        .map(|(group, pad)| {
            if *pad {
                format!("{:03}", group)
            } else {
                group.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
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

/// Negation (for reversing a movement's direction).
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Summation over iterators of Money (used by report aggregation).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
