//! Fixed-point money type.
//!
//! # Motivation
//!
//! Menu prices and order totals are currency amounts. Summing `f64` line
//! totals drifts (`25.90 * 2 + 8.00` is not `59.80` in binary floating
//! point), so every amount in this workspace is a 1e-6 (micros) fixed-point
//! value stored as `i64`.
//!
//! `Money` wraps the raw `i64` so the type system prevents:
//! - Implicit construction from raw `i64` (no `From<i64>` impl).
//! - Mixing `Money` with quantities or ids in arithmetic.
//!
//! # Scale
//!
//! 1 currency unit = 1_000_000 micros. Quantities stay plain `u32`.
//!
//! # Wire boundary
//!
//! The backend speaks JSON numbers. `f64` conversion happens only in
//! [`wire`] (and the serde impls that call it); see that module.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

pub mod wire;

pub use wire::{MoneyError, MICROS_PER_UNIT};

// ---------------------------------------------------------------------------
// Money newtype
// ---------------------------------------------------------------------------

/// A fixed-point monetary amount at 1e-6 scale (micros).
///
/// # Construction
///
/// Use [`Money::from_micros`], [`Money::from_cents`] or
/// [`Money::parse_decimal`]. There is intentionally no `From<i64>`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero monetary amount.
    pub const ZERO: Money = Money(0);

    /// Construct from a raw micros value.
    #[inline]
    pub const fn from_micros(raw: i64) -> Self {
        Money(raw)
    }

    /// Construct from whole cents (`2590` = 25.90).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * (MICROS_PER_UNIT / 100))
    }

    /// Extract the underlying raw micros.
    #[inline]
    pub const fn micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply a unit price by an item quantity.
    ///
    /// Returns `None` if the multiplication overflows `i64`. An overflowing
    /// line total is a data error, so there is no implicit clamp.
    #[inline]
    pub fn checked_mul_qty(self, qty: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(qty)).map(Money)
    }

    /// Returns `None` if the sum overflows `i64`.
    #[inline]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Saturating addition, clamps at `i64::MAX`.
    #[inline]
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Amount rounded to whole cents, half away from zero.
    pub fn round_to_cents(self) -> i64 {
        let per_cent = MICROS_PER_UNIT / 100;
        let half = per_cent / 2;
        if self.0 >= 0 {
            (self.0 + half) / per_cent
        } else {
            (self.0 - half) / per_cent
        }
    }

    /// Parse user-entered decimal text.
    ///
    /// Accepts `"12.50"`, `"12,50"` (the first comma is read as the decimal
    /// separator), `"12"`, `".5"` and an optional leading `-`. At most six
    /// fraction digits are accepted; anything else is [`MoneyError::Malformed`].
    pub fn parse_decimal(text: &str) -> Result<Money, MoneyError> {
        let t = text.trim();
        let malformed = || MoneyError::Malformed(text.to_string());

        let (negative, body) = match t.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, t),
        };
        let body = body.replacen(',', ".", 1);

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body.as_str(), ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }
        if frac_part.len() > 6 {
            return Err(malformed());
        }

        let units: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| MoneyError::OutOfRange)?
        };
        let mut frac: i64 = 0;
        for b in frac_part.bytes() {
            frac = frac * 10 + i64::from(b - b'0');
        }
        frac *= 10_i64.pow(6 - frac_part.len() as u32);

        let micros = units
            .checked_mul(MICROS_PER_UNIT)
            .and_then(|m| m.checked_add(frac))
            .ok_or(MoneyError::OutOfRange)?;

        Ok(Money(if negative { -micros } else { micros }))
    }
}

// ---------------------------------------------------------------------------
// Arithmetic operators (closed over Money)
// ---------------------------------------------------------------------------

impl Add for Money {
    type Output = Money;
    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Two decimal places, e.g. `59.80`.
impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cents = self.round_to_cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
