//! Wire-boundary conversion between [`Money`] and JSON numbers.
//!
//! | Direction              | Function             |
//! |------------------------|----------------------|
//! | internal → backend     | [`Money::to_wire`]   |
//! | backend → internal     | [`Money::from_wire`] |
//!
//! The serde impls below are the only other callers. Deserialization also
//! accepts decimal strings (`"25.90"`), which some backends emit for
//! NUMERIC columns.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Money;

/// Scale factor: 1 currency unit = 1_000_000 micros.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Errors returned when a value cannot be represented as [`Money`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Input was `NaN` or infinite.
    NotFinite,
    /// Input would overflow `i64` after scaling by [`MICROS_PER_UNIT`].
    OutOfRange,
    /// Decimal text could not be parsed.
    Malformed(String),
}

impl std::fmt::Display for MoneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoneyError::NotFinite => write!(f, "money: non-finite input (NaN or Inf)"),
            MoneyError::OutOfRange => write!(f, "money: amount out of range"),
            MoneyError::Malformed(raw) => write!(f, "money: malformed decimal '{raw}'"),
        }
    }
}

impl std::error::Error for MoneyError {}

impl Money {
    /// Convert to `f64` for a JSON request body.
    pub fn to_wire(self) -> f64 {
        self.micros() as f64 / MICROS_PER_UNIT as f64
    }

    /// Convert a JSON number into micros, rounding to the nearest micro.
    pub fn from_wire(value: f64) -> Result<Money, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let scaled = value * MICROS_PER_UNIT as f64;
        // f64 -> i64 casts saturate; reject instead.
        if scaled > i64::MAX as f64 || scaled < i64::MIN as f64 {
            return Err(MoneyError::OutOfRange);
        }
        Ok(Money::from_micros(scaled.round() as i64))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a decimal amount as a number or string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_wire(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(MICROS_PER_UNIT)
            .map(Money::from_micros)
            .ok_or_else(|| E::custom(MoneyError::OutOfRange))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(MoneyError::OutOfRange))?;
        self.visit_i64(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse_decimal(v).map_err(E::custom)
    }
}
