//! Percentage values for constraint bounds: integers stay integers, fractions stay fractions.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A constraint bound in percent.
///
/// Integer values serialize and print without a fractional part (`-1`, not `-1.0`).
/// Equality is exact per variant, so `Int(7)` and `Float(7.0)` are distinct values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percent {
    Int(i64),
    Float(f64),
}

impl Percent {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Int(_) => true,
            Self::Float(value) => value.is_finite(),
        }
    }
}

impl From<i64> for Percent {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            // `{:?}` keeps the `.0` on whole floats, matching the CSV writer.
            Self::Float(value) => write!(f, "{value:?}"),
        }
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(value) => serializer.serialize_i64(value),
            Self::Float(value) => serializer.serialize_f64(value),
        }
    }
}

struct PercentVisitor;

impl<'de> Visitor<'de> for PercentVisitor {
    type Value = Percent;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or floating-point percentage")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Percent, E> {
        Ok(Percent::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Percent, E> {
        Ok(i64::try_from(value)
            .map(Percent::Int)
            .unwrap_or(Percent::Float(value as f64)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Percent, E> {
        Ok(Percent::Float(value))
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PercentVisitor)
    }
}
