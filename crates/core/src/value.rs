//! Raw data-point values and their type classifications.
//!
//! Cache entries and condition literals are either numeric or textual.
//! All numerics use `rust_decimal::Decimal` -- never `f64` -- so that
//! threshold comparisons see exactly the value the host stored.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ──────────────────────────────────────────────
// Runtime values
// ──────────────────────────────────────────────

/// A raw data-point value as the cache or a rule definition holds it.
///
/// JSON numbers deserialize to `Number`, JSON strings to `Text`
/// verbatim. A `Text` with numeric content stays textual until
/// [`Value::coerced`] is applied at resolution time; literals supplied
/// on a condition are never coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(Decimal),
    Text(String),
}

impl Value {
    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(d) => Some(*d),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s),
        }
    }

    /// Numeric-string coercion applied to cache-resolved field values.
    ///
    /// A `Text` whose entire trimmed content parses as a decimal
    /// (plain or scientific notation) becomes `Number`; anything else
    /// is returned unchanged. A field stored as `"5"` is therefore
    /// compared numerically, while `"5 bar"` stays textual.
    pub fn coerced(&self) -> Value {
        match self {
            Value::Number(_) => self.clone(),
            Value::Text(s) => match parse_numeric(s) {
                Some(d) => Value::Number(d),
                None => self.clone(),
            },
        }
    }
}

fn parse_numeric(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(d) => write!(f, "{}", d),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(d) => {
                if d.is_integer() {
                    if let Some(n) = d.to_i64() {
                        return serializer.serialize_i64(n);
                    }
                }
                match d.to_f64() {
                    Some(n) => serializer.serialize_f64(n),
                    // Out of f64 range; the string form at least survives.
                    None => serializer.serialize_str(&d.to_string()),
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a string")
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
                Ok(Value::Number(Decimal::from(n)))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
                Ok(Value::Number(Decimal::from(n)))
            }

            fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
                Decimal::from_f64_retain(n)
                    .map(Value::Number)
                    .ok_or_else(|| E::custom(format!("number out of range: {}", n)))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
                Ok(Value::Text(s.to_string()))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
                Ok(Value::Text(s))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// ──────────────────────────────────────────────
// Type classifications
// ──────────────────────────────────────────────

/// Semantic type of a field, as declared by the widget configuration.
///
/// `Enum` shares the numeric comparison semantics (stored values are
/// numeric codes) but maps to a distinct UI input classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    #[serde(rename = "string")]
    Text,
    Enum,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::Text => "string",
            ValueType::Enum => "enum",
        }
    }

    /// The UI input widget used to collect comparison operands of
    /// this type.
    pub fn input_type(self) -> InputType {
        match self {
            ValueType::Number => InputType::Number,
            ValueType::Text => InputType::Text,
            ValueType::Enum => InputType::Select,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI input-type tag handed to the operation picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Number,
    Text,
    Select,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Number => "number",
            InputType::Text => "text",
            InputType::Select => "select",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
