//! The closed catalog of comparison operations.
//!
//! Each operation is one variant of a sealed enum. Predicate, operand
//! arity, applicable value types, UI label, and clause rendering are
//! all answered by exhaustive match, so adding a variant forces every
//! facet to be filled in at compile time. There is no runtime
//! registration; the registry is fixed once the crate is built.

use std::fmt;

use beacon_core::{Decimal, InputType, MalformedCondition, Value, ValueType};

/// A named, typed comparison predicate plus its UI metadata.
///
/// In every predicate, the first operand is the resolved (and
/// numeric-coerced) field value; the remaining operands are the
/// literals supplied by the rule definition, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
    GreaterThanOrEq,
    LessThanOrEq,
    Between,
    NotBetween,
    TextContains,
    TextDoesNotContain,
    TextStartsWith,
    TextEndsWith,
    TextIsExactly,
    IsUndefined,
    IsDefined,
    EnumValueIs,
    EnumValueIsNot,
}

impl Operation {
    /// The registry in catalog order, as presented to operation
    /// pickers.
    pub const ALL: [Operation; 17] = [
        Operation::EqualTo,
        Operation::NotEqualTo,
        Operation::GreaterThan,
        Operation::LessThan,
        Operation::GreaterThanOrEq,
        Operation::LessThanOrEq,
        Operation::Between,
        Operation::NotBetween,
        Operation::TextContains,
        Operation::TextDoesNotContain,
        Operation::TextStartsWith,
        Operation::TextEndsWith,
        Operation::TextIsExactly,
        Operation::IsUndefined,
        Operation::IsDefined,
        Operation::EnumValueIs,
        Operation::EnumValueIsNot,
    ];

    /// The string key rule definitions reference this operation by.
    pub fn key(self) -> &'static str {
        match self {
            Operation::EqualTo => "equalTo",
            Operation::NotEqualTo => "notEqualTo",
            Operation::GreaterThan => "greaterThan",
            Operation::LessThan => "lessThan",
            Operation::GreaterThanOrEq => "greaterThanOrEq",
            Operation::LessThanOrEq => "lessThanOrEq",
            Operation::Between => "between",
            Operation::NotBetween => "notBetween",
            Operation::TextContains => "textContains",
            Operation::TextDoesNotContain => "textDoesNotContain",
            Operation::TextStartsWith => "textStartsWith",
            Operation::TextEndsWith => "textEndsWith",
            Operation::TextIsExactly => "textIsExactly",
            Operation::IsUndefined => "isUndefined",
            Operation::IsDefined => "isDefined",
            Operation::EnumValueIs => "enumValueIs",
            Operation::EnumValueIsNot => "enumValueIsNot",
        }
    }

    /// Resolve an operation key. `None` for keys outside the registry.
    pub fn from_key(key: &str) -> Option<Operation> {
        Operation::ALL.iter().copied().find(|op| op.key() == key)
    }

    /// Human-readable name for UI selection.
    pub fn label(self) -> &'static str {
        match self {
            Operation::EqualTo => "equal to",
            Operation::NotEqualTo => "not equal to",
            Operation::GreaterThan => "greater than",
            Operation::LessThan => "less than",
            Operation::GreaterThanOrEq => "greater than or equal to",
            Operation::LessThanOrEq => "less than or equal to",
            Operation::Between => "between",
            Operation::NotBetween => "not between",
            Operation::TextContains => "contains",
            Operation::TextDoesNotContain => "does not contain",
            Operation::TextStartsWith => "starts with",
            Operation::TextEndsWith => "ends with",
            Operation::TextIsExactly => "is exactly",
            Operation::IsUndefined => "is undefined",
            Operation::IsDefined => "is defined",
            Operation::EnumValueIs => "value is",
            Operation::EnumValueIsNot => "value is not",
        }
    }

    /// The field types this operation is legal for. Non-empty; the
    /// first entry selects the UI input type.
    pub fn applies_to(self) -> &'static [ValueType] {
        match self {
            Operation::EqualTo
            | Operation::NotEqualTo
            | Operation::GreaterThan
            | Operation::LessThan
            | Operation::GreaterThanOrEq
            | Operation::LessThanOrEq
            | Operation::Between
            | Operation::NotBetween => &[ValueType::Number],
            Operation::TextContains
            | Operation::TextDoesNotContain
            | Operation::TextStartsWith
            | Operation::TextEndsWith
            | Operation::TextIsExactly => &[ValueType::Text],
            Operation::IsUndefined | Operation::IsDefined => {
                &[ValueType::Text, ValueType::Number, ValueType::Enum]
            }
            Operation::EnumValueIs | Operation::EnumValueIsNot => &[ValueType::Enum],
        }
    }

    /// Number of comparison operands beyond the field value.
    pub fn input_count(self) -> usize {
        match self {
            Operation::IsUndefined | Operation::IsDefined => 0,
            Operation::Between | Operation::NotBetween => 2,
            _ => 1,
        }
    }

    /// UI input widget for this operation's comparison operands,
    /// derived from the first applicable value type.
    pub fn input_type(self) -> InputType {
        self.applies_to()[0].input_type()
    }

    /// Render the short clause shown in rule headers, operands
    /// substituted in (for example `" between 3 and 7"`).
    pub fn describe(self, values: &[Value]) -> String {
        match self {
            Operation::EqualTo => format!(" = {}", nth(values, 0)),
            Operation::NotEqualTo => format!(" != {}", nth(values, 0)),
            Operation::GreaterThan => format!(" > {}", nth(values, 0)),
            Operation::LessThan => format!(" < {}", nth(values, 0)),
            Operation::GreaterThanOrEq => format!(" >= {}", nth(values, 0)),
            Operation::LessThanOrEq => format!(" <= {}", nth(values, 0)),
            Operation::Between => format!(" between {} and {}", nth(values, 0), nth(values, 1)),
            Operation::NotBetween => {
                format!(" not between {} and {}", nth(values, 0), nth(values, 1))
            }
            Operation::TextContains => format!(" contains {}", nth(values, 0)),
            Operation::TextDoesNotContain => format!(" does not contain {}", nth(values, 0)),
            Operation::TextStartsWith => format!(" starts with {}", nth(values, 0)),
            Operation::TextEndsWith => format!(" ends with {}", nth(values, 0)),
            Operation::TextIsExactly => format!(" is exactly {}", nth(values, 0)),
            Operation::IsUndefined => " is undefined".to_string(),
            Operation::IsDefined => " is defined".to_string(),
            Operation::EnumValueIs => format!(" is {}", nth(values, 0)),
            Operation::EnumValueIsNot => format!(" is not {}", nth(values, 0)),
        }
    }

    /// Run the predicate over the resolved field value and the rule's
    /// literal operands.
    ///
    /// `field` is `None` when the cache holds no value for the
    /// addressed entity/key; only the presence operations accept that.
    /// Wrong arity or operand types fail as [`MalformedCondition`],
    /// never as a silent `false`.
    pub fn apply(
        self,
        field: Option<&Value>,
        values: &[Value],
    ) -> Result<bool, MalformedCondition> {
        if values.len() != self.input_count() {
            return Err(MalformedCondition::Arity {
                operation: self.key().to_string(),
                expected: self.input_count(),
                got: values.len(),
            });
        }
        let require = || {
            field.ok_or_else(|| MalformedCondition::Unresolved {
                operation: self.key().to_string(),
            })
        };
        Ok(match self {
            Operation::EqualTo => self.num(require()?)? == self.num(&values[0])?,
            Operation::NotEqualTo => self.num(require()?)? != self.num(&values[0])?,
            Operation::GreaterThan => self.num(require()?)? > self.num(&values[0])?,
            Operation::LessThan => self.num(require()?)? < self.num(&values[0])?,
            Operation::GreaterThanOrEq => self.num(require()?)? >= self.num(&values[0])?,
            Operation::LessThanOrEq => self.num(require()?)? <= self.num(&values[0])?,
            Operation::Between => {
                let v = self.num(require()?)?;
                self.num(&values[0])? < v && v < self.num(&values[1])?
            }
            Operation::NotBetween => {
                let v = self.num(require()?)?;
                let lo = self.num(&values[0])?;
                let hi = self.num(&values[1])?;
                // Exact complement of `between`: true at either bound.
                !(lo < v && v < hi)
            }
            Operation::TextContains => {
                let v = self.text(require()?)?;
                let x = self.text(&values[0])?;
                !v.is_empty() && !x.is_empty() && v.contains(x)
            }
            Operation::TextDoesNotContain => {
                let v = self.text(require()?)?;
                let x = self.text(&values[0])?;
                !v.is_empty() && !x.is_empty() && !v.contains(x)
            }
            Operation::TextStartsWith => self.text(require()?)?.starts_with(self.text(&values[0])?),
            Operation::TextEndsWith => self.text(require()?)?.ends_with(self.text(&values[0])?),
            Operation::TextIsExactly => self.text(require()?)? == self.text(&values[0])?,
            Operation::IsUndefined => field.is_none(),
            Operation::IsDefined => field.is_some(),
            Operation::EnumValueIs => self.num(require()?)? == self.num(&values[0])?,
            Operation::EnumValueIsNot => self.num(require()?)? != self.num(&values[0])?,
        })
    }

    fn num(self, v: &Value) -> Result<Decimal, MalformedCondition> {
        v.as_number().ok_or_else(|| MalformedCondition::OperandTypes {
            operation: self.key().to_string(),
            expected: "numeric",
        })
    }

    fn text(self, v: &Value) -> Result<&str, MalformedCondition> {
        v.as_text().ok_or_else(|| MalformedCondition::OperandTypes {
            operation: self.key().to_string(),
            expected: "textual",
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn nth(values: &[Value], index: usize) -> String {
    values.get(index).map(|v| v.to_string()).unwrap_or_default()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
