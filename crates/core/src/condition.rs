//! Rule definitions supplied by the host UI.
//!
//! A widget carries an ordered list of [`Condition`]s plus an
//! aggregation [`Mode`]; the engine folds them into the one boolean
//! that drives the widget's state. These types are the persistence
//! schema the host round-trips as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

// ──────────────────────────────────────────────
// Condition target
// ──────────────────────────────────────────────

/// Which entity a condition addresses.
///
/// Either one concrete entity id, or a fan-out sentinel: `Any` / `All`
/// evaluate the condition against every entity in the entity set and
/// combine the member results with OR / AND respectively.
///
/// Serialized as a bare string: `"any"` and `"all"` are reserved,
/// everything else is an entity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Target {
    Any,
    All,
    Entity(String),
}

impl Target {
    pub fn entity(id: impl Into<String>) -> Target {
        Target::Entity(id.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Target::Any => "any",
            Target::All => "all",
            Target::Entity(id) => id,
        }
    }
}

impl From<String> for Target {
    fn from(raw: String) -> Target {
        match raw.as_str() {
            "any" => Target::Any,
            "all" => Target::All,
            _ => Target::Entity(raw),
        }
    }
}

impl From<Target> for String {
    fn from(target: Target) -> String {
        match target {
            Target::Entity(id) => id,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Aggregation mode
// ──────────────────────────────────────────────

/// How the per-condition booleans fold into the rule-set outcome.
///
/// `Any` ORs the defined conditions, `All` ANDs them, and `Js` ignores
/// the condition list entirely and delegates the rule set's opaque
/// boolean expression to the host-supplied capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Any,
    All,
    Js,
}

// ──────────────────────────────────────────────
// Conditions and rule sets
// ──────────────────────────────────────────────

/// One comparison clause: a target entity (or fan-out sentinel), a
/// field key, an operation key, and the literal comparison operands.
///
/// `operation` stays a plain string so that a definition referencing
/// an unknown key degrades that one condition at evaluation time
/// instead of failing deserialization of the whole rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub object: Target,
    pub key: String,
    pub operation: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl Condition {
    pub fn new(
        object: Target,
        key: impl Into<String>,
        operation: impl Into<String>,
        values: Vec<Value>,
    ) -> Condition {
        Condition {
            object,
            key: key.into(),
            operation: operation.into(),
            values,
        }
    }
}

/// An ordered condition list plus its aggregation mode.
///
/// `expression` carries the opaque boolean expression consumed only in
/// [`Mode::Js`]; it is absent for `any`/`all` rule sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl RuleSet {
    /// OR-aggregated rule set.
    pub fn any(conditions: Vec<Condition>) -> RuleSet {
        RuleSet {
            conditions,
            mode: Mode::Any,
            expression: None,
        }
    }

    /// AND-aggregated rule set.
    pub fn all(conditions: Vec<Condition>) -> RuleSet {
        RuleSet {
            conditions,
            mode: Mode::All,
            expression: None,
        }
    }

    /// Rule set delegating to the host expression capability.
    pub fn js(expression: impl Into<String>) -> RuleSet {
        RuleSet {
            conditions: Vec::new(),
            mode: Mode::Js,
            expression: Some(expression.into()),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_sentinels_round_trip() {
        let any: Target = serde_json::from_str("\"any\"").unwrap();
        assert_eq!(any, Target::Any);
        let all: Target = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, Target::All);
        assert_eq!(serde_json::to_string(&Target::Any).unwrap(), "\"any\"");
        assert_eq!(serde_json::to_string(&Target::All).unwrap(), "\"all\"");
    }

    #[test]
    fn target_entity_id_round_trip() {
        let t: Target = serde_json::from_str("\"pump-a\"").unwrap();
        assert_eq!(t, Target::entity("pump-a"));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"pump-a\"");
    }

    #[test]
    fn condition_deserializes_from_host_json() {
        let c: Condition = serde_json::from_value(serde_json::json!({
            "object": "any",
            "key": "pressure",
            "operation": "greaterThan",
            "values": [7]
        }))
        .unwrap();
        assert_eq!(c.object, Target::Any);
        assert_eq!(c.key, "pressure");
        assert_eq!(c.operation, "greaterThan");
        assert_eq!(c.values, vec![Value::from(7)]);
    }

    #[test]
    fn condition_values_default_to_empty() {
        let c: Condition = serde_json::from_value(serde_json::json!({
            "object": "pump-a",
            "key": "pressure",
            "operation": "isDefined"
        }))
        .unwrap();
        assert!(c.values.is_empty());
    }

    #[test]
    fn mode_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::Any).unwrap(), "\"any\"");
        assert_eq!(serde_json::to_string(&Mode::All).unwrap(), "\"all\"");
        assert_eq!(serde_json::to_string(&Mode::Js).unwrap(), "\"js\"");
    }

    #[test]
    fn rule_set_round_trip() {
        let rules = RuleSet::all(vec![Condition::new(
            Target::entity("pump-a"),
            "pressure",
            "between",
            vec![Value::from(3), Value::from(7)],
        )]);
        let json = serde_json::to_value(&rules).unwrap();
        // No expression key for any/all rule sets.
        assert!(json.get("expression").is_none());
        let back: RuleSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, rules);
    }

    #[test]
    fn js_rule_set_carries_expression() {
        let rules = RuleSet::js("a && b");
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json["mode"], "js");
        assert_eq!(json["expression"], "a && b");
    }
}
