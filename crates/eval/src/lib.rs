//! Beacon widget condition evaluator -- folds a declarative rule set
//! over cached data-point values into the single boolean that drives
//! a dashboard widget's visual state.
//!
//! The engine reads two host-owned collaborators (the per-entity value
//! cache and the entity set), carries a fixed catalog of typed
//! comparison operations, and aggregates per-condition results under
//! OR/AND modes with an escape hatch that delegates an opaque boolean
//! expression to the host. Conditions that cannot be evaluated are
//! transparent to the aggregate rather than counting as `false`.

pub mod evaluator;
pub mod operation;
pub mod rules;

pub use evaluator::{ConditionEvaluator, ExpressionHook};
pub use operation::Operation;
pub use rules::{check_condition, check_field, Outcome};

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod integration_tests {
    use super::*;
    use beacon_core::{Condition, EntitySet, RuleSet, Target, Value, ValueCache};

    /// A small plant: two pumps and a tank, with live readings the
    /// ingestion path would normally keep current.
    fn plant() -> ConditionEvaluator {
        let cache: ValueCache = serde_json::from_value(serde_json::json!({
            "pump-a": { "pressure": 5, "status": "running", "mode": 2 },
            "pump-b": { "pressure": 10, "status": "stopped" },
            "tank-1": { "level": "77.5" }
        }))
        .unwrap();
        let entities: EntitySet = serde_json::from_value(serde_json::json!({
            "pump-a": { "name": "Pump A" },
            "pump-b": { "name": "Pump B" },
            "tank-1": { "name": "Main tank" }
        }))
        .unwrap();
        ConditionEvaluator::new(cache, entities)
    }

    fn cond(object: Target, key: &str, operation: &str, values: Vec<Value>) -> Condition {
        Condition::new(object, key, operation, values)
    }

    #[test]
    fn indicator_turns_on_when_any_pump_runs_hot() {
        let eval = plant();
        let rules: RuleSet = serde_json::from_value(serde_json::json!({
            "mode": "any",
            "conditions": [
                { "object": "any", "key": "pressure", "operation": "greaterThan", "values": [7] }
            ]
        }))
        .unwrap();
        assert!(eval.execute(&rules));

        let rules: RuleSet = serde_json::from_value(serde_json::json!({
            "mode": "any",
            "conditions": [
                { "object": "all", "key": "pressure", "operation": "greaterThan", "values": [7] }
            ]
        }))
        .unwrap();
        // Pump A sits at 5, so the ALL fan-out does not hold.
        assert!(!eval.execute(&rules));
    }

    #[test]
    fn mixed_conditions_under_all_mode() {
        let eval = plant();
        let rules = RuleSet::all(vec![
            cond(
                Target::entity("pump-a"),
                "status",
                "textIsExactly",
                vec![Value::from("running")],
            ),
            cond(
                Target::entity("tank-1"),
                "level",
                "between",
                vec![Value::from(50), Value::from(90)],
            ),
            cond(
                Target::entity("pump-a"),
                "mode",
                "enumValueIs",
                vec![Value::from(2)],
            ),
        ]);
        // The tank level is stored as text "77.5" and still compares
        // numerically.
        assert!(eval.execute(&rules));
    }

    #[test]
    fn malformed_conditions_never_flip_the_aggregate() {
        let eval = plant();
        let rules = RuleSet::all(vec![
            // Unknown operation.
            cond(Target::entity("pump-a"), "pressure", "approximates", vec![Value::from(5)]),
            // Non-numeric operand for a number operation.
            cond(Target::entity("pump-a"), "pressure", "lessThan", vec![Value::from("low")]),
            // Defined and true.
            cond(Target::entity("pump-b"), "pressure", "greaterThanOrEq", vec![Value::from(10)]),
        ]);
        assert!(eval.execute(&rules));

        // Every condition malformed: false, not true, even under ALL.
        let rules = RuleSet::all(vec![cond(
            Target::entity("pump-a"),
            "pressure",
            "approximates",
            vec![Value::from(5)],
        )]);
        assert!(!eval.execute(&rules));
    }

    #[test]
    fn empty_rule_sets_are_false() {
        let eval = plant();
        assert!(!eval.execute(&RuleSet::any(Vec::new())));
        assert!(!eval.execute(&RuleSet::all(Vec::new())));
    }

    #[test]
    fn absent_fields_drive_presence_conditions_only() {
        let eval = plant();
        let rules = RuleSet::any(vec![cond(
            Target::entity("tank-1"),
            "temperature",
            "isUndefined",
            Vec::new(),
        )]);
        assert!(eval.execute(&rules));

        // Any other operation on the absent field stays undefined, so
        // the rule set has no defined condition and reads false.
        let rules = RuleSet::any(vec![cond(
            Target::entity("tank-1"),
            "temperature",
            "greaterThan",
            vec![Value::from(0)],
        )]);
        assert!(!eval.execute(&rules));
    }

    #[test]
    fn test_cache_overrides_live_readings() {
        let mut eval = plant();
        let rules = RuleSet::any(vec![cond(
            Target::entity("pump-a"),
            "pressure",
            "greaterThan",
            vec![Value::from(100)],
        )]);
        assert!(!eval.execute(&rules));

        eval.set_test_data(
            serde_json::from_value(serde_json::json!({ "pump-a": { "pressure": 250 } })).unwrap(),
        );
        eval.use_test_data(true);
        assert!(eval.execute(&rules));

        eval.use_test_data(false);
        assert!(!eval.execute(&rules));
    }

    #[test]
    fn js_rule_sets_bypass_conditions() {
        let eval = plant().with_expression_hook(|expr| expr.contains("alarm"));
        let rules: RuleSet = serde_json::from_value(serde_json::json!({
            "mode": "js",
            "expression": "alarm || override",
            "conditions": [
                { "object": "pump-a", "key": "pressure", "operation": "equalTo", "values": [0] }
            ]
        }))
        .unwrap();
        assert!(eval.execute(&rules));
    }

    #[test]
    fn picker_metadata_matches_catalog() {
        let eval = plant();
        assert_eq!(eval.operation_keys().len(), Operation::ALL.len());
        assert_eq!(
            eval.operation_description("between", &[Value::from(3), Value::from(7)]),
            Some(" between 3 and 7".to_string())
        );
        assert_eq!(eval.operation_text("textDoesNotContain"), Some("does not contain"));
    }
}
