//! The engine facade handed to widget UI code.

use beacon_core::{
    EntitySet, InputType, MalformedCondition, Mode, RuleSet, Value, ValueCache, ValueType,
};

use crate::operation::Operation;
use crate::rules;

/// Host capability backing `js` rule sets: evaluates an opaque boolean
/// expression string.
pub type ExpressionHook = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Widget condition engine.
///
/// Holds the two host-owned collaborators (value cache, entity set),
/// the fixed operation registry, and a live/test value-source switch.
/// The active source is picked once per evaluation and threaded
/// through as a parameter, so an evaluation never observes a
/// mid-flight switch.
pub struct ConditionEvaluator {
    live: ValueCache,
    test: ValueCache,
    entities: EntitySet,
    use_test_data: bool,
    expression_hook: Option<ExpressionHook>,
}

impl ConditionEvaluator {
    pub fn new(cache: ValueCache, entities: EntitySet) -> Self {
        ConditionEvaluator {
            live: cache,
            test: ValueCache::new(),
            entities,
            use_test_data: false,
            expression_hook: None,
        }
    }

    /// Install the host capability backing [`Mode::Js`] rule sets.
    /// Without one, every `js` rule set evaluates to `false`.
    pub fn with_expression_hook(
        mut self,
        hook: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.expression_hook = Some(Box::new(hook));
        self
    }

    /// Replace the live value cache wholesale.
    pub fn set_value_cache(&mut self, cache: ValueCache) {
        self.live = cache;
    }

    /// Replace the entity set wholesale.
    pub fn set_entity_set(&mut self, entities: EntitySet) {
        self.entities = entities;
    }

    /// Install a substitute value source for deterministic tests. Does
    /// not affect lookups until [`use_test_data`](Self::use_test_data)
    /// enables it.
    pub fn set_test_data(&mut self, cache: ValueCache) {
        self.test = cache;
    }

    /// Route subsequent lookups to the test cache instead of the live
    /// one (or back). The live cache is left untouched either way.
    pub fn use_test_data(&mut self, enabled: bool) {
        if self.use_test_data != enabled {
            tracing::debug!(
                "value source switched to {}",
                if enabled { "test" } else { "live" }
            );
        }
        self.use_test_data = enabled;
    }

    fn active_cache(&self) -> &ValueCache {
        if self.use_test_data {
            &self.test
        } else {
            &self.live
        }
    }

    /// Evaluate a rule set to its single boolean outcome.
    ///
    /// `any`/`all` rule sets fold their conditions' defined outcomes;
    /// `js` rule sets delegate the opaque expression to the host
    /// capability and consult no conditions at all.
    pub fn execute(&self, rules: &RuleSet) -> bool {
        match rules.mode {
            Mode::Js => {
                let expression = rules.expression.as_deref().unwrap_or("");
                match &self.expression_hook {
                    Some(hook) => hook(expression),
                    None => {
                        tracing::debug!("no expression hook installed, js rule set is false");
                        false
                    }
                }
            }
            mode => rules::aggregate(self.active_cache(), &self.entities, &rules.conditions, mode),
        }
    }

    /// Evaluate one condition against a concrete entity, surfacing the
    /// malformed-condition error instead of absorbing it.
    pub fn execute_condition(
        &self,
        entity: &str,
        key: &str,
        operation: &str,
        values: &[Value],
    ) -> Result<bool, MalformedCondition> {
        rules::check_field(self.active_cache(), entity, key, operation, values)
    }

    // ──────────────────────────────────────────
    // Registry introspection
    // ──────────────────────────────────────────

    /// All operation keys, in the order pickers should list them.
    pub fn operation_keys(&self) -> Vec<&'static str> {
        Operation::ALL.iter().map(|op| op.key()).collect()
    }

    /// Human-readable label for an operation key.
    pub fn operation_text(&self, key: &str) -> Option<&'static str> {
        Operation::from_key(key).map(Operation::label)
    }

    /// Whether the operation is legal for fields of the given type.
    /// Unknown keys apply to nothing.
    pub fn operation_applies_to(&self, key: &str, value_type: ValueType) -> bool {
        Operation::from_key(key).is_some_and(|op| op.applies_to().contains(&value_type))
    }

    /// Number of comparison operands the operation consumes.
    pub fn input_count(&self, key: &str) -> Option<usize> {
        Operation::from_key(key).map(Operation::input_count)
    }

    /// Rule-header clause for the operation with the given operands.
    pub fn operation_description(&self, key: &str, values: &[Value]) -> Option<String> {
        Operation::from_key(key).map(|op| op.describe(values))
    }

    /// UI input widget for the operation's comparison operands.
    pub fn input_type(&self, key: &str) -> Option<InputType> {
        Operation::from_key(key).map(Operation::input_type)
    }

    /// UI input widget for a field value type.
    pub fn input_type_for(&self, value_type: ValueType) -> InputType {
        value_type.input_type()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
