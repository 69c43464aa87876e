//! Condition and rule-set evaluation.
//!
//! Every condition resolves to an explicit tri-state [`Outcome`]: a
//! condition that cannot be evaluated (unknown operation, missing
//! operands, unresolvable field, failed fan-out) is `Undefined` and is
//! filtered out before the defined booleans fold into the rule-set
//! result, so bad input never biases the aggregate toward `false` or
//! `true`.
//!
//! Evaluation here is free of engine state: the value cache and entity
//! set arrive as parameters, chosen by the caller per invocation.

use beacon_core::{Condition, EntitySet, MalformedCondition, Mode, Target, Value, ValueCache};

use crate::operation::Operation;

/// Tri-state result of evaluating one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    True,
    False,
    Undefined,
}

impl Outcome {
    /// The boolean for a defined outcome, `None` for `Undefined`.
    pub fn defined(self) -> Option<bool> {
        match self {
            Outcome::True => Some(true),
            Outcome::False => Some(false),
            Outcome::Undefined => None,
        }
    }
}

impl From<bool> for Outcome {
    fn from(b: bool) -> Outcome {
        if b {
            Outcome::True
        } else {
            Outcome::False
        }
    }
}

/// Resolve one field from the cache and run an operation over it.
///
/// The resolved value is numeric-coerced before the operation sees it,
/// so a field stored as the text `"42"` compares numerically. An
/// absent entity or key resolves to no value, which only the presence
/// operations accept.
pub fn check_field(
    cache: &ValueCache,
    entity: &str,
    key: &str,
    operation: &str,
    values: &[Value],
) -> Result<bool, MalformedCondition> {
    let op = Operation::from_key(operation).ok_or_else(|| MalformedCondition::UnknownOperation {
        key: operation.to_string(),
    })?;
    let resolved = cache.get(entity, key).map(Value::coerced);
    op.apply(resolved.as_ref(), values)
}

/// Evaluate one condition to its tri-state outcome, fanning out over
/// the entity set when the target is a sentinel.
pub fn check_condition(cache: &ValueCache, entities: &EntitySet, condition: &Condition) -> Outcome {
    match &condition.object {
        Target::Entity(id) => {
            match check_field(cache, id, &condition.key, &condition.operation, &condition.values) {
                Ok(b) => Outcome::from(b),
                Err(err) => {
                    tracing::debug!("skipping condition on '{}.{}': {}", id, condition.key, err);
                    Outcome::Undefined
                }
            }
        }
        // OR across entities: seed false, any qualifying member wins.
        Target::Any => fan_out(cache, entities, condition, false, |acc, b| acc || b),
        // AND across entities: seed true, any failing member loses.
        Target::All => fan_out(cache, entities, condition, true, |acc, b| acc && b),
    }
}

/// Evaluate a fan-out condition against every entity in the set.
///
/// Members that fail as malformed are skipped; if no member evaluates
/// at all (every attempt failed, or the set is empty) the condition is
/// `Undefined` rather than the seed value.
fn fan_out(
    cache: &ValueCache,
    entities: &EntitySet,
    condition: &Condition,
    seed: bool,
    fold: impl Fn(bool, bool) -> bool,
) -> Outcome {
    let mut acc = seed;
    let mut any_defined = false;
    for id in entities.ids() {
        match check_field(cache, id, &condition.key, &condition.operation, &condition.values) {
            Ok(b) => {
                acc = fold(acc, b);
                any_defined = true;
            }
            Err(err) => {
                tracing::debug!(
                    "skipping fan-out member '{}.{}': {}",
                    id,
                    condition.key,
                    err
                );
            }
        }
    }
    if any_defined {
        Outcome::from(acc)
    } else {
        Outcome::Undefined
    }
}

/// Fold the conditions' defined outcomes under `any`/`all` aggregation.
///
/// Undefined conditions are transparent no-ops. With no defined
/// condition at all the result is `false` -- in particular for an
/// empty condition list and for an `all` rule set whose every
/// condition is malformed. `js` rule sets never reach this fold; the
/// evaluator delegates them to the host capability first.
pub fn aggregate(
    cache: &ValueCache,
    entities: &EntitySet,
    conditions: &[Condition],
    mode: Mode,
) -> bool {
    let mut acc: Option<bool> = None;
    for condition in conditions {
        if let Some(result) = check_condition(cache, entities, condition).defined() {
            acc = Some(match mode {
                Mode::All => acc.unwrap_or(true) && result,
                _ => acc.unwrap_or(false) || result,
            });
        }
    }
    acc.unwrap_or(false)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
