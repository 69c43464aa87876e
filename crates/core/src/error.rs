//! The single error kind condition evaluation can produce.

/// A condition that cannot be evaluated as written.
///
/// During rule-set execution this is absorbed at the per-condition
/// (and per-fan-out-member) boundary: the affected condition degrades
/// to undefined and is left out of the aggregate instead of counting
/// as `false`. It surfaces as a `Result` only from single-condition
/// entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedCondition {
    /// The referenced operation key is not in the registry.
    #[error("unknown operation: {key}")]
    UnknownOperation { key: String },

    /// The operation needs a resolved field value and the cache has
    /// none for this entity/key.
    #[error("operation '{operation}' requires a resolved field value")]
    Unresolved { operation: String },

    /// Wrong number of comparison operands for the operation.
    #[error("operation '{operation}' takes {expected} comparison value(s), got {got}")]
    Arity {
        operation: String,
        expected: usize,
        got: usize,
    },

    /// An operand does not match the operation's declared operand type.
    #[error("operands for '{operation}' are not uniformly {expected}")]
    OperandTypes {
        operation: String,
        expected: &'static str,
    },
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MalformedCondition::UnknownOperation {
            key: "fuzzyMatch".to_string(),
        };
        assert_eq!(err.to_string(), "unknown operation: fuzzyMatch");

        let err = MalformedCondition::Arity {
            operation: "between".to_string(),
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "operation 'between' takes 2 comparison value(s), got 1"
        );

        let err = MalformedCondition::OperandTypes {
            operation: "greaterThan".to_string(),
            expected: "numeric",
        };
        assert_eq!(
            err.to_string(),
            "operands for 'greaterThan' are not uniformly numeric"
        );
    }
}
