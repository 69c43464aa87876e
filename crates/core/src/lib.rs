//! Data model for the beacon widget condition engine.
//!
//! Widget rule sets, the raw values they compare against, and the two
//! host-owned collaborators (value cache, entity set) all live here.
//! The evaluation engine itself is in `beacon-eval`; this crate only
//! defines the shapes the host serializes, persists, and hands over.

pub mod cache;
pub mod condition;
pub mod error;
pub mod value;

pub use cache::{EntitySet, ValueCache};
pub use condition::{Condition, Mode, RuleSet, Target};
pub use error::MalformedCondition;
pub use value::{InputType, Value, ValueType};

pub use rust_decimal::Decimal;
