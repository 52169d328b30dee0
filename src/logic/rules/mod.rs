pub mod condition;
pub mod engine;
pub mod expression;

pub use condition::evaluate_condition;
pub use engine::{evaluate_rule, get_severity, validate_design, RulesEngine};
pub use expression::{evaluate_expression, Comparison, ComparisonOp, Literal};
