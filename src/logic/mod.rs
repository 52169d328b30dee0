pub mod rules;

pub use rules::{
    evaluate_condition, evaluate_expression, evaluate_rule, get_severity, validate_design,
    RulesEngine,
};
