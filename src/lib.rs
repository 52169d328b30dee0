//! Standards rule engine for AV room designs.
//!
//! Rules pair dimensional conditions (platform, room type, tier, ...) with a
//! single comparison expression. [`validate_design`] runs a rule set against a
//! design [`Context`] and groups the violations by severity.

pub mod cli;
pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;

pub use error::{Result, StandardsError};
pub use logic::{
    evaluate_condition, evaluate_expression, evaluate_rule, get_severity, validate_design,
    RulesEngine,
};
pub use models::{
    ConditionOperator, ConditionValue, Context, Dimension, Rule, RuleAspect, RuleCondition,
    RuleEvaluation, ScalarValue, Severity, ValidationIssue, ValidationResult,
};
