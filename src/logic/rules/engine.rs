use super::{evaluate_condition, evaluate_expression};
use crate::models::{Context, Rule, RuleEvaluation, Severity, ValidationIssue, ValidationResult};

/// Decides whether a rule applies to the design and, if so, whether it holds.
///
/// Inactive and non-applicable rules always pass.
pub fn evaluate_rule(rule: &Rule, context: &Context) -> RuleEvaluation {
    if !rule.is_active {
        return RuleEvaluation::not_applicable();
    }

    let applies = rule
        .conditions
        .iter()
        .all(|condition| evaluate_condition(condition, context));
    if !applies {
        return RuleEvaluation::not_applicable();
    }

    if evaluate_expression(&rule.expression, context) {
        RuleEvaluation::passed()
    } else {
        RuleEvaluation::failed(failure_message(rule))
    }
}

fn failure_message(rule: &Rule) -> String {
    if rule.description.trim().is_empty() {
        format!("Rule \"{}\" failed", rule.name)
    } else {
        format!("Rule \"{}\" failed: {}", rule.name, rule.description)
    }
}

pub fn get_severity(rule: &Rule) -> Severity {
    rule.severity()
}

/// Runs every active rule, highest priority first, and buckets the
/// violations by severity.
///
/// Rules sharing a priority keep their input order.
pub fn validate_design(rules: &[Rule], context: &Context) -> ValidationResult {
    let mut active: Vec<&Rule> = rules.iter().filter(|r| r.is_active).collect();
    active.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut result = ValidationResult::new();
    for rule in active {
        let evaluation = evaluate_rule(rule, context);
        tracing::debug!(
            rule_id = %rule.id,
            applies = evaluation.applies,
            passed = evaluation.passed,
            "rule evaluated"
        );

        if !evaluation.is_violation() {
            continue;
        }

        let message = evaluation
            .message
            .unwrap_or_else(|| failure_message(rule));
        result.push(ValidationIssue::new(
            rule.id.clone(),
            rule.name.clone(),
            message,
            get_severity(rule),
        ));
    }

    tracing::debug!(
        rules = rules.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        suggestions = result.suggestions.len(),
        "design validated"
    );
    result
}

/// An owned rule set for one organizational scope.
pub struct RulesEngine {
    rules: Vec<Rule>,
}

impl RulesEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn validate(&self, context: &Context) -> ValidationResult {
        validate_design(&self.rules, context)
    }

    pub fn evaluate_rule(&self, rule_id: &str, context: &Context) -> Option<RuleEvaluation> {
        self.rules
            .iter()
            .find(|r| r.id == rule_id)
            .map(|rule| evaluate_rule(rule, context))
    }

    /// Active rules in evaluation order.
    pub fn list_rules(&self) -> Vec<(&str, &str, Severity)> {
        let mut active: Vec<&Rule> = self.rules.iter().filter(|r| r.is_active).collect();
        active.sort_by(|a, b| b.priority.cmp(&a.priority));
        active
            .into_iter()
            .map(|r| (r.id.as_str(), r.name.as_str(), r.severity()))
            .collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConditionOperator, Dimension, RuleAspect};
    use serde_json::{json, Value};

    fn ctx(value: Value) -> Context {
        Context::from_value(value).unwrap()
    }

    fn teams_display_rule(priority: u8) -> Rule {
        Rule::new(
            "teams-display",
            "Teams rooms need 75\" displays",
            RuleAspect::EquipmentSelection,
            "display.size >= 75",
            priority,
        )
        .with_condition(Dimension::Platform, ConditionOperator::Equals, "teams")
    }

    fn rule(id: &str, priority: u8, expression: &str) -> Rule {
        Rule::new(id, id.to_uppercase(), RuleAspect::Configuration, expression, priority)
            .with_condition(Dimension::Platform, ConditionOperator::Equals, "teams")
    }

    #[test]
    fn inactive_rule_never_applies() {
        let rule = teams_display_rule(90).with_active(false);
        for context in [
            ctx(json!({})),
            ctx(json!({"platform": "teams", "display": {"size": 10}})),
        ] {
            assert_eq!(evaluate_rule(&rule, &context), RuleEvaluation::not_applicable());
        }
    }

    #[test]
    fn non_matching_conditions_pass() {
        let rule = teams_display_rule(90)
            .with_condition(Dimension::Tier, ConditionOperator::Equals, "premium");
        let context = ctx(json!({"platform": "teams", "tier": "standard", "display": {"size": 10}}));
        assert_eq!(evaluate_rule(&rule, &context), RuleEvaluation::not_applicable());
    }

    #[test]
    fn failing_rule_message_names_rule() {
        let rule = teams_display_rule(80).with_description("Use at least a 75 inch display");
        let evaluation = evaluate_rule(&rule, &ctx(json!({"platform": "teams", "display": {"size": 55}})));
        assert!(evaluation.applies);
        assert!(!evaluation.passed);
        let message = evaluation.message.unwrap();
        assert!(message.contains(&rule.name));
        assert!(message.contains("75 inch"));
    }

    #[test]
    fn passing_rule_has_no_message() {
        let evaluation = evaluate_rule(
            &teams_display_rule(80),
            &ctx(json!({"platform": "teams", "display": {"size": 85}})),
        );
        assert_eq!(evaluation, RuleEvaluation::passed());
    }

    #[test]
    fn severity_from_priority() {
        let sev = |p| get_severity(&rule("r", p, "a > 1"));
        assert_eq!(sev(0), Severity::Suggestion);
        assert_eq!(sev(39), Severity::Suggestion);
        assert_eq!(sev(40), Severity::Warning);
        assert_eq!(sev(79), Severity::Warning);
        assert_eq!(sev(80), Severity::Error);
        assert_eq!(sev(100), Severity::Error);
    }

    #[test]
    fn empty_rule_set_is_valid() {
        let result = validate_design(&[], &ctx(json!({"platform": "teams"})));
        assert_eq!(result, ValidationResult::new());
        assert!(result.is_valid);
        assert!(result.is_clean());
    }

    #[test]
    fn end_to_end_teams_display() {
        let rules = vec![teams_display_rule(80)];

        let result = validate_design(&rules, &ctx(json!({"platform": "teams", "display": {"size": 55}})));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule_id, "teams-display");
        assert_eq!(result.errors[0].rule_name, rules[0].name);
        assert_eq!(result.errors[0].severity, Severity::Error);
        assert!(result.warnings.is_empty());
        assert!(result.suggestions.is_empty());

        let result = validate_design(&rules, &ctx(json!({"platform": "teams", "display": {"size": 85}})));
        assert!(result.is_valid);
        assert!(result.is_clean());
    }

    #[test]
    fn warnings_and_suggestions_keep_design_valid() {
        let rules = vec![rule("warn", 50, "mics >= 2"), rule("hint", 10, "mics >= 4")];
        let result = validate_design(&rules, &ctx(json!({"platform": "teams", "mics": 1})));
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn issues_follow_descending_priority() {
        let rules = vec![
            rule("low", 81, "mics >= 9"),
            rule("high", 99, "mics >= 9"),
            rule("tie-a", 90, "mics >= 9"),
            rule("tie-b", 90, "mics >= 9"),
        ];
        let result = validate_design(&rules, &ctx(json!({"platform": "teams", "mics": 1})));
        let ids: Vec<_> = result.errors.iter().map(|i| i.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["high", "tie-a", "tie-b", "low"]);
    }

    #[test]
    fn inactive_rules_are_skipped() {
        let rules = vec![rule("off", 95, "mics >= 9").with_active(false)];
        let result = validate_design(&rules, &ctx(json!({"platform": "teams", "mics": 1})));
        assert!(result.is_valid);
        assert!(result.is_clean());
    }

    #[test]
    fn malformed_expression_never_blocks() {
        let rules = vec![rule("odd", 100, "display must be big")];
        let result = validate_design(&rules, &ctx(json!({"platform": "teams"})));
        assert!(result.is_valid);
    }

    #[test]
    fn validation_is_repeatable() {
        let rules = vec![teams_display_rule(80), rule("warn", 50, "mics >= 2")];
        let context = ctx(json!({"platform": "teams", "display": {"size": 55}, "mics": 1}));
        assert_eq!(validate_design(&rules, &context), validate_design(&rules, &context));
    }

    #[test]
    fn engine_lookup_and_listing() {
        let engine = RulesEngine::new(vec![
            rule("a", 30, "mics >= 2"),
            rule("b", 85, "mics >= 2"),
            rule("c", 60, "mics >= 2").with_active(false),
        ]);

        let listed: Vec<_> = engine.list_rules().into_iter().map(|(id, _, sev)| (id, sev)).collect();
        assert_eq!(listed, vec![("b", Severity::Error), ("a", Severity::Suggestion)]);

        let context = ctx(json!({"platform": "teams", "mics": 1}));
        assert!(engine.evaluate_rule("a", &context).unwrap().is_violation());
        assert!(engine.evaluate_rule("missing", &context).is_none());
        assert_eq!(engine.validate(&context).errors.len(), 1);
    }
}
