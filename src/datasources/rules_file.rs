use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::{read_file, FileFormat};
use crate::error::{Result, StandardsError};
use crate::logic::rules::Comparison;
use crate::models::Rule;

const MAX_PRIORITY: u8 = 100;

/// A rule file holds either a bare list or a `rules:` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    List(Vec<Rule>),
    Wrapped { rules: Vec<Rule> },
}

impl RuleDocument {
    fn into_rules(self) -> Vec<Rule> {
        match self {
            RuleDocument::List(rules) => rules,
            RuleDocument::Wrapped { rules } => rules,
        }
    }
}

/// Reads and checks a rule set exported from the standards library.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let format = FileFormat::from_path(path)?;
    let content = read_file(path)?;
    let rules = parse_rules(&content, format)?;
    tracing::info!(count = rules.len(), path = %path.display(), "loaded rules");
    Ok(rules)
}

pub fn parse_rules(content: &str, format: FileFormat) -> Result<Vec<Rule>> {
    let document: RuleDocument = match format {
        FileFormat::Json => serde_json::from_str(content)?,
        FileFormat::Yaml => serde_yaml::from_str(content)?,
    };
    let rules = document.into_rules();
    check_rules(&rules)?;
    Ok(rules)
}

/// Authoring checks the engine itself never performs.
pub fn check_rules(rules: &[Rule]) -> Result<()> {
    let mut seen = HashSet::new();
    for rule in rules {
        check_rule(rule)?;
        if !seen.insert(rule.id.as_str()) {
            return Err(invalid(rule, "duplicate rule id"));
        }
    }
    Ok(())
}

fn check_rule(rule: &Rule) -> Result<()> {
    if rule.id.trim().is_empty() {
        return Err(invalid(rule, "id must not be empty"));
    }
    if rule.conditions.is_empty() {
        return Err(invalid(rule, "at least one condition is required"));
    }
    if rule.expression.trim().is_empty() {
        return Err(invalid(rule, "expression must not be empty"));
    }
    if rule.priority > MAX_PRIORITY {
        return Err(invalid(
            rule,
            &format!("priority {} exceeds {}", rule.priority, MAX_PRIORITY),
        ));
    }
    if Comparison::parse(&rule.expression).is_none() {
        tracing::warn!(
            rule_id = %rule.id,
            expression = %rule.expression,
            "expression is not a single comparison; rule will always pass"
        );
    }
    Ok(())
}

fn invalid(rule: &Rule, reason: &str) -> StandardsError {
    StandardsError::InvalidRule {
        id: rule.id.clone(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConditionOperator, Dimension, RuleAspect};
    use std::io::Write;

    const YAML_RULES: &str = r#"
rules:
  - id: teams-display
    name: Teams rooms need large displays
    description: Use at least a 75 inch display
    aspect: equipment_selection
    expressionType: constraint
    conditions:
      - dimension: platform
        operator: equals
        value: teams
    expression: display.size >= 75
    priority: 80
  - id: huddle-mics
    name: Huddle rooms need two mics
    aspect: quantities
    conditions:
      - dimension: room_type
        operator: in
        value: [huddle, focus]
    expression: mics.count >= 2
    priority: 45
    isActive: false
"#;

    #[test]
    fn parses_wrapped_yaml() {
        let rules = parse_rules(YAML_RULES, FileFormat::Yaml).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].conditions[0].dimension, Dimension::Platform);
        assert_eq!(rules[1].aspect, RuleAspect::Quantities);
        assert_eq!(rules[1].conditions[0].operator, ConditionOperator::In);
        assert!(!rules[1].is_active);
    }

    #[test]
    fn parses_bare_json_list() {
        let json = r#"[{
            "id": "r1", "name": "R1", "aspect": "cabling",
            "conditions": [{"dimension": "tier", "operator": "greater_than", "value": 2}],
            "expression": "cable.length <= 100", "priority": 20
        }]"#;
        let rules = parse_rules(json, FileFormat::Json).unwrap();
        assert_eq!(rules[0].id, "r1");
        assert!(rules[0].is_active);
    }

    #[test]
    fn rejects_rule_without_conditions() {
        let rules = vec![Rule::new("r", "R", RuleAspect::Placement, "a > 1", 10)];
        let err = check_rules(&rules).unwrap_err();
        assert!(matches!(err, StandardsError::InvalidRule { ref id, .. } if id == "r"));
    }

    #[test]
    fn rejects_blank_expression_and_high_priority() {
        let blank = Rule::new("r", "R", RuleAspect::Placement, "  ", 10)
            .with_condition(Dimension::Platform, ConditionOperator::Equals, "teams");
        assert!(check_rules(&[blank]).is_err());

        let high = Rule::new("r", "R", RuleAspect::Placement, "a > 1", 101)
            .with_condition(Dimension::Platform, ConditionOperator::Equals, "teams");
        assert!(check_rules(&[high]).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let rule = Rule::new("dup", "R", RuleAspect::Placement, "a > 1", 10)
            .with_condition(Dimension::Platform, ConditionOperator::Equals, "teams");
        let err = check_rules(&[rule.clone(), rule]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML_RULES.as_bytes()).unwrap();
        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_rules(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, StandardsError::NotFound(_)));
    }
}
