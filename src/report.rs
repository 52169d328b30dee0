use std::fmt::Write;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::{Severity, ValidationIssue, ValidationResult};

pub fn render(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(render_text(result)),
    }
}

/// Plain-text report, one section per non-empty severity.
pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::new();

    let status = if result.is_valid { "PASS" } else { "FAIL" };
    let _ = writeln!(
        out,
        "{}: {} error(s), {} warning(s), {} suggestion(s)",
        status,
        result.errors.len(),
        result.warnings.len(),
        result.suggestions.len()
    );

    for (severity, issues) in [
        (Severity::Error, &result.errors),
        (Severity::Warning, &result.warnings),
        (Severity::Suggestion, &result.suggestions),
    ] {
        if issues.is_empty() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}s:", capitalize(severity.as_str()));
        for issue in issues {
            write_issue(&mut out, issue);
        }
    }

    out
}

fn write_issue(out: &mut String, issue: &ValidationIssue) {
    let _ = writeln!(
        out,
        "  {} [{}] {}",
        issue.severity.symbol(),
        issue.rule_id,
        issue.message
    );
    if let Some(fix) = &issue.suggested_fix {
        let _ = writeln!(out, "      fix: {}", fix);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_report() {
        let text = render_text(&ValidationResult::new());
        assert_eq!(
            text,
            "PASS: 0 error(s), 0 warning(s), 0 suggestion(s)\n"
        );
    }

    #[test]
    fn failing_report_lists_sections() {
        let mut result = ValidationResult::new();
        result.push(ValidationIssue::new(
            "teams-display",
            "Teams display",
            "Rule \"Teams display\" failed",
            Severity::Error,
        ));
        result.push(
            ValidationIssue::new("mics", "Mics", "Rule \"Mics\" failed", Severity::Suggestion)
                .with_fix("Add a ceiling mic"),
        );

        let text = render_text(&result);
        assert!(text.starts_with("FAIL: 1 error(s), 0 warning(s), 1 suggestion(s)"));
        assert!(text.contains("Errors:\n  ✗ [teams-display]"));
        assert!(!text.contains("Warnings:"));
        assert!(text.contains("Suggestions:"));
        assert!(text.contains("fix: Add a ceiling mic"));
    }

    #[test]
    fn json_report_uses_camel_case() {
        let json = render(&ValidationResult::new(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["isValid"], true);
        assert_eq!(value["errors"], serde_json::json!([]));
    }
}
