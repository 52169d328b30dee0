use std::sync::OnceLock;

use regex_lite::Regex;
use serde_json::Value;

use crate::models::{strict_equals, Context};

/// `<path> <op> <literal>`. Two-character operators come first in the
/// alternation so `>=` is never read as `>`, and a literal may not start
/// with `=` so a dangling `>=` cannot split into `>` and `"="`.
const COMPARISON_PATTERN: &str =
    r"^\s*([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\s*(>=|<=|==|!=|>|<)\s*([^=\s].*?)\s*$";

const NUMBER_PATTERN: &str = r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$";

fn comparison_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COMPARISON_PATTERN).expect("comparison pattern is valid"))
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    GreaterOrEqual,
    LessOrEqual,
    Equal,
    NotEqual,
    Greater,
    Less,
}

impl ComparisonOp {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            ">=" => Some(ComparisonOp::GreaterOrEqual),
            "<=" => Some(ComparisonOp::LessOrEqual),
            "==" => Some(ComparisonOp::Equal),
            "!=" => Some(ComparisonOp::NotEqual),
            ">" => Some(ComparisonOp::Greater),
            "<" => Some(ComparisonOp::Less),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::LessOrEqual => "<=",
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Greater => ">",
            ComparisonOp::Less => "<",
        }
    }
}

impl std::fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Literal {
    /// Quoted strings lose their quotes, `true`/`false` become booleans,
    /// decimal numbers become numbers. Any other bare token stays text.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(unquoted) = strip_quotes(raw) {
            return Literal::Text(unquoted.to_string());
        }
        match raw {
            "true" => return Literal::Bool(true),
            "false" => return Literal::Bool(false),
            _ => {}
        }
        if number_regex().is_match(raw) {
            if let Ok(n) = raw.parse::<f64>() {
                return Literal::Number(n);
            }
        }
        Literal::Text(raw.to_string())
    }

    /// Type-sensitive equality against a context value.
    fn strict_eq(&self, value: &Value) -> bool {
        let literal = match self {
            Literal::Number(n) => match serde_json::Number::from_f64(*n) {
                Some(n) => Value::Number(n),
                None => return false,
            },
            Literal::Text(s) => Value::String(s.clone()),
            Literal::Bool(b) => Value::Bool(*b),
        };
        strict_equals(value, &literal)
    }
}

fn strip_quotes(raw: &str) -> Option<&str> {
    ['"', '\''].iter().find_map(|quote| {
        if raw.len() >= 2 && raw.starts_with(*quote) && raw.ends_with(*quote) {
            Some(&raw[1..raw.len() - 1])
        } else {
            None
        }
    })
}

/// A parsed single-comparison expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub path: String,
    pub op: ComparisonOp,
    pub literal: Literal,
}

impl Comparison {
    /// Returns `None` when the text does not have the `<path> <op> <literal>`
    /// shape.
    pub fn parse(expression: &str) -> Option<Self> {
        let caps = comparison_regex().captures(expression)?;
        let op = ComparisonOp::from_token(caps.get(2)?.as_str())?;
        Some(Self {
            path: caps.get(1)?.as_str().to_string(),
            op,
            literal: Literal::parse(caps.get(3)?.as_str()),
        })
    }

    /// Missing context data never satisfies a comparison, whatever the
    /// operator.
    pub fn evaluate(&self, context: &Context) -> bool {
        let Some(actual) = context.resolve_path(&self.path) else {
            return false;
        };

        match self.op {
            ComparisonOp::Equal => self.literal.strict_eq(actual),
            ComparisonOp::NotEqual => !self.literal.strict_eq(actual),
            ComparisonOp::GreaterOrEqual => self.compare_numbers(actual, |a, b| a >= b),
            ComparisonOp::LessOrEqual => self.compare_numbers(actual, |a, b| a <= b),
            ComparisonOp::Greater => self.compare_numbers(actual, |a, b| a > b),
            ComparisonOp::Less => self.compare_numbers(actual, |a, b| a < b),
        }
    }

    fn compare_numbers<F>(&self, actual: &Value, cmp: F) -> bool
    where
        F: Fn(f64, f64) -> bool,
    {
        match (actual.as_f64(), &self.literal) {
            (Some(actual), Literal::Number(expected)) => cmp(actual, *expected),
            _ => false,
        }
    }
}

/// Evaluates a single comparison against the context.
///
/// Text that is not a recognizable comparison passes; a path that cannot be
/// resolved fails.
pub fn evaluate_expression(expression: &str, context: &Context) -> bool {
    match Comparison::parse(expression) {
        Some(comparison) => {
            let result = comparison.evaluate(context);
            tracing::trace!(expression, result, "expression evaluated");
            result
        }
        None => {
            tracing::trace!(expression, "unrecognized expression, treating as satisfied");
            true
        }
    }
}
