use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Severity;

/// Axis of the design context a condition is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    RoomType,
    Platform,
    Ecosystem,
    Tier,
    UseCase,
    Client,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::RoomType => "room_type",
            Dimension::Platform => "platform",
            Dimension::Ecosystem => "ecosystem",
            Dimension::Tier => "tier",
            Dimension::UseCase => "use_case",
            Dimension::Client => "client",
        }
    }

    /// Context keys consulted for this dimension, in lookup order.
    pub fn context_keys(&self) -> &'static [&'static str] {
        match self {
            Dimension::RoomType => &["room_type", "roomType"],
            Dimension::Platform => &["platform"],
            Dimension::Ecosystem => &["ecosystem"],
            Dimension::Tier => &["tier", "qualityTier"],
            Dimension::UseCase => &["use_case", "useCase"],
            Dimension::Client => &["client", "clientId"],
        }
    }

    /// Rank used when standards from different dimensions conflict.
    /// Client-specific standards outrank everything, room type ranks lowest.
    pub fn precedence(&self) -> u8 {
        match self {
            Dimension::Client => 6,
            Dimension::UseCase => 5,
            Dimension::Tier => 4,
            Dimension::Ecosystem => 3,
            Dimension::Platform => 2,
            Dimension::RoomType => 1,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    In,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "not_equals",
            ConditionOperator::Contains => "contains",
            ConditionOperator::GreaterThan => "greater_than",
            ConditionOperator::LessThan => "less_than",
            ConditionOperator::In => "in",
        }
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single string or number inside a condition value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}

impl ScalarValue {
    /// Strict equality against a context value: numbers only match numbers,
    /// strings only match strings.
    pub fn strict_eq(&self, value: &Value) -> bool {
        match self {
            ScalarValue::Number(n) => value.as_f64() == Some(*n),
            ScalarValue::Text(s) => value.as_str() == Some(s.as_str()),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Text(String),
    List(Vec<ScalarValue>),
}

impl ConditionValue {
    pub fn as_scalar(&self) -> Option<ScalarValue> {
        match self {
            ConditionValue::Number(n) => Some(ScalarValue::Number(*n)),
            ConditionValue::Text(s) => Some(ScalarValue::Text(s.clone())),
            ConditionValue::List(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConditionValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Text(value.to_string())
    }
}

impl From<f64> for ConditionValue {
    fn from(value: f64) -> Self {
        ConditionValue::Number(value)
    }
}

impl From<Vec<ScalarValue>> for ConditionValue {
    fn from(values: Vec<ScalarValue>) -> Self {
        ConditionValue::List(values)
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(values: Vec<&str>) -> Self {
        ConditionValue::List(values.into_iter().map(ScalarValue::from).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub dimension: Dimension,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
}

impl RuleCondition {
    pub fn new(
        dimension: Dimension,
        operator: ConditionOperator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            dimension,
            operator,
            value: value.into(),
        }
    }
}

/// Grouping used by the standards browser. The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAspect {
    EquipmentSelection,
    Quantities,
    Placement,
    Configuration,
    Cabling,
    Commercial,
}

impl RuleAspect {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAspect::EquipmentSelection => "Equipment Selection",
            RuleAspect::Quantities => "Quantities",
            RuleAspect::Placement => "Placement",
            RuleAspect::Configuration => "Configuration",
            RuleAspect::Cabling => "Cabling",
            RuleAspect::Commercial => "Commercial",
        }
    }
}

impl std::fmt::Display for RuleAspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub aspect: RuleAspect,
    #[serde(default)]
    pub expression_type: String,
    pub conditions: Vec<RuleCondition>,
    pub expression: String,
    pub priority: u8,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        aspect: RuleAspect,
        expression: impl Into<String>,
        priority: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            aspect,
            expression_type: String::new(),
            conditions: Vec::new(),
            expression: expression.into(),
            priority,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_condition(
        mut self,
        dimension: Dimension,
        operator: ConditionOperator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.conditions
            .push(RuleCondition::new(dimension, operator, value));
        self
    }

    pub fn with_expression_type(mut self, expression_type: impl Into<String>) -> Self {
        self.expression_type = expression_type.into();
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn severity(&self) -> Severity {
        Severity::from_priority(self.priority)
    }
}
