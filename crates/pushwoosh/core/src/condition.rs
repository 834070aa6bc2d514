//! Audience filter conditions.

/// Audience filter attached to a broadcast send.
///
/// Conditions are immutable once created; use [`crate::Message::add_condition`].
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    name: String,
    operator: String,
    operand: serde_json::Value,
}

impl Condition {
    /// Create a condition such as `("A.tags.offer", "EQ", "winter")`.
    pub fn new(
        name: impl Into<String>,
        operator: impl Into<String>,
        operand: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            operator: operator.into(),
            operand: operand.into(),
        }
    }

    /// Tag or field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Comparison operator (e.g. `EQ`, `IN`, `BETWEEN`).
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Right-hand side of the comparison.
    pub fn operand(&self) -> &serde_json::Value {
        &self.operand
    }

    /// Wire form of the condition.
    ///
    /// A structured operand (array or object) is sent as-is; a scalar operand
    /// is rendered as `"<name> <operator> <operand>"`.
    pub fn to_wire(&self) -> serde_json::Value {
        use serde_json::Value;

        let operand = match &self.operand {
            Value::Array(_) | Value::Object(_) => return self.operand.clone(),
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };

        Value::String(format!("{} {} {}", self.name, self.operator, operand))
    }
}
