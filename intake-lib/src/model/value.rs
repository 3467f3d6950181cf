//! Value enum for dynamic field values

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value that can hold any form field shape.
///
/// Text-like fields (text, tel, email, textarea, date) and single-choice
/// fields (dropdown, radio) hold [`Text`](Value::Text); checkbox groups
/// hold [`Choices`](Value::Choices); a bare checkbox holds
/// [`Bool`](Value::Bool). Serialization is untagged so a value map
/// round-trips as the plain JSON the service side expects.
///
/// # Example
///
/// ```
/// use intake_lib::model::Value;
///
/// let name = Value::from("Alice");
/// let topics = Value::from(vec!["rust".to_string()]);
/// let subscribed = Value::from(true);
///
/// assert_eq!(name.as_text(), Some("Alice"));
/// assert!(subscribed.as_bool().unwrap());
/// assert_eq!(topics.type_name(), "choices");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Free text, a date string, or a single selected option value.
    Text(String),
    /// Selected option values of a checkbox group, in selection order.
    Choices(Vec<String>),
    /// State of a bare checkbox.
    Bool(bool),
}

impl Value {
    /// Whether this value counts as missing for a required check.
    ///
    /// Empty text and an empty choice list are blank. A boolean is never
    /// blank: an unticked checkbox is a present `false`, not an absent
    /// value.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Choices(c) => c.is_empty(),
            Value::Bool(_) => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Choices(_) => "choices",
            Value::Bool(_) => "bool",
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the selected options, if this is a choice list.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Value::Choices(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the boolean state, if this is a toggle value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Choices(v)
    }
}

impl From<&[&str]> for Value {
    fn from(v: &[&str]) -> Self {
        Value::Choices(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serde() {
        assert_eq!(
            serde_json::to_string(&Value::from("hi")).unwrap(),
            r#""hi""#
        );
        assert_eq!(
            serde_json::to_string(&Value::from(vec!["a".to_string()])).unwrap(),
            r#"["a"]"#
        );
        assert_eq!(serde_json::to_string(&Value::from(false)).unwrap(), "false");

        let parsed: Value = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(parsed.as_choices().unwrap().len(), 2);
        let parsed: Value = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, Value::Bool(true));
    }

    #[test]
    fn test_blankness() {
        assert!(Value::from("").is_blank());
        assert!(Value::Choices(Vec::new()).is_blank());
        assert!(!Value::from("x").is_blank());
        assert!(!Value::from(false).is_blank());
        assert!(!Value::from(true).is_blank());
    }
}
