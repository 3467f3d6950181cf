//! Submitted form values

use std::collections::HashMap;

use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// The complete value map of a successfully submitted session.
///
/// A `Submission` is produced exactly once per session by
/// [`FormSession::submit`](crate::session::FormSession::submit) and handed
/// to the caller for reporting to its sink. Typed getters provide safe
/// access with proper error handling.
///
/// # Example
///
/// ```ignore
/// let submission = session.submit()?;
/// println!("{}", serde_json::to_string(submission.values())?);
/// assert_eq!(submission.text("name")?, "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    form_id: String,
    values: HashMap<String, Value>,
}

impl Submission {
    pub(crate) fn new(form_id: impl Into<String>, values: HashMap<String, Value>) -> Self {
        Self {
            form_id: form_id.into(),
            values,
        }
    }

    /// Returns the id of the form this submission answers.
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Returns the raw value map.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Returns the number of collected values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field was ever filled in.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Returns the text content of a field.
    pub fn text(&self, field: &str) -> Result<&str, FieldError> {
        match self.require(field)? {
            Value::Text(s) => Ok(s),
            other => Err(FieldError::type_mismatch(field, "text", other.type_name())),
        }
    }

    /// Returns the selected options of a checkbox-group field.
    pub fn choices(&self, field: &str) -> Result<&[String], FieldError> {
        match self.require(field)? {
            Value::Choices(c) => Ok(c),
            other => Err(FieldError::type_mismatch(
                field,
                "choices",
                other.type_name(),
            )),
        }
    }

    /// Returns the state of a bare checkbox field.
    pub fn flag(&self, field: &str) -> Result<bool, FieldError> {
        match self.require(field)? {
            Value::Bool(b) => Ok(*b),
            other => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    fn require(&self, field: &str) -> Result<&Value, FieldError> {
        self.values.get(field).ok_or_else(|| FieldError::missing(field))
    }
}
