//! Form session controller

use std::collections::HashMap;

use super::SectionNavigator;
use crate::error::SessionError;
use crate::model::FormField;
use crate::model::FormSchema;
use crate::model::FormSection;
use crate::model::Submission;
use crate::model::Value;
use crate::validate;

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The active section changed. The caller owns the scroll position
    /// and should reset it to the top.
    Moved,
    /// The active section failed validation; the error map now holds
    /// exactly its failures and the index is unchanged.
    Rejected,
    /// Already at the boundary; nothing changed.
    Held,
}

/// One user's pass through a multi-section form.
///
/// The session owns the fetched schema, the value map, the per-field
/// error map, and the active section. All mutation goes through the
/// transition functions, so the session can be driven and tested without
/// any rendering layer.
///
/// # Example
///
/// ```ignore
/// let mut session = FormSession::new(schema);
/// session.set_value("name", "Alice")?;
/// assert_eq!(session.next(), Step::Moved);
/// let submission = session.submit()?;
/// ```
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    values: HashMap<String, Value>,
    errors: HashMap<String, String>,
    navigator: SectionNavigator,
    submitted: bool,
}

impl FormSession {
    /// Starts a fresh session over a fetched schema: no values, no
    /// errors, first section active.
    pub fn new(schema: FormSchema) -> Self {
        let navigator = SectionNavigator::new(schema.section_count());
        Self {
            schema,
            values: HashMap::new(),
            errors: HashMap::new(),
            navigator,
            submitted: false,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// The schema this session runs over.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// All values entered so far.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Current per-field validation errors.
    ///
    /// Presence of a key means the field failed its last check; absence
    /// means no known error, which is not the same as validated-and-ok.
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// The current error for one field, if any.
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    /// The value of one field, if it was ever set.
    pub fn value(&self, field_id: &str) -> Option<&Value> {
        self.values.get(field_id)
    }

    /// The value of a field, or its kind's default when unset: empty
    /// text for text-like and single-choice fields, an empty list for a
    /// checkbox group, `false` for a bare checkbox.
    pub fn value_or_default(&self, field: &FormField) -> Value {
        if let Some(value) = self.values.get(&field.field_id) {
            return value.clone();
        }
        if field.is_multi_choice() {
            Value::Choices(Vec::new())
        } else if field.is_boolean_toggle() {
            Value::Bool(false)
        } else {
            Value::Text(String::new())
        }
    }

    /// The active section index.
    pub fn section_index(&self) -> usize {
        self.navigator.index()
    }

    /// The number of sections.
    pub fn section_count(&self) -> usize {
        self.navigator.count()
    }

    /// Whether the first section is active.
    pub fn is_first_section(&self) -> bool {
        self.navigator.is_first()
    }

    /// Whether the last section is active.
    pub fn is_last_section(&self) -> bool {
        self.navigator.is_terminal()
    }

    /// The active section, `None` only for a schema with no sections.
    pub fn current_section(&self) -> Option<&FormSection> {
        self.schema.section(self.navigator.index())
    }

    /// Whether the session was submitted.
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Stores a field value and optimistically clears its error: the
    /// field counts as tentatively valid until the next blur or
    /// section-validation pass.
    pub fn set_value(
        &mut self,
        field_id: &str,
        value: impl Into<Value>,
    ) -> Result<(), SessionError> {
        if self.schema.field(field_id).is_none() {
            return Err(SessionError::UnknownField {
                field: field_id.to_string(),
                form_id: self.schema.form_id.clone(),
            });
        }
        self.values.insert(field_id.to_string(), value.into());
        self.errors.remove(field_id);
        Ok(())
    }

    /// Re-validates one field of the active section, recording the error
    /// on failure. Passing never removes an existing error (that is
    /// `set_value`'s job), and a field outside the active section is left
    /// alone.
    pub fn blur(&mut self, field_id: &str) {
        let Some(section) = self.schema.section(self.navigator.index()) else {
            return;
        };
        let Some(field) = section.field(field_id) else {
            return;
        };
        if let Some(message) = validate::validate(field, self.values.get(field_id)) {
            self.errors.insert(field.field_id.clone(), message);
        }
    }

    /// Validates the active section and advances on a clean pass.
    ///
    /// The error map is replaced with exactly the active section's
    /// failures, so stale errors from other sections never linger. At
    /// the last section a clean pass is reported as [`Step::Held`];
    /// submission is the exit action there.
    pub fn next(&mut self) -> Step {
        if self.validate_current_section() > 0 {
            return Step::Rejected;
        }
        if self.navigator.advance() {
            Step::Moved
        } else {
            Step::Held
        }
    }

    /// Moves back one section. Never validates and never touches the
    /// error map; backward navigation is not gated.
    pub fn prev(&mut self) -> Step {
        if self.navigator.retreat() {
            Step::Moved
        } else {
            Step::Held
        }
    }

    /// Submits the session from the last section.
    ///
    /// Re-validates the active section; on a clean pass the session is
    /// marked submitted exactly once and the collected values are
    /// returned for the caller to report to its sink. There is no server
    /// round-trip: submission is a local terminal action.
    pub fn submit(&mut self) -> Result<Submission, SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        if !self.navigator.is_terminal() {
            return Err(SessionError::NotAtEnd {
                index: self.navigator.index(),
                remaining: self.navigator.count() - self.navigator.index() - 1,
            });
        }
        let failures = self.validate_current_section();
        if failures > 0 {
            return Err(SessionError::SectionInvalid {
                index: self.navigator.index(),
                failures,
            });
        }
        self.submitted = true;
        Ok(Submission::new(
            self.schema.form_id.clone(),
            self.values.clone(),
        ))
    }

    /// Runs the validation engine over every field of the active section
    /// and replaces the error map with the results. Returns the number of
    /// failing fields.
    fn validate_current_section(&mut self) -> usize {
        let mut errors = HashMap::new();
        if let Some(section) = self.schema.section(self.navigator.index()) {
            for field in &section.fields {
                if let Some(message) = validate::validate(field, self.values.get(&field.field_id)) {
                    errors.insert(field.field_id.clone(), message);
                }
            }
        }
        let failures = errors.len();
        self.errors = errors;
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;

    fn two_section_schema() -> FormSchema {
        serde_json::from_str(
            r#"{
                "formTitle": "Intake",
                "formId": "intake-01",
                "version": "1",
                "sections": [
                    {
                        "sectionId": 1,
                        "title": "Personal",
                        "fields": [
                            {
                                "fieldId": "name",
                                "type": "text",
                                "label": "Name",
                                "required": true,
                                "dataTestId": "name-input"
                            },
                            {
                                "fieldId": "email",
                                "type": "email",
                                "label": "Email",
                                "required": false,
                                "dataTestId": "email-input"
                            }
                        ]
                    },
                    {
                        "sectionId": 2,
                        "title": "Consent",
                        "fields": [
                            {
                                "fieldId": "topics",
                                "type": "checkbox",
                                "label": "Topics",
                                "required": true,
                                "dataTestId": "topics-input",
                                "options": [
                                    { "value": "rust", "label": "Rust" },
                                    { "value": "go", "label": "Go" }
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_next_rejected_then_advances() {
        let mut session = FormSession::new(two_section_schema());

        assert_eq!(session.next(), Step::Rejected);
        assert_eq!(session.section_index(), 0);
        assert_eq!(session.error("name"), Some("This field is required"));

        session.set_value("name", "Alice").unwrap();
        assert_eq!(session.next(), Step::Moved);
        assert_eq!(session.section_index(), 1);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_rejection_collects_every_failing_field() {
        let mut session = FormSession::new(two_section_schema());
        session.set_value("email", "not-an-email").unwrap();

        assert_eq!(session.next(), Step::Rejected);
        assert_eq!(session.errors().len(), 2);
        assert!(session.error("name").is_some());
        assert_eq!(
            session.error("email"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_set_value_clears_error_optimistically() {
        let mut session = FormSession::new(two_section_schema());

        assert_eq!(session.next(), Step::Rejected);
        assert!(session.error("name").is_some());

        session.set_value("name", "A").unwrap();
        assert_eq!(session.error("name"), None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut session = FormSession::new(two_section_schema());

        let err = session.set_value("nope", "x").unwrap_err();
        assert!(matches!(err, SessionError::UnknownField { .. }));
        assert!(session.values().is_empty());
    }

    #[test]
    fn test_blur_adds_but_never_clears() {
        let mut session = FormSession::new(two_section_schema());

        session.blur("name");
        assert_eq!(session.error("name"), Some("This field is required"));

        // Blur on a now-valid field leaves the map untouched; only
        // set_value or a section pass clears entries.
        session.set_value("email", "a@b.co").unwrap();
        session.blur("email");
        assert_eq!(session.error("email"), None);
    }

    #[test]
    fn test_blur_outside_current_section_is_noop() {
        let mut session = FormSession::new(two_section_schema());

        session.blur("topics");
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_prev_never_validates() {
        let mut session = FormSession::new(two_section_schema());
        session.set_value("name", "Alice").unwrap();
        assert_eq!(session.next(), Step::Moved);

        // Section 1 is invalid (required topics unset), but prev is not
        // gated and does not touch the error map.
        assert_eq!(session.prev(), Step::Moved);
        assert_eq!(session.section_index(), 0);
        assert!(session.errors().is_empty());

        assert_eq!(session.prev(), Step::Held);
    }

    #[test]
    fn test_next_held_at_terminal() {
        let mut session = FormSession::new(two_section_schema());
        session.set_value("name", "Alice").unwrap();
        session.next();
        session.set_value("topics", vec!["rust".to_string()]).unwrap();

        assert_eq!(session.next(), Step::Held);
        assert_eq!(session.section_index(), 1);
    }

    #[test]
    fn test_submit_only_from_terminal() {
        let mut session = FormSession::new(two_section_schema());
        session.set_value("name", "Alice").unwrap();

        let err = session.submit().unwrap_err();
        assert_eq!(err, SessionError::NotAtEnd { index: 0, remaining: 1 });
    }

    #[test]
    fn test_submit_validates_and_reports_values() {
        let mut session = FormSession::new(two_section_schema());
        session.set_value("name", "Alice").unwrap();
        session.next();

        let err = session.submit().unwrap_err();
        assert_eq!(err, SessionError::SectionInvalid { index: 1, failures: 1 });
        assert!(session.error("topics").is_some());
        assert!(!session.submitted());

        session.set_value("topics", vec!["rust".to_string()]).unwrap();
        let submission = session.submit().unwrap();
        assert!(session.submitted());
        assert_eq!(submission.form_id(), "intake-01");
        assert_eq!(submission.text("name").unwrap(), "Alice");
        assert_eq!(submission.choices("topics").unwrap(), ["rust"]);
    }

    #[test]
    fn test_submit_exactly_once() {
        let mut session = FormSession::new(two_section_schema());
        session.set_value("name", "Alice").unwrap();
        session.next();
        session.set_value("topics", vec!["rust".to_string()]).unwrap();

        assert!(session.submit().is_ok());
        assert_eq!(session.submit().unwrap_err(), SessionError::AlreadySubmitted);
    }

    #[test]
    fn test_default_reads_by_kind() {
        let session = FormSession::new(two_section_schema());
        let schema = session.schema().clone();

        let name = schema.field("name").unwrap();
        assert_eq!(session.value_or_default(name), Value::Text(String::new()));

        let topics = schema.field("topics").unwrap();
        assert_eq!(session.value_or_default(topics), Value::Choices(Vec::new()));

        let toggle: FormField = serde_json::from_str(
            r#"{
                "fieldId": "ok",
                "type": "checkbox",
                "label": "Ok",
                "required": false,
                "dataTestId": "ok-input"
            }"#,
        )
        .unwrap();
        assert_eq!(toggle.kind, FieldKind::Checkbox);
        assert_eq!(session.value_or_default(&toggle), Value::Bool(false));
    }
}
