//! Form schema types

use serde::Deserialize;
use serde::Serialize;

/// A complete form definition fetched from the intake service.
///
/// Schemas are immutable once fetched. Section order and field order are
/// significant: they define the wizard page order and the on-page field
/// order for the lifetime of a session.
///
/// # Example
///
/// ```
/// use intake_lib::model::FormSchema;
///
/// let schema: FormSchema = serde_json::from_str(r#"{
///     "formTitle": "Student Intake",
///     "formId": "intake-01",
///     "version": "1",
///     "sections": []
/// }"#).unwrap();
///
/// assert_eq!(schema.form_title, "Student Intake");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Display title of the form.
    pub form_title: String,
    /// Identifier of the form definition.
    pub form_id: String,
    /// Version string of the form definition.
    pub version: String,
    /// Ordered wizard sections.
    pub sections: Vec<FormSection>,
}

impl FormSchema {
    /// Returns the section at `index`, if it exists.
    pub fn section(&self, index: usize) -> Option<&FormSection> {
        self.sections.get(index)
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Iterates over every field of every section, in wizard order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Looks up a field anywhere in the schema by its id.
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields().find(|f| f.field_id == field_id)
    }
}

/// One wizard page: an ordered group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    /// Numeric section identifier from the service.
    pub section_id: i64,
    /// Section heading.
    pub title: String,
    /// Optional longer description shown under the heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered fields of this section.
    pub fields: Vec<FormField>,
}

impl FormSection {
    /// Looks up a field of this section by its id.
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }
}

/// A single field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Field identifier, unique within the schema.
    pub field_id: String,
    /// The input kind; selects both the renderer and the shape rules.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Display label.
    pub label: String,
    /// Optional placeholder shown while the field is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the field must hold a non-empty value to pass validation.
    pub required: bool,
    /// Test hook identifier carried through from the wire format.
    #[serde(default)]
    pub data_test_id: String,
    /// Optional override for the required-check error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationHint>,
    /// Choice options; present and non-empty means a choice field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Maximum accepted length for text input, in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Minimum accepted length for text input, in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

impl FormField {
    /// Returns the declared choice options, empty when there are none.
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Whether this field offers a fixed set of options
    /// (dropdown, radio, or a checkbox group).
    pub fn is_choice(&self) -> bool {
        !self.options().is_empty()
    }

    /// Whether this is a checkbox group holding multiple selections.
    pub fn is_multi_choice(&self) -> bool {
        self.kind == FieldKind::Checkbox && self.is_choice()
    }

    /// Whether this is a bare checkbox holding a single boolean.
    pub fn is_boolean_toggle(&self) -> bool {
        self.kind == FieldKind::Checkbox && !self.is_choice()
    }

    /// The schema-declared message for a failed required check, if any.
    pub fn validation_message(&self) -> Option<&str> {
        self.validation.as_ref().map(|v| v.message.as_str())
    }
}

/// The closed set of field kinds the service can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Telephone number input; phone-shape validated.
    Tel,
    /// Email address input; email-shape validated.
    Email,
    /// Multi-line text input.
    Textarea,
    /// Date input; the value travels as a plain string.
    Date,
    /// Single choice from a list.
    Dropdown,
    /// Single choice shown as radio buttons.
    Radio,
    /// Boolean toggle, or a multi-choice group when options are declared.
    Checkbox,
}

impl FieldKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Tel => "tel",
            FieldKind::Email => "email",
            FieldKind::Textarea => "textarea",
            FieldKind::Date => "date",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
        }
    }

    /// Whether values of this kind are edited as free text.
    ///
    /// Choice and toggle fields are excluded; note a `checkbox` field is
    /// never text-like regardless of options.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Tel
                | FieldKind::Email
                | FieldKind::Textarea
                | FieldKind::Date
        )
    }
}

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    /// Stored value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Optional per-option test hook identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

/// Schema-declared validation overrides for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationHint {
    /// Message shown when the required check fails.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA_JSON: &str = r#"{
        "formTitle": "Student Intake",
        "formId": "intake-01",
        "version": "3",
        "sections": [
            {
                "sectionId": 1,
                "title": "Personal",
                "description": "Who you are",
                "fields": [
                    {
                        "fieldId": "name",
                        "type": "text",
                        "label": "Full name",
                        "placeholder": "Jane Doe",
                        "required": true,
                        "dataTestId": "name-input",
                        "validation": { "message": "Name is mandatory" },
                        "minLength": 2,
                        "maxLength": 60
                    },
                    {
                        "fieldId": "email",
                        "type": "email",
                        "label": "Email",
                        "required": true,
                        "dataTestId": "email-input"
                    }
                ]
            },
            {
                "sectionId": 2,
                "title": "Preferences",
                "fields": [
                    {
                        "fieldId": "topics",
                        "type": "checkbox",
                        "label": "Topics",
                        "required": false,
                        "dataTestId": "topics-input",
                        "options": [
                            { "value": "rust", "label": "Rust" },
                            { "value": "go", "label": "Go", "dataTestId": "topics-go" }
                        ]
                    },
                    {
                        "fieldId": "subscribe",
                        "type": "checkbox",
                        "label": "Subscribe to updates",
                        "required": false,
                        "dataTestId": "subscribe-input"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_wire_shape() {
        let schema: FormSchema = serde_json::from_str(SCHEMA_JSON).unwrap();

        assert_eq!(schema.form_title, "Student Intake");
        assert_eq!(schema.form_id, "intake-01");
        assert_eq!(schema.section_count(), 2);

        let name = schema.field("name").unwrap();
        assert_eq!(name.kind, FieldKind::Text);
        assert_eq!(name.min_length, Some(2));
        assert_eq!(name.max_length, Some(60));
        assert_eq!(name.validation_message(), Some("Name is mandatory"));
        assert_eq!(name.data_test_id, "name-input");

        let section = schema.section(1).unwrap();
        assert_eq!(section.section_id, 2);
        assert!(section.description.is_none());
        assert!(section.field("topics").is_some());
    }

    #[test]
    fn test_choice_classification() {
        let schema: FormSchema = serde_json::from_str(SCHEMA_JSON).unwrap();

        let topics = schema.field("topics").unwrap();
        assert!(topics.is_choice());
        assert!(topics.is_multi_choice());
        assert!(!topics.is_boolean_toggle());
        assert_eq!(topics.options().len(), 2);
        assert_eq!(topics.options()[1].data_test_id.as_deref(), Some("topics-go"));

        let subscribe = schema.field("subscribe").unwrap();
        assert!(!subscribe.is_choice());
        assert!(subscribe.is_boolean_toggle());

        let email = schema.field("email").unwrap();
        assert!(email.kind.is_text_like());
        assert!(!topics.kind.is_text_like());
    }

    #[test]
    fn test_flattened_field_order() {
        let schema: FormSchema = serde_json::from_str(SCHEMA_JSON).unwrap();

        let ids: Vec<&str> = schema.fields().map(|f| f.field_id.as_str()).collect();
        assert_eq!(ids, ["name", "email", "topics", "subscribe"]);
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(FieldKind::Textarea.as_str(), "textarea");
        let kind: FieldKind = serde_json::from_str(r#""dropdown""#).unwrap();
        assert_eq!(kind, FieldKind::Dropdown);
        assert_eq!(serde_json::to_string(&FieldKind::Tel).unwrap(), r#""tel""#);
    }
}
