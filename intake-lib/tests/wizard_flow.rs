//! End-to-end wizard scenarios over the public API.

use intake_lib::model::FormSchema;
use intake_lib::model::Value;
use intake_lib::session::FormSession;
use intake_lib::session::Step;

fn registration_schema() -> FormSchema {
    serde_json::from_str(
        r#"{
            "formTitle": "Course Registration",
            "formId": "reg-2026",
            "version": "2",
            "sections": [
                {
                    "sectionId": 1,
                    "title": "Contact",
                    "description": "How to reach you",
                    "fields": [
                        {
                            "fieldId": "name",
                            "type": "text",
                            "label": "Full name",
                            "required": true,
                            "dataTestId": "name-input",
                            "minLength": 2,
                            "maxLength": 40
                        },
                        {
                            "fieldId": "email",
                            "type": "email",
                            "label": "Email",
                            "required": true,
                            "dataTestId": "email-input"
                        },
                        {
                            "fieldId": "phone",
                            "type": "tel",
                            "label": "Phone",
                            "required": false,
                            "dataTestId": "phone-input"
                        }
                    ]
                },
                {
                    "sectionId": 2,
                    "title": "Course",
                    "fields": [
                        {
                            "fieldId": "track",
                            "type": "radio",
                            "label": "Track",
                            "required": true,
                            "dataTestId": "track-input",
                            "validation": { "message": "Pick a track" },
                            "options": [
                                { "value": "systems", "label": "Systems" },
                                { "value": "web", "label": "Web" }
                            ]
                        },
                        {
                            "fieldId": "topics",
                            "type": "checkbox",
                            "label": "Topics of interest",
                            "required": false,
                            "dataTestId": "topics-input",
                            "options": [
                                { "value": "async", "label": "Async" },
                                { "value": "ffi", "label": "FFI" }
                            ]
                        }
                    ]
                },
                {
                    "sectionId": 3,
                    "title": "Consent",
                    "fields": [
                        {
                            "fieldId": "terms",
                            "type": "checkbox",
                            "label": "I accept the terms",
                            "required": true,
                            "dataTestId": "terms-input",
                            "validation": { "message": "You must accept the terms" }
                        }
                    ]
                }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn full_pass_through_all_sections() {
    let mut session = FormSession::new(registration_schema());
    assert_eq!(session.section_count(), 3);

    // Section 0: blocked until the required fields hold valid values.
    assert_eq!(session.next(), Step::Rejected);
    assert_eq!(session.errors().len(), 2);

    session.set_value("name", "Alice Example").unwrap();
    session.set_value("email", "alice@example.edu").unwrap();
    session.set_value("phone", "+1 555-123-4567").unwrap();
    assert_eq!(session.next(), Step::Moved);

    // Section 1: schema-declared message for the missed radio group.
    assert_eq!(session.next(), Step::Rejected);
    assert_eq!(session.error("track"), Some("Pick a track"));

    session.set_value("track", "systems").unwrap();
    session
        .set_value("topics", vec!["async".to_string(), "ffi".to_string()])
        .unwrap();
    assert_eq!(session.next(), Step::Moved);
    assert!(session.is_last_section());

    // Terminal section: an unticked required toggle blocks submission.
    let err = session.submit().unwrap_err();
    assert_eq!(
        format!("{err}"),
        "Section 2 has 1 invalid field(s)"
    );
    assert_eq!(session.error("terms"), Some("You must accept the terms"));

    session.set_value("terms", true).unwrap();
    let submission = session.submit().unwrap();

    assert_eq!(submission.form_id(), "reg-2026");
    assert_eq!(submission.len(), 5);
    assert_eq!(submission.text("email").unwrap(), "alice@example.edu");
    assert_eq!(submission.choices("topics").unwrap(), ["async", "ffi"]);
    assert!(submission.flag("terms").unwrap());

    // The reported map serializes as the plain JSON the sink logs.
    let json = serde_json::to_value(submission.values()).unwrap();
    assert_eq!(json["name"], "Alice Example");
    assert_eq!(json["terms"], true);
}

#[test]
fn backtracking_preserves_entered_values() {
    let mut session = FormSession::new(registration_schema());

    session.set_value("name", "Bo").unwrap();
    session.set_value("email", "bo@uni.edu").unwrap();
    assert_eq!(session.next(), Step::Moved);

    assert_eq!(session.prev(), Step::Moved);
    assert_eq!(
        session.value("name").and_then(Value::as_text),
        Some("Bo")
    );

    // Going forward again re-validates but the values still pass.
    assert_eq!(session.next(), Step::Moved);
    assert_eq!(session.section_index(), 1);
}

#[test]
fn edit_after_rejection_clears_only_that_field() {
    let mut session = FormSession::new(registration_schema());

    assert_eq!(session.next(), Step::Rejected);
    assert!(session.error("name").is_some());
    assert!(session.error("email").is_some());

    session.set_value("name", "Alice").unwrap();
    assert_eq!(session.error("name"), None);
    assert!(session.error("email").is_some());
}
