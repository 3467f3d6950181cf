//! Field validation engine
//!
//! Pure, side-effect-free checks of a candidate value against a field's
//! declared rules. Rules run in a fixed order and the first failure wins:
//! required, then minimum length, then maximum length, then kind-specific
//! shape (email, phone). Shape and length rules apply to text values only;
//! choice lists and toggles are covered by the required rule alone.

use crate::model::FieldKind;
use crate::model::FormField;
use crate::model::Value;

/// Validates `value` against `field`, returning the error to show the
/// user, or `None` when the value is acceptable.
///
/// `None` as the value means the field was never touched. A missing or
/// blank value only fails when the field is required; all later rules are
/// skipped for empty input so an optional empty field never reports a
/// length or shape error.
pub fn validate(field: &FormField, value: Option<&Value>) -> Option<String> {
    if field.required && value.is_none_or(Value::is_blank) {
        let message = field
            .validation_message()
            .unwrap_or("This field is required");
        return Some(message.to_string());
    }

    let text = match value {
        Some(Value::Text(s)) if !s.is_empty() => s.as_str(),
        _ => return None,
    };

    if let Some(min) = field.min_length {
        if text.chars().count() < min {
            return Some(format!("Must be at least {min} characters"));
        }
    }

    if let Some(max) = field.max_length {
        if text.chars().count() > max {
            return Some(format!("Cannot exceed {max} characters"));
        }
    }

    match field.kind {
        FieldKind::Email if !is_email_shaped(text) => {
            Some("Please enter a valid email address".to_string())
        }
        FieldKind::Tel if !is_phone_shaped(text) => {
            Some("Please enter a valid phone number".to_string())
        }
        _ => None,
    }
}

/// `local@domain.tld`: exactly one `@` with non-whitespace on both sides,
/// and a dot somewhere strictly inside the domain part.
fn is_email_shaped(text: &str) -> bool {
    let mut parts = text.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let len = domain.chars().count();
    domain
        .chars()
        .enumerate()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < len)
}

/// Optional leading `+`, then at least eight characters drawn from
/// digits, whitespace, hyphens, and parentheses.
fn is_phone_shaped(text: &str) -> bool {
    let rest = text.strip_prefix('+').unwrap_or(text);
    rest.chars().count() >= 8
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')'))
}
