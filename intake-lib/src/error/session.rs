//! Session state machine errors

/// Errors produced by [`FormSession`](crate::session::FormSession)
/// transitions.
///
/// None of these are fatal: every variant leaves the session in a valid
/// state with its error map describing what the user must fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The field id does not exist anywhere in the loaded schema.
    #[error("Unknown field '{field}' for form '{form_id}'")]
    UnknownField { field: String, form_id: String },

    /// Submit was invoked before reaching the last section.
    #[error("Cannot submit from section {index}: {remaining} section(s) remain")]
    NotAtEnd { index: usize, remaining: usize },

    /// The active section has validation failures.
    #[error("Section {index} has {failures} invalid field(s)")]
    SectionInvalid { index: usize, failures: usize },

    /// The session was already submitted.
    #[error("Form already submitted")]
    AlreadySubmitted,
}
