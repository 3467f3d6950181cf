//! Error types

mod api;
mod field;
mod session;

pub use api::*;
pub use field::*;
pub use session::*;

/// Top-level error type for intake operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error from the form session state machine.
    #[error(transparent)]
    Session(#[from] SessionError),
}
