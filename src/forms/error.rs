//! Errors raised when addressing or mutating the control tree

use thiserror::Error;

/// Failure to address or update a control.
///
/// Validation failures are not errors; they live on the controls as
/// [`ValidationErrors`](super::ValidationErrors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no control at path '{0}'")]
    NotFound(String),

    #[error("control at '{path}' is not a {expected}")]
    WrongKind {
        path: String,
        expected: &'static str,
    },
}
