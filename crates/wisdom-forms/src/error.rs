//! Error types for the form controller and DOM adapters

use thiserror::Error;

use crate::controller::FormId;

/// A DOM adapter could not carry out an operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node is not part of this document")]
    UnknownNode,

    #[error("DOM operation `{op}` failed: {message}")]
    Operation { op: &'static str, message: String },
}

impl DomError {
    pub fn operation(op: &'static str, message: impl Into<String>) -> Self {
        DomError::Operation {
            op,
            message: message.into(),
        }
    }
}

/// Errors returned by [`FormController`](crate::FormController)
///
/// User-input failures never show up here; they are rendered inline and
/// reported through [`SubmitOutcome`](crate::SubmitOutcome).
#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0} is not registered")]
    UnknownForm(FormId),

    #[error("{form} cannot move from {from} to {to}")]
    InvalidTransition {
        form: FormId,
        from: &'static str,
        to: &'static str,
    },

    #[error(transparent)]
    Dom(#[from] DomError),
}
