//! Wisdom Forms Validation
//!
//! Pure field rules with no DOM access. Used by the form controller for both
//! native (tests, headless) and WASM client-side builds.

pub mod email;
pub mod kind;
pub mod rules;

pub use email::is_valid_email;
pub use kind::FieldKind;
pub use rules::{validate, FieldError, FieldInput, Validity};
