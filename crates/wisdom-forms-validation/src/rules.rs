//! Field rule evaluation
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. required checkbox must be checked
//! 2. required single select must have a real option chosen
//! 3. any other required field must have a non-blank value
//! 4. an email field with a value must look like `local@domain.tld`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email::is_valid_email;
use crate::kind::FieldKind;

/// Why a field failed validation
///
/// The `Display` text is the default user-facing message; hosts can swap in
/// their own wording per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("This confirmation is required")]
    ConfirmationRequired,

    #[error("Please select an option")]
    SelectionRequired,

    #[error("This field is required")]
    Required,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl FieldError {
    /// The validity state this failure puts the field in
    pub fn validity(&self) -> Validity {
        match self {
            FieldError::InvalidEmail => Validity::InvalidFormat,
            _ => Validity::InvalidEmpty,
        }
    }
}

/// Current validity of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    #[default]
    Valid,
    InvalidEmpty,
    InvalidFormat,
}

impl Validity {
    pub fn from_result(result: &Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => Validity::Valid,
            Err(err) => err.validity(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// A snapshot of one control, read from the DOM right before validating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInput {
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    /// Selected option index for selects; `None` when nothing is selected
    #[serde(default)]
    pub selected_index: Option<usize>,
}

impl FieldInput {
    pub fn new(kind: FieldKind, required: bool, value: impl Into<String>) -> Self {
        Self {
            kind,
            required,
            value: value.into(),
            checked: false,
            selected_index: None,
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_selected_index(mut self, index: Option<usize>) -> Self {
        self.selected_index = index;
        self
    }
}

/// Validate a single field snapshot
///
/// # Examples
/// ```
/// use wisdom_forms_validation::{validate, FieldError, FieldInput, FieldKind};
///
/// let empty = FieldInput::new(FieldKind::Text, true, "   ");
/// assert_eq!(validate(&empty), Err(FieldError::Required));
///
/// let email = FieldInput::new(FieldKind::Email, true, "foo@bar");
/// assert_eq!(validate(&email), Err(FieldError::InvalidEmail));
/// ```
pub fn validate(input: &FieldInput) -> Result<(), FieldError> {
    let value = input.value.trim();

    if input.required {
        match input.kind {
            FieldKind::Checkbox => {
                if !input.checked {
                    return Err(FieldError::ConfirmationRequired);
                }
            }
            FieldKind::Select => {
                // the first option is the placeholder
                let chosen = matches!(input.selected_index, Some(index) if index > 0);
                if value.is_empty() || !chosen {
                    return Err(FieldError::SelectionRequired);
                }
            }
            _ => {
                if value.is_empty() {
                    return Err(FieldError::Required);
                }
            }
        }
    }

    if input.kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case("\t\n", false)]
    #[case("Bill", true)]
    #[case("  padded  ", true)]
    fn test_required_text(#[case] value: &str, #[case] valid: bool) {
        let input = FieldInput::new(FieldKind::Text, true, value);
        let expected = if valid { Ok(()) } else { Err(FieldError::Required) };
        assert_eq!(validate(&input), expected);
    }

    #[rstest]
    #[case(false, Err(FieldError::ConfirmationRequired))]
    #[case(true, Ok(()))]
    fn test_required_checkbox(#[case] checked: bool, #[case] expected: Result<(), FieldError>) {
        let input = FieldInput::new(FieldKind::Checkbox, true, "on").with_checked(checked);
        assert_eq!(validate(&input), expected);
    }

    #[rstest]
    #[case(Some(0), "", Err(FieldError::SelectionRequired))]
    #[case(Some(0), "placeholder", Err(FieldError::SelectionRequired))]
    #[case(Some(2), "", Err(FieldError::SelectionRequired))]
    #[case(None, "", Err(FieldError::SelectionRequired))]
    #[case(Some(1), "investor", Ok(()))]
    fn test_required_select(
        #[case] index: Option<usize>,
        #[case] value: &str,
        #[case] expected: Result<(), FieldError>,
    ) {
        let input = FieldInput::new(FieldKind::Select, true, value).with_selected_index(index);
        assert_eq!(validate(&input), expected);
    }

    #[rstest]
    #[case("a@b.c", Ok(()))]
    #[case("  bill@wisdom.com  ", Ok(()))]
    #[case("foo@bar", Err(FieldError::InvalidEmail))]
    #[case("foo.bar", Err(FieldError::InvalidEmail))]
    #[case("fo o@bar.com", Err(FieldError::InvalidEmail))]
    #[case("", Err(FieldError::Required))]
    fn test_required_email(#[case] value: &str, #[case] expected: Result<(), FieldError>) {
        let input = FieldInput::new(FieldKind::Email, true, value);
        assert_eq!(validate(&input), expected);
    }

    #[test]
    fn test_optional_email_checks_format_only_when_filled() {
        assert_eq!(validate(&FieldInput::new(FieldKind::Email, false, "")), Ok(()));
        assert_eq!(
            validate(&FieldInput::new(FieldKind::Email, false, "nope")),
            Err(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn test_unchecked_optional_checkbox_is_valid() {
        let input = FieldInput::new(FieldKind::Checkbox, false, "on");
        assert_eq!(validate(&input), Ok(()));
    }

    #[test]
    fn test_validity_mapping() {
        assert_eq!(Validity::from_result(&Ok(())), Validity::Valid);
        assert_eq!(
            Validity::from_result(&Err(FieldError::Required)),
            Validity::InvalidEmpty
        );
        assert_eq!(
            Validity::from_result(&Err(FieldError::InvalidEmail)),
            Validity::InvalidFormat
        );
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(
            FieldError::ConfirmationRequired.to_string(),
            "This confirmation is required"
        );
        assert_eq!(FieldError::SelectionRequired.to_string(), "Please select an option");
        assert_eq!(
            FieldError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }
}
