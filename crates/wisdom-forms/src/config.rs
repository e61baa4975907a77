// File: src/config.rs
// Purpose: Configuration parsing from wisdom-forms.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use wisdom_forms_validation::FieldError;

/// Behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default)]
    pub classes: ClassNames,

    #[serde(default)]
    pub messages: Messages,

    #[serde(default)]
    pub page: PageConfig,

    /// Forms wired up by id at startup
    #[serde(default = "default_forms")]
    pub forms: Vec<FormBinding>,
}

/// Submission feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Simulated latency before the success view shows
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Submit control label while a submission is in flight
    #[serde(default = "default_sending_label")]
    pub sending_label: String,

    /// Form-level message shown when the submitter fails
    #[serde(default = "default_failure_message")]
    pub failure_message: String,
}

/// CSS hooks shared with the site's stylesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNames {
    /// Marker class on an invalid field
    #[serde(default = "default_error_class")]
    pub error: String,

    /// Class of rendered error-message nodes
    #[serde(default = "default_message_class")]
    pub message: String,

    /// Enclosing group of a checkbox; its message goes in here
    #[serde(default = "default_checkbox_group_class")]
    pub checkbox_group: String,
}

/// User-facing wording for each rule failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_required")]
    pub required: String,

    #[serde(default = "default_confirmation_required")]
    pub confirmation_required: String,

    #[serde(default = "default_selection_required")]
    pub selection_required: String,

    #[serde(default = "default_invalid_email")]
    pub invalid_email: String,
}

/// Header and mobile menu hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_header_id")]
    pub header_id: String,

    /// Scroll offset (px) past which the header gets its `scrolled` class
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,

    #[serde(default = "default_menu_toggle_id")]
    pub menu_toggle_id: String,

    #[serde(default = "default_menu_id")]
    pub menu_id: String,
}

/// Element ids for one form instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormBinding {
    pub form: String,
    pub success: String,
    #[serde(default)]
    pub honeypot: Option<String>,
}

impl FormBinding {
    pub fn new(form: &str, success: &str, honeypot: Option<&str>) -> Self {
        Self {
            form: form.to_string(),
            success: success.to_string(),
            honeypot: honeypot.map(str::to_string),
        }
    }
}

// Default values
fn default_latency_ms() -> u64 {
    800
}

fn default_sending_label() -> String {
    "Sending...".to_string()
}

fn default_failure_message() -> String {
    "Something went wrong. Please try again.".to_string()
}

fn default_error_class() -> String {
    "error".to_string()
}

fn default_message_class() -> String {
    "form-error-msg".to_string()
}

fn default_checkbox_group_class() -> String {
    "form-checkbox".to_string()
}

fn default_required() -> String {
    FieldError::Required.to_string()
}

fn default_confirmation_required() -> String {
    FieldError::ConfirmationRequired.to_string()
}

fn default_selection_required() -> String {
    FieldError::SelectionRequired.to_string()
}

fn default_invalid_email() -> String {
    FieldError::InvalidEmail.to_string()
}

fn default_header_id() -> String {
    "site-header".to_string()
}

fn default_scroll_threshold() -> f64 {
    20.0
}

fn default_menu_toggle_id() -> String {
    "mobile-menu-toggle".to_string()
}

fn default_menu_id() -> String {
    "mobile-menu".to_string()
}

fn default_forms() -> Vec<FormBinding> {
    vec![
        FormBinding::new("contact-form", "contact-success", Some("contact-website")),
        FormBinding::new("investor-form", "investor-success", Some("investor-website")),
    ]
}

// Default implementations
impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            submission: SubmissionConfig::default(),
            classes: ClassNames::default(),
            messages: Messages::default(),
            page: PageConfig::default(),
            forms: default_forms(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            sending_label: default_sending_label(),
            failure_message: default_failure_message(),
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            error: default_error_class(),
            message: default_message_class(),
            checkbox_group: default_checkbox_group_class(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: default_required(),
            confirmation_required: default_confirmation_required(),
            selection_required: default_selection_required(),
            invalid_email: default_invalid_email(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            header_id: default_header_id(),
            scroll_threshold: default_scroll_threshold(),
            menu_toggle_id: default_menu_toggle_id(),
            menu_id: default_menu_id(),
        }
    }
}

impl SubmissionConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Messages {
    /// Wording for a rule failure
    pub fn for_error(&self, error: FieldError) -> &str {
        match error {
            FieldError::Required => &self.required,
            FieldError::ConfirmationRequired => &self.confirmation_required,
            FieldError::SelectionRequired => &self.selection_required,
            FieldError::InvalidEmail => &self.invalid_email,
        }
    }
}

impl FormsConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./wisdom-forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("wisdom-forms.toml")
    }

    /// Parse TOML; empty input yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: FormsConfig = toml::from_str(content)?;
        Ok(config)
    }
}
