//! # Wisdom Forms
//!
//! Client-side behavior for the Bill's Wisdom marketing site.
//!
//! ## Features
//!
//! - **Inline validation**: required text, checkbox confirmation, select
//!   choice and email format, rendered as live-region messages
//! - **Submission state machine**: `Idle → Validating → Submitting → Submitted`,
//!   plus `Failed` for submitter errors
//! - **Honeypot gate**: bot submissions are dropped silently
//! - **Pluggable submitter**: simulated latency by default
//! - **Header and mobile menu**: scroll state and ARIA-synced toggling
//!
//! ## Example
//!
//! ```rust
//! use wisdom_forms::{FormController, FormsConfig, MemoryDom, NodeId, SubmitOutcome};
//!
//! let mut dom = MemoryDom::new();
//! let form = dom.element(NodeId::ROOT, "form", &[("id", "contact-form")]);
//! let group = dom.element(form, "div", &[("class", "form-group")]);
//! let name = dom.element(group, "input", &[("name", "name"), ("required", "")]);
//! dom.element(NodeId::ROOT, "div", &[("id", "contact-success"), ("hidden", "")]);
//!
//! let mut controller = FormController::simulated(FormsConfig::default());
//! let ids = controller.register_configured(&dom);
//!
//! let outcome = controller.handle_submit(&mut dom, ids[0]).unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
//! assert_eq!(dom.focused(), Some(name));
//! ```

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod field;
pub mod memory;
pub mod page;
pub mod render;
pub mod state;
pub mod submit;

pub use config::{ClassNames, FormBinding, FormsConfig, Messages, PageConfig, SubmissionConfig};
pub use controller::{FormController, FormId, InvalidField, SubmitOutcome};
pub use dom::{Dom, FieldState};
pub use error::{DomError, FormError};
pub use field::Field;
pub use memory::{MemoryDom, NodeId, SavedContent};
pub use page::{HeaderScroll, MobileMenu};
pub use state::SubmissionState;
pub use submit::{Clock, FormData, FormEntry, SimulatedSubmitter, Submitter};

#[cfg(feature = "tokio")]
pub use submit::TokioClock;

pub use wisdom_forms_validation as validation;
pub use wisdom_forms_validation::{FieldError, FieldKind, Validity};
