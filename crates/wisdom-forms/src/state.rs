//! Per-form submission state machine
//!
//! ```text
//! Idle ──submit──▶ Validating ──invalid──▶ Idle
//!                      │
//!                    valid
//!                      ▼
//!                 Submitting ──ok──▶ Submitted (terminal)
//!                      │
//!                    error
//!                      ▼
//!                   Failed ──submit──▶ Validating
//! ```

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Submitted,
    Failed { reason: String },
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Submitted => "submitted",
            SubmissionState::Failed { .. } => "failed",
        }
    }

    /// Whether a new submit attempt may start from here
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed { .. })
    }

    /// Whether the form is waiting on the submitter or already done
    pub fn is_locked(&self) -> bool {
        matches!(self, SubmissionState::Submitting | SubmissionState::Submitted)
    }

    pub fn can_transition_to(&self, next: &SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Failed { .. }, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Submitted)
                | (Submitting, Failed { .. })
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
