//! Form validation controller
//!
//! Owns every registered form's submission state and drives the pipeline:
//!
//! 1. honeypot gate (a filled honeypot silently drops the attempt)
//! 2. clear stale errors, then validate every required field
//! 3. focus the first invalid field, or lock the submit control
//! 4. hand the payload to the [`Submitter`] and show the success view
//!
//! Event wiring lives outside: the binding calls [`FormController::handle_submit`]
//! / [`FormController::drive_submit`] from the form's submit listener and
//! [`FormController::handle_blur`] from each field's blur listener.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wisdom_forms_validation::{validate, FieldError, FieldKind};

use crate::config::{FormBinding, FormsConfig};
use crate::dom::Dom;
use crate::error::{DomError, FormError};
use crate::field::{is_button_like, Field};
use crate::render;
use crate::state::SubmissionState;
use crate::submit::{FormData, Submitter};

/// Handle to a registered form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormId(usize);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form#{}", self.0)
    }
}

/// A required field that failed the last validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub key: String,
    pub error: FieldError,
}

/// What a submit attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form is already submitting or submitted
    Ignored,
    /// Honeypot filled; nothing happened
    Dropped,
    /// Validation failed; errors are rendered and focus moved
    Invalid(Vec<InvalidField>),
    /// Validation passed; the payload is on its way to the submitter
    Submitting(FormData),
}

#[derive(Debug)]
struct FormInstance<N, C> {
    form: N,
    success: N,
    honeypot: Option<N>,
    submit: Option<N>,
    /// Submit control content before it was swapped for the in-progress label
    submit_content: Option<C>,
    fields: Vec<Field<N>>,
    state: SubmissionState,
}

impl<N, C> FormInstance<N, C> {
    fn check_transition(&self, id: FormId, next: &SubmissionState) -> Result<(), FormError> {
        if !self.state.can_transition_to(next) {
            return Err(FormError::InvalidTransition {
                form: id,
                from: self.state.name(),
                to: next.name(),
            });
        }
        Ok(())
    }

    fn transition(&mut self, id: FormId, next: SubmissionState) -> Result<(), FormError> {
        self.check_transition(id, &next)?;
        debug!(form = %id, from = %self.state, to = %next, "submission state changed");
        self.state = next;
        Ok(())
    }
}

/// Per-page controller for all registered forms
pub struct FormController<D: Dom> {
    forms: Vec<FormInstance<D::Node, D::Content>>,
    config: FormsConfig,
    submitter: Rc<dyn Submitter>,
}

impl<D: Dom> FormController<D> {
    pub fn new(config: FormsConfig, submitter: Rc<dyn Submitter>) -> Self {
        Self {
            forms: Vec::new(),
            config,
            submitter,
        }
    }

    /// Controller with the simulated submitter on the tokio clock
    #[cfg(feature = "tokio")]
    pub fn simulated(config: FormsConfig) -> Self {
        use crate::submit::{SimulatedSubmitter, TokioClock};

        let submitter = SimulatedSubmitter::new(TokioClock, config.submission.latency());
        Self::new(config, Rc::new(submitter))
    }

    pub fn config(&self) -> &FormsConfig {
        &self.config
    }

    pub fn submitter(&self) -> Rc<dyn Submitter> {
        Rc::clone(&self.submitter)
    }

    /// Bind a form, its success container and its honeypot
    ///
    /// Missing form or success elements make this a silent no-op (`None`):
    /// optional page sections are expected. Registering the same form twice
    /// returns the existing id.
    pub fn register_form(
        &mut self,
        dom: &D,
        form: Option<D::Node>,
        success: Option<D::Node>,
        honeypot: Option<D::Node>,
    ) -> Option<FormId> {
        let (Some(form), Some(success)) = (form, success) else {
            debug!("form or success element missing, skipping registration");
            return None;
        };

        if let Some(index) = self.forms.iter().position(|f| f.form == form) {
            return Some(FormId(index));
        }

        let fields: Vec<Field<D::Node>> = dom
            .form_controls(&form)
            .into_iter()
            .filter(|node| Some(node) != honeypot.as_ref() && !is_button_like(dom, node))
            .enumerate()
            .map(|(index, node)| Field::resolve(dom, node, index))
            .collect();
        let submit = dom.submit_control(&form);

        let id = FormId(self.forms.len());
        debug!(
            form = %id,
            fields = fields.len(),
            required = fields.iter().filter(|f| f.required).count(),
            honeypot = honeypot.is_some(),
            "registered form"
        );

        self.forms.push(FormInstance {
            form,
            success,
            honeypot,
            submit,
            submit_content: None,
            fields,
            state: SubmissionState::Idle,
        });
        Some(id)
    }

    /// Look the three elements up by id, then [`register_form`](Self::register_form)
    pub fn register_by_ids(&mut self, dom: &D, binding: &FormBinding) -> Option<FormId> {
        let form = dom.element_by_id(&binding.form);
        let success = dom.element_by_id(&binding.success);
        let honeypot = binding.honeypot.as_deref().and_then(|id| dom.element_by_id(id));
        self.register_form(dom, form, success, honeypot)
    }

    /// Register every form listed in the configuration that exists on the page
    pub fn register_configured(&mut self, dom: &D) -> Vec<FormId> {
        let bindings = self.config.forms.clone();
        bindings
            .iter()
            .filter_map(|binding| self.register_by_ids(dom, binding))
            .collect()
    }

    pub fn form_ids(&self) -> impl Iterator<Item = FormId> + '_ {
        (0..self.forms.len()).map(FormId)
    }

    pub fn state(&self, id: FormId) -> Option<&SubmissionState> {
        self.forms.get(id.0).map(|f| &f.state)
    }

    pub fn form_node(&self, id: FormId) -> Option<&D::Node> {
        self.forms.get(id.0).map(|f| &f.form)
    }

    pub fn fields(&self, id: FormId) -> &[Field<D::Node>] {
        self.forms
            .get(id.0)
            .map(|f| f.fields.as_slice())
            .unwrap_or(&[])
    }

    /// Fields that should get a blur listener (the required ones)
    pub fn blur_targets(&self, id: FormId) -> Vec<D::Node> {
        self.fields(id)
            .iter()
            .filter(|f| f.required)
            .map(|f| f.node.clone())
            .collect()
    }

    /// Run the rules for one field and render or clear its error
    pub fn validate_field(&self, dom: &mut D, field: &Field<D::Node>) -> Result<bool, FormError> {
        Ok(check_field(dom, field, &self.config)?.is_none())
    }

    /// Synchronous half of a submit: honeypot, validation, and locking the form
    ///
    /// On [`SubmitOutcome::Submitting`] the caller must deliver the payload and
    /// report back through [`finish_submission`](Self::finish_submission);
    /// [`drive_submit`](Self::drive_submit) does both.
    pub fn handle_submit(&mut self, dom: &mut D, id: FormId) -> Result<SubmitOutcome, FormError> {
        let Self { forms, config, .. } = self;
        let instance = forms.get_mut(id.0).ok_or(FormError::UnknownForm(id))?;

        if !instance.state.accepts_submit() {
            debug!(form = %id, state = %instance.state, "submit ignored");
            return Ok(SubmitOutcome::Ignored);
        }

        if let Some(honeypot) = &instance.honeypot {
            if !dom.field_state(honeypot).value.is_empty() {
                return Ok(SubmitOutcome::Dropped);
            }
        }

        instance.transition(id, SubmissionState::Validating)?;

        let invalid = match validation_pass(dom, instance, config) {
            Ok(invalid) => invalid,
            Err(err) => {
                instance.state = SubmissionState::Idle;
                return Err(err);
            }
        };

        if !invalid.is_empty() {
            instance.transition(id, SubmissionState::Idle)?;
            let first_error = instance
                .fields
                .iter()
                .find(|f| dom.has_class(&f.node, &config.classes.error))
                .map(|f| f.node.clone());
            if let Some(node) = first_error {
                dom.focus(&node)?;
            }
            return Ok(SubmitOutcome::Invalid(invalid));
        }

        if let Err(err) = lock_submit_control(dom, instance, &config.submission.sending_label) {
            if let Err(restore) = unlock_submit_control(dom, instance) {
                warn!(form = %id, error = %restore, "submit control could not be restored");
            }
            instance.state = SubmissionState::Idle;
            return Err(err.into());
        }
        instance.transition(id, SubmissionState::Submitting)?;

        Ok(SubmitOutcome::Submitting(collect_form_data(dom, &instance.fields)))
    }

    /// Apply the submitter's verdict to a form in `Submitting`
    pub fn finish_submission(
        &mut self,
        dom: &mut D,
        id: FormId,
        result: anyhow::Result<()>,
    ) -> Result<SubmissionState, FormError> {
        let Self { forms, config, .. } = self;
        let instance = forms.get_mut(id.0).ok_or(FormError::UnknownForm(id))?;

        match result {
            Ok(()) => {
                instance.check_transition(id, &SubmissionState::Submitted)?;
                if let Err(err) = show_success(dom, instance) {
                    warn!(form = %id, error = %err, "success view could not be shown");
                    if let Err(restore) = dom
                        .set_hidden(&instance.success, true)
                        .and_then(|()| dom.set_hidden(&instance.form, false))
                    {
                        warn!(form = %id, error = %restore, "form view could not be restored");
                    }
                    fail_submission(dom, instance, config, id, err.to_string())?;
                    return Err(err.into());
                }
                instance.transition(id, SubmissionState::Submitted)?;
                info!(form = %id, "form submitted");
            }
            Err(err) => {
                warn!(form = %id, error = %err, "form submission failed");
                fail_submission(dom, instance, config, id, err.to_string())?;
            }
        }

        Ok(instance.state.clone())
    }

    /// Revalidate one field when it loses focus
    ///
    /// Only required fields with a non-blank value are checked; the submit
    /// pass reports empties. Returns `Some(valid)` when a check ran.
    pub fn handle_blur(
        &mut self,
        dom: &mut D,
        id: FormId,
        node: &D::Node,
    ) -> Result<Option<bool>, FormError> {
        let instance = self.forms.get(id.0).ok_or(FormError::UnknownForm(id))?;
        if instance.state.is_locked() {
            return Ok(None);
        }

        let Some(field) = instance.fields.iter().find(|f| &f.node == node) else {
            return Ok(None);
        };
        if !field.required || dom.field_state(&field.node).value.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(check_field(dom, field, &self.config)?.is_none()))
    }

    /// Full submit: [`handle_submit`](Self::handle_submit), await the submitter,
    /// then [`finish_submission`](Self::finish_submission)
    ///
    /// No borrow of the controller or the DOM is held across the await, so
    /// other events can be handled while the submission is in flight.
    pub async fn drive_submit(
        controller: &RefCell<Self>,
        dom: &RefCell<D>,
        id: FormId,
    ) -> Result<SubmitOutcome, FormError> {
        let (outcome, submitter) = {
            let mut ctl = controller.borrow_mut();
            let outcome = ctl.handle_submit(&mut dom.borrow_mut(), id)?;
            (outcome, ctl.submitter())
        };

        if let SubmitOutcome::Submitting(data) = &outcome {
            debug!(form = %id, submitter = submitter.name(), "awaiting submitter");
            let result = submitter.submit(data).await;
            controller
                .borrow_mut()
                .finish_submission(&mut dom.borrow_mut(), id, result)?;
        }

        Ok(outcome)
    }
}

/// Disable the submit control and swap in the in-progress label
fn lock_submit_control<D: Dom>(
    dom: &mut D,
    instance: &mut FormInstance<D::Node, D::Content>,
    label: &str,
) -> Result<(), DomError> {
    let Some(submit) = &instance.submit else {
        return Ok(());
    };
    instance.submit_content = Some(dom.save_content(submit));
    dom.set_disabled(submit, true)?;
    dom.set_text(submit, label)
}

/// Re-enable the submit control and put its original content back
fn unlock_submit_control<D: Dom>(
    dom: &mut D,
    instance: &mut FormInstance<D::Node, D::Content>,
) -> Result<(), DomError> {
    let Some(submit) = &instance.submit else {
        return Ok(());
    };
    dom.set_disabled(submit, false)?;
    match instance.submit_content.take() {
        Some(content) => dom.restore_content(submit, &content),
        None => Ok(()),
    }
}

fn show_success<D: Dom>(
    dom: &mut D,
    instance: &FormInstance<D::Node, D::Content>,
) -> Result<(), DomError> {
    dom.set_hidden(&instance.form, true)?;
    dom.set_hidden(&instance.success, false)?;
    render::announce(dom, &instance.success)
}

/// Move to `Failed` first so the form accepts a retry even if the UI writes fail
fn fail_submission<D: Dom>(
    dom: &mut D,
    instance: &mut FormInstance<D::Node, D::Content>,
    config: &FormsConfig,
    id: FormId,
    reason: String,
) -> Result<(), FormError> {
    instance.transition(id, SubmissionState::Failed { reason })?;
    unlock_submit_control(dom, instance)?;
    render::show_form_error(
        dom,
        &instance.form,
        &config.submission.failure_message,
        &config.classes,
    )?;
    Ok(())
}

/// Clear stale errors, then check every required field (no short-circuit)
fn validation_pass<D: Dom>(
    dom: &mut D,
    instance: &FormInstance<D::Node, D::Content>,
    config: &FormsConfig,
) -> Result<Vec<InvalidField>, FormError> {
    render::clear_form_errors(dom, &instance.form, &config.classes)?;

    let mut invalid = Vec::new();
    for field in instance.fields.iter().filter(|f| f.required) {
        if let Some(error) = check_field(dom, field, config)? {
            invalid.push(InvalidField {
                key: field.key.clone(),
                error,
            });
        }
    }
    Ok(invalid)
}

fn check_field<D: Dom>(
    dom: &mut D,
    field: &Field<D::Node>,
    config: &FormsConfig,
) -> Result<Option<FieldError>, FormError> {
    match validate(&field.snapshot(dom)) {
        Ok(()) => {
            render::clear_field_error(dom, field, &config.classes)?;
            Ok(None)
        }
        Err(error) => {
            let message = config.messages.for_error(error);
            render::show_field_error(dom, field, message, &config.classes)?;
            Ok(Some(error))
        }
    }
}

fn collect_form_data<D: Dom>(dom: &D, fields: &[Field<D::Node>]) -> FormData {
    let mut data = FormData::new();
    for field in fields {
        let Some(name) = &field.name else { continue };
        let state = dom.field_state(&field.node);
        if field.kind == FieldKind::Checkbox && !state.checked {
            continue;
        }
        data.push(name.clone(), state.value);
    }
    data
}
