//! Step controller for the inscription wizard.
//!
//! One wizard instance per browser tab, nothing shared. The controller owns
//! the form and the benefit it was opened for; every forward transition runs
//! through [`crate::validate::validate`].

use tracing::debug;

use crate::benefits::BenefitContext;
use crate::client::{InscriptionRequest, PortalClient};
use crate::form::InscriptionForm;
use crate::validate::validate;

/// Wizard position. `Done` is terminal, the only exit is a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Identity,
    Contact,
    Preferences,
    Done,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::Identity => 1,
            Step::Contact => 2,
            Step::Preferences => 3,
            Step::Done => 4,
        }
    }

    fn forward(self) -> Step {
        match self {
            Step::Identity => Step::Contact,
            Step::Contact => Step::Preferences,
            Step::Preferences | Step::Done => Step::Done,
        }
    }

    fn back(self) -> Step {
        match self {
            Step::Identity | Step::Contact => Step::Identity,
            Step::Preferences => Step::Contact,
            Step::Done => Step::Done,
        }
    }
}

/// The multi-step inscription form state machine.
pub struct Wizard {
    benefit: BenefitContext,
    pub form: InscriptionForm,
    step: Step,
    last_error: Option<String>,
    submitting: bool,
}

impl Wizard {
    /// Opens the wizard at step 1 for an explicitly handed benefit.
    pub fn new(benefit: BenefitContext) -> Self {
        Self {
            benefit,
            form: InscriptionForm::default(),
            step: Step::Identity,
            last_error: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn benefit(&self) -> &BenefitContext {
        &self.benefit
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a submission is currently in flight; the submit action is
    /// disabled for the duration.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Forward transition out of steps 1 and 2, gated by the validator.
    ///
    /// Returns whether the step changed. On a failed gate the wizard stays
    /// put and the validator message becomes [`Self::last_error`].
    pub fn advance(&mut self) -> bool {
        if !matches!(self.step, Step::Identity | Step::Contact) {
            return false;
        }

        match validate(self.step, &self.form, &self.benefit) {
            Ok(()) => {
                self.last_error = None;
                self.step = self.step.forward();
                true
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
                false
            }
        }
    }

    /// Backward transition from steps 2 and 3. Always clears the error.
    pub fn retreat(&mut self) {
        if matches!(self.step, Step::Contact | Step::Preferences) {
            self.step = self.step.back();
            self.last_error = None;
        }
    }

    /// Replaces `advance` at step 3: re-runs the step 3 validator, then hands
    /// the form to the submission adapter. Success is terminal; failure keeps
    /// the wizard at step 3 with the adapter's message so the member can fix
    /// the form and resubmit by hand. Single attempt, no automatic retry.
    pub async fn submit(&mut self, client: &PortalClient) -> bool {
        if self.step != Step::Preferences || self.submitting {
            return false;
        }

        if let Err(error) = validate(Step::Preferences, &self.form, &self.benefit) {
            self.last_error = Some(error.to_string());
            return false;
        }

        let request = InscriptionRequest::from_form(&self.form, &self.benefit);

        self.submitting = true;
        let outcome = client.submit(&request).await;
        self.submitting = false;

        match outcome {
            Ok(ack) => {
                debug!(status = ack.status, benefit = self.benefit.id(), "inscription accepted");
                self.last_error = None;
                self.step = Step::Done;
                true
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
                false
            }
        }
    }
}
