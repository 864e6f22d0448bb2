use std::time::Duration;

use shared::protocol::RegistrationSubmission;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    form::{FormError, RegistrationForm},
    relay::{RegistrationRelay, RelayError},
};

/// How long the confirmation stays visible before the modal closes itself.
pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(3);
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to submit registration. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("registration form is not open")]
    Closed,
    #[error("a registration is already being submitted")]
    InFlight,
    #[error("registration was already submitted")]
    AlreadySubmitted,
    #[error("no registration is being submitted")]
    NotSubmitting,
    #[error(transparent)]
    Invalid(#[from] FormError),
}

/// One open/close cycle of the registration dialog for a single event.
#[derive(Debug, Clone)]
pub struct RegistrationModal {
    event_title: String,
    open: bool,
    form: RegistrationForm,
    state: SubmissionState,
    confirmation_delay: Duration,
}

impl RegistrationModal {
    pub fn new(event_title: impl Into<String>) -> Self {
        Self {
            event_title: event_title.into(),
            open: false,
            form: RegistrationForm::default(),
            state: SubmissionState::Idle,
            confirmation_delay: CONFIRMATION_DELAY,
        }
    }

    pub fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    pub fn event_title(&self) -> &str {
        &self.event_title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the dialog and discards the draft and any submission outcome.
    pub fn close(&mut self) {
        self.open = false;
        self.form = RegistrationForm::default();
        self.state = SubmissionState::Idle;
    }

    pub fn edit_form(&mut self, edit: impl FnOnce(&mut RegistrationForm)) -> Result<(), SubmitError> {
        match self.state {
            SubmissionState::Submitting => Err(SubmitError::InFlight),
            SubmissionState::Success => Err(SubmitError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Error { .. } => {
                edit(&mut self.form);
                Ok(())
            }
        }
    }

    /// Validates the draft and moves to `Submitting`. An invalid draft leaves the state untouched.
    pub fn begin_submit(&mut self) -> Result<RegistrationSubmission, SubmitError> {
        if !self.open {
            return Err(SubmitError::Closed);
        }
        match self.state {
            SubmissionState::Submitting => return Err(SubmitError::InFlight),
            SubmissionState::Success => return Err(SubmitError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Error { .. } => {}
        }

        let submission = self.form.to_submission(&self.event_title)?;
        self.state = SubmissionState::Submitting;
        Ok(submission)
    }

    pub fn complete_submit(
        &mut self,
        outcome: Result<(), RelayError>,
    ) -> Result<&SubmissionState, SubmitError> {
        if self.state != SubmissionState::Submitting {
            return Err(SubmitError::NotSubmitting);
        }

        self.state = match outcome {
            Ok(()) => {
                info!(event = %self.event_title, "registration submitted");
                SubmissionState::Success
            }
            Err(error) => {
                warn!(event = %self.event_title, %error, "registration submission failed");
                SubmissionState::Error {
                    message: SUBMISSION_FAILED_MESSAGE.to_string(),
                }
            }
        };
        Ok(&self.state)
    }

    pub async fn submit(
        &mut self,
        relay: &dyn RegistrationRelay,
    ) -> Result<&SubmissionState, SubmitError> {
        let submission = self.begin_submit()?;
        let outcome = relay.submit_registration(&submission).await;
        self.complete_submit(outcome)
    }

    /// After a successful submission, waits out the confirmation delay and then closes
    /// and resets the dialog. Returns `false` without waiting in any other state.
    pub async fn finish_confirmation(&mut self) -> bool {
        if self.state != SubmissionState::Success {
            return false;
        }
        tokio::time::sleep(self.confirmation_delay).await;
        self.close();
        true
    }
}
