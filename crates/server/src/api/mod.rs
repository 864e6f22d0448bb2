use std::sync::Arc;

use catalog::Catalog;
use registration::{
    RegistrationForm, RegistrationModal, RegistrationRelay, SubmissionState, SubmitError,
};
use shared::{
    domain::EventRecord,
    error::{ApiError, ErrorCode},
};
use tracing::debug;

#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Arc<Catalog>,
    pub relay: Arc<dyn RegistrationRelay>,
}

/// Result of one registration attempt that reached the form. Both failure variants hand the
/// draft back so the page can be re-rendered with the visitor's input intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Submitted,
    Invalid {
        form: RegistrationForm,
        error: String,
    },
    Rejected {
        form: RegistrationForm,
        message: String,
    },
}

pub fn register_route(event_id: &str) -> String {
    format!("/{event_id}/register")
}

pub async fn register_for_event(
    ctx: &ApiContext,
    event_id: &str,
    form: RegistrationForm,
) -> Result<RegistrationOutcome, ApiError> {
    let event = find_event(ctx, event_id)?;
    if !accepts_onsite_registration(event) {
        return Err(ApiError::registration_closed(event_id));
    }

    let mut modal = RegistrationModal::new(event.title.clone());
    modal.open();
    modal.edit_form(|draft| *draft = form).map_err(internal)?;

    let result = modal.submit(ctx.relay.as_ref()).await.cloned();
    debug!(event = %event_id, ?result, "registration attempt finished");
    match result {
        Ok(SubmissionState::Success) => Ok(RegistrationOutcome::Submitted),
        Ok(SubmissionState::Error { message }) => Ok(RegistrationOutcome::Rejected {
            form: modal.form().clone(),
            message,
        }),
        Ok(state) => Err(internal(format!(
            "registration ended in unexpected state {state:?}"
        ))),
        Err(SubmitError::Invalid(error)) => Ok(RegistrationOutcome::Invalid {
            form: modal.form().clone(),
            error: error.to_string(),
        }),
        Err(error) => Err(internal(error)),
    }
}

/// Events that link out to an external registration page never take submissions here.
pub fn accepts_onsite_registration(event: &EventRecord) -> bool {
    event.offers_registration() && event.registration_link.is_none()
}

fn find_event<'a>(ctx: &'a ApiContext, event_id: &str) -> Result<&'a EventRecord, ApiError> {
    ctx.catalog
        .find_by_id(event_id)
        .ok_or_else(|| ApiError::event_not_found(event_id))
}

fn internal(error: impl std::fmt::Display) -> ApiError {
    ApiError::new(ErrorCode::Internal, error.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
