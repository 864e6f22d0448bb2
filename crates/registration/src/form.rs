use serde::{Deserialize, Serialize};
use shared::protocol::{AttendeeCount, RegistrationSubmission};
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

#[derive(Validate)]
struct EmailField {
    #[validate(email)]
    email: String,
}

/// Draft of the registration form as the visitor typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub attendees: AttendeeCount,
    pub requirements: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Required("name"));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::Required("email"));
        }
        let field = EmailField {
            email: self.email.trim().to_string(),
        };
        if field.validate().is_err() {
            return Err(FormError::InvalidEmail(field.email));
        }
        if self.phone.trim().is_empty() {
            return Err(FormError::Required("phone"));
        }
        Ok(())
    }

    pub fn to_submission(&self, event_title: &str) -> Result<RegistrationSubmission, FormError> {
        self.validate()?;
        let requirements = self.requirements.trim();
        Ok(RegistrationSubmission {
            event: event_title.to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            attendees: self.attendees,
            special_requirements: (!requirements.is_empty()).then(|| requirements.to_string()),
        })
    }
}
