use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    RegistrationClosed,
    Internal,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn event_not_found(event_id: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("no event with id '{event_id}'"))
    }

    pub fn registration_closed(event_id: &str) -> Self {
        Self::new(
            ErrorCode::RegistrationClosed,
            format!("registration is not open for '{event_id}'"),
        )
    }
}
