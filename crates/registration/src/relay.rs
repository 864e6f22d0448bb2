use async_trait::async_trait;
use reqwest::{header, Client};
use shared::protocol::{RegistrationSubmission, RelayPayload, RelayResponse};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";
pub const DEFAULT_RECIPIENT: &str = "info@qtm.org.au";
pub const DEFAULT_FROM_NAME: &str = "QTM Events Registration";

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay rejected the submission: {0}")]
    Rejected(String),
    #[error("unexpected relay response (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
    #[error("registration relay is unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RegistrationRelay: Send + Sync {
    async fn submit_registration(&self, submission: &RegistrationSubmission)
        -> Result<(), RelayError>;
}

/// Relay used when no credential is configured; every submission fails.
pub struct MissingRelay;

#[async_trait]
impl RegistrationRelay for MissingRelay {
    async fn submit_registration(
        &self,
        _submission: &RegistrationSubmission,
    ) -> Result<(), RelayError> {
        Err(RelayError::Unavailable(
            "no relay access key configured".into(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub endpoint: String,
    pub access_key: String,
    pub recipient: String,
    pub from_name: String,
}

impl RelayConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_RELAY_ENDPOINT.into(),
            access_key: access_key.into(),
            recipient: DEFAULT_RECIPIENT.into(),
            from_name: DEFAULT_FROM_NAME.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Forwards registrations to a Web3Forms-compatible form relay.
pub struct Web3FormsRelay {
    http: Client,
    config: RelayConfig,
}

impl Web3FormsRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn payload(&self, submission: &RegistrationSubmission) -> RelayPayload {
        RelayPayload {
            access_key: self.config.access_key.clone(),
            subject: format!("Event Registration: {}", submission.event),
            from_name: self.config.from_name.clone(),
            to: self.config.recipient.clone(),
            event: submission.event.clone(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            attendees: submission.attendees,
            special_requirements: submission
                .special_requirements
                .clone()
                .unwrap_or_else(|| "None".to_string()),
        }
    }
}

#[async_trait]
impl RegistrationRelay for Web3FormsRelay {
    async fn submit_registration(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<(), RelayError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&self.payload(submission))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "relay responded");

        let parsed: RelayResponse =
            serde_json::from_slice(&body).map_err(|_| RelayError::UnexpectedResponse {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body)
                    .chars()
                    .take(MAX_ERROR_BODY_CHARS)
                    .collect(),
            })?;

        if parsed.success {
            Ok(())
        } else {
            Err(RelayError::Rejected(
                parsed
                    .message
                    .unwrap_or_else(|| format!("status {}", status.as_u16())),
            ))
        }
    }
}
