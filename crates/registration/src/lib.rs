//! Registration form, its submission state machine, and the relay that delivers it.

pub mod form;
pub mod modal;
pub mod relay;

pub use form::{FormError, RegistrationForm};
pub use modal::{
    RegistrationModal, SubmissionState, SubmitError, CONFIRMATION_DELAY,
    SUBMISSION_FAILED_MESSAGE,
};
pub use relay::{MissingRelay, RegistrationRelay, RelayConfig, RelayError, Web3FormsRelay};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/relay_tests.rs"]
mod relay_tests;
