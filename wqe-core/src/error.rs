/// Error types for the water quality evaluator
use crate::parameter::Parameter;
use thiserror::Error;

/// Fallback message when the service fails without a usable `detail`.
pub const SERVICE_ERROR_MESSAGE: &str = "An error occurred while evaluating water quality.";

/// Message shown when the request was sent but nothing came back.
pub const NO_RESPONSE_MESSAGE: &str = "The server did not respond. Please check your connection.";

/// Message shown when the request could not be dispatched at all.
pub const REQUEST_SETUP_MESSAGE: &str = "An error occurred while setting up the request.";

/// Failure of the one request/response exchange with the evaluation service.
///
/// Every variant renders as the single message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The service answered with a failure status or an undecodable body
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The request went out but no response arrived
    #[error("{}", NO_RESPONSE_MESSAGE)]
    NoResponse,

    /// The request could not be built or dispatched
    #[error("{}", REQUEST_SETUP_MESSAGE)]
    RequestSetup,
}

impl EvaluationError {
    /// Service error carrying the generic fallback message.
    pub fn service_fallback(status: u16) -> Self {
        EvaluationError::Service {
            status,
            message: SERVICE_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// A non-empty form field that is not a finite base-10 number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {}: \"{raw}\" is not a number.", .parameter.label())]
pub struct ValidationError {
    pub parameter: Parameter,
    pub raw: String,
}

/// Why a submission could not be started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A field failed numeric validation; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An earlier submission has not resolved yet
    #[error("An evaluation is already in progress.")]
    InFlight,
}

/// Type alias for Results using EvaluationError
pub type Result<T> = std::result::Result<T, EvaluationError>;
