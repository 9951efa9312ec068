//! Core types for the water quality evaluator client.
//!
//! - `parameter`: the fixed measurement schema and its wire keys
//! - `payload`: the `POST /evaluate` request body and numeric coercion
//! - `result`: the evaluation response
//! - `form`: form state container and submission driver
//! - `client`: the `Evaluate` seam and, with the `api` feature, the HTTP client

pub mod client;
pub mod error;
pub mod form;
pub mod parameter;
pub mod payload;
pub mod result;

pub use client::{ClientConfig, Evaluate};
#[cfg(feature = "api")]
pub use client::EvaluationClient;
pub use error::{EvaluationError, SubmitError, ValidationError};
pub use form::{FormEvent, FormState, RawValue, Submission};
pub use parameter::{Parameter, ParameterDefinition};
pub use payload::EvaluationRequest;
pub use result::EvaluationResult;
