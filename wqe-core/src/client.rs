//! Evaluation service client.
//!
//! `Evaluate` is the seam the form driver calls; `EvaluationClient` is the
//! reqwest implementation, compiled in with the `api` feature.

use crate::error::{EvaluationError, Result};
use crate::payload::EvaluationRequest;
use crate::result::EvaluationResult;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

#[cfg(feature = "api")]
use log::{debug, info, warn};
#[cfg(feature = "api")]
use reqwest::{Client, Url};

/// Default service location, matching the service's development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the evaluation endpoint, relative to the base URL.
pub const EVALUATE_PATH: &str = "evaluate";

/// Performs one evaluation exchange.
pub trait Evaluate {
    fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> impl Future<Output = Result<EvaluationResult>> + Send;
}

/// Configuration for the evaluation client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the evaluation service
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Full URL of the evaluation endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), EVALUATE_PATH)
    }
}

/// Body the service sends with a failure status.
///
/// `detail` is a string for errors raised by the service itself, but a list
/// of issues for request-validation failures, so it is kept untyped here.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Classify a failure-status response body.
pub fn service_error(status: u16, body: &str) -> EvaluationError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(detail)),
        }) if !detail.trim().is_empty() => EvaluationError::Service {
            status,
            message: detail,
        },
        _ => EvaluationError::service_fallback(status),
    }
}

/// HTTP client for the evaluation service
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct EvaluationClient {
    client: Client,
    config: ClientConfig,
}

#[cfg(feature = "api")]
impl EvaluationClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client: {}", e);
                EvaluationError::RequestSetup
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self) -> Result<Url> {
        let endpoint = self.config.endpoint();
        Url::parse(&endpoint).map_err(|e| {
            warn!("Invalid evaluation endpoint {}: {}", endpoint, e);
            EvaluationError::RequestSetup
        })
    }
}

/// Map a transport error from `send` or body reading onto the two
/// client-side failure classes.
#[cfg(feature = "api")]
fn transport_error(e: reqwest::Error) -> EvaluationError {
    if e.is_builder() {
        warn!("Failed to build evaluation request: {}", e);
        EvaluationError::RequestSetup
    } else {
        warn!("No response from evaluation service: {}", e);
        EvaluationError::NoResponse
    }
}

#[cfg(feature = "api")]
impl Evaluate for EvaluationClient {
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult> {
        let url = self.endpoint()?;
        debug!(
            "POST {} with {} measured parameters",
            url,
            request.measured_count()
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = service_error(status.as_u16(), &body);
            warn!("Evaluation failed with status {}: {}", status, err);
            return Err(err);
        }

        match serde_json::from_str::<EvaluationResult>(&body) {
            Ok(result) => {
                info!("Evaluation succeeded: score {:.2}", result.quality_score);
                Ok(result)
            }
            Err(e) => {
                warn!("Undecodable evaluation response ({}): {}", status, e);
                Err(EvaluationError::service_fallback(status.as_u16()))
            }
        }
    }
}
