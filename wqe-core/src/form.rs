//! Form state container.
//!
//! `FormState` owns the raw text of every field plus the loading flag and the
//! displayed error. All changes go through the `apply_*` transitions; `submit`
//! strings them together around one call to an [`Evaluate`] implementation.

use crate::client::Evaluate;
use crate::error::{EvaluationError, SubmitError, ValidationError};
use crate::parameter::Parameter;
use crate::payload::{parse_measurement, EvaluationRequest};
use crate::result::EvaluationResult;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// What the user has typed into one field.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RawValue {
    /// The field was edited and left blank
    Empty,
    /// Verbatim input, not yet parsed
    Text(String),
}

/// Ticket for the one submission currently in flight.
#[derive(Debug, PartialEq, Clone)]
pub struct Submission {
    id: u64,
    request: EvaluationRequest,
}

impl Submission {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &EvaluationRequest {
        &self.request
    }
}

/// Outcome of a resolved submission, for whoever presents results.
#[derive(Debug, PartialEq, Clone)]
pub enum FormEvent {
    Evaluated(EvaluationResult),
    Failed(String),
}

#[derive(Debug, Default, Clone)]
pub struct FormState {
    fields: BTreeMap<Parameter, RawValue>,
    error: Option<String>,
    in_flight: Option<u64>,
    next_id: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_value(&self, parameter: Parameter) -> Option<&RawValue> {
        self.fields.get(&parameter)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record an edit. No parsing happens here, so partial input such as
    /// "-" or "3." is kept as typed.
    pub fn apply_field_change(&mut self, parameter: Parameter, raw: impl Into<String>) {
        let raw = raw.into();
        let value = if raw.is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(raw)
        };
        self.fields.insert(parameter, value);
    }

    /// Build a fresh request from the current fields.
    pub fn build_request(&self) -> Result<EvaluationRequest, ValidationError> {
        let mut request = EvaluationRequest::new();
        for parameter in Parameter::ALL {
            let value = match self.fields.get(&parameter) {
                None | Some(RawValue::Empty) => None,
                Some(RawValue::Text(raw)) => Some(parse_measurement(parameter, raw)?),
            };
            request.set(parameter, value);
        }
        Ok(request)
    }

    /// Begin a submission.
    ///
    /// Refused with `InFlight` while an earlier one is unresolved, leaving the
    /// state untouched. A validation failure is recorded as the error and
    /// nothing is marked as loading.
    pub fn apply_submit_start(&mut self) -> Result<Submission, SubmitError> {
        if let Some(id) = self.in_flight {
            debug!("Submission refused, #{} still in flight", id);
            return Err(SubmitError::InFlight);
        }
        self.error = None;

        let request = match self.build_request() {
            Ok(request) => request,
            Err(e) => {
                warn!("Submission rejected before dispatch: {}", e);
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        self.in_flight = Some(id);
        debug!(
            "Submission #{} started with {} measured parameters",
            id,
            request.measured_count()
        );
        Ok(Submission { id, request })
    }

    /// Resolve `submission` with a result. Returns `None` for a ticket that
    /// is not the one in flight.
    pub fn apply_submit_success(
        &mut self,
        submission: &Submission,
        result: EvaluationResult,
    ) -> Option<FormEvent> {
        if !self.is_current(submission) {
            return None;
        }
        Some(self.finish(Ok(result)))
    }

    /// Resolve `submission` with a failure. Returns `None` for a ticket that
    /// is not the one in flight.
    pub fn apply_submit_failure(
        &mut self,
        submission: &Submission,
        error: &EvaluationError,
    ) -> Option<FormEvent> {
        if !self.is_current(submission) {
            return None;
        }
        Some(self.finish(Err(error.user_message())))
    }

    /// Run one full submission: start, exactly one evaluation call, resolve.
    pub async fn submit<E: Evaluate>(&mut self, evaluator: &E) -> Result<FormEvent, SubmitError> {
        let submission = self.apply_submit_start()?;
        let outcome = evaluator
            .evaluate(submission.request())
            .await
            .map_err(|e| e.user_message());
        Ok(self.finish(outcome))
    }

    fn is_current(&self, submission: &Submission) -> bool {
        let current = self.in_flight == Some(submission.id);
        if !current {
            debug!("Ignoring stale completion of submission #{}", submission.id);
        }
        current
    }

    fn finish(&mut self, outcome: Result<EvaluationResult, String>) -> FormEvent {
        let id = self.in_flight.take().unwrap_or_default();
        match outcome {
            Ok(result) => {
                info!("Submission #{} evaluated", id);
                FormEvent::Evaluated(result)
            }
            Err(message) => {
                info!("Submission #{} failed: {}", id, message);
                self.error = Some(message.clone());
                FormEvent::Failed(message)
            }
        }
    }
}
