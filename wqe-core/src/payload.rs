use crate::error::ValidationError;
use crate::parameter::{Parameter, PARAMETER_COUNT};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Request body for `POST /evaluate`.
///
/// Always serializes all fifteen wire keys in schema order; a parameter that
/// was not measured is sent as an explicit `null`.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct EvaluationRequest {
    values: [Option<f64>; PARAMETER_COUNT],
}

impl EvaluationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        self.values[parameter.index()]
    }

    pub fn set(&mut self, parameter: Parameter, value: Option<f64>) {
        self.values[parameter.index()] = value;
    }

    /// Number of parameters carrying a measured value.
    pub fn measured_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, Option<f64>)> + '_ {
        Parameter::ALL
            .into_iter()
            .map(move |p| (p, self.get(p)))
    }
}

impl Serialize for EvaluationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PARAMETER_COUNT))?;
        for (parameter, value) in self.iter() {
            map.serialize_entry(parameter.key(), &value)?;
        }
        map.end()
    }
}

/// Coerce one raw, non-empty field into a measurement.
///
/// Surrounding whitespace is ignored. Text that does not parse, and values
/// that parse to NaN or infinity, are rejected.
pub fn parse_measurement(parameter: Parameter, raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError {
            parameter,
            raw: raw.to_string(),
        }),
    }
}
