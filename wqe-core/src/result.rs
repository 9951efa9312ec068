use serde::{Deserialize, Serialize};

/// Successful response of `POST /evaluate`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Overall score, 0 to 100
    pub quality_score: f64,
    /// Narrative report; line breaks are significant
    pub report: String,
    /// Base64-encoded chart image
    pub graph: String,
}
