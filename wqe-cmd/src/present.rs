//! Terminal rendering of an evaluation result.

use crate::error::GraphError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::info;
use std::path::Path;
use wqe_core::EvaluationResult;

/// Score line, e.g. `Quality score: 82.50 / 100`.
pub fn render_score(result: &EvaluationResult) -> String {
    format!("Quality score: {:.2} / 100", result.quality_score)
}

/// Score followed by the report, line breaks untouched.
pub fn render_result(result: &EvaluationResult) -> String {
    format!("{}\n\n{}\n", render_score(result), result.report)
}

/// Decode the base64 chart image.
pub fn decode_graph(graph: &str) -> Result<Vec<u8>, GraphError> {
    Ok(STANDARD.decode(graph.trim())?)
}

/// Decode the chart image and write it to `path`. Returns the byte count.
pub fn write_graph(graph: &str, path: &Path) -> Result<usize, GraphError> {
    let bytes = decode_graph(graph)?;
    std::fs::write(path, &bytes)?;
    info!("Wrote {} byte chart image to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
