/// Error types for the command layer
use thiserror::Error;

/// Problems with user-supplied measurements, before they reach the form.
#[derive(Error, Debug)]
pub enum InputError {
    /// Key is not one of the schema's wire keys
    #[error("Unknown parameter: {0} (run `wqe parameters` for the list)")]
    UnknownParameter(String),

    /// `--set` argument without an `=`
    #[error("Expected KEY=VALUE, got: {0}")]
    MalformedAssignment(String),

    /// Measurement CSV does not start with the `parameter,value` header
    #[error("Measurement CSV must start with a `parameter,value` header, found: {0:?}")]
    MissingHeader(String),

    /// Failed to read the measurement CSV
    #[error("Failed to parse measurement CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read from or write to the terminal
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems turning the returned chart into an image file.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The graph field is not valid base64
    #[error("Chart image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The image could not be written
    #[error("Failed to write chart image: {0}")]
    Write(#[from] std::io::Error),
}
