//! Error taxonomy shared by the BCA and CTG pipelines.
//!
//! Every variant is fatal to the run that produced it. Callers decide whether to
//! abort or retry with new input; the core never retries on its own.

/// Errors surfaced by plate-assay computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssayError {
    /// The grid (or its replicate grouping) does not match the assay layout.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// The standard curve cannot be fit, or a configuration value is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Downstream arithmetic would be undefined or physically meaningless.
    #[error("computation error: {0}")]
    Computation(String),
}

impl AssayError {
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn computation(message: impl Into<String>) -> Self {
        Self::Computation(message.into())
    }
}
