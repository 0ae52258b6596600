//! Error types for choropleth binning
//!
//! Provides a unified error type for all chorobin crates. Most of these are
//! handled locally (fallback scales, boundary normalisation, discarded stale
//! completions); only unexpected collaborator failures travel to the caller.

use thiserror::Error;

/// Core error type for binning operations
#[derive(Error, Debug)]
pub enum Error {
    /// The sample has no valid values
    #[error("Empty sample: no valid values to classify")]
    EmptySample,

    /// Method id is not present in the registry
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// A bin edit left the manual bin set inconsistent
    #[error("Invalid boundary edit at bin {index}: {reason}")]
    InvalidBoundaryEdit { index: usize, reason: String },

    /// An asynchronous completion arrived after its context changed
    #[error("Stale async result: captured generation {captured}, current {current}")]
    StaleAsyncResult { captured: u64, current: u64 },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation requires at least one manual bin
    #[error("Manual bin set is empty")]
    EmptyBinSet,

    /// Paint color does not belong to any bin
    #[error("Color {0} does not match any bin")]
    UnknownColor(String),

    /// The classification library could not produce breaks
    #[error("Classification error: {0}")]
    Classification(String),

    /// Serialization of an output or config failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an unregistered method id
    pub fn unknown_method(id: impl AsRef<str>) -> Self {
        Self::UnknownMethod(id.as_ref().to_string())
    }

    /// Create an error for a bin count the classifiers cannot honour
    pub fn invalid_bin_count(bin_count: usize) -> Self {
        Self::InvalidParameter(format!("Bin count {bin_count} must be at least 1"))
    }

    /// Create an error for an out-of-range bin index
    pub fn bin_index_out_of_range(index: usize, len: usize) -> Self {
        Self::InvalidParameter(format!("Bin index {index} out of range for {len} bins"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error is expected to be absorbed by a fallback
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Serialization(_))
    }
}
