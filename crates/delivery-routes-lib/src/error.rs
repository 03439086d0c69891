use thiserror::Error;

use crate::network::LocationId;

/// Convenient result alias for the delivery routes library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an edge would enter the graph with a negative or non-finite weight.
    #[error("invalid weight {weight} for edge {from} -> {to}; weights must be finite and non-negative")]
    InvalidEdgeWeight {
        from: LocationId,
        to: LocationId,
        weight: f64,
    },

    /// Raised when a delivery window string cannot be parsed.
    #[error("invalid delivery window '{window}': {reason}")]
    InvalidWindowFormat { window: String, reason: String },

    /// Raised when strict criterion parsing meets an unrecognised name.
    #[error("unknown optimization criterion: {name}; expected one of plain, cost, time")]
    UnknownCriterion { name: String },

    /// Raised when the same location identifier is supplied twice.
    #[error("duplicate location id {id}")]
    DuplicateLocation { id: LocationId },

    /// Raised when an input dataset fails validation.
    #[error("invalid dataset: {message}")]
    DatasetValidation { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
