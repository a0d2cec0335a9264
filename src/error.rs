use crate::mapping::Role;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    MissingMapping,
    EmptyDataset,
    TransformFailure,
    NonNumericValues,
}

/// Why a chart could not be built. Every variant is reported to the caller
/// as an error result, never raised.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("{role} is required")]
    MissingRole { role: Role },

    /// The missing column is kept for logging; the message matches
    /// `MissingRole` so callers see one wording.
    #[error("{role} is required")]
    UnknownColumn { role: Role, column: String },

    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("{count} rows had non-numeric values in column {column}")]
    NonNumeric { column: String, count: usize },

    #[error("could not build chart")]
    Transform(anyhow::Error),
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::MissingRole { .. } | ChartError::UnknownColumn { .. } => {
                ErrorKind::MissingMapping
            }
            ChartError::EmptyDataset => ErrorKind::EmptyDataset,
            ChartError::NonNumeric { .. } => ErrorKind::NonNumericValues,
            ChartError::Transform(_) => ErrorKind::TransformFailure,
        }
    }
}
