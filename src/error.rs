// Error kinds surfaced by every expense operation.
// Each is caught by the shell and printed; none aborts the session.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpenseError>;

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invalid amount '{0}': must be a number greater than 0.")]
    InvalidAmount(String),

    #[error("No expenses recorded yet.")]
    EmptyDataset,

    #[error("File {} does not exist.", .0.display())]
    FileNotFound(PathBuf),

    #[error("File {} contains invalid data: {reason}", .path.display())]
    MalformedData { path: PathBuf, reason: String },

    #[error("Failed to access file {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected error: {0}")]
    Unclassified(#[from] anyhow::Error),
}

impl ExpenseError {
    /// Short classification name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ExpenseError::InvalidDate(_) => "InvalidDate",
            ExpenseError::InvalidAmount(_) => "InvalidAmount",
            ExpenseError::EmptyDataset => "EmptyDataset",
            ExpenseError::FileNotFound(_) => "FileNotFound",
            ExpenseError::MalformedData { .. } => "MalformedData",
            ExpenseError::IoFailure { .. } => "IOFailure",
            ExpenseError::Unclassified(_) => "Unclassified",
        }
    }
}
