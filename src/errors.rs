//! Error types for syllabus-import.

/// Alias for Results returning [`ImportError`].
pub type Result<T> = std::result::Result<T, ImportError>;

/// Top-level error type for syllabus-import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The input file does not exist. Raised before any graph activity.
    #[error("input file not found: {0}")]
    MissingInput(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Transient causal-ordering rejection: the session's bookmark was
    /// refused by the server. Recoverable by one retry on a fresh session.
    #[error("coordination fault: {0}")]
    Coordination(String),

    /// Any other driver/transaction fault. Never retried.
    #[error("driver error: {0}")]
    Driver(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// True for the one fault class the executor is allowed to retry.
pub fn is_coordination_fault(err: &ImportError) -> bool {
    matches!(err, ImportError::Coordination(_))
}
