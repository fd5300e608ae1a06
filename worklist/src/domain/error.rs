use thiserror::Error;

/// Errors that can occur while loading or updating tasks and activities.
///
/// None of these are fatal to a board: every failure leaves it in a state the user can
/// act on again.
#[derive(Debug, Error)]
pub enum WorklistError {
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("session rejected by the backend")]
    Unauthorized,
    #[error("{record} has no identifier")]
    MissingIdentifier { record: String },
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("{0}")]
    Unknown(String),
}

impl WorklistError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkFailure(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Whether retrying the same action later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure(_))
    }
}

/// Rejections of the mark-complete workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("task is already {status}")]
    NotCompletable { status: String },
    #[error("a completion is already in progress")]
    Busy,
    #[error("no completion is awaiting confirmation")]
    NothingPending,
    #[error("missing task ID")]
    MissingIdentifier,
    #[error("task {0} is not on the current list")]
    UnknownTask(String),
}
