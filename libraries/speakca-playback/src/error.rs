//! Error types for queue management

use thiserror::Error;

/// Queue manager errors
///
/// Both variants mean "no valid transition from the current state". A failed
/// operation never leaves the queue, history or current episode modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Nothing left to advance to
    #[error("Queue is empty")]
    EmptyQueue,

    /// Nothing to step back to
    #[error("History is empty")]
    EmptyHistory,
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
