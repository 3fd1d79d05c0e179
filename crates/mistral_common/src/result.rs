//! Error type for the few fallible steps of an architecture build.

/// Result of a fallible architecture step.
pub type MistralResult<T> = Result<T, InternalError>;

/// An inconsistency in the architecture core or the policy handed to it.
///
/// Netlist problems never surface here; they are reported by the passes that
/// consume the architecture.
#[derive(Debug, thiserror::Error)]
#[error("internal architecture error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
