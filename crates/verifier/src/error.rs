//! Cloud API error type.
//!
//! [`CloudError`] wraps a failed SDK call. The verifier turns it into a
//! [`CheckFailure::Transport`] for the check that issued the call, so one
//! failing API does not stop sibling checks.

use ecsprobe_core::report::CheckFailure;

/// A cloud description API call that did not return a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct CloudError {
    /// API operation name, e.g. `DescribeClusters`.
    pub operation: &'static str,
    /// Error text as reported by the SDK.
    pub message: String,
}

impl CloudError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

impl From<CloudError> for CheckFailure {
    fn from(err: CloudError) -> Self {
        CheckFailure::transport(err.operation, err.message)
    }
}
