//! Error types for ripple-vdom.
//!
//! The core surfaces exactly one failure class of its own: a contract
//! violation where an unresolved component reaches the materializer.
//! User code invoked by the engine (components, event handlers) is never
//! caught — panics propagate unmodified to the caller.

use thiserror::Error;

/// Errors that can occur during VDOM operations.
#[derive(Debug, Error)]
pub enum VdomError {
    /// A component node reached the materializer without prior normalization.
    ///
    /// Component resolution is the normalizer's job; seeing one here means
    /// the caller skipped `normalize` on a tree containing components.
    #[error("unsupported node: {reason}")]
    UnsupportedNode {
        /// What was encountered and why it cannot be materialized
        reason: String,
    },
}

/// Result type alias for VDOM operations.
pub type VdomResult<T> = Result<T, VdomError>;

impl VdomError {
    /// Create an unsupported-node error with a message.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedNode { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VdomError::unsupported("component must be normalized before materialization");
        assert_eq!(
            err.to_string(),
            "unsupported node: component must be normalized before materialization"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VdomError>();
    }
}
