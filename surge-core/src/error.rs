// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the Surge publisher protocol
//!
//! Failures travel through the protocol as the payload of
//! [`Completion::Failure`](crate::Completion::Failure); each publisher picks its
//! own payload type. [`SurgeError`] is the general-purpose payload used when a
//! publisher has no domain-specific error of its own.
//!
//! # Examples
//!
//! ```
//! use surge_core::{Completion, SurgeError};
//!
//! let completion: Completion<SurgeError> =
//!     Completion::Failure(SurgeError::stream_error("sensor offline"));
//! assert!(completion.is_failure());
//! ```

/// Root error type for Surge publishers
#[derive(Debug, thiserror::Error)]
pub enum SurgeError {
    /// A publisher failed while producing values
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// A collaborator broke the publisher/subscriber contract
    ///
    /// Operators absorb violations instead of propagating them; this variant
    /// exists for subscribers that want to surface them explicitly.
    #[error("Protocol violation: {context}")]
    ProtocolViolation {
        /// The rule that was broken
        context: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SurgeError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a protocol violation error with the given context
    pub fn protocol_violation(context: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error indicates a permanent failure
    ///
    /// Every failure terminates its subscription; protocol violations are the
    /// only ones a caller may choose to log and move past.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::StreamProcessingError { .. } | Self::UserError(_)
        )
    }
}

/// Specialized Result type for Surge operations
pub type Result<T> = std::result::Result<T, SurgeError>;

impl Clone for SurgeError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            Self::ProtocolViolation { context } => Self::ProtocolViolation {
                context: context.clone(),
            },
            // The boxed source is not clonable, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}
