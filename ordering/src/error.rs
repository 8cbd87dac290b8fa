//! Error types surfaced by the ordering API boundary.

use thiserror::Error;

/// Failure reported by an API operation.
///
/// Every variant is a plain value so it can live inside slice state and be
/// compared in assertions. The reducers never branch on the variant; they
/// record whatever the effect reported and leave interpretation to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with an explicit failure message.
    #[error("server error: {message}")]
    Server {
        /// Message returned in the failure body.
        message: String,
    },

    /// The request never produced a server answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server rejected the caller's credentials.
    #[error("unauthorized")]
    Unauthorized,
}

impl ApiError {
    /// Convenience constructor for [`ApiError::Server`].
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ApiError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
