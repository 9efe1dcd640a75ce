//! Error taxonomy for API calls.
//!
//! Every failure class carries its own user-facing message so callers can
//! surface it verbatim. Timeouts are kept distinct from generic transport
//! failures: a timed-out upload may still be worth retrying as-is.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never completed: offline, DNS, connection reset.
    #[error("network error: {0}. Check your connection and try again.")]
    Network(String),

    /// The submission deadline passed and the request was abandoned.
    #[error("the request timed out. Try again or check your connection.")]
    Timeout,

    /// The server answered with a non-2xx status. `message` is taken from
    /// the JSON error body when present, otherwise the raw response text
    /// or status line.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body could not be parsed as the expected JSON.
    #[error("unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the server rejected our credentials; the session should
    /// be cleared so the user re-authenticates.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status: 401, .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_shown_verbatim() {
        let err = ApiError::Server {
            status: 422,
            message: "Title already in use".into(),
        };
        assert_eq!(err.to_string(), "Title already in use");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn timeout_message_is_distinct_from_network() {
        let timeout = ApiError::Timeout.to_string();
        let network = ApiError::Network("connection refused".into()).to_string();
        assert_ne!(timeout, network);
        assert!(ApiError::Timeout.is_timeout());
    }

    #[test]
    fn unauthorized_detection() {
        let err = ApiError::Server {
            status: 401,
            message: "Not authorized".into(),
        };
        assert!(err.is_unauthorized());
    }
}
