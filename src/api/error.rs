//! Normalized backend errors.
//!
//! Every remote-call failure collapses into one `ApiError` shape:
//! a message plus an optional HTTP status. Callers branch on the
//! variant and pattern-match known message substrings for user-facing
//! text; anything unrecognized stays generic. Nothing is retried.

/// All errors that can occur talking to the storefront backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection-level failure: no response at all.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An authenticated call was issued without a bearer token.
    /// Detected locally, pre-flight; no request is sent.
    #[error("not logged in")]
    MissingToken,

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, when the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::MissingToken | ApiError::Decode(_) => None,
        }
    }

    /// The server-reported business message, if there is one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_surface() {
        let err = ApiError::Server {
            status: 402,
            message: "insufficient balance".into(),
        };
        assert_eq!(err.status(), Some(402));
        assert_eq!(err.server_message(), Some("insufficient balance"));

        assert_eq!(ApiError::MissingToken.status(), None);
    }

    #[test]
    fn test_display_is_the_message() {
        let err = ApiError::Server {
            status: 400,
            message: "cart is empty".into(),
        };
        assert_eq!(err.to_string(), "server error (400): cart is empty");
    }
}
