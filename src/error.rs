//! Error types for the status and account endpoints.

use thiserror::Error;

/// Failures of a single status poll.
///
/// Every variant except [`FetchError::SessionExpired`] is counted towards the
/// poller's consecutive-failure threshold.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered 401; the session cookie is gone or expired.
    #[error("Session expired")]
    SessionExpired,

    /// Non-success status other than 401.
    #[error("Status request failed with HTTP {status}")]
    Transient { status: u16 },

    /// The request did not complete.
    #[error("Network error: {0}")]
    Network(String),

    /// The body could not be decoded as the expected JSON.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether this failure counts towards degradation.
    pub fn is_counted(&self) -> bool {
        !matches!(self, FetchError::SessionExpired)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Transient {
                status: status.as_u16(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Failures of login, registration, logout and add-child calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server refused the request; carries its message when one was sent.
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected { message: Option<String> },

    /// The server answered with something other than the expected JSON.
    /// Carries the raw body so it can be shown to the user.
    #[error("Server error: {0}")]
    Malformed(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The session file could not be read or written.
    #[error("Session store error: {0}")]
    Session(#[from] std::io::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Fetch(FetchError::from(err))
    }
}

/// Client-side form check failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid child code '{0}' (expected e.g. STU-40fb-c5ff)")]
    InvalidChildCode(String),

    #[error("Passwords do not match")]
    PasswordMismatch,
}
