//! Error types for backend requests.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never completed (DNS, connection refused, reset, ...).
    #[error("{0}")]
    Transport(String),

    /// Request exceeded the configured deadline.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Backend answered with a non-success status. `message` is the body's
    /// `error` field when one was present.
    #[error("backend returned {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Application { status: u16, message: Option<String> },

    /// Backend answered 2xx with a body that doesn't match the endpoint's shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed.
    #[error("client configuration error: {0}")]
    Configuration(String),
}

/// User-facing classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request completed but the backend rejected it or answered nonsense.
    Application,
    /// The request could not complete.
    Transport,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) | ClientError::Timeout(_) | ClientError::Configuration(_) => {
                ErrorKind::Transport
            }
            ClientError::Application { .. } | ClientError::InvalidResponse(_) => {
                ErrorKind::Application
            }
        }
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout_ms)
        } else {
            ClientError::Transport(describe_error_chain(err))
        }
    }
}

/// Flatten an error and its sources into one line.
///
/// reqwest's top-level message ("error sending request for url ...") hides the
/// useful part (e.g. "Connection refused") in the source chain.
fn describe_error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}
