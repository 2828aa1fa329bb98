//! Error types for the Shiftdesk client.

use shiftdesk_types::ValidationError;
use thiserror::Error;

/// Everything a core operation can fail with.
///
/// None of these are fatal: the caller shows the message and lets the user retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No response within the configured timeout; the request was cancelled.
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured limit that was exceeded.
        timeout_ms: u64,
    },

    /// Backend answered with a non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or a generic one.
        message: String,
    },

    /// Response body was not the JSON we expected.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Request could not be sent or its body could not be read.
    #[error("Connection failed: {0}")]
    Transport(String),

    /// Dispatch endpoint answered but did not confirm the SMS was sent.
    #[error("Verification code could not be sent. Please try again.")]
    SendFailed,

    /// Validation endpoint answered without an access token.
    #[error("Verification code is incorrect.")]
    InvalidCode,

    /// Backend issued a token but the token store could not keep it.
    #[error("Signed in, but the session could not be saved on this device.")]
    TokenNotSaved,

    /// Input rejected locally; no request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login step invoked from a state that does not accept it.
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        /// Operation that was attempted.
        operation: &'static str,
        /// Name of the current login state.
        state: &'static str,
    },
}

impl ClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { timeout_ms }
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }

    /// HTTP status, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether retrying the same call unchanged can succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout { .. } | ClientError::Transport(_) => true,
            ClientError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Text to put in front of the user. Contract faults get a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Decode(_) => "Unexpected response from server.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_backend_message_verbatim() {
        let err = ClientError::Http { status: 400, message: "Telefon numarası geçersiz".to_string() };
        assert_eq!(err.to_string(), "Telefon numarası geçersiz");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ClientError::Timeout { timeout_ms: 10 }.is_retryable());
        assert!(ClientError::Http { status: 503, message: String::new() }.is_retryable());
        assert!(!ClientError::InvalidCode.is_retryable());
        assert!(!ClientError::Validation(ValidationError::EmptyPhone).is_retryable());
    }

    #[test]
    fn test_decode_error_is_generic_for_users() {
        let err = ClientError::Decode("expected value at line 1 column 1".to_string());
        assert_eq!(err.user_message(), "Unexpected response from server.");
        assert_eq!(ClientError::SendFailed.user_message(), ClientError::SendFailed.to_string());
    }
}
