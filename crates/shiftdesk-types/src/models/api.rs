//! Response envelope and authentication payloads.

use serde::{Deserialize, Serialize};

/// Uniform envelope wrapping every backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Endpoint-specific payload
    pub data: T,
    /// Backend's own success flag
    #[serde(default)]
    pub success: bool,
    /// Human-readable message, usually present on failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self { data, success: true, message: None }
    }

    /// Drop the envelope and keep the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Body of `POST /user/auth/loginbyphone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginByPhoneRequest {
    /// Canonical international number (`+90XXXXXXXXXX`)
    pub phone_number: String,
}

/// Payload returned by the code dispatch endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginByPhoneResponse {
    /// Whether the SMS was actually handed off for delivery
    #[serde(default)]
    pub is_message_sent: bool,
}

/// Body of `POST /user/auth/validatelogincode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateLoginCodeRequest {
    /// Same number the code was sent to
    pub phone_number: String,
    /// Digits typed by the user
    pub validation_code: String,
}

/// Payload returned by the code validation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateLoginCodeResponse {
    /// Bearer token; absent or empty when the code was rejected
    #[serde(default)]
    pub access_token: Option<String>,
}

impl ValidateLoginCodeResponse {
    /// The token, if the backend issued a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}
