//! Local input validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input rejected before any request is attempted.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ValidationError {
    /// No digits were entered for the phone number
    #[error("Phone number is required")]
    EmptyPhone,

    /// Phone number does not reduce to a 10 digit national number
    #[error("Phone number must have 10 digits, got {digits}")]
    PhoneLength {
        /// Number of national digits found after normalization
        digits: usize,
    },

    /// Fewer digits than the code length were entered
    #[error("Enter the full {expected} digit code ({entered} entered)")]
    IncompleteCode {
        /// Required code length
        expected: usize,
        /// Digits actually present
        entered: usize,
    },

    /// More digits than the code length were given
    #[error("Code must be {expected} digits, got {entered}")]
    CodeTooLong {
        /// Required code length
        expected: usize,
        /// Digits actually present
        entered: usize,
    },

    /// Code contains something other than ASCII digits
    #[error("Verification code may only contain digits")]
    NonDigitCode,

    /// Job status given by name or code that does not exist
    #[error("Unknown job status: {value}")]
    UnknownJobStatus {
        /// Value that failed to parse
        value: String,
    },
}
