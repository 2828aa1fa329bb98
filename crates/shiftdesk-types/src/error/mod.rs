//! Typed error definitions shared by every Shiftdesk crate.
//!
//! These are the errors that can be raised without touching the network:
//! malformed user input and unrecognized configuration values.

mod config;
mod validation;

pub use config::ConfigError;
pub use validation::ValidationError;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = ValidationError::IncompleteCode { expected: 4, entered: 2 };

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("IncompleteCode"));

        let deserialized: ValidationError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::PhoneLength { digits: 7 };
        let msg = format!("{}", err);
        assert!(msg.contains("10"));
        assert!(msg.contains('7'));
    }
}
