//! Turkish mobile numbers in canonical form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Country calling code prepended to national numbers.
pub const COUNTRY_CODE: &str = "90";

/// Length of a national number without trunk prefix or country code.
pub const NATIONAL_DIGITS: usize = 10;

/// A validated phone number.
///
/// Accepts any formatting the user may type (`555 123 45 67`, `0555...`,
/// `+90 555...`) and keeps only the 10 national digits. It always renders as
/// `+90XXXXXXXXXX` when sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber {
    national: String,
}

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(ValidationError::EmptyPhone);
        }

        let national = match digits.len() {
            12 => digits.strip_prefix(COUNTRY_CODE),
            11 => digits.strip_prefix('0'),
            _ => None,
        }
        .unwrap_or(&digits);

        if national.len() != NATIONAL_DIGITS {
            return Err(ValidationError::PhoneLength { digits: national.len() });
        }

        Ok(Self { national: national.to_string() })
    }

    /// `+90XXXXXXXXXX`
    pub fn international(&self) -> String {
        format!("+{}{}", COUNTRY_CODE, self.national)
    }

    pub fn national(&self) -> &str {
        &self.national
    }

    /// Grouped form shown to the user, e.g. `+90 555 123 45 67`.
    pub fn grouped(&self) -> String {
        let (area, rest) = self.national.split_at(3);
        let (first, rest) = rest.split_at(3);
        let (second, third) = rest.split_at(2);
        format!("+{} {} {} {} {}", COUNTRY_CODE, area, first, second, third)
    }

    /// Last four digits, used as a delivery hint on the code entry step.
    pub fn last_four(&self) -> &str {
        self.national.split_at(NATIONAL_DIGITS - 4).1
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}{}", COUNTRY_CODE, self.national)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.international()
    }
}
