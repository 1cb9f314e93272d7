//! Validated phone values for patient and practice records.
//!
//! Form fields work with loose strings; anything that reaches a request body or a stored record
//! goes through [`PhoneNumber`], which can only hold a complete canonical `+1XXXXXXXXXX` value.

use chairside_domain::phone::{self, COUNTRY_PREFIX};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[chairside_derive::chairside_error]
pub enum PhoneError {
    /// Input reduced to fewer than ten digits.
    #[error("Incomplete phone number{}: {message}", format_context(.context))]
    Incomplete { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Strict canonical parsing rejected the value.
    #[error("Not a canonical phone number{}: {message}", format_context(.context))]
    NotCanonical { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A complete North-American phone number in canonical E.164 form.
///
/// Serializes as the canonical string; deserializing validates strictly, so a backend payload
/// carrying `"(415) 555-2671"` is rejected rather than silently reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalizes loose user input (`"(415) 555-2671"`, `"+1 415 555 2671"`, ...).
    ///
    /// # Errors
    /// Returns [`PhoneError::Incomplete`] when the input does not reduce to exactly ten digits.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let canonical = phone::to_canonical(raw);
        if canonical.is_empty() {
            let found = phone::extract_digits(raw).len();
            return Err(PhoneError::Incomplete {
                message: format!("expected 10 digits, found {found}").into(),
                context: None,
            });
        }
        Ok(Self(canonical))
    }

    /// Accepts only an already-canonical value.
    ///
    /// # Errors
    /// Returns [`PhoneError::NotCanonical`] unless the value is `+1` followed by ten digits.
    pub fn from_canonical(value: &str) -> Result<Self, PhoneError> {
        if phone::is_valid_canonical(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(not_canonical())
        }
    }

    /// The canonical `+1XXXXXXXXXX` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ten national digits, without the country prefix.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0[COUNTRY_PREFIX.len()..]
    }

    /// The three-digit area code.
    #[must_use]
    pub fn area_code(&self) -> &str {
        &self.digits()[..3]
    }

    /// The `(AAA) BBB-CCCC` display form.
    #[must_use]
    pub fn display(&self) -> String {
        phone::format_display(self.digits())
    }
}

fn not_canonical() -> PhoneError {
    PhoneError::NotCanonical { message: "expected '+1' followed by 10 digits".into(), context: None }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if phone::is_valid_canonical(value.as_str()) {
            Ok(Self(value))
        } else {
            Err(not_canonical())
        }
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
