//! # Phone Normalization
//!
//! Stateless transforms between the three representations of a North-American phone number:
//!
//! * **raw** user keystrokes (`"+1 (415) 555-2671"`, `"415.555.2671"`, ...),
//! * the **canonical** E.164 form (`"+14155552671"`), persisted and sent to the backend,
//! * the **display** mask (`"(415) 555-2671"`), shown while the user edits.
//!
//! Every function is total: `None`, empty, or malformed input yields an empty string (or
//! `false`) instead of an error, because these run on the keystroke path.
//!
//! Arguments accept anything convertible into `Option<&str>`, so both `"415"` and `None` work:
//!
//! ```rust
//! use chairside_domain::phone::{canonical_to_display, extract_digits, to_canonical};
//!
//! assert_eq!(extract_digits("(415) 555-2671"), "4155552671");
//! assert_eq!(to_canonical("(415) 555-2671"), "+14155552671");
//! assert_eq!(canonical_to_display("+14155552671"), "(415) 555-2671");
//! assert_eq!(canonical_to_display(None), "");
//! ```

use serde::{Deserialize, Serialize};

/// Country calling code prefix for the North-American numbering plan.
pub const COUNTRY_PREFIX: &str = "+1";

/// Number of national digits in a complete number.
pub const NATIONAL_DIGITS: usize = 10;

/// Length of a canonical value (`+1` plus ten digits).
pub const CANONICAL_LEN: usize = COUNTRY_PREFIX.len() + NATIONAL_DIGITS;

/// Length of a complete display value, `(AAA) BBB-CCCC`.
pub const DISPLAY_LEN: usize = 14;

const AREA_LEN: usize = 3;
const EXCHANGE_END: usize = 6;

/// How far a raw input is from being a complete number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhoneForm {
    /// No digits at all.
    Empty,
    /// Between one and nine digits.
    Partial,
    /// Exactly ten digits; a canonical value exists.
    Complete,
}

impl PhoneForm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

/// Reduces arbitrary input to at most ten national digits.
///
/// Rules, first match wins:
/// 1. `None` yields an empty sequence.
/// 2. A literal `+1` prefix is stripped, the rest is reduced to digits and truncated to ten.
/// 3. Eleven digits starting with `1`, from a raw input longer than ten characters, lose the
///    leading `1` as a country code.
/// 4. Otherwise all digits are kept and truncated to the first ten.
pub fn extract_digits<'a>(value: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = value.into() else {
        return String::new();
    };

    if let Some(rest) = raw.strip_prefix(COUNTRY_PREFIX) {
        return ascii_digits(rest).take(NATIONAL_DIGITS).collect();
    }

    let mut digits: String = ascii_digits(raw).collect();

    if digits.len() == NATIONAL_DIGITS + 1
        && digits.starts_with('1')
        && raw.chars().count() > NATIONAL_DIGITS
    {
        digits.remove(0);
        return digits;
    }

    digits.truncate(NATIONAL_DIGITS);
    digits
}

/// Renders the progressive display mask for a digit sequence.
///
/// Non-digits are dropped and the input is truncated to ten digits before masking, so raw
/// input is tolerated as well.
pub fn format_display(digits: &str) -> String {
    let digits: String = ascii_digits(digits).take(NATIONAL_DIGITS).collect();
    let mut out = String::with_capacity(DISPLAY_LEN);

    match digits.len() {
        0 => {},
        1..=AREA_LEN => {
            out.push('(');
            out.push_str(&digits);
        },
        len => {
            let (area, rest) = digits.split_at(AREA_LEN);
            out.push('(');
            out.push_str(area);
            out.push_str(") ");
            if len <= EXCHANGE_END {
                out.push_str(rest);
            } else {
                let (exchange, line) = rest.split_at(EXCHANGE_END - AREA_LEN);
                out.push_str(exchange);
                out.push('-');
                out.push_str(line);
            }
        },
    }

    out
}

/// Returns the canonical `+1XXXXXXXXXX` form, or an empty string when the input does not
/// reduce to exactly ten digits.
pub fn to_canonical<'a>(value: impl Into<Option<&'a str>>) -> String {
    let digits = extract_digits(value);
    if digits.len() == NATIONAL_DIGITS {
        let mut out = String::with_capacity(CANONICAL_LEN);
        out.push_str(COUNTRY_PREFIX);
        out.push_str(&digits);
        out
    } else {
        String::new()
    }
}

/// Checks that a value is exactly `+1` followed by ten ASCII digits.
pub fn is_valid_canonical<'a>(value: impl Into<Option<&'a str>>) -> bool {
    value.into().and_then(|v| v.strip_prefix(COUNTRY_PREFIX)).is_some_and(|national| {
        national.len() == NATIONAL_DIGITS && national.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Converts a stored value (ideally canonical) back into its display form.
pub fn canonical_to_display<'a>(value: impl Into<Option<&'a str>>) -> String {
    format_display(&extract_digits(value))
}

/// Classifies raw input by how many digits it reduces to.
pub fn classify<'a>(value: impl Into<Option<&'a str>>) -> PhoneForm {
    match extract_digits(value).len() {
        0 => PhoneForm::Empty,
        NATIONAL_DIGITS => PhoneForm::Complete,
        _ => PhoneForm::Partial,
    }
}

fn ascii_digits(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().filter(char::is_ascii_digit)
}
