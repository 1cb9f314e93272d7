//! # Phone Input Controller
//!
//! Keeps the digit state behind an interactive phone field.
//!
//! A controlled field has two writers: the user typing, and the owning form pushing a value
//! back in. The form usually pushes back what the controller just emitted, and re-extracting
//! that echo would clobber keystrokes made in between. Every emission is therefore stamped with
//! a [`Generation`]; the form passes the generation back with the value, and the controller
//! ignores echoes of its own emissions while still applying genuine programmatic changes.
//!
//! ```rust
//! use chairside_kernel::input::{PhoneInputController, SyncOutcome};
//!
//! let mut field = PhoneInputController::new(None);
//! let emission = field.on_keystroke("(415) 555-267");
//! assert_eq!(emission.value, "415555267");
//!
//! let emission = field.on_keystroke("(415) 555-2671");
//! assert_eq!(emission.value, "+14155552671");
//! assert_eq!(field.display(), "(415) 555-2671");
//!
//! // The form echoes the canonical value back; state is left alone.
//! let outcome = field.sync_external(emission.value.as_str(), Some(emission.generation));
//! assert_eq!(outcome, SyncOutcome::SkippedEcho);
//!
//! // A reset from the form is applied.
//! assert_eq!(field.sync_external(None, None), SyncOutcome::Applied);
//! assert_eq!(field.digits(), "");
//! ```

use chairside_domain::phone::{self, PhoneForm};
use std::fmt;
use tracing::trace;

/// Monotonic stamp of a controller emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Value sent upward to the owning form after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    /// Canonical form at ten digits, the partial digit sequence at one to nine, else empty.
    pub value: String,
    pub generation: Generation,
    pub form: PhoneForm,
}

/// What [`PhoneInputController::sync_external`] did with an external value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// State was replaced by the digits of the external value.
    Applied,
    /// The value echoed the latest emission; state was kept.
    SkippedEcho,
    /// The value echoed an older emission; state was kept.
    SkippedStale,
}

/// Digit state of one phone field.
#[derive(Debug, Clone, Default)]
pub struct PhoneInputController {
    digits: String,
    generation: Generation,
    last_emitted: Option<Generation>,
}

impl PhoneInputController {
    /// Creates a controller seeded from an external value (typically a stored canonical number).
    pub fn new<'a>(initial: impl Into<Option<&'a str>>) -> Self {
        Self { digits: phone::extract_digits(initial), ..Self::default() }
    }

    /// Handles the new raw text of the field.
    ///
    /// State is updated before returning so the display reflects the keystroke immediately.
    pub fn on_keystroke(&mut self, raw: &str) -> Emission {
        self.digits = phone::extract_digits(raw);
        self.generation = self.generation.next();
        self.last_emitted = Some(self.generation);

        let form = self.form();
        let value = match form {
            PhoneForm::Complete => phone::to_canonical(self.digits.as_str()),
            PhoneForm::Partial => self.digits.clone(),
            PhoneForm::Empty => String::new(),
        };

        trace!(generation = %self.generation, ?form, "phone keystroke");
        Emission { value, generation: self.generation, form }
    }

    /// Handles a value pushed in by the owner.
    ///
    /// `origin` is the generation of the emission this value echoes, or `None` for a
    /// programmatic change (loading a record, clearing the form).
    pub fn sync_external<'a>(
        &mut self,
        value: impl Into<Option<&'a str>>,
        origin: Option<Generation>,
    ) -> SyncOutcome {
        let outcome = match (origin, self.last_emitted) {
            (Some(origin), Some(last)) if origin == last => SyncOutcome::SkippedEcho,
            (Some(origin), Some(last)) if origin < last => SyncOutcome::SkippedStale,
            _ => {
                self.digits = phone::extract_digits(value);
                SyncOutcome::Applied
            },
        };

        trace!(?origin, ?outcome, "phone external sync");
        outcome
    }

    /// The current digit sequence (0 to 10 digits).
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The progressive display mask of the current digits.
    #[must_use]
    pub fn display(&self) -> String {
        phone::format_display(&self.digits)
    }

    /// The canonical value, or an empty string while incomplete.
    #[must_use]
    pub fn canonical(&self) -> String {
        phone::to_canonical(self.digits.as_str())
    }

    #[must_use]
    pub fn form(&self) -> PhoneForm {
        phone::classify(self.digits.as_str())
    }

    /// Generation of the most recent keystroke.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }
}
