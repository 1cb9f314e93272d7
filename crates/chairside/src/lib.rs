//! Facade crate for the Chairside client core.
//! Re-exports the domain and kernel crates so apps depend on a single crate.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ```rust
//! use chairside::prelude::*;
//!
//! let number = PhoneNumber::parse("+1 (415) 555-2671").unwrap();
//! assert_eq!(number.as_str(), "+14155552671");
//! assert_eq!(canonical_to_display(number.as_str()), "(415) 555-2671");
//! ```

pub use chairside_domain as domain;
pub use chairside_kernel as kernel;

pub mod prelude {
    pub use chairside_kernel::prelude::*;
}

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
