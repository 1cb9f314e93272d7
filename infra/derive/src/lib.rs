#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Chairside crates. Currently a single attribute macro,
//! [`macro@chairside_error`], which wires crate-local error enums into `thiserror` with a
//! uniform `context` convention.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! chairside-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(..)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: Implements `From<Source>` for variants with a `source` field (or a field
///   marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source error must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use chairside_derive::chairside_error;
/// use std::borrow::Cow;
///
/// #[chairside_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, StoreError> {
///     std::fs::read_to_string(path).context("Reading store file")
/// }
/// ```
#[proc_macro_attribute]
pub fn chairside_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
