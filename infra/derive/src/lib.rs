#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Derive
//!
//! Procedural macros shared by the Forma crates.
//!
//! Every crate in the workspace declares its error type with [`macro@forma_error`], so that
//! enumeration, model, logger and config failures all carry the same `context` convention
//! and the same `...Ext::context` helper.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant with a source field.
/// * `From<SourceError>` for variants with a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * `kind(&self) -> &'static str`, the variant name (used as a structured log field).
/// * A private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants use named fields; tuple and unit variants are rejected.
/// 3. A `context` field must be `Option<Cow<'static, str>>`.
/// 4. A variant with a source field must also have a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[forma_derive::forma_error]
/// pub enum EnumError {
///     #[error("Duplicate enumeration value{}: {message}", format_context(.context))]
///     DuplicateValue { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Internal enumeration error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn forma_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}
