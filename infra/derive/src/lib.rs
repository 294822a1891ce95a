#![allow(unreachable_pub)]

//! # Derive
//!
//! Procedural macros shared by the configurator crates.
//!
//! The only macro today is [`macro@pcfg_error`], which turns a plain enum into the error type
//! every slice exposes: `thiserror` derives, a `.context(..)` extension trait and the `From`
//! conversions needed for `?`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! pcfg-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for slice error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(..)` for `Result<T, ErrorName>` and for
///   `Result<T, Source>` of every variant that wraps a `source` field.
/// * `From<Source>` for each variant with a `source` field (the `Internal` variant excluded).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant
///   exists.
/// * A module-level `format_context` helper used inside `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Variants use named fields; tuple and unit variants are rejected.
/// 3. Variants with a `source` (or a field marked `#[source]`/`#[from]`) must also carry
///    `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[pcfg_derive::pcfg_error]
/// pub enum CatalogError {
///     #[error("Catalog I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, CatalogError> {
///     std::fs::read_to_string(path).context("Reading catalog document")
/// }
/// ```
#[proc_macro_attribute]
pub fn pcfg_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(&input).into()
}
