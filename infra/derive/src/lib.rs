#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the facesync workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! facesync-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining the error enum of a facesync crate.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` lifts upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. A `context` field must have the type `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source error must carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use facesync_derive::facesync_error;
/// use std::borrow::Cow;
///
/// #[facesync_error]
/// pub enum EngineError {
///     #[error("Engine transport failed{}: {source}", format_context(.context))]
///     Transport {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Engine fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn push() -> Result<(), EngineError> {
///     std::fs::read("faces.bin").context("Reading cached faces")?;
///     Err("engine went away".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn facesync_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
