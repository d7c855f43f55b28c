#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros that remove the repetitive parts of the campus hub crates:
//! runtime bootstrap, API models and handlers, error enums and feature slices.
//!
//! Examples below are `ignore`d because a proc-macro crate cannot use itself in doctests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a plain `fn main` running on a preconfigured Tokio runtime.
///
/// # Arguments
///
/// * `server` - Multi-threaded profile sized for the HTTP server.
/// * `memory_efficient` - Small worker pool for tools and tests.
/// * `default` - Worker count detected from available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[campus_runtime::main(server)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a request or response model.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, derives `utoipa::ToSchema`
/// behind the `server` feature and applies `rename_all = "camelCase"` plus
/// `deny_unknown_fields` unless told otherwise.
///
/// ```rust,ignore
/// #[api_model(deny_unknown_fields = false)]
/// pub struct College {
///     pub id: String,
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attaches `utoipa::path` metadata to an axum handler when the `server` feature is on.
///
/// Takes the usual `utoipa::path` arguments (`get`, `path = "..."`, `responses(...)`, `tag`).
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)), tag = "System")]
/// pub async fn health() -> Json<HealthResponse> { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Defines an error enum wired for `?` and `.context(...)`.
///
/// * Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * Generates `<Name>Ext` with `.context()` on `Result<T, Name>` and on results of every
///   wrapped source error.
/// * Implements `From<Source>` for variants carrying a `source` (or `#[source]`/`#[from]`) field.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * Adds `kind()`, returning the variant name.
///
/// Variants must use named fields. Variants with a source also need
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[campus_error]
/// pub enum DatabaseError {
///     #[error("Query failed{}: {source}", format_context(.context))]
///     Query { source: surrealdb::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn campus_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Turns a struct into a shareable feature slice handle.
///
/// The fields move into a generated `<Name>Inner`, the handle wraps it in an `Arc`,
/// derefs to it and implements `FeatureSlice` so it can live in the API state registry.
///
/// ```rust,ignore
/// #[campus_derive::campus_slice]
/// pub struct EventsSlice {
///     pub service: EventService,
/// }
///
/// let slice = EventsSlice::new(EventsSliceInner { service });
/// ```
#[proc_macro_attribute]
pub fn campus_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
