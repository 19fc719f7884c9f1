//! Procedural macros for Sieve.
//!
//! - `#[derive(IntoValue)]` - convert Rust structs and enums into `sieve::Value`

use proc_macro::TokenStream;

mod into_value;

/// Derive macro implementing `From<T> for sieve::Value`.
///
/// - named-field struct: a record of its fields
/// - tuple struct: a list; unit struct: `Nil`
/// - unit enum variant: the variant name as a string
/// - enum variant with fields: a record tagged with `"type"`, holding named
///   fields directly, or a tuple variant's fields under `"value"` (one field)
///   or `"values"` (several)
///
/// Field and variant names can be changed with `#[sieve(rename = "...")]`;
/// fields can be left out with `#[sieve(skip)]`.
#[proc_macro_derive(IntoValue, attributes(sieve))]
pub fn derive_into_value(input: TokenStream) -> TokenStream {
    into_value::derive_into_value_impl(input)
}
