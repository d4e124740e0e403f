//! Derive macros for the `tsp_exact_core` option struct and its enum values.
//!
//! Generated code refers to `crate::Error` and `crate::Result`, so these
//! derives are only usable inside a crate that exports both.

mod cli_options;
mod cli_value;
mod kv_display;
mod utils;

use proc_macro::TokenStream;

/// Generates `split_arg`, `apply_cli_option` and `option_help` for a struct
/// whose fields carry `#[cli(long = "...")]` or `#[cli(flag = "...")]`.
#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    cli_options::derive_cli_options_inner(item)
}

/// Generates `FromStr`, `Display` and a `VARIANTS` table for a unit-only enum.
#[proc_macro_derive(CliValue, attributes(cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    cli_value::derive_cli_value_inner(item)
}

/// Generates a multi-line `key = value` `Display` impl for logging.
#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}
