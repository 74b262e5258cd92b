// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resource derive macro implementation.
//!
//! ```text
//! DeriveInput ──► parse::ResourceDef ──► codegen ──► impl DeclareResource
//! ```
//!
//! Parsing collects every error darling and the field parser report, so a
//! struct with several bad fields fails with all of them at once.

mod codegen;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::ResourceDef;

/// Main entry point for the Resource derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ResourceDef::from_derive_input(&input) {
        Ok(resource) => codegen::generate(&resource).into(),
        Err(err) => err.write_errors().into()
    }
}
