// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Resource derive macro.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── container.rs - #[resource(...)] via darling (ResourceAttrs)
//! ├── field.rs     - #[attribute(...)] by hand (FieldDef)
//! └── ty.rs        - Rust type → attribute type inference
//! ```
//!
//! # Data Structures
//!
//! ```text
//! ResourceDef
//! ├── ident, generics
//! ├── name / short_name / plural / versioned / comment
//! ├── operations: OperationsConfig
//! ├── access_patterns: Vec<AccessPatternConfig>
//! └── fields: Vec<FieldDef>
//!     └── FieldDef
//!         ├── name / short_name / comments
//!         ├── kind: Attribute(TypeDef) | Relationship { cardinality, target }
//!         └── required / key / remote_key / remote_field
//! ```

mod container;
mod field;
mod ty;


use convert_case::{Case, Casing};
pub use container::{AccessPatternConfig, OperationsConfig};
use darling::FromDeriveInput;
pub use field::{Cardinality, FieldDef, FieldKind};
use syn::{Data, DataStruct, DeriveInput, Fields, Generics, Ident};
pub use ty::TypeDef;

use self::container::ResourceAttrs;
use crate::utils::docs::extract_doc_comments;

/// Complete parsed resource definition.
#[derive(Debug)]
pub struct ResourceDef {
    pub ident:           Ident,
    pub generics:        Generics,
    pub name:            String,
    pub short_name:      Option<String>,
    pub plural:          Option<String>,
    pub versioned:       Option<bool>,
    pub comment:         Option<String>,
    pub operations:      OperationsConfig,
    pub access_patterns: Vec<AccessPatternConfig>,
    pub fields:          Vec<FieldDef>
}

impl ResourceDef {
    /// Parse a resource definition from derive input.
    ///
    /// Container and field errors are reported together.
    ///
    /// # Errors
    ///
    /// Returns every container and field error found.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = ResourceAttrs::from_derive_input(input);
        let fields = parse_fields(input);

        let (attrs, fields) = match (attrs, fields) {
            (Ok(attrs), Ok(fields)) => (attrs, fields),
            (attrs, fields) => {
                return Err(darling::Error::multiple(
                    attrs.err().into_iter().chain(fields.err()).collect()
                ));
            }
        };

        for pattern in &attrs.access_patterns {
            if pattern.pk().is_empty() {
                return Err(darling::Error::custom(format!(
                    "access pattern `{}` needs at least one pk attribute",
                    pattern.name
                ))
                .with_span(&attrs.ident));
            }
        }

        Ok(Self {
            name: attrs
                .name
                .unwrap_or_else(|| attrs.ident.to_string().to_case(Case::Kebab)),
            ident: attrs.ident,
            generics: attrs.generics,
            short_name: attrs.short_name,
            plural: attrs.plural,
            versioned: attrs.versioned,
            comment: extract_doc_comments(&input.attrs),
            operations: attrs.operations,
            access_patterns: attrs.access_patterns,
            fields
        })
    }
}

fn parse_fields(input: &DeriveInput) -> darling::Result<Vec<FieldDef>> {
    let Data::Struct(DataStruct {
        fields: Fields::Named(named),
        ..
    }) = &input.data
    else {
        return Err(
            darling::Error::custom("Resource requires a struct with named fields")
                .with_span(&input.ident)
        );
    };

    let mut errors = darling::Error::accumulator();
    let fields: Vec<FieldDef> = named
        .named
        .iter()
        .filter_map(|field| errors.handle(FieldDef::from_field(field)))
        .flatten()
        .collect();
    errors.finish_with(fields)
}
