// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Container attributes parsed from `#[resource(...)]`.
//!
//! ```rust,ignore
//! #[resource(
//!     name = "person",
//!     short_name = "p",
//!     plural = "people",
//!     versioned = false,
//!     operations(create_one, read_one, list),
//!     access_pattern(name = "by-email", index = "gsi1", pk = "email", sk = "type")
//! )]
//! ```

use darling::{FromDeriveInput, FromMeta};
use syn::{Generics, Ident};

/// Operation verbs enabled by `operations(...)`.
///
/// Every flag is a bare word; `all` enables every verb.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromMeta)]
pub struct OperationsConfig {
    #[darling(default)]
    pub create_one:     bool,
    #[darling(default)]
    pub read_one:       bool,
    #[darling(default)]
    pub update_one:     bool,
    #[darling(default)]
    pub delete_one:     bool,
    #[darling(default)]
    pub list:           bool,
    #[darling(default)]
    pub import_one:     bool,
    #[darling(default)]
    pub create_version: bool,
    #[darling(default)]
    pub read_version:   bool,
    #[darling(default)]
    pub all:            bool
}

impl OperationsConfig {
    /// `OperationSubType` variant names of the enabled verbs, in verb order.
    #[must_use]
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            (self.create_one, "CreateOne"),
            (self.read_one, "ReadOne"),
            (self.update_one, "UpdateOne"),
            (self.delete_one, "DeleteOne"),
            (self.list, "List"),
            (self.import_one, "ImportOne"),
            (self.create_version, "CreateVersion"),
            (self.read_version, "ReadVersion")
        ]
        .into_iter()
        .filter(|(enabled, _)| self.all || *enabled)
        .map(|(_, variant)| variant)
        .collect()
    }
}

/// One `access_pattern(...)` entry.
///
/// `pk` and `sk` list attribute names separated by commas.
#[derive(Debug, Clone, PartialEq, Eq, FromMeta)]
pub struct AccessPatternConfig {
    pub name:  String,
    #[darling(default)]
    pub index: Option<String>,
    pub pk:    String,
    #[darling(default)]
    pub sk:    Option<String>
}

impl AccessPatternConfig {
    /// Partition key attribute names.
    #[must_use]
    pub fn pk(&self) -> Vec<String> {
        split_names(&self.pk)
    }

    /// Sort key attribute names.
    #[must_use]
    pub fn sk(&self) -> Vec<String> {
        self.sk.as_deref().map(split_names).unwrap_or_default()
    }
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw `#[resource(...)]` attributes.
///
/// Combined with the parsed fields into [`ResourceDef`](super::ResourceDef).
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(resource), supports(struct_named))]
pub struct ResourceAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics, forwarded to the generated impl.
    pub generics: Generics,

    /// Canonical name. Defaults to the kebab-cased struct name.
    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub short_name: Option<String>,

    #[darling(default)]
    pub plural: Option<String>,

    /// Overrides the service versioning default when present.
    #[darling(default)]
    pub versioned: Option<bool>,

    #[darling(default)]
    pub operations: OperationsConfig,

    #[darling(multiple, rename = "access_pattern")]
    pub access_patterns: Vec<AccessPatternConfig>
}
