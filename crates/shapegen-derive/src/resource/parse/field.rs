// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level parsing of `#[attribute(...)]`.
//!
//! Options mix bare flags (`required`, `key`, `skip`) with key-value pairs
//! (`name = "..."`, `one_of = "..."`), so they are parsed by hand with
//! `parse_nested_meta` rather than through darling.

use convert_case::{Case, Casing};
use syn::{Field, LitBool, LitStr, Token, meta::ParseNestedMeta};

use super::ty::{self, TypeDef};
use crate::utils::docs::extract_doc_lines;

/// Cardinality of a relationship field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many
}

/// What a field declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain attribute of the given type.
    Attribute(TypeDef),
    /// Reference to another resource by name.
    Relationship {
        cardinality: Cardinality,
        target:      String
    }
}

/// Parsed field definition.
///
/// # Example
///
/// ```rust,ignore
/// /// Contact address.
/// #[attribute(ty = "email", short_name = "em")]
/// email: Option<String>,
///
/// // name: "email", kind: Attribute(Named("email")), required: false
/// ```
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name:         String,
    pub short_name:   Option<String>,
    pub kind:         FieldKind,
    pub required:     bool,
    pub key:          bool,
    pub remote_key:   bool,
    pub remote_field: bool,
    pub comments:     Vec<String>
}

#[derive(Default)]
struct FieldOptions {
    name:         Option<String>,
    short_name:   Option<String>,
    ty:           Option<String>,
    required:     Option<bool>,
    key:          bool,
    remote_key:   bool,
    remote_field: bool,
    relationship: Option<(Cardinality, String)>,
    skip:         bool
}

impl FieldOptions {
    fn parse(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(string(meta)?);
        } else if meta.path.is_ident("short_name") {
            self.short_name = Some(string(meta)?);
        } else if meta.path.is_ident("ty") {
            self.ty = Some(string(meta)?);
        } else if meta.path.is_ident("required") {
            self.required = Some(flag(meta)?);
        } else if meta.path.is_ident("key") {
            self.key = flag(meta)?;
        } else if meta.path.is_ident("remote_key") {
            self.remote_key = flag(meta)?;
        } else if meta.path.is_ident("remote_field") {
            self.remote_field = flag(meta)?;
        } else if meta.path.is_ident("one_of") {
            self.relate(meta, Cardinality::One)?;
        } else if meta.path.is_ident("array_of") {
            self.relate(meta, Cardinality::Many)?;
        } else if meta.path.is_ident("skip") {
            self.skip = flag(meta)?;
        } else {
            return Err(meta.error("unknown attribute option"));
        }
        Ok(())
    }

    /// Options that only apply to plain attributes, in declaration order.
    fn attribute_only(&self) -> Vec<&'static str> {
        [
            ("ty", self.ty.is_some()),
            ("required", self.required.is_some()),
            ("key", self.key),
            ("remote_key", self.remote_key),
            ("remote_field", self.remote_field)
        ]
        .into_iter()
        .filter_map(|(option, set)| set.then_some(option))
        .collect()
    }

    fn relate(&mut self, meta: &ParseNestedMeta<'_>, cardinality: Cardinality) -> syn::Result<()> {
        if self.relationship.is_some() {
            return Err(meta.error("only one of `one_of` and `array_of` may be set"));
        }
        self.relationship = Some((cardinality, string(meta)?));
        Ok(())
    }
}

fn string(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    Ok(meta.value()?.parse::<LitStr>()?.value())
}

fn flag(meta: &ParseNestedMeta<'_>) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<LitBool>()?.value)
    } else {
        Ok(true)
    }
}

impl FieldDef {
    /// Parse a field definition.
    ///
    /// Returns `Ok(None)` for `#[attribute(skip)]` fields.
    ///
    /// # Errors
    ///
    /// Returns error for unknown options, a field type with no inferable
    /// attribute type and no `ty`, or a relationship combined with `ty`,
    /// `required`, `key`, `remote_key` or `remote_field`.
    pub fn from_field(field: &Field) -> darling::Result<Option<Self>> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Resource fields must be named").with_span(field)
        })?;

        let mut options = FieldOptions::default();
        for attr in &field.attrs {
            if attr.path().is_ident("attribute") {
                attr.parse_nested_meta(|meta| options.parse(&meta))?;
            }
        }
        if options.skip {
            return Ok(None);
        }

        if options.relationship.is_some()
            && let Some(option) = options.attribute_only().first()
        {
            return Err(darling::Error::custom(format!(
                "`{option}` cannot be combined with `one_of` or `array_of`"
            ))
            .with_span(&ident));
        }

        let optional = ty::is_option(&field.ty);
        let kind = match (options.relationship, options.ty) {
            (Some((cardinality, target)), _) => FieldKind::Relationship {
                cardinality,
                target
            },
            (None, Some(name)) => FieldKind::Attribute(TypeDef::Named(name)),
            (None, None) => {
                let inferred = ty::infer(&field.ty).ok_or_else(|| {
                    darling::Error::custom(
                        "cannot infer the attribute type; set #[attribute(ty = \"...\")]"
                    )
                    .with_span(&field.ty)
                })?;
                FieldKind::Attribute(inferred)
            }
        };

        Ok(Some(Self {
            name: options
                .name
                .unwrap_or_else(|| ident.to_string().to_case(Case::Kebab)),
            short_name: options.short_name,
            kind,
            required: options.required.unwrap_or(!optional),
            key: options.key,
            remote_key: options.remote_key,
            remote_field: options.remote_field,
            comments: extract_doc_lines(&field.attrs)
        }))
    }
}
