// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod resource;
mod utils;

use proc_macro::TokenStream;

/// Derive a resource declaration from a struct definition.
///
/// # Overview
///
/// The macro implements `shapegen::DeclareResource` for the struct. Calling
/// `ServiceBuilder::declare::<T>()` then registers the resource, one
/// attribute per field, relationships, access patterns and operations, in
/// field order.
///
/// # Resource Attributes
///
/// | Attribute | Default | Description |
/// |-----------|---------|-------------|
/// | `name` | kebab-cased struct name | Canonical resource name |
/// | `short_name` | derived from `name` | Storage short name |
/// | `plural` | `name` + `s` | Plural name used by array relationships |
/// | `versioned` | service default | Toggle the version attribute |
/// | `operations(...)` | none | Verbs to derive: `create_one`, `read_one`, `update_one`, `delete_one`, `list`, `import_one`, `create_version`, `read_version` or `all` |
/// | `access_pattern(...)` | none | Extra lookup: `name`, `index`, `pk`, `sk` (comma-separated attribute names) |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `name = "..."` | Attribute name. Defaults to the kebab-cased field name. |
/// | `short_name = "..."` | Storage short name. |
/// | `ty = "..."` | Attribute type by name, e.g. `"email"`, `"array<phone>"`. |
/// | `required` | Value must be present. Inferred from non-`Option` fields. |
/// | `key` / `remote_key` / `remote_field` | Key flags. |
/// | `one_of = "..."` | Single reference to another resource. |
/// | `array_of = "..."` | List of references to another resource. |
/// | `skip` | Not declared. |
///
/// Doc comments on the struct and fields become comments of the declared
/// resource and attributes.
///
/// # Type Inference
///
/// | Rust type | Attribute type |
/// |-----------|----------------|
/// | `String`, `&str` | `String` |
/// | integers | `Int` |
/// | `f32`, `f64` | `Float` |
/// | `bool` | `Boolean` |
/// | `Uuid` | `Guid` |
/// | `DateTime<_>`, `NaiveDateTime` | `DateTime` |
/// | `NaiveDate` | `Date` |
/// | `NaiveTime` | `Time` |
/// | `Value` | `Json` |
/// | `IpAddr`, `Ipv4Addr`, `Ipv6Addr` | `IpAddress` |
/// | `Url` | `Url` |
/// | `Vec<T>` | `Array(T)` |
/// | `Option<T>` | `T`, not required |
///
/// Any other type needs an explicit `ty`.
///
/// # Example
///
/// ```rust,ignore
/// use shapegen::prelude::*;
///
/// /// Person of the directory.
/// #[derive(Resource)]
/// #[resource(operations(create_one, read_one, list))]
/// pub struct Person {
///     first_name: String,
///     last_name:  String,
///     #[attribute(ty = "email")]
///     email:      Option<String>,
///     #[attribute(array_of = "pet")]
///     pets:       Vec<PetRef>
/// }
///
/// let mut service = ServiceBuilder::new(ServiceOptions::new("directory"))?;
/// let person = service.declare::<Person>()?;
/// ```
#[proc_macro_derive(Resource, attributes(resource, attribute))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    resource::derive(input)
}
