// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming conventions and per-target naming strategies.
//!
//! Every logical name in a service is stored exactly once, in canonical
//! param-case (`first-name`). Each output format asks for its own casing by
//! projecting the canonical name through a [`NamingConvention`]:
//!
//! | Convention | `first-name` becomes |
//! |------------|----------------------|
//! | `CamelCase` | `firstName` |
//! | `PascalCase` | `FirstName` |
//! | `ParamCase` | `first-name` |
//! | `SnakeCase` | `first_name` |
//! | `ConstantCase` | `FIRST_NAME` |
//! | `FlatCase` | `firstname` |
//! | `TitleCase` | `First Name` |
//!
//! [`NamingStrategy`] maps every [`NamingTarget`] (a TypeScript class name, a
//! VTL file name, a storage field, ...) to a convention, so two consumers of
//! the same logical name never need to agree on a casing.

use std::fmt;

use convert_case::{Case, Casing};

use crate::error::{Result, ShapeError};

/// Casing convention applied to a logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NamingConvention {
    /// `firstName`
    CamelCase,
    /// `FirstName`
    PascalCase,
    /// `first-name`
    #[default]
    ParamCase,
    /// `first_name`
    SnakeCase,
    /// `FIRST_NAME`
    ConstantCase,
    /// `firstname`
    FlatCase,
    /// `First Name`
    TitleCase
}

/// Format `raw` according to `convention`.
///
/// This is a pure projection; it never fails and never stores its result.
///
/// ```rust
/// use shapegen_core::naming::{NamingConvention, format_string_by_naming_strategy};
///
/// assert_eq!(
///     format_string_by_naming_strategy("first-name", NamingConvention::CamelCase),
///     "firstName"
/// );
/// ```
#[must_use]
pub fn format_string_by_naming_strategy(raw: &str, convention: NamingConvention) -> String {
    match convention {
        NamingConvention::CamelCase => raw.to_case(Case::Camel),
        NamingConvention::PascalCase => raw.to_case(Case::Pascal),
        NamingConvention::ParamCase => raw.to_case(Case::Kebab),
        NamingConvention::SnakeCase => raw.to_case(Case::Snake),
        NamingConvention::ConstantCase => raw.to_case(Case::UpperSnake),
        NamingConvention::FlatCase => raw.to_case(Case::Flat),
        NamingConvention::TitleCase => raw.to_case(Case::Title)
    }
}

/// Normalize a declared name to canonical param-case.
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = format_string_by_naming_strategy(raw.trim(), NamingConvention::ParamCase);
    if name.is_empty() {
        return Err(ShapeError::EmptyName(raw.to_string()));
    }
    Ok(name)
}

/// Normalize a short name to its lowercase compact storage form.
pub fn normalize_short_name(raw: &str) -> Result<String> {
    let short = format_string_by_naming_strategy(raw.trim(), NamingConvention::FlatCase);
    if short.is_empty() {
        return Err(ShapeError::EmptyName(raw.to_string()));
    }
    Ok(short)
}

/// A generation target that consumes logical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NamingTarget {
    /// Property name inside a TypeScript interface.
    TsAttributeName,
    /// TypeScript class name.
    TsClassName,
    /// TypeScript interface name.
    TsInterfaceName,
    /// TypeScript source file name.
    TsFileName,
    /// TypeScript function name.
    TsFunctionName,
    /// GraphQL object/input type name.
    GraphqlTypeName,
    /// GraphQL field name.
    GraphqlFieldName,
    /// AppSync VTL resolver template file name.
    AppsyncVtlFile,
    /// Physical field name in the storage item.
    StorageFieldName
}

impl NamingTarget {
    /// Every target, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::TsAttributeName,
        Self::TsClassName,
        Self::TsInterfaceName,
        Self::TsFileName,
        Self::TsFunctionName,
        Self::GraphqlTypeName,
        Self::GraphqlFieldName,
        Self::AppsyncVtlFile,
        Self::StorageFieldName
    ];
}

impl fmt::Display for NamingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TsAttributeName => "ts.attributeName",
            Self::TsClassName => "ts.className",
            Self::TsInterfaceName => "ts.interfaceName",
            Self::TsFileName => "ts.fileName",
            Self::TsFunctionName => "ts.functionName",
            Self::GraphqlTypeName => "graphql.typeName",
            Self::GraphqlFieldName => "graphql.fieldName",
            Self::AppsyncVtlFile => "appsync.vtl.file",
            Self::StorageFieldName => "storage.fieldName"
        };
        f.write_str(label)
    }
}

/// Per-service record of naming conventions, keyed by generation target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct NamingStrategy {
    /// TypeScript property names.
    pub ts_attribute_name:  NamingConvention,
    /// TypeScript class names.
    pub ts_class_name:      NamingConvention,
    /// TypeScript interface names.
    pub ts_interface_name:  NamingConvention,
    /// TypeScript file names.
    pub ts_file_name:       NamingConvention,
    /// TypeScript function names.
    pub ts_function_name:   NamingConvention,
    /// GraphQL type names.
    pub graphql_type_name:  NamingConvention,
    /// GraphQL field names.
    pub graphql_field_name: NamingConvention,
    /// AppSync VTL file names.
    pub appsync_vtl_file:   NamingConvention,
    /// Storage item field names.
    pub storage_field_name: NamingConvention
}

impl Default for NamingStrategy {
    fn default() -> Self {
        Self {
            ts_attribute_name:  NamingConvention::CamelCase,
            ts_class_name:      NamingConvention::PascalCase,
            ts_interface_name:  NamingConvention::PascalCase,
            ts_file_name:       NamingConvention::ParamCase,
            ts_function_name:   NamingConvention::CamelCase,
            graphql_type_name:  NamingConvention::PascalCase,
            graphql_field_name: NamingConvention::CamelCase,
            appsync_vtl_file:   NamingConvention::ParamCase,
            storage_field_name: NamingConvention::FlatCase
        }
    }
}

impl NamingStrategy {
    /// Convention configured for `target`.
    #[must_use]
    pub const fn convention(&self, target: NamingTarget) -> NamingConvention {
        match target {
            NamingTarget::TsAttributeName => self.ts_attribute_name,
            NamingTarget::TsClassName => self.ts_class_name,
            NamingTarget::TsInterfaceName => self.ts_interface_name,
            NamingTarget::TsFileName => self.ts_file_name,
            NamingTarget::TsFunctionName => self.ts_function_name,
            NamingTarget::GraphqlTypeName => self.graphql_type_name,
            NamingTarget::GraphqlFieldName => self.graphql_field_name,
            NamingTarget::AppsyncVtlFile => self.appsync_vtl_file,
            NamingTarget::StorageFieldName => self.storage_field_name
        }
    }

    /// Override the convention for one target.
    #[must_use]
    pub fn with(mut self, target: NamingTarget, convention: NamingConvention) -> Self {
        let slot = match target {
            NamingTarget::TsAttributeName => &mut self.ts_attribute_name,
            NamingTarget::TsClassName => &mut self.ts_class_name,
            NamingTarget::TsInterfaceName => &mut self.ts_interface_name,
            NamingTarget::TsFileName => &mut self.ts_file_name,
            NamingTarget::TsFunctionName => &mut self.ts_function_name,
            NamingTarget::GraphqlTypeName => &mut self.graphql_type_name,
            NamingTarget::GraphqlFieldName => &mut self.graphql_field_name,
            NamingTarget::AppsyncVtlFile => &mut self.appsync_vtl_file,
            NamingTarget::StorageFieldName => &mut self.storage_field_name
        };
        *slot = convention;
        self
    }

    /// Project a canonical name for `target`.
    #[must_use]
    pub fn format(&self, raw: &str, target: NamingTarget) -> String {
        format_string_by_naming_strategy(raw, self.convention(target))
    }
}
