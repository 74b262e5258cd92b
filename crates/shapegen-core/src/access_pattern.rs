// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Composite key definitions for single-table storage.
//!
//! An [`AccessPattern`] holds attribute *names* only. Names are resolved
//! against the owning shape when the shape is frozen, so patterns and
//! attributes may be declared in any order.
//!
//! # Key composition
//!
//! ```text
//! pk = [id]            → "ABC-1"
//! sk = [type, version] → "widget#latest"
//! ```
//!
//! Values are joined with [`KEY_SEPARATOR`]. The partition key keeps the
//! identity value as given; the sort key is lower-cased.

use std::collections::BTreeMap;

use crate::{
    attribute::Attribute,
    error::{Result, ShapeError},
    naming::normalize_name,
    shape::Shape
};

/// Separator between composite key segments.
pub const KEY_SEPARATOR: &str = "#";

/// Name of the access pattern every persistent shape receives.
pub const PRIMARY_ACCESS_PATTERN: &str = "primary";

/// Ordered partition/sort key attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessPattern {
    name:  String,
    index: Option<String>,
    pk:    Vec<String>,
    sk:    Vec<String>
}

impl AccessPattern {
    /// Start a pattern on the table itself.
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name:  normalize_name(name)?,
            index: None,
            pk:    Vec::new(),
            sk:    Vec::new()
        })
    }

    /// Place the pattern on a global secondary index.
    #[must_use]
    pub fn on_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Set partition key attribute names.
    pub fn partition_key<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        self.pk = normalize_all(names)?;
        Ok(self)
    }

    /// Set sort key attribute names.
    pub fn sort_key<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        self.sk = normalize_all(names)?;
        Ok(self)
    }

    /// Pattern name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secondary index name; `None` for the table itself.
    #[must_use]
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Partition key attribute names.
    #[must_use]
    pub fn pk(&self) -> &[String] {
        &self.pk
    }

    /// Sort key attribute names.
    #[must_use]
    pub fn sk(&self) -> &[String] {
        &self.sk
    }

    /// Check every referenced name against `attributes`.
    pub(crate) fn validate(&self, shape: &str, attributes: &[Attribute]) -> Result<()> {
        for name in self.pk.iter().chain(&self.sk) {
            if !attributes.iter().any(|attr| attr.name() == name) {
                return Err(ShapeError::UnresolvedAttribute {
                    shape: shape.to_string(),
                    name:  name.clone()
                });
            }
        }
        Ok(())
    }

    /// Partition key attributes resolved against `shape`.
    #[must_use]
    pub fn resolve_pk<'a>(&self, shape: &'a Shape) -> Vec<&'a Attribute> {
        resolve(&self.pk, shape)
    }

    /// Sort key attributes resolved against `shape`.
    #[must_use]
    pub fn resolve_sk<'a>(&self, shape: &'a Shape) -> Vec<&'a Attribute> {
        resolve(&self.sk, shape)
    }

    /// Compose the storage key from attribute values keyed by name.
    pub fn compose(&self, shape: &Shape, values: &BTreeMap<&str, &str>) -> Result<StorageKey> {
        Ok(StorageKey {
            pk: compose_segment(shape.name(), &self.pk, values)?,
            sk: compose_segment(shape.name(), &self.sk, values)?.to_lowercase()
        })
    }
}

/// Generic `pk`/`sk` pair written to the storage item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageKey {
    /// Partition key value.
    pub pk: String,
    /// Sort key value.
    pub sk: String
}

fn normalize_all<I, S>(names: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>
{
    names
        .into_iter()
        .map(|name| normalize_name(name.as_ref()))
        .collect()
}

fn resolve<'a>(names: &[String], shape: &'a Shape) -> Vec<&'a Attribute> {
    names.iter().filter_map(|name| shape.attribute(name)).collect()
}

fn compose_segment(shape: &str, names: &[String], values: &BTreeMap<&str, &str>) -> Result<String> {
    let parts = names
        .iter()
        .map(|name| {
            values
                .get(name.as_str())
                .copied()
                .ok_or_else(|| ShapeError::MissingKeyValue {
                    shape:     shape.to_string(),
                    attribute: name.clone()
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(KEY_SEPARATOR))
}
