// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shapes: ordered attribute schemas of generated artifacts.
//!
//! A shape is built in two steps. [`ShapeBuilder::new`] resolves the
//! cascading strategies and injects system attributes in a fixed order:
//!
//! ```text
//! 1. resolve strategies      (option > service default)
//! 2. partition key           (persistent only)
//! 3. type discriminator      (always)
//! 4. version                 (persistent and versioned)
//! 5. audit create/update/delete, date before user (persistent only)
//! 6. default access pattern  pk=[partition key] sk=[type, version]
//! ```
//!
//! User attributes are then appended through
//! [`ShapeBuilder::add_attribute`], and [`ShapeBuilder::build`] freezes the
//! result into an immutable [`Shape`].
//!
//! Duplicate names and duplicate short names fail at insertion.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    access_pattern::{AccessPattern, PRIMARY_ACCESS_PATTERN, StorageKey},
    attribute::{Attribute, AttributeOptions, LifecyclePhase},
    error::{Result, ShapeError},
    naming::{normalize_name, normalize_short_name},
    strategy::{AuditStrategy, PartitionKeyStrategy, StrategyDefaults, TypeStrategy, VersioningStrategy}
};

/// Per-shape options; every `None` falls back to the service default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShapeOptions {
    /// Shape name, normalized to param-case.
    pub name:                   String,
    /// Compact name; derived from `name` when absent.
    pub short_name:             Option<String>,
    /// Documentation.
    pub comment:                Option<String>,
    /// Stored as a record; defaults to `true`.
    pub persistent:             Option<bool>,
    /// Identity attribute override.
    pub partition_key_strategy: Option<PartitionKeyStrategy>,
    /// Versioning switch override.
    pub versioned:              Option<bool>,
    /// Version attribute override.
    pub versioning_strategy:    Option<VersioningStrategy>,
    /// Type discriminator override.
    pub type_strategy:          Option<TypeStrategy>,
    /// Audit attributes override.
    pub audit_strategy:         Option<AuditStrategy>
}

impl ShapeOptions {
    /// Options for a shape called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the short name.
    #[must_use]
    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Set the documentation.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark as persistent or transient.
    #[must_use]
    pub const fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    /// Toggle versioning.
    #[must_use]
    pub const fn versioned(mut self, versioned: bool) -> Self {
        self.versioned = Some(versioned);
        self
    }

    /// Override the partition key strategy.
    #[must_use]
    pub fn partition_key_strategy(mut self, strategy: PartitionKeyStrategy) -> Self {
        self.partition_key_strategy = Some(strategy);
        self
    }

    /// Override the versioning strategy.
    #[must_use]
    pub fn versioning_strategy(mut self, strategy: VersioningStrategy) -> Self {
        self.versioning_strategy = Some(strategy);
        self
    }

    /// Override the type strategy.
    #[must_use]
    pub fn type_strategy(mut self, strategy: TypeStrategy) -> Self {
        self.type_strategy = Some(strategy);
        self
    }

    /// Override the audit strategy.
    #[must_use]
    pub fn audit_strategy(mut self, strategy: AuditStrategy) -> Self {
        self.audit_strategy = Some(strategy);
        self
    }
}

/// Names of the attributes injected by strategies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct SystemSlots {
    partition_key:   Option<String>,
    type_name:       String,
    version:         Option<String>,
    current_version: Option<String>
}

/// Mutable shape under construction.
#[derive(Debug, Clone)]
pub struct ShapeBuilder {
    name:            String,
    short_name:      String,
    comment:         Option<String>,
    persistent:      bool,
    slots:           SystemSlots,
    attributes:      Vec<Attribute>,
    access_patterns: Vec<AccessPattern>
}

impl ShapeBuilder {
    /// Resolve strategies and inject system attributes.
    pub fn new(options: ShapeOptions, defaults: &StrategyDefaults) -> Result<Self> {
        let name = normalize_name(&options.name)?;
        let short_name = match options.short_name.as_deref() {
            Some(short) => normalize_short_name(short)?,
            None => normalize_short_name(&name)?
        };

        let persistent = options.persistent.unwrap_or(true);
        let versioned = options.versioned.unwrap_or(defaults.versioned);
        let partition_key = options
            .partition_key_strategy
            .unwrap_or_else(|| defaults.partition_key.clone());
        let versioning = options
            .versioning_strategy
            .unwrap_or_else(|| defaults.versioning.clone());
        let type_strategy = options
            .type_strategy
            .unwrap_or_else(|| defaults.type_discriminator.clone());
        let audit = options
            .audit_strategy
            .unwrap_or_else(|| defaults.audit.clone());

        let mut builder = Self {
            name,
            short_name,
            comment: options.comment,
            persistent,
            slots: SystemSlots::default(),
            attributes: Vec::new(),
            access_patterns: Vec::new()
        };

        if persistent {
            let pk = builder.add_attribute(partition_key.attribute)?.name().to_string();
            builder.slots.partition_key = Some(pk);
        }

        builder.slots.type_name = builder
            .add_attribute(type_strategy.attribute)?
            .name()
            .to_string();

        if persistent && versioned {
            let version = builder.add_attribute(versioning.attribute)?.name().to_string();
            builder.slots.version = Some(version);
            builder.slots.current_version = Some(versioning.current_version);
        }

        if persistent {
            for phase in LifecyclePhase::ALL {
                for attribute in audit.phase(phase).attributes() {
                    builder.add_attribute(attribute.clone())?;
                }
            }
        }

        if let Some(pk) = builder.slots.partition_key.clone() {
            let mut sk = vec![builder.slots.type_name.clone()];
            sk.extend(builder.slots.version.clone());
            let primary = AccessPattern::new(PRIMARY_ACCESS_PATTERN)?
                .partition_key([pk])?
                .sort_key(sk)?;
            builder.access_patterns.push(primary);
        }

        debug!(
            shape = %builder.name,
            persistent,
            versioned,
            system_attributes = builder.attributes.len(),
            "shape declared"
        );
        Ok(builder)
    }

    /// Canonical shape name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compact shape name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Check if the shape is stored as a record.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Attributes declared so far.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute by canonical name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    /// Name of the type discriminator attribute.
    #[must_use]
    pub fn type_attribute_name(&self) -> &str {
        &self.slots.type_name
    }

    /// Name of the version attribute, for versioned persistent shapes.
    #[must_use]
    pub fn version_attribute_name(&self) -> Option<&str> {
        self.slots.version.as_deref()
    }

    /// Append an attribute, failing on duplicate name or short name.
    pub fn add_attribute(&mut self, options: AttributeOptions) -> Result<&Attribute> {
        self.insert(Attribute::new(options)?)
    }

    /// Append an already constructed attribute under the same checks.
    pub(crate) fn insert(&mut self, attribute: Attribute) -> Result<&Attribute> {
        if self.attribute(attribute.name()).is_some() {
            return Err(ShapeError::DuplicateAttributeName {
                shape: self.name.clone(),
                name:  attribute.name().to_string()
            });
        }
        if self
            .attributes
            .iter()
            .any(|attr| attr.short_name() == attribute.short_name())
        {
            return Err(ShapeError::DuplicateAttributeShortName {
                shape:      self.name.clone(),
                short_name: attribute.short_name().to_string()
            });
        }

        trace!(
            shape = %self.name,
            name = attribute.name(),
            short_name = attribute.short_name(),
            ty = %attribute.ty(),
            "attribute added"
        );
        self.attributes.push(attribute);
        let last = self.attributes.len() - 1;
        Ok(&self.attributes[last])
    }

    /// Register an additional access pattern, failing on a duplicate name.
    pub fn add_access_pattern(&mut self, pattern: AccessPattern) -> Result<()> {
        if self
            .access_patterns
            .iter()
            .any(|existing| existing.name() == pattern.name())
        {
            return Err(ShapeError::DuplicateDeclaration {
                scope: self.name.clone(),
                name:  pattern.name().to_string()
            });
        }
        self.access_patterns.push(pattern);
        Ok(())
    }

    /// Freeze the shape, resolving every access pattern name.
    pub fn build(self) -> Result<Shape> {
        for pattern in &self.access_patterns {
            pattern.validate(&self.name, &self.attributes)?;
        }
        debug!(
            shape = %self.name,
            attributes = self.attributes.len(),
            access_patterns = self.access_patterns.len(),
            "shape frozen"
        );
        Ok(Shape {
            name:            self.name,
            short_name:      self.short_name,
            comment:         self.comment,
            persistent:      self.persistent,
            slots:           self.slots,
            attributes:      self.attributes,
            access_patterns: self.access_patterns
        })
    }
}

/// Immutable attribute schema of one generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    name:            String,
    short_name:      String,
    comment:         Option<String>,
    persistent:      bool,
    slots:           SystemSlots,
    attributes:      Vec<Attribute>,
    access_patterns: Vec<AccessPattern>
}

impl Shape {
    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compact name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Documentation.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Stored as a record.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Carries a version attribute.
    #[must_use]
    pub const fn is_versioned(&self) -> bool {
        self.slots.version.is_some()
    }

    /// Version value addressing the current revision.
    #[must_use]
    pub fn current_version(&self) -> Option<&str> {
        self.slots.current_version.as_deref()
    }

    /// All attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute by canonical name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    /// Attribute by storage short name.
    #[must_use]
    pub fn attribute_by_short_name(&self, short_name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.short_name() == short_name)
    }

    /// Type discriminator attribute.
    #[must_use]
    pub fn type_attribute(&self) -> Option<&Attribute> {
        self.attribute(&self.slots.type_name)
    }

    /// Version attribute.
    #[must_use]
    pub fn version_attribute(&self) -> Option<&Attribute> {
        self.slots
            .version
            .as_deref()
            .and_then(|name| self.attribute(name))
    }

    /// Key attributes.
    #[must_use]
    pub fn key_shape_attributes(&self) -> Vec<&Attribute> {
        self.attributes.iter().filter(|attr| attr.is_key()).collect()
    }

    /// Plain payload attributes.
    #[must_use]
    pub fn data_shape_attributes(&self) -> Vec<&Attribute> {
        self.attributes.iter().filter(|attr| attr.is_data()).collect()
    }

    /// Partition key attributes of the default access pattern.
    #[must_use]
    pub fn partition_key_attributes(&self) -> Vec<&Attribute> {
        self.default_access_pattern()
            .map(|pattern| pattern.resolve_pk(self))
            .unwrap_or_default()
    }

    /// List input attributes (search text, pagination token).
    #[must_use]
    pub fn list_shape_attributes(&self) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|attr| attr.list_role().is_some())
            .collect()
    }

    /// Attributes generated by the system in `phase`, in declaration order.
    #[must_use]
    pub fn generated_attributes(&self, phase: LifecyclePhase) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|attr| attr.is_generated_on(phase))
            .collect()
    }

    /// All access patterns; the first is the default.
    #[must_use]
    pub fn access_patterns(&self) -> &[AccessPattern] {
        &self.access_patterns
    }

    /// Access pattern by name.
    #[must_use]
    pub fn access_pattern(&self, name: &str) -> Option<&AccessPattern> {
        self.access_patterns
            .iter()
            .find(|pattern| pattern.name() == name)
    }

    /// The table access pattern.
    #[must_use]
    pub fn default_access_pattern(&self) -> Option<&AccessPattern> {
        self.access_patterns.first()
    }

    /// Compose the default storage key from values keyed by attribute name.
    pub fn compose_key(&self, values: &BTreeMap<&str, &str>) -> Result<StorageKey> {
        self.default_access_pattern()
            .ok_or_else(|| ShapeError::NoAccessPattern(self.name.clone()))?
            .compose(self, values)
    }
}
