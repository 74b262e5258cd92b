// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute definitions and visibility derivation.
//!
//! An [`Attribute`] is one named, typed field on a [`Shape`](crate::Shape).
//! It carries a generation policy per lifecycle phase, key/remote flags and
//! a validation rule list per phase. Everything a code emitter needs to know
//! about where the attribute appears is *derived* from those flags:
//!
//! | Predicate | Definition |
//! |-----------|------------|
//! | `is_system` | any generator is not `None` |
//! | `is_data` | `!system && !key && !remote_field` |
//! | `is_create_input` | `!system && !key && !remote_field` |
//! | `is_read_input` | `key` |
//! | `is_update_input` | `!system && !remote_field` |
//! | `is_delete_input` | `key` |
//! | `is_import_input` | `!system \|\| remote_field` |
//! | `is_list_input` | always `false` |
//!
//! List inputs (search text, pagination token) are a separate mechanism,
//! see [`ListRole`].

mod types;

use std::fmt;

pub use types::AttributeType;

use crate::{
    error::Result,
    naming::{normalize_name, normalize_short_name}
};

/// Lifecycle phase of a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LifecyclePhase {
    /// Record creation.
    Create,
    /// Record update.
    Update,
    /// Record deletion.
    Delete
}

impl LifecyclePhase {
    /// All phases in evaluation order.
    pub const ALL: [Self; 3] = [Self::Create, Self::Update, Self::Delete];
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete"
        })
    }
}

/// How the system computes an attribute value in a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Generator {
    /// Supplied by the caller.
    #[default]
    None,
    /// Monotonic counter.
    AutoIncrement,
    /// Fresh GUID.
    Guid,
    /// Current date/time.
    CurrentDateTimeStamp,
    /// Type discriminator of the owning shape.
    Type
}

impl Generator {
    /// Check if the value is computed by the system.
    #[must_use]
    pub const fn is_generated(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Generators for the three lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Generators {
    /// Generator applied on create.
    pub create: Generator,
    /// Generator applied on update.
    pub update: Generator,
    /// Generator applied on delete.
    pub delete: Generator
}

impl Generators {
    /// Generator for `phase`.
    #[must_use]
    pub const fn for_phase(&self, phase: LifecyclePhase) -> Generator {
        match phase {
            LifecyclePhase::Create => self.create,
            LifecyclePhase::Update => self.update,
            LifecyclePhase::Delete => self.delete
        }
    }

    /// Check if any phase generates a value.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.create.is_generated() || self.update.is_generated() || self.delete.is_generated()
    }
}

/// Validation rule run against a caller-supplied value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ValidationRule {
    /// Value must be present.
    Required,
    /// Value must match the attribute type.
    Type
}

/// Validation rules per lifecycle phase.
///
/// `Required` always precedes `Type` so presence is checked before shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Validations {
    /// Rules run on create.
    pub create: Vec<ValidationRule>,
    /// Rules run on update.
    pub update: Vec<ValidationRule>,
    /// Rules run on delete.
    pub delete: Vec<ValidationRule>
}

impl Validations {
    fn seed(is_system: bool, is_required: bool) -> Self {
        let mut rules = Vec::with_capacity(2);
        if !is_system {
            rules.push(ValidationRule::Type);
        }
        if is_required {
            rules.insert(0, ValidationRule::Required);
        }
        Self {
            create: rules.clone(),
            update: rules.clone(),
            delete: rules
        }
    }

    /// Rules for `phase`.
    #[must_use]
    pub fn for_phase(&self, phase: LifecyclePhase) -> &[ValidationRule] {
        match phase {
            LifecyclePhase::Create => &self.create,
            LifecyclePhase::Update => &self.update,
            LifecyclePhase::Delete => &self.delete
        }
    }
}

/// Role of an attribute injected into list inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ListRole {
    /// Free text matched against the search index.
    SearchText,
    /// Opaque continuation token.
    PaginationToken
}

/// Declaration of an attribute before it is attached to a shape.
///
/// # Example
///
/// ```rust
/// use shapegen_core::{AttributeOptions, AttributeType};
///
/// let email = AttributeOptions::new("email", AttributeType::Email)
///     .short_name("em")
///     .required(true)
///     .comment("Primary contact address.");
/// assert!(email.is_required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeOptions {
    /// Declared name, normalized to param-case on construction.
    pub name:            String,
    /// Storage name; derived from `name` when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub short_name:      Option<String>,
    /// Semantic type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty:              AttributeType,
    /// Documentation lines.
    #[cfg_attr(feature = "serde", serde(default))]
    pub comments:        Vec<String>,
    /// Generation policy per phase.
    #[cfg_attr(feature = "serde", serde(default))]
    pub generators:      Generators,
    /// Part of the record key.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_key:          bool,
    /// Key of a record stored elsewhere.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_remote_key:   bool,
    /// Value resolved from another record.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_remote_field: bool,
    /// Value must be present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_required:     bool,
    /// List input role, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub list_role:       Option<ListRole>
}

impl AttributeOptions {
    /// Start an attribute declaration.
    pub fn new(name: impl Into<String>, ty: AttributeType) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            ty,
            comments: Vec::new(),
            generators: Generators::default(),
            is_key: false,
            is_remote_key: false,
            is_remote_field: false,
            is_required: false,
            list_role: None
        }
    }

    /// Set the storage short name.
    #[must_use]
    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Append a documentation line.
    #[must_use]
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    /// Set the create-phase generator.
    #[must_use]
    pub const fn create_generator(mut self, generator: Generator) -> Self {
        self.generators.create = generator;
        self
    }

    /// Set the update-phase generator.
    #[must_use]
    pub const fn update_generator(mut self, generator: Generator) -> Self {
        self.generators.update = generator;
        self
    }

    /// Set the delete-phase generator.
    #[must_use]
    pub const fn delete_generator(mut self, generator: Generator) -> Self {
        self.generators.delete = generator;
        self
    }

    /// Mark as part of the record key.
    #[must_use]
    pub const fn key(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }

    /// Mark as the key of a remote record.
    #[must_use]
    pub const fn remote_key(mut self, is_remote_key: bool) -> Self {
        self.is_remote_key = is_remote_key;
        self
    }

    /// Mark as resolved from a remote record.
    #[must_use]
    pub const fn remote_field(mut self, is_remote_field: bool) -> Self {
        self.is_remote_field = is_remote_field;
        self
    }

    /// Mark as required.
    #[must_use]
    pub const fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    /// Mark as a list input.
    #[must_use]
    pub const fn list_role(mut self, role: ListRole) -> Self {
        self.list_role = Some(role);
        self
    }
}

/// A frozen attribute owned by exactly one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    name:            String,
    short_name:      String,
    ty:              AttributeType,
    comments:        Vec<String>,
    generators:      Generators,
    is_key:          bool,
    is_remote_key:   bool,
    is_remote_field: bool,
    is_required:     bool,
    list_role:       Option<ListRole>,
    validations:     Validations
}

impl Attribute {
    /// Build an attribute, normalizing names and applying flag invariants.
    ///
    /// `remote_key` implies `remote_field`; `key` or `remote_key` implies
    /// `required`.
    pub fn new(options: AttributeOptions) -> Result<Self> {
        let name = normalize_name(&options.name)?;
        let short_name = match options.short_name.as_deref() {
            Some(short) => normalize_short_name(short)?,
            None => normalize_short_name(&name)?
        };
        let is_remote_field = options.is_remote_field || options.is_remote_key;
        let is_required = options.is_required || options.is_key || options.is_remote_key;
        let validations = Validations::seed(options.generators.any(), is_required);

        Ok(Self {
            name,
            short_name,
            ty: options.ty,
            comments: options.comments,
            generators: options.generators,
            is_key: options.is_key,
            is_remote_key: options.is_remote_key,
            is_remote_field,
            is_required,
            list_role: options.list_role,
            validations
        })
    }

    /// Canonical param-case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compact storage name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Semantic type.
    #[must_use]
    pub const fn ty(&self) -> &AttributeType {
        &self.ty
    }

    /// Generation policy.
    #[must_use]
    pub const fn generators(&self) -> &Generators {
        &self.generators
    }

    /// Validation rules.
    #[must_use]
    pub const fn validations(&self) -> &Validations {
        &self.validations
    }

    /// List input role.
    #[must_use]
    pub const fn list_role(&self) -> Option<ListRole> {
        self.list_role
    }

    /// Part of the record key.
    #[must_use]
    pub const fn is_key(&self) -> bool {
        self.is_key
    }

    /// Key of a record stored elsewhere.
    #[must_use]
    pub const fn is_remote_key(&self) -> bool {
        self.is_remote_key
    }

    /// Value resolved from another record.
    #[must_use]
    pub const fn is_remote_field(&self) -> bool {
        self.is_remote_field
    }

    /// Value must be present.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.is_required
    }

    /// Value is always computed by the system.
    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.generators.any()
    }

    /// Check if the attribute is generated in `phase`.
    #[must_use]
    pub const fn is_generated_on(&self, phase: LifecyclePhase) -> bool {
        self.generators.for_phase(phase).is_generated()
    }

    /// Plain payload attribute.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        !self.is_system() && !self.is_key && !self.is_remote_field
    }

    /// Supplied by the caller on create.
    #[must_use]
    pub const fn is_create_input(&self) -> bool {
        !self.is_system() && !self.is_key && !self.is_remote_field
    }

    /// Supplied by the caller on read.
    #[must_use]
    pub const fn is_read_input(&self) -> bool {
        self.is_key
    }

    /// Supplied by the caller on update; keys address the record.
    #[must_use]
    pub const fn is_update_input(&self) -> bool {
        !self.is_system() && !self.is_remote_field
    }

    /// Supplied by the caller on delete.
    #[must_use]
    pub const fn is_delete_input(&self) -> bool {
        self.is_key
    }

    /// Supplied by the caller on import.
    #[must_use]
    pub const fn is_import_input(&self) -> bool {
        !self.is_system() || self.is_remote_field
    }

    /// Never true; list inputs come from [`ListRole`] attributes.
    #[must_use]
    pub const fn is_list_input(&self) -> bool {
        false
    }

    /// Documentation lines with derived annotations.
    ///
    /// GUID attributes get `@type GUID`; system attributes get `@readonly`.
    #[must_use]
    pub fn comment(&self) -> Vec<String> {
        let mut lines = self.comments.clone();
        if self.ty == AttributeType::Guid {
            lines.push("@type GUID".to_string());
        }
        if self.is_system() {
            lines.push("@readonly".to_string());
        }
        lines
    }
}
