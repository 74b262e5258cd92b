// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resources: user-declared domain objects backed by a persistent record.
//!
//! A resource owns one persistent [`Shape`] (its *record*) and a list of
//! relationships to other resources. Relationships are declared by target
//! *name* and bound to [`ResourceId`] handles when the service is built, so a
//! resource may reference another that is declared later.
//!
//! | Relationship | Attribute type | Default name | Default short name |
//! |--------------|----------------|--------------|--------------------|
//! | one-of | `Custom(target)` | target name | target short name |
//! | array-of | `Array(Custom(target))` | target plural | `{target short}s` |

use std::collections::BTreeMap;

use crate::{
    access_pattern::StorageKey,
    attribute::{Attribute, AttributeOptions, AttributeType},
    error::Result,
    handle::ResourceId,
    naming::{normalize_name, normalize_short_name},
    shape::{Shape, ShapeBuilder, ShapeOptions},
    strategy::{AuditStrategy, PartitionKeyStrategy, StrategyDefaults, TypeStrategy, VersioningStrategy}
};

/// Options of a resource declaration.
///
/// Strategy fields override the service defaults for this resource's record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceOptions {
    /// Resource name, normalized to param-case.
    pub name:                   String,
    /// Compact name.
    pub short_name:             Option<String>,
    /// Plural name; `{name}s` when absent.
    pub plural_name:            Option<String>,
    /// Documentation.
    pub comment:                Option<String>,
    /// Versioning switch override.
    pub versioned:              Option<bool>,
    /// Identity attribute override.
    pub partition_key_strategy: Option<PartitionKeyStrategy>,
    /// Version attribute override.
    pub versioning_strategy:    Option<VersioningStrategy>,
    /// Type discriminator override.
    pub type_strategy:          Option<TypeStrategy>,
    /// Audit attributes override.
    pub audit_strategy:         Option<AuditStrategy>
}

impl ResourceOptions {
    /// Options for a resource called `name`.
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

    /// Set the plural name.
    #[must_use]
    pub fn plural_name(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = Some(plural_name.into());
        self
    }

    /// Set the documentation.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Toggle versioning of the record.
    #[must_use]
    pub const fn versioned(mut self, versioned: bool) -> Self {
        self.versioned = Some(versioned);
        self
    }

    /// Override the audit strategy of the record.
    #[must_use]
    pub fn audit_strategy(mut self, strategy: AuditStrategy) -> Self {
        self.audit_strategy = Some(strategy);
        self
    }

    fn record_options(self) -> ShapeOptions {
        ShapeOptions {
            name:                   self.name,
            short_name:             self.short_name,
            comment:                self.comment,
            persistent:             Some(true),
            partition_key_strategy: self.partition_key_strategy,
            versioned:              self.versioned,
            versioning_strategy:    self.versioning_strategy,
            type_strategy:          self.type_strategy,
            audit_strategy:         self.audit_strategy
        }
    }
}

/// Name overrides of a relationship attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelationshipOptions {
    /// Attribute name.
    pub name:       Option<String>,
    /// Attribute short name.
    pub short_name: Option<String>,
    /// Documentation line.
    pub comment:    Option<String>
}

impl RelationshipOptions {
    /// Override the attribute name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Override the attribute short name.
    #[must_use]
    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Attach a documentation line.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Number of target records a relationship holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Cardinality {
    /// Single reference.
    One,
    /// List of references.
    Many
}

/// Names of a relationship target known at declaration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TargetNames {
    pub(crate) name:              String,
    pub(crate) short_name:        String,
    pub(crate) plural_name:       String,
    pub(crate) plural_short_name: String
}

impl TargetNames {
    /// Names derived from a bare target name, for targets not declared yet.
    pub(crate) fn derive(name: &str) -> Result<Self> {
        let name = normalize_name(name)?;
        let short_name = normalize_short_name(&name)?;
        Ok(Self {
            plural_name: format!("{name}s"),
            plural_short_name: format!("{short_name}s"),
            name,
            short_name
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DeclaredRelationship {
    attribute:   String,
    target:      String,
    cardinality: Cardinality
}

/// Mutable resource under construction.
#[derive(Debug, Clone)]
pub struct ResourceBuilder {
    plural_name:       String,
    plural_short_name: String,
    record:            ShapeBuilder,
    relationships:     Vec<DeclaredRelationship>
}

impl ResourceBuilder {
    /// Construct the record shape with every system attribute attached.
    pub(crate) fn new(options: ResourceOptions, defaults: &StrategyDefaults) -> Result<Self> {
        let plural = options.plural_name.clone();
        let record = ShapeBuilder::new(options.record_options(), defaults)?;
        let plural_name = match plural.as_deref() {
            Some(plural) => normalize_name(plural)?,
            None => format!("{}s", record.name())
        };
        let plural_short_name = format!("{}s", record.short_name());
        Ok(Self {
            plural_name,
            plural_short_name,
            record,
            relationships: Vec::new()
        })
    }

    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.record.name()
    }

    /// Compact name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.record.short_name()
    }

    /// Plural name.
    #[must_use]
    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    /// Record shape under construction.
    #[must_use]
    pub const fn record(&self) -> &ShapeBuilder {
        &self.record
    }

    pub(crate) fn record_mut(&mut self) -> &mut ShapeBuilder {
        &mut self.record
    }

    pub(crate) fn target_names(&self) -> TargetNames {
        TargetNames {
            name:              self.name().to_string(),
            short_name:        self.short_name().to_string(),
            plural_name:       self.plural_name.clone(),
            plural_short_name: self.plural_short_name.clone()
        }
    }

    /// Append a relationship attribute referencing `target` by name.
    pub(crate) fn add_relationship(
        &mut self,
        target: &TargetNames,
        cardinality: Cardinality,
        options: RelationshipOptions
    ) -> Result<&Attribute> {
        let (default_name, default_short_name, ty) = match cardinality {
            Cardinality::One => (
                &target.name,
                &target.short_name,
                AttributeType::Custom(target.name.clone())
            ),
            Cardinality::Many => (
                &target.plural_name,
                &target.plural_short_name,
                AttributeType::array_of(AttributeType::Custom(target.name.clone()))
            )
        };
        // A renamed relationship derives its short name from the new name.
        let short_name = options
            .short_name
            .or_else(|| options.name.is_none().then(|| default_short_name.clone()));
        let mut attribute = AttributeOptions::new(
            options.name.unwrap_or_else(|| default_name.clone()),
            ty
        )
        .remote_field(cardinality == Cardinality::Many);
        attribute.short_name = short_name;
        if let Some(comment) = options.comment {
            attribute = attribute.comment(comment);
        }

        let attribute = self.record.add_attribute(attribute)?;
        self.relationships.push(DeclaredRelationship {
            attribute: attribute.name().to_string(),
            target: target.name.clone(),
            cardinality
        });
        Ok(attribute)
    }

    /// Freeze the record and bind relationship targets through `resolve`.
    pub(crate) fn build(
        self,
        id: ResourceId,
        resolve: impl Fn(&str, &str) -> Result<ResourceId>
    ) -> Result<Resource> {
        let record = self.record.build()?;
        let relationships = self
            .relationships
            .into_iter()
            .map(|rel| {
                Ok(Relationship {
                    target:      resolve(record.name(), &rel.target)?,
                    attribute:   rel.attribute,
                    cardinality: rel.cardinality
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Resource {
            id,
            plural_name: self.plural_name,
            plural_short_name: self.plural_short_name,
            record,
            relationships
        })
    }
}

/// Relationship bound to its target resource.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    attribute:   String,
    target:      ResourceId,
    cardinality: Cardinality
}

impl Relationship {
    /// Name of the attribute carrying the reference.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Referenced resource.
    #[must_use]
    pub const fn target(&self) -> ResourceId {
        self.target
    }

    /// Single reference or list.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

/// Immutable resource.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    id:                ResourceId,
    plural_name:       String,
    plural_short_name: String,
    record:            Shape,
    relationships:     Vec<Relationship>
}

impl Resource {
    /// Handle of this resource.
    #[must_use]
    pub const fn id(&self) -> ResourceId {
        self.id
    }

    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.record.name()
    }

    /// Compact name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.record.short_name()
    }

    /// Plural name.
    #[must_use]
    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    /// Plural compact name.
    #[must_use]
    pub fn plural_short_name(&self) -> &str {
        &self.plural_short_name
    }

    /// Persistent record shape.
    #[must_use]
    pub const fn record(&self) -> &Shape {
        &self.record
    }

    /// Relationships in declaration order.
    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationship carried by `attribute`.
    #[must_use]
    pub fn relationship(&self, attribute: &str) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|rel| rel.attribute == attribute)
    }

    /// Storage key of a record with the given attribute values.
    pub fn storage_key(&self, values: &BTreeMap<&str, &str>) -> Result<StorageKey> {
        self.record.compose_key(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;

    fn builder(name: &str) -> ResourceBuilder {
        ResourceBuilder::new(ResourceOptions::new(name), &StrategyDefaults::default()).unwrap()
    }

    #[test]
    fn plural_defaults_to_suffix() {
        let person = builder("person");
        assert_eq!(person.plural_name(), "persons");
        assert_eq!(person.target_names().plural_short_name, "persons");

        let company = ResourceBuilder::new(
            ResourceOptions::new("company")
                .short_name("co")
                .plural_name("companies"),
            &StrategyDefaults::default()
        )
        .unwrap();
        assert_eq!(company.plural_name(), "companies");
        assert_eq!(company.target_names().plural_short_name, "cos");
    }

    #[test]
    fn record_is_persistent() {
        let person = builder("person");
        assert!(person.record().is_persistent());
        let names: Vec<_> = person.record().attributes().iter().map(Attribute::name).collect();
        assert_eq!(
            names,
            ["id", "type", "version", "created-at", "updated-at", "deleted-at"]
        );
    }

    #[test]
    fn one_of_is_plain_custom_reference() {
        let mut person = builder("person");
        let company = builder("company").target_names();
        let attr = person
            .add_relationship(&company, Cardinality::One, RelationshipOptions::default())
            .unwrap();
        assert_eq!(attr.name(), "company");
        assert_eq!(attr.ty(), &AttributeType::Custom("company".to_string()));
        assert!(attr.is_data());
    }

    #[test]
    fn array_of_is_remote_list() {
        let mut company = builder("company");
        let person = builder("person").target_names();
        let attr = company
            .add_relationship(&person, Cardinality::Many, RelationshipOptions::default())
            .unwrap();
        assert_eq!(attr.name(), "persons");
        assert_eq!(attr.short_name(), "persons");
        assert_eq!(attr.ty().referenced_shape(), Some("person"));
        assert!(attr.ty().is_array());
        assert!(attr.is_remote_field());
        assert!(!attr.is_create_input());
    }

    #[test]
    fn relationship_names_can_be_overridden() {
        let mut company = builder("company");
        let person = builder("person").target_names();
        let attr = company
            .add_relationship(
                &person,
                Cardinality::Many,
                RelationshipOptions::default()
                    .name("employees")
                    .short_name("emp")
            )
            .unwrap();
        assert_eq!(attr.name(), "employees");
        assert_eq!(attr.short_name(), "emp");
    }

    #[test]
    fn renamed_relationships_to_one_target_coexist() {
        let mut person = builder("person");
        let target = builder("person").target_names();
        for name in ["manager", "mentor"] {
            person
                .add_relationship(
                    &target,
                    Cardinality::One,
                    RelationshipOptions::default().name(name)
                )
                .unwrap();
        }
        let record = person.record();
        assert_eq!(record.attribute("manager").unwrap().short_name(), "manager");
        assert_eq!(record.attribute("mentor").unwrap().short_name(), "mentor");
    }

    #[test]
    fn derived_target_names() {
        let names = TargetNames::derive("OrderLine").unwrap();
        assert_eq!(names.name, "order-line");
        assert_eq!(names.short_name, "orderline");
        assert_eq!(names.plural_name, "order-lines");
        assert_eq!(names.plural_short_name, "orderlines");
    }

    #[test]
    fn build_binds_targets() {
        let mut person = builder("person");
        let company = TargetNames::derive("company").unwrap();
        person
            .add_relationship(&company, Cardinality::One, RelationshipOptions::default())
            .unwrap();
        let resource = person
            .build(ResourceId::new(1, 0), |_, target| {
                assert_eq!(target, "company");
                Ok(ResourceId::new(1, 1))
            })
            .unwrap();
        let rel = resource.relationship("company").unwrap();
        assert_eq!(rel.target(), ResourceId::new(1, 1));
        assert_eq!(rel.cardinality(), Cardinality::One);
    }

    #[test]
    fn build_reports_unbound_target() {
        let mut person = builder("person");
        let ghost = TargetNames::derive("ghost").unwrap();
        person
            .add_relationship(&ghost, Cardinality::One, RelationshipOptions::default())
            .unwrap();
        let err = person
            .build(ResourceId::new(1, 0), |resource, target| {
                Err(ShapeError::UnresolvedRelationship {
                    resource: resource.to_string(),
                    target:   target.to_string()
                })
            })
            .unwrap_err();
        assert_eq!(
            err,
            ShapeError::UnresolvedRelationship {
                resource: "person".to_string(),
                target:   "ghost".to_string()
            }
        );
    }

    #[test]
    fn storage_key_uses_record_pattern() {
        let resource = builder("widget")
            .build(ResourceId::new(1, 0), |_, _| unreachable!())
            .unwrap();
        let values = BTreeMap::from([("id", "abc"), ("type", "widget"), ("version", "LATEST")]);
        let key = resource.storage_key(&values).unwrap();
        assert_eq!((key.pk.as_str(), key.sk.as_str()), ("abc", "widget#latest"));
    }
}
