// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Service registry and declaration API.
//!
//! A [`ServiceBuilder`] owns every declaration of one service: resources,
//! standalone shapes and operations live in arenas addressed by handles, and
//! every resource, shape and structure name is recorded in one name registry.
//! Names are checked on insertion, so duplicates fail at the `add_*` call
//! that introduced them.
//!
//! # Two-phase model
//!
//! ```text
//! declare                         build()
//! ───────                         ───────
//! add_resource  → ResourceId      relationships: target name → ResourceId
//! add_attribute / add_one_of ...  shapes: access patterns resolved, frozen
//! add_operation → OperationId     operations: input/output structures derived
//! ```
//!
//! The frozen [`Service`] is immutable and answers lookups by handle or name.
//!
//! # Example
//!
//! ```rust
//! use shapegen_core::prelude::*;
//!
//! let mut service = ServiceBuilder::new(ServiceOptions::new("directory"))?;
//! let person = service.add_resource(ResourceOptions::new("person"))?;
//! service.add_attribute(
//!     person,
//!     AttributeOptions::new("first-name", AttributeType::String).required(true)
//! )?;
//! service.add_operation(person, OperationType::Mutation, OperationSubType::CreateOne)?;
//!
//! let service = service.build()?;
//! let input = service.structure_by_name("create-one-person-input").unwrap();
//! assert_eq!(input.public_attributes()[0].name(), "first-name");
//! # Ok::<(), shapegen_core::ShapeError>(())
//! ```

mod hierarchy;

use std::collections::{BTreeMap, btree_map};

use tracing::debug;

use crate::{
    access_pattern::AccessPattern,
    attribute::{Attribute, AttributeOptions},
    error::{Result, ShapeError},
    handle::{OperationId, ResourceId, ShapeId, next_owner},
    naming::{NamingStrategy, NamingTarget, normalize_name},
    operation::{Operation, OperationSubType, OperationType, Structure, StructureRole, structure_name},
    resource::{Cardinality, RelationshipOptions, Resource, ResourceBuilder, ResourceOptions, TargetNames},
    shape::{Shape, ShapeBuilder, ShapeOptions},
    strategy::StrategyDefaults
};

/// Types that declare themselves as a resource of a service.
///
/// Implemented by `#[derive(Resource)]`.
pub trait DeclareResource {
    /// Canonical resource name.
    const RESOURCE_NAME: &'static str;

    /// Declare the resource, its attributes and operations.
    fn declare(service: &mut ServiceBuilder) -> Result<ResourceId>;
}

/// Service-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServiceOptions {
    /// Service name.
    pub name:     String,
    /// Casing per generation target.
    pub naming:   NamingStrategy,
    /// Strategies inherited by every shape.
    pub defaults: StrategyDefaults
}

impl ServiceOptions {
    /// Options with default strategies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the naming strategy.
    #[must_use]
    pub fn naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Replace the strategy defaults.
    #[must_use]
    pub fn defaults(mut self, defaults: StrategyDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

/// What a registered name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Declaration {
    /// A resource and its record shape.
    Resource(ResourceId),
    /// A standalone shape.
    Shape(ShapeId),
    /// One side of an operation.
    Structure(OperationId, StructureRole)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeclaredOperation {
    resource: ResourceId,
    sub_type: OperationSubType
}

/// Mutable service under declaration.
#[derive(Debug, Clone)]
pub struct ServiceBuilder {
    owner:      u32,
    name:       String,
    naming:     NamingStrategy,
    defaults:   StrategyDefaults,
    registry:   BTreeMap<String, Declaration>,
    resources:  Vec<ResourceBuilder>,
    shapes:     Vec<ShapeBuilder>,
    operations: Vec<DeclaredOperation>
}

impl ServiceBuilder {
    /// Start an empty service.
    pub fn new(options: ServiceOptions) -> Result<Self> {
        Ok(Self {
            owner:      next_owner(),
            name:       normalize_name(&options.name)?,
            naming:     options.naming,
            defaults:   options.defaults,
            registry:   BTreeMap::new(),
            resources:  Vec::new(),
            shapes:     Vec::new(),
            operations: Vec::new()
        })
    }

    /// Service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Strategy defaults in effect.
    #[must_use]
    pub const fn defaults(&self) -> &StrategyDefaults {
        &self.defaults
    }

    /// Registered declaration of `name`.
    #[must_use]
    pub fn declaration(&self, name: &str) -> Option<Declaration> {
        lookup(&self.registry, name)
    }

    /// Resource under declaration.
    #[must_use]
    pub fn resource(&self, id: ResourceId) -> Option<&ResourceBuilder> {
        self.resources.get(id.index_in(self.owner)?)
    }

    /// Handle of the resource called `name`.
    #[must_use]
    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        match self.declaration(name)? {
            Declaration::Resource(id) => Some(id),
            _ => None
        }
    }

    /// Standalone shape under declaration.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&ShapeBuilder> {
        self.shapes.get(id.index_in(self.owner)?)
    }

    /// Declare a resource with its persistent record.
    pub fn add_resource(&mut self, options: ResourceOptions) -> Result<ResourceId> {
        let builder = ResourceBuilder::new(options, &self.defaults)?;
        let id = ResourceId::new(self.owner, self.resources.len());
        self.register(builder.name(), Declaration::Resource(id))?;
        debug!(
            service = %self.name,
            resource = builder.name(),
            plural = builder.plural_name(),
            "resource declared"
        );
        self.resources.push(builder);
        Ok(id)
    }

    /// Declare a resource through its [`DeclareResource`] implementation.
    pub fn declare<R: DeclareResource>(&mut self) -> Result<ResourceId> {
        R::declare(self)
    }

    /// Append a user attribute to a resource record.
    pub fn add_attribute(
        &mut self,
        resource: ResourceId,
        options: AttributeOptions
    ) -> Result<&Attribute> {
        self.resource_mut(resource)?
            .record_mut()
            .add_attribute(options)
    }

    /// Reference one `target` record, named after the target.
    pub fn add_one_of(&mut self, resource: ResourceId, target: ResourceId) -> Result<&Attribute> {
        let names = self.resource_ref(target)?.target_names();
        self.resource_mut(resource)?.add_relationship(
            &names,
            Cardinality::One,
            RelationshipOptions::default()
        )
    }

    /// Reference a list of `target` records, named after the target plural
    /// unless overridden.
    pub fn add_array_of(
        &mut self,
        resource: ResourceId,
        target: ResourceId,
        options: RelationshipOptions
    ) -> Result<&Attribute> {
        let names = self.resource_ref(target)?.target_names();
        self.resource_mut(resource)?
            .add_relationship(&names, Cardinality::Many, options)
    }

    /// Reference a resource by name; it may be declared later.
    ///
    /// Default attribute names come from the target when it is already
    /// declared and are derived from `target` otherwise.
    pub fn add_relationship_named(
        &mut self,
        resource: ResourceId,
        target: &str,
        cardinality: Cardinality,
        options: RelationshipOptions
    ) -> Result<&Attribute> {
        let names = match self.resource_id(target) {
            Some(id) => self.resource_ref(id)?.target_names(),
            None => TargetNames::derive(target)?
        };
        self.resource_mut(resource)?
            .add_relationship(&names, cardinality, options)
    }

    /// Add an access pattern to a resource record.
    pub fn add_access_pattern(&mut self, resource: ResourceId, pattern: AccessPattern) -> Result<()> {
        self.resource_mut(resource)?
            .record_mut()
            .add_access_pattern(pattern)
    }

    /// Declare a standalone shape (message, error, envelope).
    pub fn add_shape(&mut self, options: ShapeOptions) -> Result<ShapeId> {
        let builder = ShapeBuilder::new(options, &self.defaults)?;
        let id = ShapeId::new(self.owner, self.shapes.len());
        self.register(builder.name(), Declaration::Shape(id))?;
        self.shapes.push(builder);
        Ok(id)
    }

    /// Append an attribute to a standalone shape.
    pub fn add_shape_attribute(
        &mut self,
        shape: ShapeId,
        options: AttributeOptions
    ) -> Result<&Attribute> {
        shape
            .index_in(self.owner)
            .and_then(|index| self.shapes.get_mut(index))
            .ok_or_else(|| shape.unknown())?
            .add_attribute(options)
    }

    /// Bind `resource` to a verb, reserving its structure names.
    pub fn add_operation(
        &mut self,
        resource: ResourceId,
        operation_type: OperationType,
        sub_type: OperationSubType
    ) -> Result<OperationId> {
        let resource_name = self.resource_ref(resource)?.name().to_string();
        let expected = sub_type.operation_type();
        if expected != operation_type {
            return Err(ShapeError::OperationTypeMismatch {
                sub_type,
                operation_type,
                expected
            });
        }
        if self
            .operations
            .iter()
            .any(|op| op.resource == resource && op.sub_type == sub_type)
        {
            return Err(ShapeError::DuplicateOperation {
                resource: resource_name,
                sub_type
            });
        }

        let id = OperationId::new(self.owner, self.operations.len());
        for role in [StructureRole::Input, StructureRole::Output] {
            self.register(
                &structure_name(sub_type, &resource_name, role),
                Declaration::Structure(id, role)
            )?;
        }
        debug!(
            service = %self.name,
            resource = %resource_name,
            operation = %sub_type,
            "operation declared"
        );
        self.operations.push(DeclaredOperation {
            resource,
            sub_type
        });
        Ok(id)
    }

    /// Resolve relationships, freeze every shape and derive all structures.
    pub fn build(self) -> Result<Service> {
        let owner = self.owner;
        let resources = self
            .resources
            .into_iter()
            .enumerate()
            .map(|(index, builder)| {
                builder.build(ResourceId::new(owner, index), |resource, target| {
                    match lookup(&self.registry, target) {
                        Some(Declaration::Resource(id)) => Ok(id),
                        _ => Err(ShapeError::UnresolvedRelationship {
                            resource: resource.to_string(),
                            target:   target.to_string()
                        })
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let shapes = self
            .shapes
            .into_iter()
            .map(ShapeBuilder::build)
            .collect::<Result<Vec<_>>>()?;

        let operations = self
            .operations
            .iter()
            .enumerate()
            .map(|(index, op)| {
                Operation::derive(
                    OperationId::new(owner, index),
                    &resources[op.resource.index()],
                    op.sub_type,
                    &self.defaults
                )
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            service = %self.name,
            resources = resources.len(),
            shapes = shapes.len(),
            operations = operations.len(),
            "service built"
        );
        Ok(Service {
            owner,
            name: self.name,
            naming: self.naming,
            defaults: self.defaults,
            registry: self.registry,
            resources,
            shapes,
            operations
        })
    }

    fn register(&mut self, name: &str, declaration: Declaration) -> Result<()> {
        match self.registry.entry(name.to_string()) {
            btree_map::Entry::Occupied(_) => Err(ShapeError::DuplicateDeclaration {
                scope: self.name.clone(),
                name:  name.to_string()
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(declaration);
                Ok(())
            }
        }
    }

    fn resource_ref(&self, id: ResourceId) -> Result<&ResourceBuilder> {
        self.resource(id).ok_or_else(|| id.unknown())
    }

    fn resource_mut(&mut self, id: ResourceId) -> Result<&mut ResourceBuilder> {
        id.index_in(self.owner)
            .and_then(|index| self.resources.get_mut(index))
            .ok_or_else(|| id.unknown())
    }
}

fn lookup(registry: &BTreeMap<String, Declaration>, name: &str) -> Option<Declaration> {
    let key = normalize_name(name).ok()?;
    registry.get(&key).copied()
}

/// Declaration found by [`Service::by_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// A resource.
    Resource(&'a Resource),
    /// A standalone shape.
    Shape(&'a Shape),
    /// An operation input or output.
    Structure(&'a Structure)
}

impl<'a> Entry<'a> {
    /// Shape behind the entry.
    #[must_use]
    pub const fn shape(self) -> &'a Shape {
        match self {
            Self::Resource(resource) => resource.record(),
            Self::Shape(shape) => shape,
            Self::Structure(structure) => structure.shape()
        }
    }
}

/// Immutable, fully resolved service model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Service {
    owner:      u32,
    name:       String,
    naming:     NamingStrategy,
    defaults:   StrategyDefaults,
    registry:   BTreeMap<String, Declaration>,
    resources:  Vec<Resource>,
    shapes:     Vec<Shape>,
    operations: Vec<Operation>
}

impl Service {
    /// Service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Casing per generation target.
    #[must_use]
    pub const fn naming(&self) -> &NamingStrategy {
        &self.naming
    }

    /// Strategy defaults the model was built with.
    #[must_use]
    pub const fn defaults(&self) -> &StrategyDefaults {
        &self.defaults
    }

    /// Format a canonical name for a generation target.
    #[must_use]
    pub fn format(&self, name: &str, target: NamingTarget) -> String {
        self.naming.format(name, target)
    }

    /// Registered declaration of `name`.
    #[must_use]
    pub fn declaration(&self, name: &str) -> Option<Declaration> {
        lookup(&self.registry, name)
    }

    /// Registered names with their declarations, sorted by name.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, Declaration)> {
        self.registry
            .iter()
            .map(|(name, declaration)| (name.as_str(), *declaration))
    }

    /// Anything registered under `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Entry<'_>> {
        match lookup(&self.registry, name)? {
            Declaration::Resource(id) => self.resource(id).map(Entry::Resource),
            Declaration::Shape(id) => self.shape(id).map(Entry::Shape),
            Declaration::Structure(id, role) => self
                .operation(id)
                .map(|op| Entry::Structure(op.structure(role)))
        }
    }

    /// Resource by handle.
    #[must_use]
    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.index_in(self.owner)?)
    }

    /// Resource by name.
    #[must_use]
    pub fn resource_by_name(&self, name: &str) -> Option<&Resource> {
        match self.by_name(name)? {
            Entry::Resource(resource) => Some(resource),
            _ => None
        }
    }

    /// Standalone shape by handle.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.index_in(self.owner)?)
    }

    /// Any shape by name: record, standalone shape or structure.
    #[must_use]
    pub fn shape_by_name(&self, name: &str) -> Option<&Shape> {
        self.by_name(name).map(Entry::shape)
    }

    /// Operation structure by name.
    #[must_use]
    pub fn structure_by_name(&self, name: &str) -> Option<&Structure> {
        match self.by_name(name)? {
            Entry::Structure(structure) => Some(structure),
            _ => None
        }
    }

    /// Operation by handle.
    #[must_use]
    pub fn operation(&self, id: OperationId) -> Option<&Operation> {
        self.operations.get(id.index_in(self.owner)?)
    }

    /// Operation of `resource` for `sub_type`.
    #[must_use]
    pub fn operation_for(&self, resource: ResourceId, sub_type: OperationSubType) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.resource() == resource && op.sub_type() == sub_type)
    }

    /// Resources in declaration order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Standalone shapes in declaration order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Operations in declaration order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Operations bound to `resource`.
    pub fn operations_of(&self, resource: ResourceId) -> impl Iterator<Item = &Operation> {
        self.operations
            .iter()
            .filter(move |op| op.resource() == resource)
    }

    /// Every operation structure, input before output.
    pub fn structures(&self) -> impl Iterator<Item = &Structure> {
        self.operations
            .iter()
            .flat_map(|op| [op.input(), op.output()])
    }
}

#[cfg(test)]
mod tests;
