// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shape and key derivation engine for shapegen.
//!
//! This crate turns declared resources into the full attribute model that
//! code emitters consume: persisted records, operation input/output
//! structures and composite single-table keys.
//!
//! # Overview
//!
//! - [`Attribute`]: One typed field with generation and validation policy
//! - [`AccessPattern`]: Partition/sort key attribute names
//! - [`Shape`]: Ordered attribute schema with strategy-injected system
//!   attributes
//! - [`Resource`]: Domain object backed by a persistent record
//! - [`Operation`]: Verb bound to a resource, with derived [`Structure`]s
//! - [`ServiceBuilder`] / [`Service`]: Registry, declaration API and frozen
//!   model
//! - [`naming`]: Casing projections of canonical names
//! - [`prelude`]: Convenient re-exports
//!
//! # Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use shapegen_core::prelude::*;
//!
//! let mut service = ServiceBuilder::new(ServiceOptions::new("catalog"))?;
//! let widget = service.add_resource(ResourceOptions::new("widget"))?;
//! service.add_attribute(widget, AttributeOptions::new("label", AttributeType::String))?;
//! let service = service.build()?;
//!
//! let widget = service.resource(widget).unwrap();
//! let key = widget.storage_key(&BTreeMap::from([
//!     ("id", "abc"),
//!     ("type", "widget"),
//!     ("version", "LATEST")
//! ]))?;
//! assert_eq!(key.sk, "widget#latest");
//! # Ok::<(), ShapeError>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for options, strategies and the
//!   frozen model

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access_pattern;
pub mod attribute;
pub mod error;
pub mod handle;
pub mod naming;
pub mod operation;
pub mod prelude;
pub mod resource;
pub mod service;
pub mod shape;
pub mod strategy;

pub use access_pattern::{AccessPattern, KEY_SEPARATOR, PRIMARY_ACCESS_PATTERN, StorageKey};
pub use attribute::{
    Attribute, AttributeOptions, AttributeType, Generator, Generators, LifecyclePhase, ListRole,
    ValidationRule, Validations
};
pub use error::{Result, ShapeError};
pub use handle::{OperationId, ResourceId, ShapeId};
pub use naming::{NamingConvention, NamingStrategy, NamingTarget};
pub use operation::{Operation, OperationSubType, OperationType, Structure, StructureRole};
pub use resource::{Cardinality, Relationship, RelationshipOptions, Resource, ResourceBuilder, ResourceOptions};
pub use service::{DeclareResource, Declaration, Entry, Service, ServiceBuilder, ServiceOptions};
pub use shape::{Shape, ShapeBuilder, ShapeOptions};
pub use strategy::{
    AuditPhase, AuditStrategy, CURRENT_VERSION, ListStrategy, PartitionKeyStrategy,
    StrategyDefaults, TypeStrategy, VersioningStrategy
};
