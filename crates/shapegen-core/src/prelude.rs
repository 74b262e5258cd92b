// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use shapegen_core::prelude::*;
//! ```

pub use crate::{
    AccessPattern, Attribute, AttributeOptions, AttributeType, Cardinality, DeclareResource,
    Generator, LifecyclePhase, Operation, OperationSubType, OperationType, RelationshipOptions,
    Resource, ResourceId, ResourceOptions, Service, ServiceBuilder, ServiceOptions, Shape,
    ShapeError, ShapeOptions, StrategyDefaults, Structure, StructureRole
};
