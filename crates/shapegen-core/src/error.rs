// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration and derivation errors.
//!
//! Every failure in this crate is fatal to the declaration that caused it and
//! is raised at the call site that introduced the problem: duplicate names
//! fail inside `add_*`, unresolved references fail inside `build()`.
//!
//! Lookups by name (`by_name`, `resource_by_name`, ...) never produce an
//! error; they return `Option` and leave the decision to the caller.

use thiserror::Error;

use crate::operation::{OperationSubType, OperationType};

/// Convenient result alias used throughout the crate.
pub type Result<T, E = ShapeError> = std::result::Result<T, E>;

/// Errors raised while declaring or freezing a service model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A resource, shape, structure or access pattern name is already taken
    /// in its owning scope.
    #[error("duplicate declaration '{name}' in '{scope}'")]
    DuplicateDeclaration {
        /// Owning service or shape.
        scope: String,
        /// Conflicting canonical name.
        name:  String
    },

    /// Two attributes on the same shape share a canonical name.
    #[error("duplicate attribute name '{name}' on shape '{shape}'")]
    DuplicateAttributeName {
        /// Owning shape.
        shape: String,
        /// Conflicting attribute name.
        name:  String
    },

    /// Two attributes on the same shape share a short (storage) name.
    #[error("duplicate attribute short name '{short_name}' on shape '{shape}'")]
    DuplicateAttributeShortName {
        /// Owning shape.
        shape:      String,
        /// Conflicting short name.
        short_name: String
    },

    /// A name normalized to the empty string.
    #[error("name '{0}' is empty after normalization")]
    EmptyName(String),

    /// An access pattern references an attribute missing from its shape.
    #[error("access pattern on shape '{shape}' references unknown attribute '{name}'")]
    UnresolvedAttribute {
        /// Owning shape.
        shape: String,
        /// Unresolved attribute name.
        name:  String
    },

    /// A key was requested from a shape without access patterns.
    #[error("shape '{0}' has no access pattern")]
    NoAccessPattern(String),

    /// A relationship targets a resource that was never declared.
    #[error("resource '{resource}' references unknown resource '{target}'")]
    UnresolvedRelationship {
        /// Declaring resource.
        resource: String,
        /// Missing target name.
        target:   String
    },

    /// An attribute type string did not match any known type.
    #[error("unknown attribute type '{0}'")]
    UnknownAttributeType(String),

    /// A handle does not belong to this service builder.
    #[error("unknown {kind} handle #{index}")]
    UnknownHandle {
        /// Handle kind (`resource`, `shape`).
        kind:  &'static str,
        /// Arena index carried by the handle.
        index: usize
    },

    /// The operation type does not match the sub-type verb.
    #[error("operation '{sub_type}' is a {expected}, not a {operation_type}")]
    OperationTypeMismatch {
        /// Requested verb.
        sub_type:       OperationSubType,
        /// Requested type.
        operation_type: OperationType,
        /// Type implied by the verb.
        expected:       OperationType
    },

    /// The same verb was declared twice for one resource.
    #[error("operation '{sub_type}' already declared for resource '{resource}'")]
    DuplicateOperation {
        /// Owning resource.
        resource: String,
        /// Repeated verb.
        sub_type: OperationSubType
    },

    /// A storage key could not be composed because a value was not supplied.
    #[error("no value supplied for key attribute '{attribute}' of shape '{shape}'")]
    MissingKeyValue {
        /// Shape whose key is being composed.
        shape:     String,
        /// Attribute without a value.
        attribute: String
    }
}
