// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Operations and their input/output structures.
//!
//! An [`Operation`] binds a resource to one verb. Each operation derives
//! exactly one input and one output [`Structure`], both transient shapes
//! named `{verb}-{resource}-input` and `{verb}-{resource}-output`.
//!
//! | Verb | Type | Phase | Input attributes |
//! |------|------|-------|------------------|
//! | `create-one` | mutation | create | `is_create_input` |
//! | `read-one` | query | | `is_read_input` |
//! | `update-one` | mutation | update | `is_update_input`, keys |
//! | `delete-one` | mutation | delete | `is_delete_input` |
//! | `list` | query | | search text, pagination token |
//! | `import-one` | mutation | create | `is_import_input` |
//! | `create-version` | mutation | create | keys |
//! | `read-version` | query | | keys, version |
//!
//! Outputs carry the record attributes, except `list` whose output is the
//! page envelope (`items` plus pagination token).

use std::fmt;

use tracing::debug;

use crate::{
    attribute::{Attribute, AttributeOptions, AttributeType, LifecyclePhase},
    error::Result,
    handle::{OperationId, ResourceId},
    resource::Resource,
    shape::{Shape, ShapeBuilder, ShapeOptions},
    strategy::StrategyDefaults
};

/// GraphQL root an operation is exposed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OperationType {
    /// State-changing operation.
    Mutation,
    /// Read-only operation.
    Query
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mutation => "mutation",
            Self::Query => "query"
        })
    }
}

/// CRUD-like verb of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OperationSubType {
    /// Create one record.
    CreateOne,
    /// Read one record by key.
    ReadOne,
    /// Update one record.
    UpdateOne,
    /// Delete one record.
    DeleteOne,
    /// List records page by page.
    List,
    /// Import one record with externally supplied system values.
    ImportOne,
    /// Snapshot the current record as a new version.
    CreateVersion,
    /// Read one version of a record.
    ReadVersion
}

impl OperationSubType {
    /// Every verb.
    pub const ALL: [Self; 8] = [
        Self::CreateOne,
        Self::ReadOne,
        Self::UpdateOne,
        Self::DeleteOne,
        Self::List,
        Self::ImportOne,
        Self::CreateVersion,
        Self::ReadVersion
    ];

    /// Root type implied by the verb.
    #[must_use]
    pub const fn operation_type(self) -> OperationType {
        match self {
            Self::ReadOne | Self::List | Self::ReadVersion => OperationType::Query,
            Self::CreateOne
            | Self::UpdateOne
            | Self::DeleteOne
            | Self::ImportOne
            | Self::CreateVersion => OperationType::Mutation
        }
    }

    /// Lifecycle phase whose generators fire; `None` for queries.
    #[must_use]
    pub const fn phase(self) -> Option<LifecyclePhase> {
        match self {
            Self::CreateOne | Self::ImportOne | Self::CreateVersion => {
                Some(LifecyclePhase::Create)
            }
            Self::UpdateOne => Some(LifecyclePhase::Update),
            Self::DeleteOne => Some(LifecyclePhase::Delete),
            Self::ReadOne | Self::List | Self::ReadVersion => None
        }
    }

    /// Param-case verb used in derived names.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::CreateOne => "create-one",
            Self::ReadOne => "read-one",
            Self::UpdateOne => "update-one",
            Self::DeleteOne => "delete-one",
            Self::List => "list",
            Self::ImportOne => "import-one",
            Self::CreateVersion => "create-version",
            Self::ReadVersion => "read-version"
        }
    }
}

impl fmt::Display for OperationSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Side of an operation a structure describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StructureRole {
    /// Request payload.
    Input,
    /// Response payload.
    Output
}

impl StructureRole {
    /// Name suffix.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output"
        }
    }
}

/// `{verb}-{resource}-{input|output}`.
#[must_use]
pub fn structure_name(sub_type: OperationSubType, resource: &str, role: StructureRole) -> String {
    format!("{}-{resource}-{}", sub_type.verb(), role.suffix())
}

/// Input or output schema of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Structure {
    role:      StructureRole,
    shape:     Shape,
    generated: Vec<Attribute>
}

impl Structure {
    /// Input or output.
    #[must_use]
    pub const fn role(&self) -> StructureRole {
        self.role
    }

    /// Underlying transient shape.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Structure name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.shape.name()
    }

    /// Caller-visible attributes: everything but the structure's own type
    /// discriminator.
    #[must_use]
    pub fn public_attributes(&self) -> Vec<&Attribute> {
        let discriminator = self.shape.type_attribute().map(Attribute::name);
        self.shape
            .attributes()
            .iter()
            .filter(|attr| Some(attr.name()) != discriminator)
            .collect()
    }

    /// Record attributes the system generates while the operation runs.
    #[must_use]
    pub fn generated_attributes(&self) -> &[Attribute] {
        &self.generated
    }
}

/// Resource bound to one verb, with its derived structures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    id:       OperationId,
    resource: ResourceId,
    sub_type: OperationSubType,
    input:    Structure,
    output:   Structure
}

impl Operation {
    /// Derive both structures of `sub_type` from a frozen resource.
    pub(crate) fn derive(
        id: OperationId,
        resource: &Resource,
        sub_type: OperationSubType,
        defaults: &StrategyDefaults
    ) -> Result<Self> {
        let record = resource.record();
        let generated: Vec<Attribute> = sub_type
            .phase()
            .map(|phase| {
                record
                    .generated_attributes(phase)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let mut input = transient(sub_type, resource.name(), StructureRole::Input, defaults)?;
        match sub_type {
            OperationSubType::List => {
                if let Some(search) = &defaults.list.search_text {
                    input.add_attribute(search.clone())?;
                }
                input.add_attribute(defaults.list.next_token.clone())?;
            }
            _ => {
                for attribute in record_fields(record) {
                    if input_visible(sub_type, record, attribute) {
                        input.insert(attribute.clone())?;
                    }
                }
            }
        }

        let mut output = transient(sub_type, resource.name(), StructureRole::Output, defaults)?;
        if sub_type == OperationSubType::List {
            let items = AttributeType::array_of(AttributeType::Custom(resource.name().to_string()));
            output.add_attribute(AttributeOptions::new(defaults.list.items.clone(), items))?;
            output.add_attribute(defaults.list.next_token.clone())?;
        } else {
            for attribute in record_fields(record) {
                output.insert(attribute.clone())?;
            }
        }

        let input = input.build()?;
        let output = output.build()?;
        debug!(
            operation = %sub_type,
            resource = resource.name(),
            inputs = input.attributes().len(),
            outputs = output.attributes().len(),
            "operation derived"
        );
        Ok(Self {
            id,
            resource: resource.id(),
            sub_type,
            input: Structure {
                role:      StructureRole::Input,
                shape:     input,
                generated: generated.clone()
            },
            output: Structure {
                role:      StructureRole::Output,
                shape:     output,
                generated
            }
        })
    }

    /// Handle of this operation.
    #[must_use]
    pub const fn id(&self) -> OperationId {
        self.id
    }

    /// Owning resource.
    #[must_use]
    pub const fn resource(&self) -> ResourceId {
        self.resource
    }

    /// Root type.
    #[must_use]
    pub const fn operation_type(&self) -> OperationType {
        self.sub_type.operation_type()
    }

    /// Verb.
    #[must_use]
    pub const fn sub_type(&self) -> OperationSubType {
        self.sub_type
    }

    /// Request structure.
    #[must_use]
    pub const fn input(&self) -> &Structure {
        &self.input
    }

    /// Response structure.
    #[must_use]
    pub const fn output(&self) -> &Structure {
        &self.output
    }

    /// Structure of `role`.
    #[must_use]
    pub const fn structure(&self, role: StructureRole) -> &Structure {
        match role {
            StructureRole::Input => &self.input,
            StructureRole::Output => &self.output
        }
    }
}

fn transient(
    sub_type: OperationSubType,
    resource: &str,
    role: StructureRole,
    defaults: &StrategyDefaults
) -> Result<ShapeBuilder> {
    ShapeBuilder::new(
        ShapeOptions::new(structure_name(sub_type, resource, role)).persistent(false),
        defaults
    )
}

/// Record attributes copied into structures; the record discriminator is
/// replaced by the structure's own.
fn record_fields(record: &Shape) -> impl Iterator<Item = &Attribute> {
    let discriminator = record.type_attribute().map(Attribute::name);
    record
        .attributes()
        .iter()
        .filter(move |attr| Some(attr.name()) != discriminator)
}

fn input_visible(sub_type: OperationSubType, record: &Shape, attribute: &Attribute) -> bool {
    match sub_type {
        OperationSubType::CreateOne => attribute.is_create_input(),
        OperationSubType::ReadOne => attribute.is_read_input(),
        OperationSubType::UpdateOne => attribute.is_update_input() || attribute.is_key(),
        OperationSubType::DeleteOne => attribute.is_delete_input(),
        OperationSubType::ImportOne => attribute.is_import_input(),
        OperationSubType::List => attribute.is_list_input(),
        OperationSubType::CreateVersion => attribute.is_key(),
        OperationSubType::ReadVersion => {
            attribute.is_key()
                || record
                    .version_attribute()
                    .is_some_and(|version| version.name() == attribute.name())
        }
    }
}

#[cfg(test)]
mod tests;
