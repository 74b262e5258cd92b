// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use super::*;
use crate::resource::{
    Cardinality, RelationshipOptions, ResourceBuilder, ResourceOptions, TargetNames
};

fn person() -> Resource {
    let defaults = StrategyDefaults::default();
    let mut builder = ResourceBuilder::new(ResourceOptions::new("person"), &defaults).unwrap();
    builder
        .record_mut()
        .add_attribute(AttributeOptions::new("first-name", AttributeType::String).required(true))
        .unwrap();
    builder
        .record_mut()
        .add_attribute(AttributeOptions::new("last-name", AttributeType::String).required(true))
        .unwrap();
    builder
        .add_relationship(
            &TargetNames::derive("pet").unwrap(),
            Cardinality::Many,
            RelationshipOptions::default()
        )
        .unwrap();
    builder
        .build(ResourceId::new(1, 0), |_, _| Ok(ResourceId::new(1, 1)))
        .unwrap()
}

fn derive(sub_type: OperationSubType) -> Operation {
    Operation::derive(
        OperationId::new(1, 0),
        &person(),
        sub_type,
        &StrategyDefaults::default()
    )
    .unwrap()
}

fn names(attributes: Vec<&Attribute>) -> Vec<&str> {
    attributes.into_iter().map(Attribute::name).collect()
}

#[test]
fn verbs_map_to_types() {
    let queries: Vec<_> = OperationSubType::ALL
        .into_iter()
        .filter(|verb| verb.operation_type() == OperationType::Query)
        .collect();
    assert_eq!(
        queries,
        [
            OperationSubType::ReadOne,
            OperationSubType::List,
            OperationSubType::ReadVersion
        ]
    );
    assert!(
        queries.iter().all(|verb| verb.phase().is_none()),
        "queries never fire generators"
    );
}

#[test]
fn verbs_map_to_phases() {
    assert_eq!(OperationSubType::ImportOne.phase(), Some(LifecyclePhase::Create));
    assert_eq!(OperationSubType::UpdateOne.phase(), Some(LifecyclePhase::Update));
    assert_eq!(OperationSubType::DeleteOne.phase(), Some(LifecyclePhase::Delete));
}

#[test]
fn structure_names() {
    assert_eq!(
        structure_name(OperationSubType::CreateOne, "person", StructureRole::Input),
        "create-one-person-input"
    );
    let op = derive(OperationSubType::ReadVersion);
    assert_eq!(op.output().name(), "read-version-person-output");
    assert!(!op.input().shape().is_persistent());
}

#[test]
fn create_input_exposes_caller_fields() {
    let op = derive(OperationSubType::CreateOne);
    assert_eq!(op.operation_type(), OperationType::Mutation);
    assert_eq!(names(op.input().public_attributes()), ["first-name", "last-name"]);
    let generated: Vec<_> = op
        .input()
        .generated_attributes()
        .iter()
        .map(Attribute::name)
        .collect();
    assert_eq!(generated, ["id", "type", "version", "created-at", "updated-at"]);
}

#[test]
fn structures_keep_their_own_discriminator() {
    let op = derive(OperationSubType::CreateOne);
    let shape = op.input().shape();
    assert_eq!(shape.attributes()[0].name(), "type");
    assert_eq!(shape.type_attribute().map(Attribute::name), Some("type"));
}

#[test]
fn read_and_delete_inputs_are_keys() {
    for verb in [OperationSubType::ReadOne, OperationSubType::DeleteOne] {
        assert_eq!(names(derive(verb).input().public_attributes()), ["id"]);
    }
    assert!(derive(OperationSubType::ReadOne).input().generated_attributes().is_empty());
    let delete = derive(OperationSubType::DeleteOne);
    let deleted: Vec<_> = delete
        .input()
        .generated_attributes()
        .iter()
        .map(Attribute::name)
        .collect();
    assert_eq!(deleted, ["deleted-at"]);
}

#[test]
fn update_input_addresses_record_by_key() {
    let op = derive(OperationSubType::UpdateOne);
    assert_eq!(
        names(op.input().public_attributes()),
        ["id", "first-name", "last-name"]
    );
}

#[test]
fn import_input_carries_remote_fields() {
    let op = derive(OperationSubType::ImportOne);
    assert_eq!(
        names(op.input().public_attributes()),
        ["first-name", "last-name", "pets"]
    );
}

#[test]
fn version_inputs() {
    assert_eq!(
        names(derive(OperationSubType::CreateVersion).input().public_attributes()),
        ["id"]
    );
    assert_eq!(
        names(derive(OperationSubType::ReadVersion).input().public_attributes()),
        ["id", "version"]
    );
}

#[test]
fn list_structures_use_list_strategy() {
    let op = derive(OperationSubType::List);
    let input = op.input().shape();
    assert_eq!(names(op.input().public_attributes()), ["search-text", "next-token"]);
    assert_eq!(input.list_shape_attributes().len(), 2);

    let output = op.output();
    assert_eq!(names(output.public_attributes()), ["items", "next-token"]);
    assert_eq!(
        output.shape().attribute("items").map(Attribute::ty),
        Some(&AttributeType::array_of(AttributeType::Custom("person".to_string())))
    );
}

#[test]
fn output_mirrors_record() {
    let op = derive(OperationSubType::ReadOne);
    assert_eq!(
        names(op.output().public_attributes()),
        [
            "id",
            "version",
            "created-at",
            "updated-at",
            "deleted-at",
            "first-name",
            "last-name",
            "pets"
        ]
    );
    assert_eq!(op.structure(StructureRole::Output), op.output());
}
