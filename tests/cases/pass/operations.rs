// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use shapegen::{OperationSubType, Resource, ServiceBuilder, ServiceOptions, StructureRole};

#[derive(Resource)]
#[resource(operations(all))]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Resource)]
#[resource(operations(read_one, list))]
pub struct Tag {
    pub label: String,
}

fn main() {
    let mut service = ServiceBuilder::new(ServiceOptions::new("directory")).unwrap();
    let person = service.declare::<Person>().unwrap();
    let tag = service.declare::<Tag>().unwrap();
    let service = service.build().unwrap();

    assert_eq!(service.operations_of(person).count(), OperationSubType::ALL.len());
    assert_eq!(service.operations_of(tag).count(), 2);
    assert!(service.operation_for(tag, OperationSubType::CreateOne).is_none());

    let create = service
        .operation_for(person, OperationSubType::CreateOne)
        .unwrap();
    let public: Vec<_> = create
        .structure(StructureRole::Input)
        .public_attributes()
        .iter()
        .map(|attribute| attribute.name())
        .collect();
    assert_eq!(public, ["first-name", "last-name"]);

    let list = service.structure_by_name("list-tag-output").unwrap();
    assert!(list.shape().attribute("items").is_some());
    assert!(list.shape().attribute("next-token").is_some());
}
