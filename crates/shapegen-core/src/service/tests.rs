// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for the service registry.
//!
//! | Category | Tests |
//! |----------|-------|
//! | Registry | `duplicate_resource_name_fails`, `structure_names_share_namespace`, `lookups_return_none` |
//! | Handles | `foreign_handle_is_rejected`, `handle_from_other_builder_is_rejected` |
//! | Operations | `operation_type_must_match_verb`, `duplicate_operation_fails` |
//! | Relationships | `named_relationship_binds_late`, `unresolved_relationship_fails_on_build` |
//! | Hierarchy | `hierarchy_fan_out`, `hierarchy_lookup_patterns`, `hierarchy_name_clash_leaves_members_untouched` |

use super::*;
use crate::{attribute::AttributeType, handle::DETACHED};

fn service() -> ServiceBuilder {
    ServiceBuilder::new(ServiceOptions::new("directory")).unwrap()
}

#[test]
fn duplicate_resource_name_fails() {
    let mut service = service();
    service.add_resource(ResourceOptions::new("person")).unwrap();
    let err = service.add_resource(ResourceOptions::new("Person")).unwrap_err();
    assert_eq!(
        err,
        ShapeError::DuplicateDeclaration {
            scope: "directory".to_string(),
            name:  "person".to_string()
        }
    );
}

#[test]
fn structure_names_share_namespace() {
    let mut service = service();
    service
        .add_shape(ShapeOptions::new("create-one-person-input").persistent(false))
        .unwrap();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    let err = service
        .add_operation(person, OperationType::Mutation, OperationSubType::CreateOne)
        .unwrap_err();
    assert!(matches!(err, ShapeError::DuplicateDeclaration { name, .. } if name == "create-one-person-input"));
}

#[test]
fn foreign_handle_is_rejected() {
    let mut service = service();
    let err = service
        .add_attribute(
            ResourceId::new(DETACHED, 4),
            AttributeOptions::new("label", AttributeType::String)
        )
        .unwrap_err();
    assert_eq!(
        err,
        ShapeError::UnknownHandle {
            kind:  "resource",
            index: 4
        }
    );
    assert!(matches!(
        service.add_shape_attribute(
            ShapeId::new(DETACHED, 0),
            AttributeOptions::new("label", AttributeType::String)
        ),
        Err(ShapeError::UnknownHandle { kind: "shape", .. })
    ));
}

#[test]
fn handle_from_other_builder_is_rejected() {
    let mut people = service();
    let mut companies = ServiceBuilder::new(ServiceOptions::new("registry")).unwrap();
    let person = people.add_resource(ResourceOptions::new("person")).unwrap();
    let company = companies.add_resource(ResourceOptions::new("company")).unwrap();
    assert_eq!(person.index(), company.index());

    let err = companies
        .add_attribute(person, AttributeOptions::new("label", AttributeType::String))
        .unwrap_err();
    assert_eq!(
        err,
        ShapeError::UnknownHandle {
            kind:  "resource",
            index: 0
        }
    );
    assert!(companies.resource(person).is_none());
    assert!(
        companies
            .resource(company)
            .unwrap()
            .record()
            .attribute("label")
            .is_none()
    );

    let companies = companies.build().unwrap();
    assert!(companies.resource(person).is_none());
    assert!(companies.resource(company).is_some());
}

#[test]
fn operation_type_must_match_verb() {
    let mut service = service();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    let err = service
        .add_operation(person, OperationType::Mutation, OperationSubType::List)
        .unwrap_err();
    assert_eq!(
        err,
        ShapeError::OperationTypeMismatch {
            sub_type:       OperationSubType::List,
            operation_type: OperationType::Mutation,
            expected:       OperationType::Query
        }
    );
}

#[test]
fn duplicate_operation_fails() {
    let mut service = service();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    service
        .add_operation(person, OperationType::Query, OperationSubType::ReadOne)
        .unwrap();
    let err = service
        .add_operation(person, OperationType::Query, OperationSubType::ReadOne)
        .unwrap_err();
    assert_eq!(
        err,
        ShapeError::DuplicateOperation {
            resource: "person".to_string(),
            sub_type: OperationSubType::ReadOne
        }
    );
}

#[test]
fn named_relationship_binds_late() {
    let mut service = service();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    let attr = service
        .add_relationship_named(
            person,
            "company",
            Cardinality::One,
            RelationshipOptions::default().name("employer")
        )
        .unwrap();
    assert_eq!(attr.ty(), &AttributeType::Custom("company".to_string()));
    let company = service.add_resource(ResourceOptions::new("company")).unwrap();

    let service = service.build().unwrap();
    let rel = service.resource(person).unwrap().relationship("employer").unwrap();
    assert_eq!(rel.target(), company);
}

#[test]
fn named_relationship_uses_declared_plural() {
    let mut service = service();
    service
        .add_resource(ResourceOptions::new("company").plural_name("companies"))
        .unwrap();
    let city = service.add_resource(ResourceOptions::new("city")).unwrap();
    let attr = service
        .add_relationship_named(city, "company", Cardinality::Many, RelationshipOptions::default())
        .unwrap();
    assert_eq!(attr.name(), "companies");
}

#[test]
fn unresolved_relationship_fails_on_build() {
    let mut service = service();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    service
        .add_relationship_named(person, "ghost", Cardinality::One, RelationshipOptions::default())
        .unwrap();
    assert_eq!(
        service.build().unwrap_err(),
        ShapeError::UnresolvedRelationship {
            resource: "person".to_string(),
            target:   "ghost".to_string()
        }
    );
}

#[test]
fn relationship_to_a_shape_is_unresolved() {
    let mut service = service();
    service
        .add_shape(ShapeOptions::new("address").persistent(false))
        .unwrap();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    service
        .add_relationship_named(person, "address", Cardinality::One, RelationshipOptions::default())
        .unwrap();
    assert!(matches!(
        service.build(),
        Err(ShapeError::UnresolvedRelationship { .. })
    ));
}

#[test]
fn lookups_return_none() {
    let service = service().build().unwrap();
    assert!(service.by_name("nobody").is_none());
    assert!(service.resource_by_name("nobody").is_none());
    assert!(service.structure_by_name("").is_none());
    assert!(service.resource(ResourceId::new(DETACHED, 0)).is_none());
}

#[test]
fn by_name_distinguishes_entries() {
    let mut service = service();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    let message = service
        .add_shape(ShapeOptions::new("error-message").persistent(false))
        .unwrap();
    service
        .add_shape_attribute(message, AttributeOptions::new("message", AttributeType::String))
        .unwrap();
    let read = service
        .add_operation(person, OperationType::Query, OperationSubType::ReadOne)
        .unwrap();
    let service = service.build().unwrap();

    assert!(matches!(service.by_name("person"), Some(Entry::Resource(_))));
    assert!(matches!(service.by_name("errorMessage"), Some(Entry::Shape(_))));
    assert!(matches!(
        service.by_name("read-one-person-output"),
        Some(Entry::Structure(s)) if s.role() == StructureRole::Output
    ));
    assert_eq!(
        service.shape_by_name("person").map(Shape::is_persistent),
        Some(true)
    );
    assert_eq!(
        service.declaration("read-one-person-input"),
        Some(Declaration::Structure(read, StructureRole::Input))
    );
    assert_eq!(service.declarations().count(), 4);
    assert_eq!(service.structures().count(), 2);
}

#[test]
fn operations_are_grouped_by_resource() {
    let mut service = service();
    let person = service.add_resource(ResourceOptions::new("person")).unwrap();
    let company = service.add_resource(ResourceOptions::new("company")).unwrap();
    for verb in OperationSubType::ALL {
        service
            .add_operation(person, verb.operation_type(), verb)
            .unwrap();
    }
    service
        .add_operation(company, OperationType::Query, OperationSubType::List)
        .unwrap();
    let service = service.build().unwrap();

    assert_eq!(service.operations_of(person).count(), 8);
    assert_eq!(service.operations_of(company).count(), 1);
    assert_eq!(service.structures().count(), 18);
    assert!(
        service
            .operation_for(company, OperationSubType::CreateOne)
            .is_none()
    );
}

#[test]
fn service_formats_names_per_target() {
    let service = service().build().unwrap();
    assert_eq!(
        service.format("first-name", NamingTarget::GraphqlTypeName),
        "FirstName"
    );
    assert_eq!(
        service.format("first-name", NamingTarget::StorageFieldName),
        "firstname"
    );
}

fn hierarchy() -> (ServiceBuilder, [ResourceId; 3]) {
    let mut service = service();
    let ids = ["country", "city", "street"]
        .map(|name| service.add_resource(ResourceOptions::new(name)).unwrap());
    service.add_hierarchy(&ids, "gsi1").unwrap();
    (service, ids)
}

fn relationship_counts(service: &Service, id: ResourceId) -> (usize, usize) {
    let resource = service.resource(id).unwrap();
    let ones = resource
        .relationships()
        .iter()
        .filter(|rel| rel.cardinality() == Cardinality::One)
        .count();
    (ones, resource.relationships().len() - ones)
}

#[test]
fn hierarchy_fan_out() {
    let (service, [country, city, street]) = hierarchy();
    let service = service.build().unwrap();

    assert_eq!(relationship_counts(&service, country), (0, 1));
    assert_eq!(relationship_counts(&service, city), (1, 1));
    assert_eq!(relationship_counts(&service, street), (2, 0));

    let street = service.resource(street).unwrap();
    let refs: Vec<_> = street
        .relationships()
        .iter()
        .map(|rel| (rel.attribute(), rel.target()))
        .collect();
    assert_eq!(refs, [("country", country), ("city", city)]);
    assert_eq!(
        service
            .resource(country)
            .unwrap()
            .relationships()[0]
            .attribute(),
        "citys"
    );
}

#[test]
fn hierarchy_lookup_patterns() {
    let (service, [country, city, street]) = hierarchy();
    let service = service.build().unwrap();

    assert_eq!(service.resource(country).unwrap().record().access_patterns().len(), 1);
    let pattern = service
        .resource(street)
        .unwrap()
        .record()
        .access_pattern("by-city")
        .unwrap();
    assert_eq!(pattern.index(), Some("gsi1"));
    assert_eq!(pattern.pk(), ["city"]);
    assert_eq!(pattern.sk(), ["type"]);
    assert!(
        service
            .resource(city)
            .unwrap()
            .record()
            .access_pattern("by-country")
            .is_some()
    );
}

#[test]
fn hierarchy_rejects_unknown_member_before_wiring() {
    let mut service = service();
    let country = service.add_resource(ResourceOptions::new("country")).unwrap();
    let err = service
        .add_hierarchy(&[country, ResourceId::new(DETACHED, 9)], "gsi1")
        .unwrap_err();
    assert!(matches!(err, ShapeError::UnknownHandle { index: 9, .. }));
    assert!(service.resource(country).unwrap().record().attribute("citys").is_none());
}

#[test]
fn hierarchy_name_clash_leaves_members_untouched() {
    let mut service = service();
    let [country, city, street] = ["country", "city", "street"]
        .map(|name| service.add_resource(ResourceOptions::new(name)).unwrap());
    service
        .add_attribute(street, AttributeOptions::new("country", AttributeType::String))
        .unwrap();

    let err = service
        .add_hierarchy(&[country, city, street], "gsi1")
        .unwrap_err();
    assert!(matches!(err, ShapeError::DuplicateAttributeName { name, .. } if name == "country"));

    let service = service.build().unwrap();
    let attribute = |id: ResourceId, name: &str| {
        service
            .resource(id)
            .unwrap()
            .record()
            .attribute(name)
            .is_some()
    };
    assert!(!attribute(country, "citys"));
    assert!(!attribute(city, "country"));
    assert!(!attribute(city, "streets"));
    assert!(
        service
            .resource(city)
            .unwrap()
            .record()
            .access_pattern("by-country")
            .is_none()
    );
}
