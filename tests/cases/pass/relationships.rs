// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use shapegen::{AttributeType, Cardinality, Resource, ServiceBuilder, ServiceOptions};

pub struct Ref;

#[derive(Resource)]
#[resource(plural = "companies")]
pub struct Company {
    pub title: String,
}

#[derive(Resource)]
pub struct Pet {
    pub nickname: String,
}

#[derive(Resource)]
pub struct Person {
    pub first_name: String,

    /// Current employer.
    #[attribute(one_of = "company")]
    pub employer: Option<Ref>,

    #[attribute(array_of = "pet", short_name = "pt")]
    pub pets: Vec<Ref>,
}

fn main() {
    let mut service = ServiceBuilder::new(ServiceOptions::new("directory")).unwrap();
    // Person refers to resources declared after it.
    let person = service.declare::<Person>().unwrap();
    let company = service.declare::<Company>().unwrap();
    let pet = service.declare::<Pet>().unwrap();
    let service = service.build().unwrap();

    let person = service.resource(person).unwrap();
    let employer = person.relationship("employer").unwrap();
    assert_eq!(employer.target(), company);
    assert_eq!(employer.cardinality(), Cardinality::One);

    let pets = person.relationship("pets").unwrap();
    assert_eq!(pets.target(), pet);
    assert_eq!(pets.cardinality(), Cardinality::Many);

    let record = person.record();
    let employer = record.attribute("employer").unwrap();
    assert_eq!(employer.ty(), &AttributeType::Custom("company".to_string()));
    assert_eq!(employer.comment(), ["Current employer."]);

    let pets = record.attribute("pets").unwrap();
    assert_eq!(pets.short_name(), "pt");
    assert!(pets.is_remote_field());
    assert_eq!(service.resource(company).unwrap().plural_name(), "companies");
}
