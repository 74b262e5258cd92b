// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use shapegen::{AttributeType, DeclareResource, Resource, ServiceBuilder, ServiceOptions};
use uuid::Uuid;

/// Person of the directory.
#[derive(Resource)]
pub struct Person {
    /// Given name.
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub born_at: Option<DateTime<Utc>>,
    pub badge: Uuid,
    pub score: f64,
}

fn main() {
    assert_eq!(Person::RESOURCE_NAME, "person");

    let mut service = ServiceBuilder::new(ServiceOptions::new("directory")).unwrap();
    let person = service.declare::<Person>().unwrap();
    let service = service.build().unwrap();

    let record = service.resource(person).unwrap().record();
    assert_eq!(record.comment(), Some("Person of the directory."));

    let first = record.attribute("first-name").unwrap();
    assert!(first.is_required());
    assert_eq!(first.comment(), ["Given name."]);

    let nickname = record.attribute("nickname").unwrap();
    assert!(!nickname.is_required());

    assert_eq!(record.attribute("born-at").unwrap().ty(), &AttributeType::DateTime);
    assert_eq!(record.attribute("badge").unwrap().ty(), &AttributeType::Guid);
    assert_eq!(record.attribute("score").unwrap().ty(), &AttributeType::Float);
    assert_eq!(record.data_shape_attributes().len(), 6);
}
