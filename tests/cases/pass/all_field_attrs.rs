// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use shapegen::{AttributeType, Resource, ServiceBuilder, ServiceOptions};

pub struct Cache;

#[derive(Resource)]
#[resource(name = "contact", short_name = "ct", versioned = false)]
pub struct ContactCard {
    #[attribute(name = "mail", short_name = "ml", ty = "email")]
    pub email: String,

    #[attribute(ty = "array<phone>", required = false)]
    pub phones: Vec<String>,

    #[attribute(key)]
    pub tenant: String,

    #[attribute(remote_key)]
    pub owner: uuid::Uuid,

    #[attribute(remote_field)]
    pub owner_name: Option<String>,

    #[attribute(skip)]
    pub cache: Cache,
}

fn main() {
    let mut service = ServiceBuilder::new(ServiceOptions::new("crm")).unwrap();
    let contact = service.declare::<ContactCard>().unwrap();
    let service = service.build().unwrap();

    let contact = service.resource(contact).unwrap();
    assert_eq!(contact.name(), "contact");
    assert_eq!(contact.short_name(), "ct");

    let record = contact.record();
    assert!(!record.is_versioned());
    assert!(record.version_attribute().is_none());

    let mail = record.attribute("mail").unwrap();
    assert_eq!(mail.short_name(), "ml");
    assert_eq!(mail.ty(), &AttributeType::Email);

    let phones = record.attribute("phones").unwrap();
    assert_eq!(phones.ty(), &AttributeType::array_of(AttributeType::Phone));
    assert!(!phones.is_required());

    assert!(record.attribute("tenant").unwrap().is_key());
    assert!(record.attribute("owner").unwrap().is_remote_key());
    assert!(record.attribute("owner-name").unwrap().is_remote_field());
    assert!(record.attribute("cache").is_none());
}
