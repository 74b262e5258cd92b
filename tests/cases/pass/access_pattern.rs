// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use shapegen::{Resource, ServiceBuilder, ServiceOptions};

#[derive(Resource)]
#[resource(access_pattern(name = "by-email", index = "gsi1", pk = "email", sk = "type, id"))]
pub struct Account {
    pub email: String,
    pub display_name: String,
}

fn main() {
    let mut service = ServiceBuilder::new(ServiceOptions::new("auth")).unwrap();
    let account = service.declare::<Account>().unwrap();
    let service = service.build().unwrap();

    let record = service.resource(account).unwrap().record();
    let pattern = record.access_pattern("by-email").unwrap();
    assert_eq!(pattern.index(), Some("gsi1"));
    assert_eq!(pattern.pk(), ["email"]);
    assert_eq!(pattern.sk(), ["type", "id"]);

    let key = pattern
        .compose(
            record,
            &BTreeMap::from([("email", "Ann@Example.com"), ("type", "account"), ("id", "A1")])
        )
        .unwrap();
    assert_eq!(key.pk, "ann@example.com");
    assert_eq!(key.sk, "account#a1");
}
