// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::marker::PhantomData;

use shapegen::{DeclareResource, Resource, ServiceBuilder, ServiceOptions};

#[derive(Resource)]
pub struct Document<T: Send> {
    pub title: String,
    #[attribute(ty = "json")]
    pub body: String,
    #[attribute(skip)]
    pub marker: PhantomData<T>,
}

fn main() {
    assert_eq!(<Document<u8> as DeclareResource>::RESOURCE_NAME, "document");

    let mut service = ServiceBuilder::new(ServiceOptions::new("docs")).unwrap();
    let document = service.declare::<Document<u8>>().unwrap();
    let service = service.build().unwrap();
    assert!(service.resource(document).unwrap().record().attribute("body").is_some());
}
