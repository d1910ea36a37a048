// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Models nesting other models, directly and through wrappers.

use docmodel::Model;

#[derive(Model)]
pub struct Geo {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Model)]
pub struct Address {
    pub city: String,
    pub geo: Box<Geo>,
}

#[derive(Model)]
#[model(store = "document")]
pub struct Person {
    pub home: Address,
    pub work: Option<Address>,
    pub tags: Vec<String>,
    pub born: Option<chrono::NaiveDate>,
    pub extra: serde_json::Value,
}

fn main() {
    let d = Person::descriptor();
    assert_eq!(d.field_type("home.geo.lat").map(|t| t.name()), Some("f64"));
    assert_eq!(d.field_type("work.city").map(|t| t.name()), Some("string"));
    assert_eq!(d.field_type("tags").map(|t| t.name()), Some("list"));
    assert_eq!(d.field_type("born").map(|t| t.name()), Some("time"));
}
