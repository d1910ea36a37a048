// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Every `#[field]` option on one model.

use docmodel::{Capability, Model, Permission};

#[derive(Model)]
#[model(collection = "accounts", store = "document", timestamped)]
pub struct Account {
    #[field(auto = "prefix:acc-;uuid", key = "_id", insert = "no", update = "no")]
    pub id: String,

    #[field(verify = "email", unique = "true", insert = "yes")]
    pub email: String,

    #[field(index = "true|by_name(name, created:-1)", trim = "no")]
    pub name: String,

    #[field(default = "basic", verify = "enum(basic|pro)")]
    pub plan: String,

    #[field(rename = "type")]
    pub kind: Option<String>,

    pub r#ref: Option<String>,

    #[field(skip)]
    pub cache: Vec<u8>,
}

fn main() {
    let d = Account::descriptor();
    assert_eq!(d.collection_name(), "accounts");
    assert!(d.has(Capability::DocumentStore));
    assert!(d.has(Capability::Timestamped));
    assert_eq!(d.fields().len(), 6);
    assert!(d.get_field("cache").is_none());
    assert!(d.get_field("type").is_some());
    assert!(d.get_field("ref").is_some());

    let id = d.get_field("id").unwrap();
    assert_eq!(id.key_alias(), Some("_id"));
    assert_eq!(id.insert_permission(), Permission::Forbidden);
    assert!(!d.get_field("name").unwrap().trims());
}
