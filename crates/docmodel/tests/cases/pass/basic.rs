// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Minimal model without attributes.

use docmodel::{Model, TypeTag};

#[derive(Model)]
pub struct Tag {
    pub label: String,
    pub weight: i64,
}

fn main() {
    let descriptor = Tag::descriptor();
    assert_eq!(descriptor.name(), "Tag");
    assert_eq!(descriptor.collection_name(), "tag");
    assert_eq!(descriptor.fields().len(), 2);
    assert_eq!(descriptor.fields()[1].type_tag(), &TypeTag::I64);
}
