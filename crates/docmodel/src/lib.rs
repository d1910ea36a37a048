// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declarative field directives for document-store models.
//!
//! Annotate a struct with `#[derive(Model)]` and per-field `#[field(...)]`
//! directives. The derive builds a static descriptor; the engine uses it to
//! validate and complete incoming records and to derive index definitions.
//!
//! ```rust
//! use docmodel::{Action, Model, Record};
//! use serde_json::json;
//!
//! #[derive(Model)]
//! pub struct Address {
//!     #[field(insert = "yes")]
//!     pub city: String,
//!
//!     #[field(verify = "rex(^[0-9]{5}$)", index = "true")]
//!     pub zip:  Option<String>
//! }
//!
//! #[derive(Model)]
//! #[model(collection = "users", store = "document", timestamped)]
//! pub struct User {
//!     #[field(auto = "uuid", key = "_id", insert = "no", update = "no")]
//!     pub id:      String,
//!
//!     #[field(verify = "email", unique = "true", insert = "yes")]
//!     pub email:   String,
//!
//!     #[field(default = "member", verify = "enum(member|admin)")]
//!     pub role:    String,
//!
//!     pub age:     Option<i32>,
//!
//!     pub address: Option<Address>
//! }
//!
//! let mut data = match json!({
//!     "email": " ann@example.com ",
//!     "age": "34",
//!     "address": {"city": "Oslo"}
//! }) {
//!     serde_json::Value::Object(map) => map,
//!     _ => unreachable!()
//! };
//!
//! let outcome = User::validate(Action::Insert, &mut data);
//! assert!(outcome.is_success());
//! assert_eq!(data["email"], "ann@example.com");
//! assert_eq!(data["role"], "member");
//! assert_eq!(data["age"], 34);
//! assert!(data.contains_key("_id"));
//! assert!(data.contains_key("created_at"));
//!
//! let names: Vec<String> = User::indexes().iter().map(|i| i.name().to_owned()).collect();
//! assert_eq!(
//!     names,
//!     ["idx_email", "idx_address.zip", "idx_created_at", "idx_updated_at"]
//! );
//! # let _ = Record::new();
//! ```
//!
//! # Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `docmodel-core` | Engine: descriptors, pipeline, index builder, store seam |
//! | `docmodel-derive-impl` | `#[derive(Model)]` |
//!
//! Everything is re-exported from here.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub use docmodel_core::*;
pub use docmodel_derive_impl::Model;
