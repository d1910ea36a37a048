// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Proc-macro implementation for docmodel.
//!
//! Use the `docmodel` crate instead of depending on this one directly.
//!
//! # Attribute Quick Reference
//!
//! ## Model-Level `#[model(...)]`
//!
//! ```rust,ignore
//! #[derive(Model)]
//! #[model(
//!     collection = "users", // Optional: collection name (default: snake_case of the type)
//!     store = "document",   // Optional: "document" | "none" (default: "none")
//!     timestamped           // Optional: maintain created_at / updated_at
//! )]
//! pub struct User { /* ... */ }
//! ```
//!
//! ## Field-Level `#[field(...)]`
//!
//! ```rust,ignore
//! pub struct User {
//!     #[field(auto = "uuid", key = "_id", insert = "no", update = "no")]
//!     pub id: String,
//!
//!     #[field(verify = "email", unique = "true", insert = "yes")]
//!     pub email: String,
//!
//!     #[field(index = "true|by_name(name, age:-1)", trim = "no")]
//!     pub name: String,
//!
//!     #[field(default = "active", verify = "enum(active|banned)")]
//!     pub status: String,
//!
//!     #[field(rename = "dob")]
//!     pub birth_date: Option<chrono::NaiveDate>,
//!
//!     #[field(skip)]
//!     pub cache: Vec<u8>,
//!
//!     pub address: Address, // nested model, traversed recursively
//! }
//! ```
//!
//! # Generated Code
//!
//! | Item | Purpose |
//! |------|---------|
//! | `impl Model for User` | Static [`ModelDescriptor`] built on first use |
//! | `impl FieldType for User` | Lets other models nest `User` |
//!
//! [`ModelDescriptor`]: https://docs.rs/docmodel-core/latest/docmodel_core/struct.ModelDescriptor.html

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod model;

use proc_macro::TokenStream;

/// Derive a static model descriptor from `#[model]` / `#[field]` attributes.
///
/// # Example
///
/// ```rust,ignore
/// use docmodel::{Action, Model, Record};
///
/// #[derive(Model)]
/// #[model(store = "document", timestamped)]
/// pub struct Account {
///     #[field(auto = "prefix:acc-;alphanum(10)", insert = "no")]
///     pub code: String,
///
///     #[field(verify = "email", insert = "yes", unique = "true")]
///     pub email: String
/// }
///
/// let mut data = Record::new();
/// data.insert("email".into(), "ann@example.com".into());
/// assert!(Account::validate(Action::Insert, &mut data).is_success());
/// ```
///
/// # Field Options
///
/// | Option | Value | Meaning |
/// |--------|-------|---------|
/// | `index` | `"true"`, `"name"`, `"name(a, b:-1)"`, `\|`-separated | Plain index entries |
/// | `unique` | same as `index` | Unique index entries |
/// | `verify` | `"email"`, `"rex(...)"`, `"enum(a\|b)"`, `;`-separated | Value rules |
/// | `auto` | `"uuid"`, `"alphanum(n)"`, `"prefix:..."`, `;`-separated | Generate on insert |
/// | `default` | any string | Value used on insert when absent; `""` sets none |
/// | `trim` | `"yes"` / `"no"` | Trim string values (default `"yes"`) |
/// | `insert` | `"yes"` / `"no"` / `"opt"` | Value required / forbidden on insert |
/// | `update` | `"yes"` / `"no"` / `"opt"` | Value forbidden on update when `"no"` |
/// | `key` | store key | Alias used for `id` on document-store models |
/// | `rename` | record key | Key of the field in records |
/// | `skip` | | Leave the field out of the descriptor |
#[proc_macro_derive(Model, attributes(model, field))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive(input)
}
