// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core engine for docmodel.
//!
//! This crate holds everything `#[derive(Model)]` generated code relies on.
//! It can also be used on its own with hand-built descriptors.
//!
//! # Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`descriptor`] | Static model and field tables |
//! | [`directive`] | `auto` / `verify` directive parsers |
//! | [`rules`] | `email`, `rex`, `enum` field tests |
//! | [`traverse`] | Recursive walk over nested models |
//! | [`pipeline`] | Ordered validation passes |
//! | [`index`] | `index` / `unique` directive grammar |
//! | [`store`] | Document store seam, index submission |
//! | [`registry`] | Registration-time directive checks |
//!
//! # Usage
//!
//! ```rust
//! use docmodel_core::prelude::*;
//! use serde_json::json;
//!
//! let model = ModelDescriptor::new("User")
//!     .capability(Capability::DocumentStore)
//!     .field(FieldDescriptor::new("email", TypeTag::String).verify("email"))
//!     .field(FieldDescriptor::new("age", TypeTag::I32));
//!
//! let mut data = match json!({"email": " ann@example.com ", "age": "30"}) {
//!     serde_json::Value::Object(map) => map,
//!     _ => unreachable!()
//! };
//! assert!(validate(&model, Action::Insert, &mut data).is_success());
//! assert_eq!(data["email"], "ann@example.com");
//! assert_eq!(data["age"], 30);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod directive;
mod errors;
pub mod index;
pub mod pipeline;
pub mod policy;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod store;
pub mod traverse;

/// Re-export async_trait for store implementations.
pub use async_trait::async_trait;
pub use descriptor::{
    Capability, FieldDescriptor, FieldType, ModelDescriptor, NestedModel, Permission, TypeTag
};
pub use directive::{AutoFieldSpec, AutoMethod, FieldTest};
pub use errors::{
    DirectiveError, FieldErrors, FieldIssue, IndexFailure, IssueKind, SchemaError, StoreError
};
pub use index::IndexDescriptor;
pub use pipeline::{Action, Outcome, Validator, validate};
pub use policy::Policy;
pub use registry::Registry;
pub use store::{
    DocumentStore, IndexReport, MemoryStore, MemoryStoreError, StoreConfig, create_indexes,
    prepare_collections
};

/// Input record: a JSON object, completed in place by validation.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A type with a static descriptor.
///
/// Implemented by `#[derive(Model)]`. The provided methods forward to the
/// engine with [`Policy::DEFAULT`].
///
/// # Example
///
/// ```rust
/// use std::sync::OnceLock;
///
/// use docmodel_core::{Action, FieldDescriptor, Model, ModelDescriptor, Record, TypeTag};
///
/// struct Tag;
///
/// impl Model for Tag {
///     fn descriptor() -> &'static ModelDescriptor {
///         static D: OnceLock<ModelDescriptor> = OnceLock::new();
///         D.get_or_init(|| {
///             ModelDescriptor::new("Tag").field(FieldDescriptor::new("label", TypeTag::String).index("true"))
///         })
///     }
/// }
///
/// assert!(Tag::validate(Action::Update, &mut Record::new()).is_success());
/// assert_eq!(Tag::indexes()[0].name(), "idx_label");
/// ```
pub trait Model {
    /// The model's descriptor, built once.
    fn descriptor() -> &'static ModelDescriptor;

    /// Validate a record against this model.
    fn validate(action: Action, data: &mut Record) -> Outcome {
        pipeline::validate(Self::descriptor(), action, data)
    }

    /// Indexes declared on this model.
    fn indexes() -> Vec<IndexDescriptor> {
        index::model_indexes(Self::descriptor())
    }
}
