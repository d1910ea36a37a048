// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use docmodel_core::prelude::*;
//! ```

pub use crate::{
    Action, Capability, DocumentStore, FieldDescriptor, FieldErrors, FieldIssue, FieldType,
    IndexDescriptor, IssueKind, Model, ModelDescriptor, Outcome, Permission, Policy, Record,
    Registry, SchemaError, StoreConfig, TypeTag, Validator, async_trait, create_indexes, validate
};
