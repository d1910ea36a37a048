// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage kind of a model.

use darling::FromMeta;

/// Where records of a model live.
///
/// | Value | Capability |
/// |-------|------------|
/// | `"none"` | none |
/// | `"document"` | `Capability::DocumentStore` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Plain model, typically embedded in another one.
    #[default]
    None,

    /// Persisted in a document store.
    Document
}

impl FromMeta for StoreKind {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "document" | "mongodb" | "mongo" => Ok(Self::Document),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}
