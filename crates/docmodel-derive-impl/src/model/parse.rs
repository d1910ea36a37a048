// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Model derive macro.
//!
//! Model-level attributes (`#[model(...)]`) are parsed with darling's
//! `FromDeriveInput`. Field-level attributes (`#[field(...)]`) are parsed by
//! hand with `parse_nested_meta`, since they mix flags and key-value pairs.
//!
//! ```text
//! parse.rs (coordinator, ModelDef)
//! ├── attrs.rs  - ModelAttrs (darling)
//! ├── store.rs  - StoreKind ("document" | "none")
//! └── field.rs  - FieldDef, Permission
//! ```
//!
//! # Data Structures
//!
//! ```text
//! ModelDef
//! ├── ident: Ident          (struct name, e.g. "User")
//! ├── collection: String    (explicit or snake_case of ident)
//! ├── store: StoreKind      (Document => Capability::DocumentStore)
//! ├── timestamped: bool     (Capability::Timestamped)
//! └── fields: Vec<FieldDef> (skipped fields already removed)
//! ```

mod attrs;
mod field;
mod store;

use std::collections::HashSet;

use convert_case::{Case, Casing};
use darling::FromDeriveInput;
pub use field::{FieldDef, Permission};
use syn::{DeriveInput, Ident};
pub use store::StoreKind;

use self::attrs::ModelAttrs;

/// Fully parsed model definition.
#[derive(Debug)]
pub struct ModelDef {
    /// Struct identifier.
    pub ident:       Ident,
    /// Collection name.
    pub collection:  String,
    /// Storage kind.
    pub store:       StoreKind,
    /// Maintain timestamps.
    pub timestamped: bool,
    /// Fields in declaration order, without skipped ones.
    pub fields:      Vec<FieldDef>
}

impl ModelDef {
    /// Parse a model definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union or tuple struct
    /// - Generic struct
    /// - Invalid `#[model]` or `#[field]` values
    /// - Two fields mapping to the same record key
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let named = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => &named.named,
                _ => {
                    return Err(darling::Error::custom("Model requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Model can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        if !input.generics.params.is_empty() {
            return Err(
                darling::Error::custom("Model cannot be derived for generic structs")
                    .with_span(&input.ident)
            );
        }

        let attrs = ModelAttrs::from_derive_input(input)?;

        let mut errors = darling::Error::accumulator();
        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        for field in named {
            let Some(def) = errors.handle(FieldDef::from_field(field)) else {
                continue;
            };
            if def.skip {
                continue;
            }
            if !seen.insert(def.name.clone()) {
                errors.push(
                    darling::Error::custom(format!("duplicate record key '{}'", def.name))
                        .with_span(&def.ident)
                );
                continue;
            }
            fields.push(def);
        }
        errors.finish()?;

        let collection = attrs
            .collection
            .unwrap_or_else(|| attrs.ident.to_string().to_case(Case::Snake));

        Ok(Self {
            ident: attrs.ident,
            collection,
            store: attrs.store,
            timestamped: attrs.timestamped,
            fields
        })
    }

    /// Struct name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Check if the model is persisted in a document store.
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.store == StoreKind::Document
    }
}
