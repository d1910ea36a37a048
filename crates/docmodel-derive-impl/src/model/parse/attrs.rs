// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model-level attribute parsing with darling.
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `collection` | No | snake_case of the struct name | Collection name |
//! | `store` | No | `"none"` | `"document"` enables store behavior |
//! | `timestamped` | No | `false` | Maintain `created_at` / `updated_at` |

use darling::FromDeriveInput;
use syn::Ident;

use super::StoreKind;

/// Model-level attributes parsed from `#[model(...)]`.
///
/// Combined with the parsed fields into [`ModelDef`](super::ModelDef).
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(model), supports(struct_named))]
pub struct ModelAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Explicit collection name.
    #[darling(default)]
    pub collection: Option<String>,

    /// Storage kind.
    #[darling(default)]
    pub store: StoreKind,

    /// Maintain timestamps.
    #[darling(default)]
    pub timestamped: bool
}
