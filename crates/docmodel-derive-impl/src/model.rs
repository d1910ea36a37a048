// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! model.rs (orchestrator)
//! │
//! ├── parse/        → Attribute parsing (ModelDef, FieldDef, StoreKind)
//! │
//! └── generate.rs   → impl Model / impl FieldType
//! ```

mod generate;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::ModelDef;

/// Main entry point for the Model derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ModelDef::from_derive_input(&input) {
        Ok(model) => generate::generate(&model).into(),
        Err(err) => err.write_errors().into()
    }
}
