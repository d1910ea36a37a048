// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! # Supported Attributes
//!
//! | Attribute | Example |
//! |-----------|---------|
//! | `index` | `#[field(index = "true\|by_name(name, age:-1)")]` |
//! | `unique` | `#[field(unique = "true")]` |
//! | `verify` | `#[field(verify = "email;rex(^.+@corp\\.com$)")]` |
//! | `auto` | `#[field(auto = "prefix:usr-;alphanum(8)")]` |
//! | `default` | `#[field(default = "draft")]` |
//! | `trim` | `#[field(trim = "no")]` |
//! | `insert` | `#[field(insert = "yes")]` |
//! | `update` | `#[field(update = "no")]` |
//! | `key` | `#[field(key = "_id")]` |
//! | `rename` | `#[field(rename = "dob")]` |
//! | `skip` | `#[field(skip)]` |
//!
//! Several `#[field]` attributes on one field are merged; later values win.
//! Directive strings are passed through unparsed.

use syn::{Attribute, Field, Ident, LitStr, Type, meta::ParseNestedMeta};

/// Insert/update permission written on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// `"yes"`
    Required,

    /// `"no"`
    Forbidden,

    /// `"opt"`
    #[default]
    Optional
}

impl Permission {
    /// Parse permission from its directive text.
    ///
    /// Returns `None` for unrecognized values.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Some(Self::Required),
            "no" => Some(Self::Forbidden),
            "opt" | "" => Some(Self::Optional),
            _ => None
        }
    }
}

/// Field definition with all parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident:   Ident,
    /// Field type.
    pub ty:      Type,
    /// Record key (`rename` or the identifier without `r#`).
    pub name:    String,
    /// `index` directive.
    pub index:   Option<String>,
    /// `unique` directive.
    pub unique:  Option<String>,
    /// `verify` directive.
    pub verify:  Option<String>,
    /// `auto` directive.
    pub auto:    Option<String>,
    /// `default` directive.
    pub default: Option<String>,
    /// Trim string values.
    pub trim:    bool,
    /// Insert permission.
    pub insert:  Permission,
    /// Update permission.
    pub update:  Permission,
    /// Store key alias.
    pub key:     Option<String>,
    /// Leave the field out.
    pub skip:    bool
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Unnamed field, unknown option, or an invalid `trim` / `insert` /
    /// `update` value.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Model fields must be named").with_span(field)
        })?;
        let raw = ident.to_string();
        let mut def = Self {
            name: raw.strip_prefix("r#").unwrap_or(&raw).to_owned(),
            ident,
            ty: field.ty.clone(),
            index: None,
            unique: None,
            verify: None,
            auto: None,
            default: None,
            trim: true,
            insert: Permission::default(),
            update: Permission::default(),
            key: None,
            skip: false
        };

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("field")) {
            def.apply(attr).map_err(darling::Error::from)?;
        }
        Ok(def)
    }

    fn apply(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                self.skip = true;
            } else if meta.path.is_ident("index") {
                self.index = Some(string(&meta)?.value());
            } else if meta.path.is_ident("unique") {
                self.unique = Some(string(&meta)?.value());
            } else if meta.path.is_ident("verify") {
                self.verify = Some(string(&meta)?.value());
            } else if meta.path.is_ident("auto") {
                self.auto = Some(string(&meta)?.value());
            } else if meta.path.is_ident("default") {
                self.default = Some(string(&meta)?.value());
            } else if meta.path.is_ident("key") {
                self.key = Some(string(&meta)?.value());
            } else if meta.path.is_ident("rename") {
                self.name = string(&meta)?.value();
            } else if meta.path.is_ident("trim") {
                let value = string(&meta)?;
                self.trim = match value.value().to_lowercase().as_str() {
                    "yes" | "true" => true,
                    "no" | "false" => false,
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &value,
                            "expected \"yes\" or \"no\""
                        ));
                    }
                };
            } else if meta.path.is_ident("insert") {
                self.insert = permission(&meta)?;
            } else if meta.path.is_ident("update") {
                self.update = permission(&meta)?;
            } else {
                return Err(meta.error("unknown field option"));
            }
            Ok(())
        })
    }
}

fn string(meta: &ParseNestedMeta<'_>) -> syn::Result<LitStr> {
    meta.value()?.parse()
}

fn permission(meta: &ParseNestedMeta<'_>) -> syn::Result<Permission> {
    let value = string(meta)?;
    Permission::from_str(&value.value()).ok_or_else(|| {
        syn::Error::new_spanned(&value, "expected \"yes\", \"no\" or \"opt\"")
    })
}
