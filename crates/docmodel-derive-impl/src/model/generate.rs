// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Code generation for `#[derive(Model)]`.
//!
//! For
//!
//! ```rust,ignore
//! #[derive(Model)]
//! #[model(store = "document")]
//! pub struct User {
//!     #[field(verify = "email", insert = "yes")]
//!     pub email: String,
//!     pub address: Option<Address>,
//! }
//! ```
//!
//! the macro emits
//!
//! ```rust,ignore
//! impl ::docmodel_core::Model for User {
//!     fn descriptor() -> &'static ::docmodel_core::ModelDescriptor {
//!         static DESCRIPTOR: OnceLock<ModelDescriptor> = OnceLock::new();
//!         DESCRIPTOR.get_or_init(|| {
//!             ModelDescriptor::new("User")
//!                 .collection("user")
//!                 .capability(Capability::DocumentStore)
//!                 .field(
//!                     FieldDescriptor::new("email", <String as FieldType>::type_tag())
//!                         .verify("email")
//!                         .insert(Permission::Required)
//!                 )
//!                 .field(FieldDescriptor::new("address", <Option<Address> as FieldType>::type_tag()))
//!         })
//!     }
//! }
//!
//! impl ::docmodel_core::FieldType for User {
//!     fn type_tag() -> TypeTag {
//!         TypeTag::Nested(NestedModel::new(<User as Model>::descriptor))
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, ModelDef, Permission};

/// Generate the `Model` and `FieldType` impls.
pub fn generate(model: &ModelDef) -> TokenStream {
    let ident = &model.ident;
    let name = model.name_str();
    let collection = &model.collection;

    let mut capabilities = Vec::new();
    if model.is_document() {
        capabilities.push(quote! { .capability(::docmodel_core::Capability::DocumentStore) });
    }
    if model.timestamped {
        capabilities.push(quote! { .capability(::docmodel_core::Capability::Timestamped) });
    }

    let fields = model.fields.iter().map(field_descriptor);

    quote! {
        impl ::docmodel_core::Model for #ident {
            fn descriptor() -> &'static ::docmodel_core::ModelDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::docmodel_core::ModelDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    ::docmodel_core::ModelDescriptor::new(#name)
                        .collection(#collection)
                        #(#capabilities)*
                        #(.field(#fields))*
                })
            }
        }

        impl ::docmodel_core::FieldType for #ident {
            fn type_tag() -> ::docmodel_core::TypeTag {
                ::docmodel_core::TypeTag::Nested(::docmodel_core::NestedModel::new(
                    <#ident as ::docmodel_core::Model>::descriptor
                ))
            }
        }
    }
}

fn field_descriptor(field: &FieldDef) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;

    let mut calls = Vec::new();
    let directives = [
        ("index", &field.index),
        ("unique", &field.unique),
        ("verify", &field.verify),
        ("auto", &field.auto),
        ("default_value", &field.default),
        ("key", &field.key)
    ];
    for (method, value) in directives {
        if let Some(value) = value {
            let method = quote::format_ident!("{}", method);
            calls.push(quote! { .#method(#value) });
        }
    }
    if !field.trim {
        calls.push(quote! { .trim(false) });
    }
    if let Some(permission) = permission(field.insert) {
        calls.push(quote! { .insert(#permission) });
    }
    if let Some(permission) = permission(field.update) {
        calls.push(quote! { .update(#permission) });
    }

    quote! {
        ::docmodel_core::FieldDescriptor::new(
            #name,
            <#ty as ::docmodel_core::FieldType>::type_tag()
        )
        #(#calls)*
    }
}

fn permission(permission: Permission) -> Option<TokenStream> {
    match permission {
        Permission::Required => Some(quote! { ::docmodel_core::Permission::Required }),
        Permission::Forbidden => Some(quote! { ::docmodel_core::Permission::Forbidden }),
        Permission::Optional => None
    }
}

#[cfg(test)]
mod tests {
    use syn::DeriveInput;

    use super::*;

    fn expand(input: DeriveInput) -> String {
        let model = ModelDef::from_derive_input(&input).unwrap();
        generate(&model).to_string()
    }

    #[test]
    fn descriptor_skeleton() {
        let out = expand(syn::parse_quote! {
            pub struct Tag { pub label: String }
        });
        assert!(out.contains("impl :: docmodel_core :: Model for Tag"));
        assert!(out.contains("impl :: docmodel_core :: FieldType for Tag"));
        assert!(out.contains("ModelDescriptor :: new (\"Tag\")"));
        assert!(out.contains(". collection (\"tag\")"));
        assert!(!out.contains("capability"));
    }

    #[test]
    fn capabilities() {
        let out = expand(syn::parse_quote! {
            #[model(store = "document", timestamped)]
            pub struct User { pub name: String }
        });
        assert!(out.contains("Capability :: DocumentStore"));
        assert!(out.contains("Capability :: Timestamped"));
    }

    #[test]
    fn field_calls() {
        let out = expand(syn::parse_quote! {
            pub struct User {
                #[field(verify = "email", insert = "yes", update = "no", trim = "no", default = "a")]
                pub email: Option<String>,
            }
        });
        assert!(out.contains("< Option < String > as :: docmodel_core :: FieldType > :: type_tag ()"));
        assert!(out.contains(". verify (\"email\")"));
        assert!(out.contains(". default_value (\"a\")"));
        assert!(out.contains(". trim (false)"));
        assert!(out.contains(". insert (:: docmodel_core :: Permission :: Required)"));
        assert!(out.contains(". update (:: docmodel_core :: Permission :: Forbidden)"));
    }

    #[test]
    fn optional_permission_omitted() {
        let out = expand(syn::parse_quote! {
            pub struct User {
                #[field(insert = "opt")]
                pub name: String,
            }
        });
        assert!(!out.contains(". insert"));
        assert!(!out.contains(". trim"));
    }
}
