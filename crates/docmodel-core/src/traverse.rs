// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Recursive model traversal.
//!
//! Walks a [`ModelDescriptor`] alongside an input [`Record`], calling an
//! operation on every leaf field. Nested models are descended into:
//!
//! ```text
//! User { name, address: Address { city, geo: Geo { lat } } }
//!
//! op(name,  record,              ["name"])
//! op(city,  record.address,      ["address", "city"])
//! op(lat,   record.address.geo,  ["address", "geo", "lat"])
//! ```
//!
//! A missing nested object is created on the fly and kept only if some
//! operation wrote into it. Missing objects of a model that is already being
//! walked higher up are not expanded, so self-referencing models terminate.

use std::ptr;

use serde_json::{Map, Value};

use crate::{FieldDescriptor, FieldErrors, FieldIssue, ModelDescriptor, Record};

/// Walk every field of `model` over `data`.
///
/// `op` receives the leaf field, the record level holding it and the full
/// path from the root (last element is the field name).
pub fn traverse<F>(model: &ModelDescriptor, data: &mut Record, errs: &mut FieldErrors, op: &mut F)
where
    F: FnMut(&FieldDescriptor, &mut Record, &[&str], &mut FieldErrors)
{
    let mut path = Vec::new();
    walk(model, data, errs, op, &mut path, &mut vec![model]);
}

/// Like [`traverse`], with paths starting below `prefix`.
pub fn traverse_at<F>(
    model: &ModelDescriptor,
    data: &mut Record,
    errs: &mut FieldErrors,
    op: &mut F,
    prefix: &[&str]
) where
    F: FnMut(&FieldDescriptor, &mut Record, &[&str], &mut FieldErrors)
{
    let mut path = prefix.to_vec();
    walk(model, data, errs, op, &mut path, &mut vec![model]);
}

fn walk<'a, F>(
    model: &'a ModelDescriptor,
    data: &mut Record,
    errs: &mut FieldErrors,
    op: &mut F,
    path: &mut Vec<&'a str>,
    open: &mut Vec<&'a ModelDescriptor>
) where
    F: FnMut(&FieldDescriptor, &mut Record, &[&str], &mut FieldErrors)
{
    for field in model.fields() {
        path.push(field.name());

        match field.type_tag().nested() {
            Some(nested) => match data.get_mut(field.name()) {
                None if open.iter().any(|m| ptr::eq(*m, nested)) => {}
                None => {
                    let mut fresh = Map::new();
                    open.push(nested);
                    walk(nested, &mut fresh, errs, op, path, open);
                    open.pop();
                    if !fresh.is_empty() {
                        data.insert(field.name().to_owned(), Value::Object(fresh));
                    }
                }
                Some(Value::Object(inner)) => {
                    open.push(nested);
                    walk(nested, inner, errs, op, path, open);
                    open.pop();
                }
                Some(_) => errs.add(
                    FieldIssue::ExpectedObject {
                        field: field.name().to_owned()
                    },
                    path.as_slice()
                )
            },
            None => op(field, data, path.as_slice(), errs)
        }

        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use serde_json::json;

    use super::*;
    use crate::{NestedModel, TypeTag};

    fn geo() -> &'static ModelDescriptor {
        static D: OnceLock<ModelDescriptor> = OnceLock::new();
        D.get_or_init(|| ModelDescriptor::new("Geo").field(FieldDescriptor::new("lat", TypeTag::F64)))
    }

    fn address() -> &'static ModelDescriptor {
        static D: OnceLock<ModelDescriptor> = OnceLock::new();
        D.get_or_init(|| {
            ModelDescriptor::new("Address")
                .field(FieldDescriptor::new("city", TypeTag::String))
                .field(FieldDescriptor::new(
                    "geo",
                    TypeTag::Nested(NestedModel::new(geo))
                ))
        })
    }

    fn user() -> ModelDescriptor {
        ModelDescriptor::new("User")
            .field(FieldDescriptor::new("name", TypeTag::String))
            .field(FieldDescriptor::new(
                "address",
                TypeTag::Nested(NestedModel::new(address))
            ))
            .field(FieldDescriptor::new("joined", TypeTag::Time))
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!()
        }
    }

    fn collect_paths(model: &ModelDescriptor, data: &mut Record) -> (Vec<String>, FieldErrors) {
        let mut errs = FieldErrors::new();
        let mut seen = Vec::new();
        traverse(model, data, &mut errs, &mut |_, _, path, _| {
            seen.push(path.join("."));
        });
        (seen, errs)
    }

    #[test]
    fn visits_leaves_in_declaration_order() {
        let mut data = Record::new();
        let (seen, errs) = collect_paths(&user(), &mut data);
        assert_eq!(
            seen,
            vec!["name", "address.city", "address.geo.lat", "joined"]
        );
        assert!(errs.is_empty());
    }

    #[test]
    fn untouched_subtrees_are_not_materialized() {
        let mut data = Record::new();
        collect_paths(&user(), &mut data);
        assert!(data.is_empty());
    }

    #[test]
    fn populated_subtrees_are_attached() {
        let mut data = Record::new();
        let mut errs = FieldErrors::new();
        traverse(&user(), &mut data, &mut errs, &mut |field, level, _, _| {
            if field.name() == "lat" {
                level.insert("lat".into(), json!(1.5));
            }
        });
        assert_eq!(Value::Object(data), json!({"address": {"geo": {"lat": 1.5}}}));
    }

    #[test]
    fn literal_in_place_of_object() {
        let mut data = record(json!({"address": "somewhere"}));
        let (seen, errs) = collect_paths(&user(), &mut data);
        assert_eq!(seen, vec!["name", "joined"]);
        assert_eq!(
            errs.messages("address"),
            vec!["field 'address' expected dict, but found literal"]
        );
    }

    #[test]
    fn nested_levels_are_passed_to_op() {
        let mut data = record(json!({"address": {"city": "Oslo"}}));
        let mut errs = FieldErrors::new();
        let mut cities = Vec::new();
        traverse(&user(), &mut data, &mut errs, &mut |field, level, _, _| {
            if field.name() == "city" {
                cities.push(level.get("city").cloned());
            }
        });
        assert_eq!(cities, vec![Some(json!("Oslo"))]);
    }

    fn node() -> &'static ModelDescriptor {
        static D: OnceLock<ModelDescriptor> = OnceLock::new();
        D.get_or_init(|| {
            ModelDescriptor::new("Node")
                .field(FieldDescriptor::new("label", TypeTag::String))
                .field(FieldDescriptor::new(
                    "next",
                    TypeTag::Nested(NestedModel::new(node))
                ))
        })
    }

    #[test]
    fn self_reference_follows_data_only() {
        let mut data = record(json!({"next": {"next": {"label": "c"}}}));
        let (seen, errs) = collect_paths(node(), &mut data);
        assert_eq!(
            seen,
            vec!["label", "next.label", "next.next.label"]
        );
        assert!(errs.is_empty());
    }

    #[test]
    fn prefix_is_prepended() {
        let mut data = Record::new();
        let mut errs = FieldErrors::new();
        let mut seen = Vec::new();
        traverse_at(
            address(),
            &mut data,
            &mut errs,
            &mut |_, _, path, _| seen.push(path.join(".")),
            &["user", "address"]
        );
        assert_eq!(seen, vec!["user.address.city", "user.address.geo.lat"]);
    }
}
