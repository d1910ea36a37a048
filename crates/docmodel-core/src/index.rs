// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Index descriptors from `index` / `unique` directives.
//!
//! Each directive is a `|`-separated list of entries:
//!
//! | Entry | Name | Fields | Order |
//! |-------|------|--------|-------|
//! | `true` | `idx_<field>` | `[field]` | `[1]` |
//! | `true:-1` | `idx_<field>` | `[field]` | `[-1]` |
//! | `by_email` | `by_email` | `[field]` | `[1]` |
//! | `by_email:-1` | `by_email` | `[field]` | `[-1]` |
//! | `by_pair(a, b:-1)` | `by_pair` | `[a, b]` | `[1, -1]` |
//!
//! Orders that do not parse as integers fall back to `1`.
//!
//! Timestamped document-store models also get `idx_<key>` on the
//! created-at and updated-at keys of the [`Policy`].

use crate::{Capability, FieldDescriptor, ModelDescriptor, Policy};

/// Order used when none is given or it does not parse.
pub const DEFAULT_ORDER: i32 = 1;

/// A named index over one or more fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexDescriptor {
    name:   String,
    unique: bool,
    fields: Vec<String>,
    order:  Vec<i32>
}

impl IndexDescriptor {
    /// Create an index over a single field.
    #[must_use]
    pub fn single(name: impl Into<String>, field: impl Into<String>, order: i32, unique: bool) -> Self {
        Self {
            name: name.into(),
            unique,
            fields: vec![field.into()],
            order: vec![order]
        }
    }

    /// Create a compound index from `(field, order)` pairs.
    ///
    /// Returns `None` when `keys` is empty.
    #[must_use]
    pub fn compound<I, S>(name: impl Into<String>, keys: I, unique: bool) -> Option<Self>
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>
    {
        let (fields, order): (Vec<String>, Vec<i32>) =
            keys.into_iter().map(|(f, o)| (f.into(), o)).unzip();
        if fields.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            unique,
            fields,
            order
        })
    }

    /// Index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the index enforces uniqueness.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Indexed fields.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Sort order per field, parallel to [`fields`](Self::fields).
    #[must_use]
    pub fn order(&self) -> &[i32] {
        &self.order
    }

    /// `(field, order)` pairs.
    pub fn keys(&self) -> impl Iterator<Item = (&str, i32)> {
        self.fields
            .iter()
            .map(String::as_str)
            .zip(self.order.iter().copied())
    }

    /// Check whether two descriptors index the same keys the same way.
    #[must_use]
    pub fn same_keys(&self, other: &Self) -> bool {
        self.unique == other.unique && self.fields == other.fields && self.order == other.order
    }
}

fn parse_order(text: &str) -> i32 {
    text.trim().parse().unwrap_or(DEFAULT_ORDER)
}

fn split_order(text: &str) -> (&str, i32) {
    match text.split_once(':') {
        Some((head, order)) => (head.trim(), parse_order(order)),
        None => (text.trim(), DEFAULT_ORDER)
    }
}

/// Parse one index entry for `field`.
///
/// Returns `None` only for a compound entry that lists no fields.
///
/// # Examples
///
/// ```rust
/// use docmodel_core::index::parse_index;
///
/// let idx = parse_index("idx_name(field1, field2:-1, field3)", "field1", false).unwrap();
/// assert_eq!(idx.name(), "idx_name");
/// assert_eq!(idx.fields(), ["field1", "field2", "field3"]);
/// assert_eq!(idx.order(), [1, -1, 1]);
/// ```
#[must_use]
pub fn parse_index(entry: &str, field: &str, unique: bool) -> Option<IndexDescriptor> {
    let entry = entry.trim();

    if let Some(open) = entry.find('(') {
        let name = entry[..open].trim();
        let rest = &entry[open + 1..];
        let inner = rest.find(')').map_or(rest, |close| &rest[..close]);
        let keys = inner
            .split(',')
            .map(split_order)
            .filter(|(f, _)| !f.is_empty());
        return IndexDescriptor::compound(name, keys, unique);
    }

    let (name, order) = split_order(entry);
    let name = if name == "true" {
        format!("idx_{field}")
    } else {
        name.to_owned()
    };
    Some(IndexDescriptor::single(name, field, order, unique))
}

fn split_entries(directive: &str) -> impl Iterator<Item = &str> {
    directive.split('|').map(str::trim).filter(|e| !e.is_empty())
}

/// Indexes declared on one field, stored under `path`.
///
/// `index` entries come first, then `unique` entries, each in written order.
#[must_use]
pub fn field_indexes(field: &FieldDescriptor, path: &str) -> Vec<IndexDescriptor> {
    let plain = field
        .index_directive()
        .into_iter()
        .flat_map(split_entries)
        .filter_map(|entry| parse_index(entry, path, false));
    let unique = field
        .unique_directive()
        .into_iter()
        .flat_map(split_entries)
        .filter_map(|entry| parse_index(entry, path, true));
    plain.chain(unique).collect()
}

/// All indexes of a model in field declaration order, under
/// [`Policy::DEFAULT`].
///
/// Fields of nested models are addressed by dotted path.
#[must_use]
pub fn model_indexes(model: &ModelDescriptor) -> Vec<IndexDescriptor> {
    model_indexes_with(model, &Policy::DEFAULT)
}

/// Like [`model_indexes`], with timestamp keys taken from `policy`.
///
/// Timestamp indexes follow the field indexes.
#[must_use]
pub fn model_indexes_with(model: &ModelDescriptor, policy: &Policy) -> Vec<IndexDescriptor> {
    let mut out = Vec::new();
    collect(model, "", &mut out);
    if model.has(Capability::DocumentStore) && model.has(Capability::Timestamped) {
        for key in [policy.created_at_key(), policy.updated_at_key()] {
            out.push(IndexDescriptor::single(format!("idx_{key}"), key, DEFAULT_ORDER, false));
        }
    }
    out
}

fn collect(model: &ModelDescriptor, prefix: &str, out: &mut Vec<IndexDescriptor>) {
    for field in model.fields() {
        let path = if prefix.is_empty() {
            field.name().to_owned()
        } else {
            format!("{prefix}.{}", field.name())
        };
        out.extend(field_indexes(field, &path));
        if let Some(nested) = field.type_tag().nested() {
            collect(nested, &path, out);
        }
    }
}
