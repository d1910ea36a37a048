// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validation pipeline.
//!
//! A record is checked and completed by a fixed sequence of passes, each a
//! full traversal of the model:
//!
//! | # | Pass | Insert | Update | Needs |
//! |---|------|:------:|:------:|-------|
//! | 1 | Permission check | ✓ | ✓ | |
//! | 2 | Defaults | ✓ | | |
//! | 3 | Trim | ✓ | ✓ | |
//! | 4 | Type coercion | ✓ | ✓ | [`Capability::DocumentStore`] |
//! | 5 | Timestamps | ✓ | ✓ | [`Capability::DocumentStore`] + [`Capability::Timestamped`] |
//! | 6 | Auto fields | ✓ | | |
//! | 7 | Rule verification | ✓ | ✓ | |
//!
//! Every pass runs regardless of what earlier passes found, and issues only
//! ever accumulate.
//!
//! # Example
//!
//! ```rust
//! use docmodel_core::{Action, FieldDescriptor, ModelDescriptor, Permission, Record, TypeTag, validate};
//!
//! let model = ModelDescriptor::new("Note")
//!     .field(FieldDescriptor::new("field1", TypeTag::String).insert(Permission::Required));
//!
//! let mut data = Record::new();
//! let outcome = validate(&model, Action::Insert, &mut data);
//! assert!(!outcome.is_success());
//! assert_eq!(
//!     outcome.errors().messages("field1"),
//!     vec!["field 'field1' needs a value upon insertion"]
//! );
//! ```

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;
use tracing::trace;

use crate::{
    Capability, FieldDescriptor, FieldErrors, FieldIssue, ModelDescriptor, Permission, Policy,
    Record, TypeTag,
    directive::{field_tests, parse_auto},
    rules::value_text,
    traverse::traverse
};

/// Field name that maps to the store key alias on document-store models.
pub const ID_FIELD: &str = "id";

/// Kind of write a record is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// New document.
    Insert,
    /// Partial update of an existing document.
    Update
}

/// Result of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    errors: FieldErrors
}

impl Outcome {
    /// Check if no issue was found.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Issues found, keyed by dotted path.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Split into success flag and issues.
    #[must_use]
    pub fn into_parts(self) -> (bool, FieldErrors) {
        (self.errors.is_empty(), self.errors)
    }
}

/// Runs the validation passes under a [`Policy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: Policy
}

impl Validator {
    /// Create a validator with the given policy.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self {
            policy
        }
    }

    /// Policy in use.
    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Validate `data` for `action`, completing it in place.
    ///
    /// Structural issues (a literal where a nested object belongs) are
    /// reported once, by the first pass.
    pub fn validate(&self, model: &ModelDescriptor, action: Action, data: &mut Record) -> Outcome {
        let mut errs = FieldErrors::new();
        let store = model.has(Capability::DocumentStore);

        traverse(model, data, &mut errs, &mut |field, level, path, errs| {
            check_permission(field, level, path, errs, action);
        });

        if action == Action::Insert {
            pass(model, data, |field, level, _| apply_default(field, level));
        }

        pass(model, data, |field, level, _| trim(field, level));

        if store {
            pass(model, data, |field, level, path| {
                coerce(field, level, path, &mut errs);
            });
        }

        if store && model.has(Capability::Timestamped) {
            self.stamp(data, action);
        }

        if action == Action::Insert {
            pass(model, data, |field, level, _| generate(field, level, store));
        }

        pass(model, data, |field, level, path| {
            verify(field, level, path, &mut errs);
        });

        trace!(
            model = model.name(),
            ?action,
            issues = errs.issue_count(),
            "record validated"
        );
        Outcome {
            errors: errs
        }
    }

    fn stamp(&self, data: &mut Record, action: Action) {
        let now = Value::String(self.policy.timestamp());
        if action == Action::Insert {
            data.insert(self.policy.created_at_key().to_owned(), now.clone());
        }
        data.insert(self.policy.updated_at_key().to_owned(), now);
    }
}

/// Traverse without collecting structural issues again.
fn pass<F>(model: &ModelDescriptor, data: &mut Record, mut op: F)
where
    F: FnMut(&FieldDescriptor, &mut Record, &[&str])
{
    let mut seen = FieldErrors::new();
    traverse(model, data, &mut seen, &mut |field, level, path, _| {
        op(field, level, path);
    });
}

/// Validate with [`Policy::DEFAULT`].
pub fn validate(model: &ModelDescriptor, action: Action, data: &mut Record) -> Outcome {
    Validator::default().validate(model, action, data)
}

fn check_permission(
    field: &FieldDescriptor,
    level: &Record,
    path: &[&str],
    errs: &mut FieldErrors,
    action: Action
) {
    let present = level.contains_key(field.name());
    let name = field.name().to_owned();
    let issue = match action {
        Action::Insert => match (field.insert_permission(), present) {
            (Permission::Forbidden, true) => Some(FieldIssue::NotInsertable {
                field: name
            }),
            (Permission::Required, false) => Some(FieldIssue::InsertRequired {
                field: name
            }),
            _ => None
        },
        Action::Update => match (field.update_permission(), present) {
            (Permission::Forbidden, true) => Some(FieldIssue::NotUpdatable {
                field: name
            }),
            _ => None
        }
    };
    if let Some(issue) = issue {
        errs.add(issue, path);
    }
}

fn apply_default(field: &FieldDescriptor, level: &mut Record) {
    if level.contains_key(field.name()) || field.insert_permission() == Permission::Forbidden {
        return;
    }
    if let Some(default) = field.default_directive().filter(|d| !d.is_empty()) {
        level.insert(field.name().to_owned(), Value::String(default.to_owned()));
    }
}

fn trim(field: &FieldDescriptor, level: &mut Record) {
    if !field.trims() {
        return;
    }
    if let Some(Value::String(s)) = level.get_mut(field.name()) {
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            *s = trimmed.to_owned();
        }
    }
}

/// Types that accept any string as is.
const fn is_textual(tag: &TypeTag) -> bool {
    matches!(tag, TypeTag::String | TypeTag::Any)
}

/// RFC 3339 timestamp, normalized to UTC, or a plain `YYYY-MM-DD` date.
fn parse_time(text: &str) -> Option<Value> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(Value::String(
            at.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| Value::String(date.to_string()))
}

fn coerce(field: &FieldDescriptor, level: &mut Record, path: &[&str], errs: &mut FieldErrors) {
    let tag = field.type_tag();
    if is_textual(tag) {
        return;
    }
    let Some(Value::String(text)) = level.get(field.name()) else {
        return;
    };

    let mismatch = || FieldIssue::TypeMismatch {
        field:    field.name().to_owned(),
        expected: tag.name(),
        received: text.clone()
    };
    let coerced = match tag {
        TypeTag::Bool => Ok(Value::Bool(matches!(
            text.as_str(),
            "1" | "yes" | "true" | "Y" | "y"
        ))),
        TypeTag::I32 => text.parse::<i32>().map(Value::from).map_err(|_| mismatch()),
        TypeTag::I64 => text.parse::<i64>().map(Value::from).map_err(|_| mismatch()),
        TypeTag::Time => parse_time(text).ok_or_else(mismatch),
        TypeTag::Uuid => uuid::Uuid::parse_str(text)
            .map(|id| Value::String(id.hyphenated().to_string()))
            .map_err(|_| mismatch()),
        _ => Err(FieldIssue::UnhandledType {
            field:    field.name().to_owned(),
            declared: tag.name(),
            received: text.clone()
        })
    };

    match coerced {
        Ok(value) => {
            level.insert(field.name().to_owned(), value);
        }
        Err(issue) => errs.add(issue, path)
    }
}

fn generate(field: &FieldDescriptor, level: &mut Record, store: bool) {
    if level.contains_key(field.name()) {
        return;
    }
    let Some(spec) = field.auto_directive().and_then(parse_auto) else {
        return;
    };
    let key = match field.key_alias() {
        Some(alias) if store && field.name() == ID_FIELD => alias,
        _ => field.name()
    };
    level.insert(key.to_owned(), Value::String(spec.generate()));
}

fn verify(field: &FieldDescriptor, level: &Record, path: &[&str], errs: &mut FieldErrors) {
    let Some(value) = level.get(field.name()) else {
        return;
    };
    for test in field_tests(field) {
        if let Err(issue) = test.verify(field.type_tag(), value) {
            trace!(field = field.name(), value = %value_text(value), %issue, "rule failed");
            errs.add(issue, path);
        }
    }
}
