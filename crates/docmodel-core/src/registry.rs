// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model registry.
//!
//! Validation silently skips directives it cannot parse. Registering a model
//! is where such mistakes surface: [`Registry::register`] checks every
//! directive of the model and of all models nested in it, and refuses the
//! model if anything is wrong.
//!
//! | Check | Error |
//! |-------|-------|
//! | `auto` does not parse | [`DirectiveError::MalformedAuto`] |
//! | `alphanum(n)` above [`MAX_ALPHANUM_LENGTH`] | [`DirectiveError::AlphanumTooLong`] |
//! | `verify` segment does not parse | [`DirectiveError::MalformedRule`] |
//! | unknown rule | [`DirectiveError::UnknownRule`] |
//! | rule on a non-string field | [`DirectiveError::UnsupportedType`] |
//! | `rex` pattern does not compile | [`DirectiveError::InvalidPattern`] |
//! | compound index without fields | [`DirectiveError::EmptyIndex`] |
//! | model reaches itself through any nested field | [`SchemaError::Cycle`] |

use std::{collections::BTreeMap, ptr};

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    DirectiveError, FieldDescriptor, Model, ModelDescriptor, SchemaError,
    directive::{AutoMethod, MAX_ALPHANUM_LENGTH, parse_auto, parse_field_test, verify_segments},
    index::parse_index,
    rules::KNOWN_RULES
};

/// Registered models by name.
#[derive(Debug, Default)]
pub struct Registry {
    models: BTreeMap<String, &'static ModelDescriptor>
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check and register a descriptor.
    ///
    /// Registering the same descriptor twice is a no-op.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidDirectives`] listing every bad directive
    /// - [`SchemaError::Cycle`] when the model contains itself
    /// - [`SchemaError::Conflict`] when another descriptor has the same name
    pub fn register(&mut self, model: &'static ModelDescriptor) -> Result<(), SchemaError> {
        if let Some(existing) = self.models.get(model.name()) {
            if ptr::eq(*existing, model) || *existing == model {
                return Ok(());
            }
            warn!(model = model.name(), "conflicting registration");
            return Err(SchemaError::Conflict {
                model: model.name().to_owned()
            });
        }

        if let Some(path) = find_cycle(model) {
            warn!(model = model.name(), %path, "model nests itself");
            return Err(SchemaError::Cycle {
                model: model.name().to_owned(),
                path
            });
        }

        let issues = lint(model);
        if !issues.is_empty() {
            for issue in &issues {
                warn!(model = model.name(), %issue, "invalid directive");
            }
            return Err(SchemaError::InvalidDirectives {
                model: model.name().to_owned(),
                issues
            });
        }

        debug!(
            model = model.name(),
            collection = model.collection_name(),
            fields = model.fields().len(),
            "model registered"
        );
        self.models.insert(model.name().to_owned(), model);
        Ok(())
    }

    /// Register a model type.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn register_model<M: Model>(&mut self) -> Result<(), SchemaError> {
        self.register(M::descriptor())
    }

    /// Look up a model by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static ModelDescriptor> {
        self.models.get(name).copied()
    }

    /// Registered models in name order.
    pub fn models(&self) -> impl Iterator<Item = &'static ModelDescriptor> + '_ {
        self.models.values().copied()
    }

    /// Number of registered models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Check every directive of `model` and its nested models.
#[must_use]
pub fn lint(model: &ModelDescriptor) -> Vec<DirectiveError> {
    let mut issues = Vec::new();
    let mut open = vec![model];
    lint_model(model, "", &mut open, &mut issues);
    issues
}

fn lint_model<'a>(
    model: &'a ModelDescriptor,
    prefix: &str,
    open: &mut Vec<&'a ModelDescriptor>,
    issues: &mut Vec<DirectiveError>
) {
    for field in model.fields() {
        let path = join(prefix, field.name());
        lint_field(field, &path, issues);

        if let Some(nested) = field.type_tag().nested()
            && !open.iter().any(|m| ptr::eq(*m, nested))
        {
            open.push(nested);
            lint_model(nested, &path, open, issues);
            open.pop();
        }
    }
}

fn lint_field(field: &FieldDescriptor, path: &str, issues: &mut Vec<DirectiveError>) {
    if let Some(auto) = field.auto_directive() {
        match parse_auto(auto).map(|spec| spec.method()) {
            None => issues.push(DirectiveError::MalformedAuto {
                field:     path.to_owned(),
                directive: auto.to_owned()
            }),
            Some(AutoMethod::Alphanum(length)) if length > MAX_ALPHANUM_LENGTH => {
                issues.push(DirectiveError::AlphanumTooLong {
                    field: path.to_owned(),
                    length,
                    max: MAX_ALPHANUM_LENGTH
                });
            }
            Some(_) => {}
        }
    }

    for segment in field.verify_directive().map(verify_segments).into_iter().flatten() {
        let Some(test) = parse_field_test(segment) else {
            issues.push(DirectiveError::MalformedRule {
                field:   path.to_owned(),
                segment: segment.to_owned()
            });
            continue;
        };
        if !KNOWN_RULES.contains(&test.rule()) {
            issues.push(DirectiveError::UnknownRule {
                field: path.to_owned(),
                rule:  test.rule().to_owned()
            });
        } else if !field.type_tag().is_string() {
            issues.push(DirectiveError::UnsupportedType {
                field:    path.to_owned(),
                rule:     test.rule().to_owned(),
                declared: field.type_tag().name()
            });
        } else if test.rule() == "rex" && Regex::new(test.option()).is_err() {
            issues.push(DirectiveError::InvalidPattern {
                field:   path.to_owned(),
                pattern: test.option().to_owned()
            });
        }
    }

    let entries = [field.index_directive(), field.unique_directive()];
    for entry in entries.into_iter().flatten().flat_map(|d| d.split('|')) {
        let entry = entry.trim();
        if !entry.is_empty() && parse_index(entry, path, false).is_none() {
            issues.push(DirectiveError::EmptyIndex {
                field: path.to_owned(),
                entry: entry.to_owned()
            });
        }
    }
}

/// Dotted path through which `model` reaches itself, if any.
///
/// Every nesting counts, so a model that points back at an ancestor is
/// reported even when the data could end the chain.
#[must_use]
pub fn find_cycle(model: &ModelDescriptor) -> Option<String> {
    let mut open = vec![model];
    search(model, "", &mut open)
}

fn search<'a>(
    model: &'a ModelDescriptor,
    prefix: &str,
    open: &mut Vec<&'a ModelDescriptor>
) -> Option<String> {
    for field in model.fields() {
        let Some(nested) = field.type_tag().nested() else {
            continue;
        };
        let path = join(prefix, field.name());
        if open.iter().any(|m| ptr::eq(*m, nested)) {
            return Some(path);
        }
        open.push(nested);
        let found = search(nested, &path, open);
        open.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}
