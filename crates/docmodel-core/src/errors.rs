// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types.
//!
//! | Type | Raised by |
//! |------|-----------|
//! | [`FieldIssue`] | One problem with one field of an input record |
//! | [`FieldErrors`] | Path-keyed issue collection returned by validation |
//! | [`DirectiveError`], [`SchemaError`] | Model registration |
//! | [`StoreError`], [`IndexFailure`] | Index submission |

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;

/// Category of a [`FieldIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// A nested object was expected but a literal was found.
    Structural,
    /// An insert/update permission directive was violated.
    Permission,
    /// A string could not be parsed into the declared type.
    TypeCoercion,
    /// A `verify` rule rejected the value.
    RuleViolation,
    /// The directives themselves cannot be applied.
    Configuration
}

/// A single issue found while validating one field.
///
/// The `Display` output is the message reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    /// Nested object expected, literal found.
    #[error("field '{field}' expected dict, but found literal")]
    ExpectedObject {
        /// Field name.
        field: String
    },

    /// Value supplied for a field marked `insert = "no"`.
    #[error("field '{field}' cannot be given a value upon insertion")]
    NotInsertable {
        /// Field name.
        field: String
    },

    /// No value supplied for a field marked `insert = "yes"`.
    #[error("field '{field}' needs a value upon insertion")]
    InsertRequired {
        /// Field name.
        field: String
    },

    /// Value supplied for a field marked `update = "no"`.
    #[error("field '{field}' cannot be given a value upon update")]
    NotUpdatable {
        /// Field name.
        field: String
    },

    /// String value could not be parsed into the declared type.
    #[error("field '{field}' expects '{expected}' but received '{received}'")]
    TypeMismatch {
        /// Field name.
        field:    String,
        /// Declared type name.
        expected: &'static str,
        /// Received text.
        received: String
    },

    /// Declared type has no string coercion.
    #[error("unhandled field '{field}' ({declared} : {received})")]
    UnhandledType {
        /// Field name.
        field:    String,
        /// Declared type name.
        declared: &'static str,
        /// Received text.
        received: String
    },

    /// A `verify` rule failed.
    #[error("{message}")]
    RuleFailed {
        /// Rule name (`email`, `rex`, `enum`, ...).
        rule:    String,
        /// Human readable message.
        message: String
    },

    /// A `rex` rule carries a pattern that does not compile.
    #[error("{pattern} is not a valid regular expression")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String
    },

    /// Unknown rule, or a rule applied to an unsupported type.
    #[error("validation not supported: {rule}")]
    UnsupportedRule {
        /// Rule name.
        rule: String
    }
}

impl FieldIssue {
    /// Category of this issue.
    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        match self {
            Self::ExpectedObject { .. } => IssueKind::Structural,
            Self::NotInsertable { .. } | Self::InsertRequired { .. } | Self::NotUpdatable { .. } => {
                IssueKind::Permission
            }
            Self::TypeMismatch { .. } => IssueKind::TypeCoercion,
            Self::RuleFailed { .. } => IssueKind::RuleViolation,
            Self::UnhandledType { .. } | Self::InvalidPattern { .. } | Self::UnsupportedRule { .. } => {
                IssueKind::Configuration
            }
        }
    }
}

/// Issues keyed by dotted field path.
///
/// Multiple issues per path are kept in insertion order. Nothing is ever
/// removed, so later passes can only add to what earlier passes found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    issues: BTreeMap<String, Vec<FieldIssue>>
}

impl FieldErrors {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue at the path formed by joining `path` with `.`.
    pub fn add<S: AsRef<str>>(&mut self, issue: FieldIssue, path: &[S]) {
        let key = path
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(".");
        self.issues.entry(key).or_default().push(issue);
    }

    /// Issues recorded at a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[FieldIssue]> {
        self.issues.get(path).map(Vec::as_slice)
    }

    /// Messages recorded at a dotted path.
    #[must_use]
    pub fn messages(&self, path: &str) -> Vec<String> {
        self.get(path)
            .map(|issues| issues.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Number of paths with at least one issue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Total number of issues across all paths.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Check if no issue was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Iterate over `(path, issues)` in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldIssue])> {
        self.issues
            .iter()
            .map(|(path, issues)| (path.as_str(), issues.as_slice()))
    }

    /// Paths with at least one issue.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.issues.keys().map(String::as_str)
    }

    /// Plain `path -> [message]` view.
    #[must_use]
    pub fn to_messages(&self) -> BTreeMap<String, Vec<String>> {
        self.issues
            .iter()
            .map(|(path, issues)| {
                (
                    path.clone(),
                    issues.iter().map(ToString::to_string).collect()
                )
            })
            .collect()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.issues.len()))?;
        for (path, issues) in &self.issues {
            let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
            map.serialize_entry(path, &messages)?;
        }
        map.end()
    }
}

/// A directive that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// `auto` directive with an unknown token or no generation method.
    #[error("field '{field}': unrecognized auto directive '{directive}'")]
    MalformedAuto {
        /// Dotted field path.
        field:     String,
        /// Directive text.
        directive: String
    },

    /// `verify` segment that does not parse.
    #[error("field '{field}': malformed verify rule '{segment}'")]
    MalformedRule {
        /// Dotted field path.
        field:   String,
        /// Offending segment.
        segment: String
    },

    /// `verify` rule name that the engine does not know.
    #[error("field '{field}': validation not supported: {rule}")]
    UnknownRule {
        /// Dotted field path.
        field: String,
        /// Rule name.
        rule:  String
    },

    /// `verify` rule applied to a non-string field.
    #[error("field '{field}': rule '{rule}' cannot check values of type '{declared}'")]
    UnsupportedType {
        /// Dotted field path.
        field:    String,
        /// Rule name.
        rule:     String,
        /// Declared type name.
        declared: &'static str
    },

    /// `rex` rule whose pattern does not compile.
    #[error("field '{field}': {pattern} is not a valid regular expression")]
    InvalidPattern {
        /// Dotted field path.
        field:   String,
        /// Pattern text.
        pattern: String
    },

    /// `index`/`unique` entry that yields no index.
    #[error("field '{field}': index entry '{entry}' lists no fields")]
    EmptyIndex {
        /// Dotted field path.
        field: String,
        /// Entry text.
        entry: String
    },

    /// `alphanum(n)` longer than the registry accepts.
    #[error("field '{field}': alphanum length {length} exceeds {max}")]
    AlphanumTooLong {
        /// Dotted field path.
        field:  String,
        /// Requested length.
        length: usize,
        /// Largest accepted length.
        max:    usize
    }
}

/// Model metadata the engine cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// One or more directives failed to parse.
    #[error("model '{model}' has {} invalid directive(s)", issues.len())]
    InvalidDirectives {
        /// Model name.
        model:  String,
        /// Every problem found.
        issues: Vec<DirectiveError>
    },

    /// Nested models reference each other in a loop.
    #[error("model '{model}' nests itself through '{path}'")]
    Cycle {
        /// Model name.
        model: String,
        /// Dotted path closing the loop.
        path:  String
    },

    /// Another model is already registered under the same name.
    #[error("a different model is already registered as '{model}'")]
    Conflict {
        /// Model name.
        model: String
    }
}

/// Failure to reach the collection an index batch targets.
#[derive(Debug, Error)]
pub enum StoreError<E>
where
    E: std::error::Error + 'static
{
    /// The store could not resolve the collection.
    #[error("failed to resolve collection '{collection}': {source}")]
    Resolve {
        /// Collection name.
        collection: String,
        /// Store error.
        #[source]
        source:     E
    }
}

/// Why one index in a batch was not created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexFailure {
    /// The store rejected the request.
    #[error("could not create index '{name}': {reason}")]
    Rejected {
        /// Index name.
        name:   String,
        /// Store error text.
        reason: String
    },

    /// The wait budget ran out before the store answered.
    #[error("could not create index '{name}': timed out")]
    TimedOut {
        /// Index name.
        name: String
    }
}

impl IndexFailure {
    /// Name of the index that failed.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Rejected { name, .. } | Self::TimedOut { name } => name
        }
    }
}
