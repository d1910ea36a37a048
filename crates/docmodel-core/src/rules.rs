// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field test engine.
//!
//! | Rule | Option | Passes when |
//! |------|--------|-------------|
//! | `email` | none | value is a syntactically valid e-mail address |
//! | `rex` | pattern | pattern matches somewhere in the value |
//! | `enum` | `a\|b\|c` | value equals one of the listed tokens |
//!
//! Rules only apply to string fields.

use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

use crate::{FieldIssue, TypeTag, directive::FieldTest};

/// Rule names understood by [`FieldTest::verify`].
pub const KNOWN_RULES: &[&str] = &["email", "rex", "enum"];

/// Text of a JSON value as seen by the rules.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string()
    }
}

impl FieldTest {
    /// Check a value of a field with the given declared type.
    ///
    /// # Errors
    ///
    /// - [`FieldIssue::RuleFailed`] when the value does not satisfy the rule
    /// - [`FieldIssue::InvalidPattern`] when a `rex` pattern does not compile
    /// - [`FieldIssue::UnsupportedRule`] for unknown rules or non-string fields
    pub fn verify(&self, tag: &TypeTag, value: &Value) -> Result<(), FieldIssue> {
        if !tag.is_string() {
            return Err(self.unsupported());
        }
        let text = value_text(value);

        match self.rule() {
            "email" => {
                if text.validate_email() {
                    Ok(())
                } else {
                    Err(self.failed(format!("{text} is not a valid email")))
                }
            }
            "rex" => {
                let re = Regex::new(self.option()).map_err(|_| FieldIssue::InvalidPattern {
                    pattern: self.option().to_owned()
                })?;
                if re.is_match(&text) {
                    Ok(())
                } else {
                    Err(self.failed(format!("{text} does not match the regular expression")))
                }
            }
            "enum" => {
                if self.option().contains(&format!("|{text}|")) {
                    Ok(())
                } else {
                    Err(self.failed(format!("{text} must be one of predefined set")))
                }
            }
            _ => Err(self.unsupported())
        }
    }

    fn failed(&self, message: String) -> FieldIssue {
        FieldIssue::RuleFailed {
            rule: self.rule().to_owned(),
            message
        }
    }

    fn unsupported(&self) -> FieldIssue {
        FieldIssue::UnsupportedRule {
            rule: self.rule().to_owned()
        }
    }
}
