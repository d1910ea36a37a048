// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsers for the `auto` and `verify` directive strings.
//!
//! # Grammar
//!
//! ```text
//! auto   := token (";" token)*
//! token  := "uuid" | "alphanum(" N ")" | "prefix:" TEXT
//!
//! verify := segment (";" segment)*
//! segment:= RULE | RULE "(" OPTION ")"
//! ```
//!
//! Both parsers return `None` for input they cannot interpret. Callers that
//! need to surface such problems use [`crate::Registry`], which lints
//! directives when a model is registered.

use rand::{Rng, distributions::Alphanumeric};

use crate::FieldDescriptor;

/// Length used by `alphanum(n)` when `n` is not an integer.
pub const DEFAULT_ALPHANUM_LENGTH: usize = 16;

/// Longest `alphanum(n)` accepted by [`crate::Registry`].
pub const MAX_ALPHANUM_LENGTH: usize = 256;

/// Generation method of an auto field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoMethod {
    /// Random version 4 UUID, hyphenated.
    Uuid,

    /// Random string of the given length over `[A-Za-z0-9]`.
    Alphanum(usize)
}

/// Parsed `auto` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoFieldSpec {
    method: AutoMethod,
    prefix: Option<String>
}

impl AutoFieldSpec {
    /// Create a spec without prefix.
    #[must_use]
    pub const fn new(method: AutoMethod) -> Self {
        Self {
            method,
            prefix: None
        }
    }

    /// Set the prefix prepended to every generated value.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Generation method.
    #[must_use]
    pub const fn method(&self) -> AutoMethod {
        self.method
    }

    /// Prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Produce a fresh value.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = self.prefix.clone().unwrap_or_default();
        match self.method {
            AutoMethod::Uuid => out.push_str(&uuid::Uuid::new_v4().to_string()),
            AutoMethod::Alphanum(len) => out.extend(
                rand::thread_rng()
                    .sample_iter(&Alphanumeric)
                    .take(len)
                    .map(char::from)
            )
        }
        out
    }
}

/// Parse an `auto` directive such as `"prefix:usr-;alphanum(8)"`.
///
/// Returns `None` if any token is unrecognized or empty, or if no generation
/// method is named. When several methods are given the last one wins.
///
/// # Examples
///
/// ```rust
/// use docmodel_core::directive::{AutoMethod, parse_auto};
///
/// let spec = parse_auto("prefix:555-;uuid").unwrap();
/// assert_eq!(spec.prefix(), Some("555-"));
/// assert_eq!(spec.method(), AutoMethod::Uuid);
///
/// assert!(parse_auto("sequence").is_none());
/// ```
#[must_use]
pub fn parse_auto(directive: &str) -> Option<AutoFieldSpec> {
    let mut method = None;
    let mut prefix = None;

    for token in directive.split(';').map(str::trim) {
        if let Some(rest) = token.strip_prefix("prefix:") {
            prefix = Some(rest.to_owned());
        } else if token == "uuid" {
            method = Some(AutoMethod::Uuid);
        } else if let Some(rest) = token.strip_prefix("alphanum(") {
            let len = rest.strip_suffix(')')?;
            let len = len.trim().parse().unwrap_or(DEFAULT_ALPHANUM_LENGTH);
            method = Some(AutoMethod::Alphanum(len));
        } else {
            return None;
        }
    }

    Some(AutoFieldSpec {
        method: method?,
        prefix
    })
}

/// One verification rule with its option text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTest {
    rule:   String,
    option: String
}

impl FieldTest {
    /// Create a rule directly.
    #[must_use]
    pub fn new(rule: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            rule:   rule.into(),
            option: option.into()
        }
    }

    /// Rule name.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Option text. For `enum` this is the normalized `|a|b|` form.
    #[must_use]
    pub fn option(&self) -> &str {
        &self.option
    }
}

/// Parse one `verify` segment such as `"rex(^a+$)"`.
///
/// The option extends to the last `)`, so patterns may contain parentheses.
/// Returns `None` when a `(` is not closed.
#[must_use]
pub fn parse_field_test(raw: &str) -> Option<FieldTest> {
    let Some(open) = raw.find('(') else {
        return Some(FieldTest::new(raw, ""));
    };
    let close = raw.rfind(')').filter(|&close| close > open)?;

    let rule = &raw[..open];
    let option = &raw[open + 1..close];
    if rule == "enum" {
        let mut option = option.trim().to_owned();
        if !option.starts_with('|') {
            option.insert(0, '|');
        }
        if !option.ends_with('|') {
            option.push('|');
        }
        return Some(FieldTest::new(rule, option));
    }
    Some(FieldTest::new(rule, option))
}

/// Split a raw `verify` directive into its segments.
///
/// Returns trimmed, non-empty segments in written order.
pub fn verify_segments(directive: &str) -> impl Iterator<Item = &str> {
    directive.split(';').map(str::trim).filter(|s| !s.is_empty())
}

/// All rules attached to a field. Malformed segments are skipped.
#[must_use]
pub fn field_tests(field: &FieldDescriptor) -> Vec<FieldTest> {
    field
        .verify_directive()
        .map(|directive| verify_segments(directive).filter_map(parse_field_test).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeTag;

    #[test]
    fn auto_uuid_with_prefix() {
        let spec = parse_auto("prefix:555-;uuid").unwrap();
        assert_eq!(spec.method(), AutoMethod::Uuid);
        let value = spec.generate();
        assert!(value.starts_with("555-"));
        assert!(uuid::Uuid::parse_str(&value[4..]).is_ok());
    }

    #[test]
    fn auto_alphanum_length() {
        let spec = parse_auto("alphanum(5)").unwrap();
        assert_eq!(spec.method(), AutoMethod::Alphanum(5));
        let value = spec.generate();
        assert_eq!(value.len(), 5);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn auto_alphanum_defaults_length() {
        let spec = parse_auto("alphanum(abc)").unwrap();
        assert_eq!(spec.method(), AutoMethod::Alphanum(DEFAULT_ALPHANUM_LENGTH));
        assert_eq!(spec.generate().len(), 16);
    }

    #[test]
    fn auto_tokens_are_trimmed() {
        let spec = parse_auto(" prefix:ab ; alphanum(3) ").unwrap();
        assert_eq!(spec.prefix(), Some("ab"));
        assert_eq!(spec.generate().len(), 5);
    }

    #[test]
    fn auto_rejects_unknown_and_empty() {
        assert!(parse_auto("sequence").is_none());
        assert!(parse_auto("uuid;;").is_none());
        assert!(parse_auto("").is_none());
        assert!(parse_auto("prefix:abc").is_none());
        assert!(parse_auto("alphanum(4").is_none());
    }

    #[test]
    fn auto_values_differ() {
        let spec = AutoFieldSpec::new(AutoMethod::Alphanum(24));
        assert_ne!(spec.generate(), spec.generate());
    }

    #[test]
    fn field_test_without_option() {
        assert_eq!(parse_field_test("email"), Some(FieldTest::new("email", "")));
    }

    #[test]
    fn field_test_keeps_inner_parens() {
        let test = parse_field_test("rex(^(a|b)+$)").unwrap();
        assert_eq!(test.rule(), "rex");
        assert_eq!(test.option(), "^(a|b)+$");
    }

    #[test]
    fn field_test_enum_is_normalized() {
        let test = parse_field_test("enum( green|yellow|red )").unwrap();
        assert_eq!(test.rule(), "enum");
        assert_eq!(test.option(), "|green|yellow|red|");
    }

    #[test]
    fn field_test_enum_keeps_existing_delimiters() {
        let test = parse_field_test("enum(|green|red|)").unwrap();
        assert_eq!(test.option(), "|green|red|");
        assert_eq!(parse_field_test("enum(|green|red)").unwrap().option(), "|green|red|");
        assert_eq!(parse_field_test("enum(green|red|)").unwrap().option(), "|green|red|");
        assert!(!test.option().contains("||"));
    }

    #[test]
    fn field_test_unclosed_is_malformed() {
        assert!(parse_field_test("rex(^a+$").is_none());
        assert!(parse_field_test("rex)(").is_none());
    }

    #[test]
    fn field_tests_from_descriptor() {
        let field = FieldDescriptor::new("code", TypeTag::String).verify("email; rex(^a+$);;bad(");
        let tests = field_tests(&field);
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].rule(), "email");
        assert_eq!(tests[1], FieldTest::new("rex", "^a+$"));
    }

    #[test]
    fn field_tests_empty_without_directive() {
        let field = FieldDescriptor::new("code", TypeTag::String);
        assert!(field_tests(&field).is_empty());
    }
}
