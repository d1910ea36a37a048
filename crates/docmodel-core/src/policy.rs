// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validation policy.
//!
//! Settings that shape how records are filled in, passed explicitly to
//! [`crate::Validator`]. Use [`Policy::DEFAULT`] unless a test needs a
//! fixed clock or a model stores timestamps under other keys.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use docmodel_core::Policy;
//!
//! fn frozen() -> chrono::DateTime<Utc> {
//!     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
//! }
//!
//! let policy = Policy::DEFAULT.with_clock(frozen);
//! assert_eq!(policy.timestamp(), "2024-01-01T00:00:00.000Z");
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamp keys and clock used by the validation pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    created_at_key: &'static str,
    updated_at_key: &'static str,
    clock:          fn() -> DateTime<Utc>
}

impl Policy {
    /// `created_at` / `updated_at` with the system clock.
    pub const DEFAULT: Self = Self {
        created_at_key: "created_at",
        updated_at_key: "updated_at",
        clock:          Utc::now
    };

    /// Use other timestamp keys.
    #[must_use]
    pub const fn with_keys(mut self, created_at: &'static str, updated_at: &'static str) -> Self {
        self.created_at_key = created_at;
        self.updated_at_key = updated_at;
        self
    }

    /// Use another clock.
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Key written on insert.
    #[must_use]
    pub const fn created_at_key(&self) -> &'static str {
        self.created_at_key
    }

    /// Key written on insert and update.
    #[must_use]
    pub const fn updated_at_key(&self) -> &'static str {
        self.updated_at_key
    }

    /// Current time according to the policy clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Current time as RFC 3339 text with millisecond precision.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
