// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! A custom `DocumentStore` implementation compiles against the seam.

use docmodel::{DocumentStore, IndexDescriptor, async_trait};

#[derive(Debug)]
pub struct NoopError;

impl std::fmt::Display for NoopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("noop")
    }
}

impl std::error::Error for NoopError {}

pub struct Noop;

#[async_trait]
impl DocumentStore for Noop {
    type Target = ();
    type Error = NoopError;

    async fn resolve_target(&self, _collection: &str) -> Result<(), NoopError> {
        Ok(())
    }

    async fn create_index(&self, _target: &(), index: &IndexDescriptor) -> Result<String, NoopError> {
        Ok(index.name().to_owned())
    }
}

fn main() {}
