// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docmodel::Model;

#[derive(Model)]
pub struct Wrapper<T> {
    pub inner: T
}

fn main() {}
