// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docmodel::Model;

#[derive(Model)]
pub struct Account {
    #[field(insert = "always")]
    pub owner: String
}

fn main() {}
