// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docmodel::Model;

#[derive(Model)]
pub struct Profile {
    pub name:         String,
    #[field(rename = "name")]
    pub display_name: String
}

fn main() {}
