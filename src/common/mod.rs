// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

pub mod data_path;
pub mod parsing;

// Shared alias for the error module.
pub use crate::domain::error;
