// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod abi;
pub mod db;
pub mod names;
pub mod source_store;
