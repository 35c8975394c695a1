// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod aggregator;
pub mod constant_calls;
pub mod disassembler;
pub mod grouping;
pub mod scanner;

pub use aggregator::{AccountAggregator, AggregatorSettings};
