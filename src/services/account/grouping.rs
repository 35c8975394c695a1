// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::snapshot::{BlockGroup, TransactionRecord};
use alloy::primitives::Address;
use std::collections::BTreeMap;

/// Split scanned transactions into (sent, received) relative to `address`.
///
/// Anything not sent by `address` counts as received; the scanner only
/// hands over transactions that touch it.
pub fn partition_by_direction(
    address: Address,
    transactions: Vec<TransactionRecord>,
) -> (Vec<TransactionRecord>, Vec<TransactionRecord>) {
    transactions.into_iter().partition(|tx| tx.from == address)
}

/// Merge sent then received into per-block groups, newest block first,
/// keeping at most `max_groups`.
///
/// Within a group, sent transactions precede received ones and each side
/// keeps the order it arrived in.
pub fn group_by_block(
    sent: Vec<TransactionRecord>,
    received: Vec<TransactionRecord>,
    max_groups: usize,
) -> Vec<BlockGroup> {
    let mut by_block: BTreeMap<u64, Vec<TransactionRecord>> = BTreeMap::new();
    for tx in sent.into_iter().chain(received) {
        by_block.entry(tx.block_number).or_default().push(tx);
    }
    by_block
        .into_iter()
        .rev()
        .take(max_groups)
        .map(|(block_number, transactions)| BlockGroup {
            block_number,
            transactions,
        })
        .collect()
}
