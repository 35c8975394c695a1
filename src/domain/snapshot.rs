// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Value types assembled by the account pipeline.
//!
//! Everything here is built fresh for one request and never mutated
//! after the aggregator hands it out.

use crate::domain::constants::BLOCK_COUNT;
use alloy::primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LatestBlock {
    pub number: u64,
    pub hash: B256,
}

/// Bounded block range examined for activity, anchored at the chain head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanWindow {
    pub last_block: u64,
    pub from_block: u64,
    pub block_count: u64,
}

impl ScanWindow {
    pub fn new(last_block: u64) -> Self {
        Self::with_span(last_block, BLOCK_COUNT)
    }

    /// `span` is clamped to at least one block.
    pub fn with_span(last_block: u64, span: u64) -> Self {
        let span = span.max(1);
        let from_block = if last_block > span {
            last_block - span
        } else {
            0
        };
        // Never reaches below block zero: block_count <= from_block + 1 <= last_block + 1.
        let block_count = span.min(from_block + 1);
        Self {
            last_block,
            from_block,
            block_count,
        }
    }

    /// Block numbers to fetch, newest first.
    pub fn block_numbers(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.block_count).map(move |offset| self.last_block - offset)
    }

    pub fn lowest_block(&self) -> u64 {
        self.last_block + 1 - self.block_count
    }
}

/// One decoded `debug_storageRangeAt` entry.
///
/// `slot` is the hashed slot the node keys its response by; `key` is the
/// preimage when the node knows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StorageEntry {
    pub slot: B256,
    pub key: Option<B256>,
    pub value: B256,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub from: Address,
    pub to: Option<Address>,
    pub block_number: u64,
    /// Remaining RPC fields, passed through untouched.
    pub fields: serde_json::Value,
}

impl TransactionRecord {
    pub fn touches(&self, address: Address) -> bool {
        self.from == address || self.to == Some(address)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChainBlock {
    pub number: u64,
    pub hash: B256,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGroup {
    pub block_number: u64,
    pub transactions: Vec<TransactionRecord>,
}

/// Verified-source document as stored by the verification service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifiedSource {
    #[serde(default)]
    pub name: Option<String>,
    /// Either the ABI JSON encoded as a string, or the ABI array inline.
    #[serde(default)]
    pub abi: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConstantCallResult {
    pub name: String,
    pub result: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub address: Address,
    pub latest_block_number: u64,
    pub latest_block_hash: B256,
    pub scan_window: ScanWindow,
    pub balance: U256,
    pub raw_bytecode: Bytes,
    pub is_contract: bool,
    pub disassembly_text: Option<String>,
    pub storage_entries: Vec<StorageEntry>,
    pub verified_source: Option<VerifiedSource>,
    pub constant_call_results: Vec<ConstantCallResult>,
    pub block_groups: Vec<BlockGroup>,
    pub display_name: Option<String>,
}

impl AccountSnapshot {
    pub fn transaction_count(&self) -> usize {
        self.block_groups.iter().map(|g| g.transactions.len()).sum()
    }
}
