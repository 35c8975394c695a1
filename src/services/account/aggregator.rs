// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Builds one [`AccountSnapshot`] from the chain, the verified-source
//! store and the static name table.
//!
//! Stages run strictly in sequence: head block, balance, code,
//! disassembly and storage, source lookup, constant calls, then the block
//! scan. Any fatal error returns immediately and later stages never run.

use crate::common::error::AppError;
use crate::common::parsing::parse_address_hex;
use crate::data::abi::{AbiEntry, parse_ordered_abi};
use crate::data::names::NameTable;
use crate::data::source_store::{SourceStore, source_key};
use crate::domain::constants::{
    BLOCK_COUNT, DEFAULT_SCAN_CONCURRENCY, DEFAULT_SCAN_TIMEOUT_MS, MAX_BLOCK_GROUPS,
    STORAGE_MAX_ENTRIES, STORAGE_TX_INDEX,
};
use crate::domain::snapshot::{AccountSnapshot, ScanWindow, StorageEntry, VerifiedSource};
use crate::network::chain_client::ChainClient;
use crate::services::account::constant_calls::evaluate_constant_calls;
use crate::services::account::disassembler::{disassemble, is_wasm_module};
use crate::services::account::grouping::{group_by_block, partition_by_direction};
use crate::services::account::scanner::{ScanLimits, TransactionWindowScanner};
use alloy::primitives::{Address, B256};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub struct AggregatorSettings {
    pub scan_span: u64,
    pub storage_max_entries: usize,
    pub max_block_groups: usize,
    pub scan: ScanLimits,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            scan_span: BLOCK_COUNT,
            storage_max_entries: STORAGE_MAX_ENTRIES,
            max_block_groups: MAX_BLOCK_GROUPS,
            scan: ScanLimits {
                concurrency: DEFAULT_SCAN_CONCURRENCY,
                deadline: Duration::from_millis(DEFAULT_SCAN_TIMEOUT_MS),
            },
        }
    }
}

pub struct AccountAggregator {
    client: Arc<dyn ChainClient>,
    sources: Arc<dyn SourceStore>,
    names: Arc<NameTable>,
    settings: AggregatorSettings,
}

struct ContractView {
    disassembly_text: Option<String>,
    storage_entries: Vec<StorageEntry>,
}

impl AccountAggregator {
    pub fn new(
        client: Arc<dyn ChainClient>,
        sources: Arc<dyn SourceStore>,
        names: Arc<NameTable>,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            client,
            sources,
            names,
            settings,
        }
    }

    /// Parse `raw` as a hex address, then build its snapshot.
    pub async fn build_for(&self, raw: &str) -> Result<AccountSnapshot, AppError> {
        let address = parse_address_hex(raw.trim())
            .ok_or_else(|| AppError::InvalidAddress(raw.to_string()))?;
        self.build_snapshot(address).await
    }

    pub async fn build_snapshot(&self, address: Address) -> Result<AccountSnapshot, AppError> {
        match self.assemble(address).await {
            Ok(snapshot) => {
                tracing::info!(
                    target: "account",
                    %address,
                    block = snapshot.latest_block_number,
                    contract = snapshot.is_contract,
                    storage = snapshot.storage_entries.len(),
                    calls = snapshot.constant_call_results.len(),
                    groups = snapshot.block_groups.len(),
                    "Account snapshot built"
                );
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!(target: "account", %address, error = %e, "Account snapshot failed");
                Err(e)
            }
        }
    }

    async fn assemble(&self, address: Address) -> Result<AccountSnapshot, AppError> {
        let head = self.client.latest_block().await?;
        let window = ScanWindow::with_span(head.number, self.settings.scan_span);
        tracing::debug!(target: "account", %address, head = head.number, from = window.from_block, "Resolved chain head");

        let balance = self.client.balance(address).await?;
        tracing::debug!(target: "account", %address, %balance, "Fetched balance");
        let raw_bytecode = self.client.code(address).await?;
        let is_contract = !raw_bytecode.is_empty();
        tracing::debug!(target: "account", %address, bytes = raw_bytecode.len(), contract = is_contract, "Fetched code");

        let contract = if is_contract {
            Some(self.inspect_contract(address, head.hash, &raw_bytecode).await?)
        } else {
            None
        };

        let verified_source = self.lookup_source(address).await;
        tracing::debug!(
            target: "source",
            %address,
            found = verified_source.is_some(),
            abi = verified_source.as_ref().is_some_and(|s| s.abi.is_some()),
            "Verified source lookup"
        );

        let constant_call_results = match verified_source.as_ref().and_then(parsable_abi) {
            Some(abi) if is_contract => {
                evaluate_constant_calls(self.client.as_ref(), address, &abi).await
            }
            _ => Vec::new(),
        };
        tracing::debug!(target: "account", %address, calls = constant_call_results.len(), "Constant calls evaluated");

        let scanned = TransactionWindowScanner::new(self.client.clone(), self.settings.scan)
            .scan(window, address)
            .await?;
        let (sent, received) = partition_by_direction(address, scanned);
        let block_groups = group_by_block(sent, received, self.settings.max_block_groups);
        tracing::debug!(target: "account", %address, groups = block_groups.len(), "Grouped activity by block");

        let display_name = verified_source
            .as_ref()
            .and_then(|s| s.name.clone())
            .or_else(|| self.names.get(&address).map(str::to_string));

        let (disassembly_text, storage_entries) = match contract {
            Some(view) => (view.disassembly_text, view.storage_entries),
            None => (None, Vec::new()),
        };

        Ok(AccountSnapshot {
            address,
            latest_block_number: head.number,
            latest_block_hash: head.hash,
            scan_window: window,
            balance,
            raw_bytecode,
            is_contract,
            disassembly_text,
            storage_entries,
            verified_source,
            constant_call_results,
            block_groups,
            display_name,
        })
    }

    async fn inspect_contract(
        &self,
        address: Address,
        block_hash: B256,
        code: &[u8],
    ) -> Result<ContractView, AppError> {
        let disassembly_text = if is_wasm_module(code) {
            Some(disassemble(code)?)
        } else {
            None
        };

        let storage_entries = self
            .client
            .storage_range_at(
                block_hash,
                STORAGE_TX_INDEX,
                address,
                B256::ZERO,
                self.settings.storage_max_entries,
            )
            .await?;
        tracing::debug!(target: "account", %address, entries = storage_entries.len(), "Fetched storage range");

        Ok(ContractView {
            disassembly_text,
            storage_entries,
        })
    }

    /// Store failures are treated like a miss.
    async fn lookup_source(&self, address: Address) -> Option<VerifiedSource> {
        match self.sources.get(&source_key(address)).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(target: "source", %address, error = %e, "Verified source lookup failed");
                None
            }
        }
    }
}

fn parsable_abi(source: &VerifiedSource) -> Option<Vec<AbiEntry>> {
    let raw = source.abi.as_ref()?;
    match parse_ordered_abi(raw) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!(target: "source", error = %e, "Verified source ABI unparsable; skipping constant calls");
            None
        }
    }
}
