// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Narrow RPC surface the account pipeline consumes.
//!
//! [`ChainClient`] is the seam between the aggregator and the node; the
//! alloy-backed [`RpcChainClient`] is the production implementation.

use crate::common::error::AppError;
use crate::domain::snapshot::{ChainBlock, LatestBlock, StorageEntry, TransactionRecord};
use crate::network::provider::NodeProvider;
use alloy::consensus::Transaction as ConsensusTx;
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::eips::BlockNumberOrTag;
use alloy::network::TransactionResponse;
use alloy::primitives::{Address, B256, Bytes, TxKind, U256};
use alloy::providers::Provider;
use alloy::rpc::types::{Transaction, TransactionInput, TransactionRequest};
use alloy_json_abi::Function;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn latest_block(&self) -> Result<LatestBlock, AppError>;

    async fn balance(&self, address: Address) -> Result<U256, AppError>;

    async fn code(&self, address: Address) -> Result<Bytes, AppError>;

    async fn storage_range_at(
        &self,
        block_hash: B256,
        tx_index: u64,
        address: Address,
        start_key: B256,
        max_entries: usize,
    ) -> Result<Vec<StorageEntry>, AppError>;

    /// Block `number` with full transaction bodies.
    async fn block_with_transactions(&self, number: u64) -> Result<ChainBlock, AppError>;

    /// `eth_call` a zero-argument function and decode its outputs.
    async fn call_constant(
        &self,
        address: Address,
        function: &Function,
    ) -> Result<Vec<DynSolValue>, AppError>;
}

#[derive(Clone)]
pub struct RpcChainClient {
    provider: NodeProvider,
}

impl RpcChainClient {
    pub fn new(provider: NodeProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn latest_block(&self) -> Result<LatestBlock, AppError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| AppError::transport("eth_getBlockByNumber", e))?
            .ok_or_else(|| AppError::transport("eth_getBlockByNumber", "latest block missing"))?;
        Ok(LatestBlock {
            number: block.header.inner.number,
            hash: block.header.hash,
        })
    }

    async fn balance(&self, address: Address) -> Result<U256, AppError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| AppError::transport("eth_getBalance", e))
    }

    async fn code(&self, address: Address) -> Result<Bytes, AppError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| AppError::transport("eth_getCode", e))
    }

    async fn storage_range_at(
        &self,
        block_hash: B256,
        tx_index: u64,
        address: Address,
        start_key: B256,
        max_entries: usize,
    ) -> Result<Vec<StorageEntry>, AppError> {
        // `debug_storageRangeAt` requires a block hash, not a number or tag.
        let params = (block_hash, tx_index, address, start_key, max_entries);
        let response: StorageRangeResponse = self
            .provider
            .raw_request("debug_storageRangeAt".into(), params)
            .await
            .map_err(|e| AppError::transport("debug_storageRangeAt", e))?;
        Ok(response.into_entries(max_entries))
    }

    async fn block_with_transactions(&self, number: u64) -> Result<ChainBlock, AppError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .full()
            .await
            .map_err(|e| AppError::transport("eth_getBlockByNumber", e))?
            .ok_or_else(|| {
                AppError::transport("eth_getBlockByNumber", format!("block {number} not found"))
            })?;

        let block_number = block.header.inner.number;
        let transactions = block
            .transactions
            .txns()
            .map(|tx| transaction_record(tx, block_number))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChainBlock {
            number: block_number,
            hash: block.header.hash,
            transactions,
        })
    }

    async fn call_constant(
        &self,
        address: Address,
        function: &Function,
    ) -> Result<Vec<DynSolValue>, AppError> {
        let calldata = function.abi_encode_input(&[]).map_err(|e| AppError::ConstantCall {
            name: function.name.clone(),
            reason: format!("encode failed: {e}"),
        })?;
        let req = TransactionRequest {
            to: Some(TxKind::Call(address)),
            input: TransactionInput::new(calldata.into()),
            ..Default::default()
        };
        let output = self
            .provider
            .call(req)
            .await
            .map_err(|e| AppError::ConstantCall {
                name: function.name.clone(),
                reason: format!("eth_call failed: {e}"),
            })?;
        function
            .abi_decode_output(&output)
            .map_err(|e| AppError::ConstantCall {
                name: function.name.clone(),
                reason: format!("decode failed: {e}"),
            })
    }
}

fn transaction_record(tx: &Transaction, block_number: u64) -> Result<TransactionRecord, AppError> {
    let fields = serde_json::to_value(tx)
        .map_err(|e| AppError::transport("eth_getBlockByNumber", format!("tx encode: {e}")))?;
    Ok(TransactionRecord {
        from: TransactionResponse::from(tx),
        to: ConsensusTx::to(tx),
        block_number: tx.block_number.unwrap_or(block_number),
        fields,
    })
}

/// `nextKey` is ignored: a snapshot reads a single page.
#[derive(Debug, Deserialize)]
pub(crate) struct StorageRangeResponse {
    #[serde(default)]
    storage: BTreeMap<B256, StorageRangeEntry>,
}

#[derive(Debug, Deserialize)]
struct StorageRangeEntry {
    #[serde(default)]
    key: Option<B256>,
    value: B256,
}

impl StorageRangeResponse {
    /// Entries in ascending slot-hash order, capped at `max_entries`.
    pub(crate) fn into_entries(self, max_entries: usize) -> Vec<StorageEntry> {
        self.storage
            .into_iter()
            .take(max_entries)
            .map(|(slot, entry)| StorageEntry {
                slot,
                key: entry.key,
                value: entry.value,
            })
            .collect()
    }
}
