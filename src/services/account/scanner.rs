// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Recent-block scan for transactions touching one address.
//!
//! Fetches run on a `JoinSet` gated by a semaphore so at most
//! `concurrency` requests are in flight against the node. The first
//! failure aborts every outstanding fetch, and so does the deadline.

use crate::common::error::AppError;
use crate::domain::snapshot::{ScanWindow, TransactionRecord};
use crate::network::chain_client::ChainClient;
use alloy::primitives::Address;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Clone, Copy, Debug)]
pub struct ScanLimits {
    pub concurrency: usize,
    pub deadline: Duration,
}

pub struct TransactionWindowScanner {
    client: Arc<dyn ChainClient>,
    limits: ScanLimits,
}

impl TransactionWindowScanner {
    pub fn new(client: Arc<dyn ChainClient>, limits: ScanLimits) -> Self {
        Self { client, limits }
    }

    /// Transactions in `window` sent from or to `address`.
    ///
    /// Output is grouped per block slot, newest block first, but callers
    /// must not rely on any order beyond that.
    pub async fn scan(
        &self,
        window: ScanWindow,
        address: Address,
    ) -> Result<Vec<TransactionRecord>, AppError> {
        let started = Instant::now();
        let deadline_ms = self.limits.deadline.as_millis() as u64;

        let slots = match tokio::time::timeout(self.limits.deadline, self.fetch_all(window, address))
            .await
        {
            Ok(res) => res?,
            Err(_) => {
                tracing::warn!(
                    target: "scan",
                    %address,
                    blocks = window.block_count,
                    deadline_ms,
                    "Block scan timed out"
                );
                return Err(AppError::Timeout {
                    stage: "block scan".into(),
                    after_ms: deadline_ms,
                });
            }
        };

        let matched: Vec<TransactionRecord> = slots.into_iter().flatten().flatten().collect();
        tracing::debug!(
            target: "scan",
            %address,
            from = window.lowest_block(),
            to = window.last_block,
            blocks = window.block_count,
            matched = matched.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Block scan complete"
        );
        Ok(matched)
    }

    /// One slot per block offset; each task fills only its own slot.
    async fn fetch_all(
        &self,
        window: ScanWindow,
        address: Address,
    ) -> Result<Vec<Option<Vec<TransactionRecord>>>, AppError> {
        let permits = Arc::new(Semaphore::new(self.limits.concurrency.max(1)));
        let mut tasks: JoinSet<(usize, Result<Vec<TransactionRecord>, AppError>)> = JoinSet::new();

        for (slot, number) in window.block_numbers().enumerate() {
            let client = self.client.clone();
            let permits = permits.clone();
            tasks.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return (slot, Err(AppError::transport("eth_getBlockByNumber", e)));
                    }
                };
                let res = client.block_with_transactions(number).await.map(|block| {
                    block
                        .transactions
                        .into_iter()
                        .filter(|tx| tx.touches(address))
                        .collect()
                });
                (slot, res)
            });
        }

        let mut slots: Vec<Option<Vec<TransactionRecord>>> =
            vec![None; window.block_count as usize];
        // Dropping the set on an early return aborts whatever is still running.
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, Ok(txs))) => slots[slot] = Some(txs),
                Ok((slot, Err(e))) => {
                    tracing::warn!(
                        target: "scan",
                        block = window.last_block - slot as u64,
                        error = %e,
                        "Block fetch failed; aborting scan"
                    );
                    tasks.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(AppError::transport(
                        "eth_getBlockByNumber",
                        format!("block fetch task failed: {e}"),
                    ));
                }
            }
        }
        Ok(slots)
    }
}
