// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::common::error::AppError;
use crate::domain::snapshot::VerifiedSource;
use alloy::primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;

/// Verified-source lookup keyed by lowercase `0x`-prefixed address.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// `Ok(None)` is a plain miss.
    async fn get(&self, lowercase_address: &str) -> Result<Option<VerifiedSource>, AppError>;
}

pub fn source_key(address: Address) -> String {
    format!("{address:#x}")
}

#[derive(Clone, Debug, Default)]
pub struct MemorySourceStore {
    entries: HashMap<String, VerifiedSource>,
}

impl MemorySourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Address, source: VerifiedSource) {
        self.entries.insert(source_key(address), source);
    }

    pub fn with(mut self, address: Address, source: VerifiedSource) -> Self {
        self.insert(address, source);
        self
    }
}

#[async_trait]
impl SourceStore for MemorySourceStore {
    async fn get(&self, lowercase_address: &str) -> Result<Option<VerifiedSource>, AppError> {
        Ok(self.entries.get(lowercase_address).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn key_is_lowercase_hex() {
        let addr = Address::from_str("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").unwrap();
        assert_eq!(
            source_key(addr),
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[tokio::test]
    async fn memory_store_hits_and_misses() {
        let addr = Address::repeat_byte(0xab);
        let store = MemorySourceStore::new().with(
            addr,
            VerifiedSource {
                name: Some("Token".into()),
                ..Default::default()
            },
        );
        let hit = store.get(&source_key(addr)).await.unwrap();
        assert_eq!(hit.and_then(|s| s.name).as_deref(), Some("Token"));
        assert!(store.get("0xdeadbeef").await.unwrap().is_none());
    }
}
