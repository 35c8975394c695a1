// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::common::error::AppError;
use crate::common::parsing::parse_address_hex;
use alloy::primitives::Address;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Static address → display-name table supplied by configuration.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    names: HashMap<Address, String>,
}

impl NameTable {
    /// Build from raw `address → name` pairs. Unparsable addresses are
    /// skipped with a warning.
    pub fn from_raw(raw: &HashMap<String, String>) -> Self {
        let mut table = Self::default();
        table.merge_raw(raw, "names");
        table
    }

    /// JSON file of the shape `{ "0xabc…": "Name", … }`.
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read names {}: {e}", path.display()))
        })?;
        let map: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Failed to parse names {}: {e}", path.display()))
        })?;
        let mut table = Self::default();
        table.merge_raw(&map, "names_path");
        tracing::info!(target: "config", path = %path.display(), entries = table.len(), "Loaded display names");
        Ok(table)
    }

    /// Entries from `raw` override existing ones.
    pub fn merge_raw(&mut self, raw: &HashMap<String, String>, origin: &str) {
        for (key, name) in raw {
            match parse_address_hex(key) {
                Some(addr) => {
                    self.names.insert(addr, name.clone());
                }
                None => {
                    tracing::warn!(target: "config", origin, key = %key, "Skipping display name with invalid address");
                }
            }
        }
    }

    pub fn get(&self, address: &Address) -> Option<&str> {
        self.names.get(address).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
