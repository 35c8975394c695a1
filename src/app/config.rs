// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::data_path::locate_data_file;
use crate::common::parsing::parse_boolish;
use crate::data::names::NameTable;
use crate::domain::constants::{
    BLOCK_COUNT, DEFAULT_SCAN_CONCURRENCY, DEFAULT_SCAN_TIMEOUT_MS, MAX_BLOCK_GROUPS,
    STORAGE_MAX_ENTRIES,
};
use crate::domain::error::AppError;
use crate::services::account::AggregatorSettings;
use crate::services::account::scanner::ScanLimits;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ExplorerSettings {
    // General
    #[serde(default = "default_false")]
    pub debug: bool,
    #[serde(default = "default_false")]
    pub log_json: bool,
    pub data_dir: Option<String>,

    // Endpoints
    pub http_provider: Option<String>,
    pub websocket_provider: Option<String>,
    pub ipc_provider: Option<String>,

    // Verified sources
    pub database_url: Option<String>,

    // Display names
    #[serde(default)]
    pub names: HashMap<String, String>,
    pub names_path: Option<String>,

    // Pipeline bounds
    #[serde(default = "default_scan_block_count")]
    pub scan_block_count: u64,
    #[serde(default = "default_storage_max_entries")]
    pub storage_max_entries: usize,
    #[serde(default = "default_max_block_groups")]
    pub max_block_groups: usize,
    #[serde(default = "default_scan_concurrency")]
    pub scan_concurrency: usize,
    #[serde(default = "default_scan_timeout_ms")]
    pub scan_timeout_ms: u64,
}

// Defaults
fn default_false() -> bool {
    false
}
fn default_scan_block_count() -> u64 {
    BLOCK_COUNT
}
fn default_storage_max_entries() -> usize {
    STORAGE_MAX_ENTRIES
}
fn default_max_block_groups() -> usize {
    MAX_BLOCK_GROUPS
}
fn default_scan_concurrency() -> usize {
    DEFAULT_SCAN_CONCURRENCY
}
fn default_scan_timeout_ms() -> u64 {
    DEFAULT_SCAN_TIMEOUT_MS
}

impl ExplorerSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(selected_path) = path {
            builder = builder.add_source(File::from(Path::new(selected_path)).required(true));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }
        // Precedence: CLI (in main) > env/.env > config file.
        builder = builder.add_source(Environment::default());

        let settings: ExplorerSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.http_provider_value().is_none()
            && self.websocket_provider_value().is_none()
            && self.ipc_provider_value().is_none()
        {
            return Err(AppError::Config(
                "No RPC endpoint configured (http_provider, websocket_provider or ipc_provider)"
                    .into(),
            ));
        }
        if self.scan_block_count == 0 {
            return Err(AppError::Config("scan_block_count must be at least 1".into()));
        }
        if self.scan_timeout_ms == 0 {
            return Err(AppError::Config("scan_timeout_ms must be at least 1".into()));
        }
        if self.max_block_groups == 0 {
            return Err(AppError::Config("max_block_groups must be at least 1".into()));
        }
        Ok(())
    }

    fn non_empty(raw: Option<&String>) -> Option<String> {
        raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }

    pub fn http_provider_value(&self) -> Option<String> {
        Self::non_empty(self.http_provider.as_ref())
    }

    pub fn websocket_provider_value(&self) -> Option<String> {
        Self::non_empty(self.websocket_provider.as_ref())
    }

    pub fn ipc_provider_value(&self) -> Option<String> {
        Self::non_empty(self.ipc_provider.as_ref())
    }

    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL")
            .ok()
            .or_else(|| self.database_url.clone())
            .unwrap_or_else(|| "sqlite://explorer.db".to_string())
    }

    /// `LOG_JSON` in the environment overrides the file setting.
    pub fn log_json_value(&self) -> bool {
        std::env::var("LOG_JSON")
            .ok()
            .and_then(|v| parse_boolish(&v))
            .unwrap_or(self.log_json)
    }

    /// File names first, then inline `names`, which win on conflict.
    pub fn name_table(&self) -> Result<NameTable, AppError> {
        let mut table = match Self::non_empty(self.names_path.as_ref()) {
            Some(raw) => {
                let path = locate_data_file(&raw, self.data_dir.as_deref())?;
                NameTable::load_from_file(&path)?
            }
            None => NameTable::default(),
        };
        table.merge_raw(&self.names, "names");
        Ok(table)
    }

    pub fn aggregator_settings(&self) -> AggregatorSettings {
        AggregatorSettings {
            scan_span: self.scan_block_count,
            storage_max_entries: self.storage_max_entries,
            max_block_groups: self.max_block_groups,
            scan: ScanLimits {
                concurrency: self.scan_concurrency.max(1),
                deadline: Duration::from_millis(self.scan_timeout_ms),
            },
        }
    }
}
