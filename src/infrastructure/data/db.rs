// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::data::source_store::{SourceStore, source_key};
use crate::domain::snapshot::VerifiedSource;
use alloy::primitives::Address;
use async_trait::async_trait;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

/// SQLite-backed store of verified contract sources.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Initialization(format!("DB Connect failed: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Initialization(format!("DB Connect failed: {}", e)))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Initialization(format!("DB Migration failed: {}", e)))?;

        Ok(Self { pool })
    }

    pub async fn put_source(
        &self,
        address: Address,
        source: &VerifiedSource,
    ) -> Result<(), AppError> {
        let document = serde_json::to_string(source)
            .map_err(|e| AppError::Store(format!("encode source: {e}")))?;
        sqlx::query(
            r#"
            INSERT INTO verified_sources (address, source)
            VALUES (?, ?)
            ON CONFLICT(address) DO UPDATE SET
                source=excluded.source,
                updated_at=CURRENT_TIMESTAMP
            "#,
        )
        .bind(source_key(address))
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn source_document(&self, lowercase_address: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query_scalar::<_, String>(
            "SELECT source FROM verified_sources WHERE address = ?",
        )
        .bind(lowercase_address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl SourceStore for Database {
    async fn get(&self, lowercase_address: &str) -> Result<Option<VerifiedSource>, AppError> {
        let Some(document) = self.source_document(lowercase_address).await? else {
            return Ok(None);
        };
        serde_json::from_str(&document)
            .map(Some)
            .map_err(|e| AppError::Store(format!("malformed source for {lowercase_address}: {e}")))
    }
}
