// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("RPC {method} failed: {reason}")]
    Transport { method: String, reason: String },

    #[error("Bytecode decode failed: {0}")]
    Decode(String),

    #[error("Constant call {name} failed: {reason}")]
    ConstantCall { name: String, reason: String },

    #[error("{stage} exceeded deadline of {after_ms}ms")]
    Timeout { stage: String, after_ms: u64 },

    #[error("Address {0} is invalid")]
    InvalidAddress(String),

    #[error("Source store error: {0}")]
    Store(String),
}

impl AppError {
    pub fn transport(method: &str, err: impl std::fmt::Display) -> Self {
        AppError::Transport {
            method: method.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(err.to_string())
    }
}
