// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use alloy::network::Ethereum;
use alloy::providers::RootProvider;
use alloy_rpc_client::BuiltInConnectionString;
use std::path::PathBuf;
use url::Url;

pub type NodeProvider = RootProvider<Ethereum>;

/// Endpoint the provider was opened against, for log lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Ipc(String),
    Ws(String),
    Http(String),
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Ipc(p) => write!(f, "ipc:{p}"),
            Endpoint::Ws(u) | Endpoint::Http(u) => f.write_str(u),
        }
    }
}

pub struct ConnectionFactory;

impl ConnectionFactory {
    pub fn http(rpc_url: &str) -> Result<NodeProvider, AppError> {
        let url =
            Url::parse(rpc_url).map_err(|e| AppError::Config(format!("Invalid RPC URL: {}", e)))?;

        Ok(RootProvider::new_http(url))
    }

    pub async fn ws(ws_url: &str) -> Result<NodeProvider, AppError> {
        RootProvider::connect(ws_url)
            .await
            .map_err(|e| AppError::Initialization(format!("WS Connection failed: {}", e)))
    }

    pub async fn ipc(ipc_path: &str) -> Result<NodeProvider, AppError> {
        let conn = BuiltInConnectionString::Ipc(PathBuf::from(ipc_path));
        RootProvider::connect_with(conn)
            .await
            .map_err(|e| AppError::Initialization(format!("IPC Connection failed: {}", e)))
    }

    /// Open the most local endpoint configured: IPC, then WS, then HTTP.
    /// A failing IPC or WS endpoint falls through to the next one.
    pub async fn preferred(
        ipc_path: Option<&str>,
        ws_url: Option<&str>,
        http_url: Option<&str>,
    ) -> Result<(NodeProvider, Endpoint), AppError> {
        if let Some(path) = ipc_path {
            match Self::ipc(path).await {
                Ok(p) => return Ok((p, Endpoint::Ipc(path.to_string()))),
                Err(e) => tracing::warn!(target: "rpc", error = %e, "IPC unavailable, trying next endpoint"),
            }
        }
        if let Some(url) = ws_url {
            match Self::ws(url).await {
                Ok(p) => return Ok((p, Endpoint::Ws(url.to_string()))),
                Err(e) => tracing::warn!(target: "rpc", error = %e, "WS unavailable, trying next endpoint"),
            }
        }
        match http_url {
            Some(url) => Ok((Self::http(url)?, Endpoint::Http(url.to_string()))),
            None => Err(AppError::Config(
                "No usable RPC endpoint: set http_provider, websocket_provider or ipc_provider"
                    .into(),
            )),
        }
    }
}
