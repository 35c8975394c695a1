// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const QUIET_DEPENDENCIES: &str =
    "h2=info,hyper=info,hyper_util=info,reqwest=info,alloy_transport_http=info,alloy_rpc_client=info,sqlx=warn";

/// Expand a bare level ("debug") with quiet defaults for chatty
/// dependencies. Strings that already hold directives are kept as-is.
pub fn filter_spec(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else if normalized.is_empty() {
        format!("info,{QUIET_DEPENDENCIES}")
    } else {
        format!("{normalized},{QUIET_DEPENDENCIES}")
    }
}

pub fn setup_logging(log_level: &str, json_format: bool) -> Result<(), AppError> {
    let spec = filter_spec(log_level);
    let filter = EnvFilter::from_str(&spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = if json_format {
        subscriber
            .with(fmt::layer().json().with_target(true).with_current_span(false))
            .try_init()
    } else {
        subscriber
            .with(fmt::layer().with_target(true).compact())
            .try_init()
    };
    installed.map_err(|e| AppError::Initialization(format!("logging: {e}")))?;

    tracing::debug!(
        filter = %spec,
        format = if json_format { "json" } else { "compact" },
        "Logging initialized"
    );
    Ok(())
}
