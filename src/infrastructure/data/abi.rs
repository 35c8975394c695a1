// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use alloy_json_abi::{Function, StateMutability};
use serde_json::Value;

/// One ABI item, kept in declaration order.
///
/// `JsonAbi` groups items by name and loses their order, so verified
/// ABIs are walked item by item instead.
#[derive(Clone, Debug)]
pub enum AbiEntry {
    Function {
        function: Function,
        /// Pre-0.4.16 `"constant": true` marker.
        legacy_constant: bool,
    },
    Other(String),
}

impl AbiEntry {
    pub fn is_read_only(&self) -> bool {
        match self {
            AbiEntry::Function {
                function,
                legacy_constant,
            } => {
                *legacy_constant
                    || matches!(
                        function.state_mutability,
                        StateMutability::View | StateMutability::Pure
                    )
            }
            AbiEntry::Other(_) => false,
        }
    }

    /// Zero-argument read-only function, if this entry is one.
    pub fn as_constant_function(&self) -> Option<&Function> {
        match self {
            AbiEntry::Function { function, .. }
                if function.inputs.is_empty() && self.is_read_only() =>
            {
                Some(function)
            }
            _ => None,
        }
    }
}

/// Parse an ABI given either as a JSON array or as a string holding one.
pub fn parse_ordered_abi(raw: &Value) -> Result<Vec<AbiEntry>, AppError> {
    let owned;
    let items = match raw {
        Value::Array(items) => items,
        Value::String(s) => {
            owned = serde_json::from_str::<Value>(s)
                .map_err(|e| AppError::Decode(format!("ABI is not valid JSON: {e}")))?;
            match &owned {
                Value::Array(items) => items,
                _ => return Err(AppError::Decode("ABI JSON is not an array".into())),
            }
        }
        _ => return Err(AppError::Decode("ABI must be an array or string".into())),
    };

    Ok(items.iter().map(parse_entry).collect())
}

/// A function item that does not deserialize is kept as `Other` so the
/// rest of the ABI stays usable.
fn parse_entry(item: &Value) -> AbiEntry {
    let kind = item.get("type").and_then(Value::as_str).unwrap_or_default();
    if kind != "function" {
        return AbiEntry::Other(kind.to_string());
    }
    let function: Function = match serde_json::from_value(item.clone()) {
        Ok(function) => function,
        Err(e) => {
            let name = item.get("name").and_then(Value::as_str).unwrap_or("<unnamed>");
            tracing::warn!(target: "source", function = name, error = %e, "Skipping malformed ABI function entry");
            return AbiEntry::Other("function".to_string());
        }
    };
    let legacy_constant = item
        .get("constant")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    AbiEntry::Function {
        function,
        legacy_constant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!([
            { "type": "constructor", "inputs": [] },
            { "type": "function", "name": "owner", "inputs": [],
              "outputs": [{ "name": "", "type": "address" }], "stateMutability": "view" },
            { "type": "function", "name": "balanceOf",
              "inputs": [{ "name": "who", "type": "address" }],
              "outputs": [{ "name": "", "type": "uint256" }], "stateMutability": "view" },
            { "type": "function", "name": "totalSupply", "inputs": [],
              "outputs": [{ "name": "", "type": "uint256" }], "constant": true },
            { "type": "function", "name": "poke", "inputs": [], "outputs": [],
              "stateMutability": "nonpayable" },
            { "type": "event", "name": "Transfer", "inputs": [], "anonymous": false }
        ])
    }

    #[test]
    fn keeps_declaration_order() {
        let entries = parse_ordered_abi(&sample()).expect("parse");
        assert_eq!(entries.len(), 6);
        let names: Vec<&str> = entries
            .iter()
            .filter_map(AbiEntry::as_constant_function)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["owner", "totalSupply"]);
    }

    #[test]
    fn accepts_string_encoded_abi() {
        let raw = Value::String(sample().to_string());
        let entries = parse_ordered_abi(&raw).expect("parse");
        assert_eq!(entries.len(), 6);
    }

    #[test]
    fn malformed_function_entry_does_not_hide_siblings() {
        let raw = json!([
            { "type": "function", "name": "owner", "inputs": [],
              "outputs": [{ "name": "", "type": "address" }], "stateMutability": "view" },
            { "type": "function", "name": "kill", "inputs": [], "constant": false },
            { "type": "function", "inputs": [], "outputs": [], "stateMutability": "view" },
            { "type": "function", "name": "decimals", "inputs": [],
              "outputs": [{ "name": "", "type": "uint8" }], "stateMutability": "pure" }
        ]);
        let entries = parse_ordered_abi(&raw).expect("parse");
        assert_eq!(entries.len(), 4);
        assert!(matches!(&entries[1], AbiEntry::Other(kind) if kind == "function"));
        let names: Vec<&str> = entries
            .iter()
            .filter_map(AbiEntry::as_constant_function)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["owner", "decimals"]);
    }

    #[test]
    fn rejects_non_array() {
        assert!(parse_ordered_abi(&json!({ "type": "function" })).is_err());
        assert!(parse_ordered_abi(&Value::String("not json".into())).is_err());
    }
}
