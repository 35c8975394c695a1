// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::data::abi::AbiEntry;
use crate::domain::snapshot::ConstantCallResult;
use crate::network::chain_client::ChainClient;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Address;

/// Invoke every zero-argument read-only function of `abi`, in declaration
/// order, one call at a time.
///
/// A failing call is logged and left out; it never stops the remaining
/// calls and never escapes this function.
pub async fn evaluate_constant_calls(
    client: &dyn ChainClient,
    address: Address,
    abi: &[AbiEntry],
) -> Vec<ConstantCallResult> {
    let mut results = Vec::new();
    for function in abi.iter().filter_map(AbiEntry::as_constant_function) {
        match client.call_constant(address, function).await {
            Ok(values) => results.push(ConstantCallResult {
                name: function.name.clone(),
                result: render_outputs(&values),
            }),
            Err(e) => {
                tracing::warn!(
                    target: "account",
                    %address,
                    function = %function.name,
                    error = %e,
                    "Constant call failed; omitting"
                );
            }
        }
    }
    results
}

/// Single output renders bare; several render as a parenthesised list.
pub fn render_outputs(values: &[DynSolValue]) -> String {
    match values {
        [] => String::new(),
        [single] => render_value(single),
        many => format!(
            "({})",
            many.iter().map(render_value).collect::<Vec<_>>().join(", ")
        ),
    }
}

pub fn render_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::Function(f) => format!("0x{}", hex::encode(f.as_slice())),
        DynSolValue::Bytes(b) => format!("0x{}", hex::encode(b)),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => format!(
            "[{}]",
            items.iter().map(render_value).collect::<Vec<_>>().join(", ")
        ),
        DynSolValue::Tuple(items) => render_outputs(items),
        #[allow(unreachable_patterns)]
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use crate::data::abi::parse_ordered_abi;
    use crate::domain::snapshot::{ChainBlock, LatestBlock, StorageEntry};
    use alloy::primitives::{B256, Bytes, I256, U256};
    use alloy_json_abi::Function;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Answers calls from a fixed table and records call order.
    struct CallTable {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChainClient for CallTable {
        async fn latest_block(&self) -> Result<LatestBlock, AppError> {
            unreachable!()
        }
        async fn balance(&self, _: Address) -> Result<U256, AppError> {
            unreachable!()
        }
        async fn code(&self, _: Address) -> Result<Bytes, AppError> {
            unreachable!()
        }
        async fn storage_range_at(
            &self,
            _: B256,
            _: u64,
            _: Address,
            _: B256,
            _: usize,
        ) -> Result<Vec<StorageEntry>, AppError> {
            unreachable!()
        }
        async fn block_with_transactions(&self, _: u64) -> Result<ChainBlock, AppError> {
            unreachable!()
        }
        async fn call_constant(
            &self,
            _: Address,
            function: &Function,
        ) -> Result<Vec<DynSolValue>, AppError> {
            self.calls.lock().unwrap().push(function.name.clone());
            match function.name.as_str() {
                "name" => Ok(vec![DynSolValue::String("Token".into())]),
                "decimals" => Ok(vec![DynSolValue::Uint(U256::from(18), 8)]),
                "totalSupply" => Ok(vec![DynSolValue::Uint(U256::from(1_000u64), 256)]),
                other => Err(AppError::ConstantCall {
                    name: other.to_string(),
                    reason: "execution reverted".into(),
                }),
            }
        }
    }

    fn view(name: &str) -> serde_json::Value {
        json!({ "type": "function", "name": name, "inputs": [], "outputs": [], "stateMutability": "view" })
    }

    #[tokio::test]
    async fn keeps_order_and_skips_failures() {
        let abi = parse_ordered_abi(&json!([
            view("name"),
            view("paused"),
            { "type": "function", "name": "mint", "inputs": [], "outputs": [], "stateMutability": "nonpayable" },
            { "type": "function", "name": "allowance",
              "inputs": [{ "name": "o", "type": "address" }], "outputs": [], "stateMutability": "view" },
            view("decimals"),
            view("totalSupply"),
        ]))
        .unwrap();
        let client = CallTable {
            calls: Mutex::new(Vec::new()),
        };

        let results = evaluate_constant_calls(&client, Address::ZERO, &abi).await;

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["name", "decimals", "totalSupply"]);
        assert_eq!(results[1].result, "18");
        assert_eq!(
            *client.calls.lock().unwrap(),
            vec!["name", "paused", "decimals", "totalSupply"]
        );
    }

    #[test]
    fn renders_values() {
        let addr = Address::repeat_byte(0xaa);
        assert_eq!(render_value(&DynSolValue::Bool(true)), "true");
        assert_eq!(
            render_value(&DynSolValue::Int(I256::MINUS_ONE, 256)),
            "-1"
        );
        assert_eq!(render_value(&DynSolValue::Address(addr)), addr.to_checksum(None));
        assert_eq!(
            render_value(&DynSolValue::FixedBytes(B256::repeat_byte(0x01), 2)),
            "0x0101"
        );
        assert_eq!(
            render_outputs(&[
                DynSolValue::Uint(U256::from(1), 256),
                DynSolValue::Array(vec![DynSolValue::Bool(false)])
            ]),
            "(1, [false])"
        );
    }
}
