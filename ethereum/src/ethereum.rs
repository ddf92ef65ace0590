use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single JSON-RPC 2.0 call as the node expects it on the wire.
#[derive(Serialize, Debug, Clone)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: serde_json::Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.to_string(),
            params,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcResponse<T> {
    pub id: u64,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// An error object reported by the node in place of a result.
#[derive(Deserialize, Debug, Clone, Error)]
#[error("RPC error {code}: {message}.")]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub transaction_index: U256,
    pub block_hash: B256,
    pub block_number: U256,
    pub from: Address,
    pub to: Option<Address>,
    pub cumulative_gas_used: U256,
    pub gas_used: U256,
    pub effective_gas_price: U256,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
    pub logs_bloom: Bytes,
    pub status: U256,
    #[serde(rename = "type")]
    pub transaction_type: U256,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == U256::from(1)
    }
}

/// The subset of an `eth_getBlockByNumber` header the fee policy reads.
/// `base_fee_per_gas` is absent on chains that predate the London fork.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    pub number: U256,
    pub base_fee_per_gas: Option<U256>,
}
