use core::time::Duration;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{Address, B256};
use anyhow::anyhow;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::ethereum::{BlockHeader, JsonRpcRequest, JsonRpcResponse, TransactionReceipt};
use crate::utils::{bytes_to_hex_string, hex_quantity_to_u64};

/// Runtime configuration for the Ethereum RPC service
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EthServiceConfig {
    pub rpc_url: String,
}

pub struct EthProvider {
    client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl EthProvider {
    pub fn new(config: EthServiceConfig) -> Self {
        EthProvider {
            client: reqwest::Client::new(),
            rpc_url: config.rpc_url,
            request_id: AtomicU64::new(1),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<JsonRpcResponse<T>, anyhow::Error> {
        let request = JsonRpcRequest::new(
            self.request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        );
        debug!("Calling {} on {}", method, &self.rpc_url);

        let response = self.client.post(&self.rpc_url).json(&request).send().await?;
        if response.status() != StatusCode::OK {
            return Err(anyhow!(
                "Node returned HTTP {} for {}.",
                response.status(),
                method
            ));
        }

        let response: JsonRpcResponse<T> = serde_json::from_str(&response.text().await?)?;
        Ok(response)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, anyhow::Error> {
        let response = self.call(method, params).await?;
        if let Some(error) = response.error {
            return Err(error.into());
        }

        response
            .result
            .ok_or_else(|| anyhow!("Node returned no result for {}.", method))
    }
}

const POLLING_TIMEOUT: Duration = Duration::from_secs(120);
const POLLING_INTERVAL: Duration = Duration::from_secs(2);

impl EthProvider {
    pub async fn chain_id(&self) -> Result<u64, anyhow::Error> {
        let quantity: String = self.request("eth_chainId", serde_json::json!([])).await?;
        hex_quantity_to_u64(&quantity)
    }

    // The nonce of the account at the given block tag ("latest", "pending", ...).
    pub async fn get_transaction_count(
        &self,
        address: Address,
        block_tag: &str,
    ) -> Result<u64, anyhow::Error> {
        let quantity: String = self
            .request(
                "eth_getTransactionCount",
                serde_json::json!([address, block_tag]),
            )
            .await?;
        hex_quantity_to_u64(&quantity)
    }

    pub async fn latest_block(&self) -> Result<BlockHeader, anyhow::Error> {
        self.request("eth_getBlockByNumber", serde_json::json!(["latest", false]))
            .await
    }

    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, anyhow::Error> {
        self.request(
            "eth_sendRawTransaction",
            serde_json::json!([bytes_to_hex_string(raw)]),
        )
        .await
    }

    // A null result means the transaction is not mined yet.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>, anyhow::Error> {
        let response: JsonRpcResponse<TransactionReceipt> = self
            .call("eth_getTransactionReceipt", serde_json::json!([tx_hash]))
            .await?;
        if let Some(error) = response.error {
            return Err(error.into());
        }

        Ok(response.result)
    }

    // Poll the node until the transaction is mined.
    // Gives up once POLLING_TIMEOUT has elapsed.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<TransactionReceipt, anyhow::Error> {
        let start_time = std::time::Instant::now();

        loop {
            info!("Waiting for receipt of transaction {}", &tx_hash);
            if start_time.elapsed() >= POLLING_TIMEOUT {
                return Err(anyhow!(
                    "Timed out waiting for receipt of transaction {}.",
                    tx_hash
                ));
            }

            match self.get_transaction_receipt(tx_hash).await? {
                Some(receipt) => return Ok(receipt),
                None => {
                    tokio::time::sleep(POLLING_INTERVAL).await;
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique_per_provider() {
        let provider = EthProvider::new(EthServiceConfig {
            rpc_url: String::from("http://127.0.0.1:8545"),
        });

        let first = provider.request_id.fetch_add(1, Ordering::Relaxed);
        let second = provider.request_id.fetch_add(1, Ordering::Relaxed);
        assert!(second > first);
    }
}
