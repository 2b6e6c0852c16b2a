use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: String,
    method: String,
    params: Value,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

/// Raw `eth_getBlockByNumber` payload. Quantities arrive as `0x`-prefixed hex
/// strings; `baseFeePerGas` is absent on pre-EIP-1559 blocks. Transactions are
/// requested as hashes, so only their count is meaningful here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    pub number: String,
    pub timestamp: String,
    pub miner: String,
    pub gas_used: String,
    pub gas_limit: String,
    pub base_fee_per_gas: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Value>,
}

/// Where the sampler gets its blocks from. Production uses [`EthRpcClient`];
/// tests substitute an in-memory source.
#[async_trait]
pub trait BlockSource {
    async fn fetch_block(&self, number: u64) -> Result<RpcBlock, String>;
}

/// Decode a `0x`-prefixed hex quantity.
pub fn parse_quantity(hex: &str) -> Result<u64, String> {
    u64::from_str_radix(hex.trim_start_matches("0x"), 16)
        .map_err(|e| format!("invalid hex quantity {:?}: {}", hex, e))
}

/// JSON-RPC 2.0 client for an EVM-compatible endpoint. One HTTP client is
/// built per run with the configured request timeout; every call shares it.
pub struct EthRpcClient {
    http: Client,
    url: String,
}

impl EthRpcClient {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, String> {
        let http = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("zk-block-soundness/0.1")
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    async fn call<T>(&self, method: &str, params: Value) -> Result<T, String>
    where
        T: DeserializeOwned,
    {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Uuid::new_v4().to_string(),
            method: method.to_string(),
            params,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        let rpc_response: JsonRpcResponse<T> =
            response.json().await.map_err(|e| e.to_string())?;

        if let Some(error) = rpc_response.error {
            return Err(format!("RPC error {}: {}", error.code, error.message));
        }

        rpc_response
            .result
            .ok_or_else(|| "missing result in RPC response".to_string())
    }

    /// Startup connectivity probe; the chain head number itself is unused.
    pub async fn block_number(&self) -> Result<u64, String> {
        let hex: String = self.call("eth_blockNumber", json!([])).await?;
        parse_quantity(&hex)
    }
}

#[async_trait]
impl BlockSource for EthRpcClient {
    async fn fetch_block(&self, number: u64) -> Result<RpcBlock, String> {
        self.call(
            "eth_getBlockByNumber",
            json!([format!("0x{:x}", number), false]),
        )
        .await
    }
}
