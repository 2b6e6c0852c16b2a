use serde::Serialize;

/// Metadata for one successfully fetched block.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BlockRecord {
    pub number: u64,
    pub timestamp_utc: String,
    pub miner: String,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub tx_count: u64,
    pub base_fee_gwei: f64,
}

/// Summary statistics over a scanned block range.
///
/// The utilization fields are absent when no record had a nonzero gas limit;
/// every numeric field is absent when no blocks were retrieved at all. Absent
/// fields are omitted from the JSON document, so the degenerate case comes out
/// as exactly `{"ok": false, "message": "No blocks retrieved"}`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MetricsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_utilization_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_utilization_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_utilization_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_tx_per_block: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_base_fee_gwei: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_count: Option<u64>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The machine-readable document emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub rpc: String,
    pub range: [u64; 3],
    pub timestamp_utc: String,
    pub metrics: MetricsSummary,
    pub blocks: Vec<BlockRecord>,
    pub elapsed_seconds: f64,
}
