use std::env;

const DEFAULT_RPC: &str = "https://mainnet.infura.io/v3/YOUR_INFURA_KEY";

/// Immutable per-run configuration, resolved once from CLI arguments and the
/// `RPC_URL` environment variable. Passed explicitly into the sampler; there
/// is no ambient process state beyond this value.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub rpc_url: String,
    pub from_block: u64,
    pub to_block: u64,
    pub step: u64,
    pub timeout_secs: u64,
    pub json: bool,
}

/// RPC endpoint used when `--rpc` is not given: `RPC_URL` from the
/// environment, falling back to a placeholder Infura endpoint.
pub fn default_rpc_url() -> String {
    env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC.to_string())
}
