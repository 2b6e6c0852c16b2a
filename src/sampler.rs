use chrono::DateTime;

use crate::config::ScanConfig;
use crate::models::BlockRecord;
use crate::rpc::{parse_quantity, BlockSource, RpcBlock};

/// Number of sample points in `from, from+step, ..` up to and including `to`.
/// Requires `from <= to` and `step >= 1`, both validated at startup.
pub fn expected_samples(from: u64, to: u64, step: u64) -> u64 {
    (to - from) / step + 1
}

fn to_record(raw: &RpcBlock) -> Result<BlockRecord, String> {
    let number = parse_quantity(&raw.number)?;
    let unix_secs = parse_quantity(&raw.timestamp)?;
    let timestamp_utc = DateTime::from_timestamp(unix_secs as i64, 0)
        .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .ok_or_else(|| format!("timestamp {} out of range", unix_secs))?;
    let base_fee_wei = match raw.base_fee_per_gas.as_deref() {
        Some(hex) => parse_quantity(hex)?,
        None => 0,
    };

    Ok(BlockRecord {
        number,
        timestamp_utc,
        miner: raw.miner.clone(),
        gas_used: parse_quantity(&raw.gas_used)?,
        gas_limit: parse_quantity(&raw.gas_limit)?,
        tx_count: raw.transactions.len() as u64,
        base_fee_gwei: wei_to_gwei(base_fee_wei),
    })
}

/// Wei to gwei, rounded to 3 decimal places.
fn wei_to_gwei(wei: u64) -> f64 {
    (wei as f64 / 1e9 * 1000.0).round() / 1000.0
}

/// Walk the configured range at a fixed stride, fetching one block at a time.
///
/// Each sample point gets exactly one fetch attempt. A failed fetch (or an
/// undecodable payload) is reported as a warning and skipped; the scan always
/// runs to the end of the range. Records come back in strictly increasing
/// block-number order, possibly fewer than requested.
pub async fn scan_range(source: &dyn BlockSource, cfg: &ScanConfig) -> Vec<BlockRecord> {
    let total = expected_samples(cfg.from_block, cfg.to_block, cfg.step);
    let mut blocks = Vec::new();

    let mut number = cfg.from_block;
    let mut index = 0u64;
    while number <= cfg.to_block {
        index += 1;
        let pct = index as f64 / total as f64 * 100.0;
        println!("🔍 Fetching block {} ({}/{}, {:.1}%)", number, index, total, pct);

        match source.fetch_block(number).await.and_then(|raw| to_record(&raw)) {
            Ok(record) if record.number != number => {
                eprintln!(
                    "⚠️  Error fetching block {}: payload reports block {}",
                    number, record.number
                );
            }
            Ok(record) => {
                println!("   🕒 Timestamp: {}", record.timestamp_utc);
                blocks.push(record);
            }
            Err(e) => eprintln!("⚠️  Error fetching block {}: {}", number, e),
        }

        number = match number.checked_add(cfg.step) {
            Some(next) => next,
            None => break,
        };
    }

    blocks
}
