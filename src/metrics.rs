use crate::models::{BlockRecord, MetricsSummary};

/// Soundness thresholds. Both are part of the observable contract: average
/// utilization must exceed 40% and the max-min spread must stay under 50
/// points for a range to be judged sound.
const MIN_AVG_UTILIZATION: f64 = 40.0;
const MAX_UTILIZATION_SPREAD: f64 = 50.0;

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn empty_summary(message: &str) -> MetricsSummary {
    MetricsSummary {
        avg_utilization_percent: None,
        max_utilization_percent: None,
        min_utilization_percent: None,
        avg_tx_per_block: None,
        avg_base_fee_gwei: None,
        block_count: None,
        ok: false,
        message: Some(message.to_string()),
    }
}

/// Compute summary statistics over a scanned block sequence.
///
/// Pure function of its input: no I/O, no hidden state. Records with a zero
/// gas limit are excluded from the utilization stats but still count toward
/// the block count and the transaction/base-fee means. If no record has a
/// usable gas limit the utilization fields are omitted and the range is
/// reported unsound with a "No utilization data" message.
pub fn aggregate(blocks: &[BlockRecord]) -> MetricsSummary {
    if blocks.is_empty() {
        return empty_summary("No blocks retrieved");
    }

    let count = blocks.len() as f64;
    let avg_tx = blocks.iter().map(|b| b.tx_count as f64).sum::<f64>() / count;
    let avg_base_fee = blocks.iter().map(|b| b.base_fee_gwei).sum::<f64>() / count;

    let utilizations: Vec<f64> = blocks
        .iter()
        .filter(|b| b.gas_limit != 0)
        .map(|b| b.gas_used as f64 / b.gas_limit as f64 * 100.0)
        .collect();

    if utilizations.is_empty() {
        return MetricsSummary {
            avg_tx_per_block: Some(round_to(avg_tx, 2)),
            avg_base_fee_gwei: Some(round_to(avg_base_fee, 3)),
            block_count: Some(blocks.len() as u64),
            ..empty_summary("No utilization data")
        };
    }

    let avg_util = utilizations.iter().sum::<f64>() / utilizations.len() as f64;
    let max_util = utilizations.iter().cloned().fold(f64::MIN, f64::max);
    let min_util = utilizations.iter().cloned().fold(f64::MAX, f64::min);

    MetricsSummary {
        avg_utilization_percent: Some(round_to(avg_util, 2)),
        max_utilization_percent: Some(round_to(max_util, 2)),
        min_utilization_percent: Some(round_to(min_util, 2)),
        avg_tx_per_block: Some(round_to(avg_tx, 2)),
        avg_base_fee_gwei: Some(round_to(avg_base_fee, 3)),
        block_count: Some(blocks.len() as u64),
        ok: avg_util > MIN_AVG_UTILIZATION && max_util - min_util < MAX_UTILIZATION_SPREAD,
        message: None,
    }
}
