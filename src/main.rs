mod config;
mod metrics;
mod models;
mod rpc;
mod sampler;

use std::process;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use clap::Parser;

use crate::config::ScanConfig;
use crate::metrics::aggregate;
use crate::models::{MetricsSummary, ScanReport};
use crate::rpc::EthRpcClient;
use crate::sampler::scan_range;

/// CLI arguments
#[derive(Parser)]
#[command(
    name = "zk-block-soundness",
    about = "Analyze recent block gas usage and consistency as a soundness check for zk proving inputs"
)]
struct Cli {
    /// EVM-compatible RPC URL (default: env RPC_URL or an Infura placeholder)
    #[arg(long, default_value_t = config::default_rpc_url())]
    rpc: String,

    /// Start block number (inclusive)
    #[arg(long)]
    from_block: u64,

    /// End block number (inclusive)
    #[arg(long)]
    to_block: u64,

    /// Sampling step
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    step: u64,

    /// RPC timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Output a JSON summary document
    #[arg(long)]
    json: bool,
}

fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn print_summary(metrics: &MetricsSummary) {
    println!("\n📊 Summary:");
    if let Some(message) = &metrics.message {
        println!("  • {}", message);
    }
    if let Some(avg) = metrics.avg_utilization_percent {
        println!("  • Avg Gas Utilization: {}%", avg);
    }
    if let Some(max) = metrics.max_utilization_percent {
        println!("  • Max Utilization: {}%", max);
    }
    if let Some(min) = metrics.min_utilization_percent {
        println!("  • Min Utilization: {}%", min);
    }
    if let Some(tx) = metrics.avg_tx_per_block {
        println!("  • Avg Transactions per Block: {}", tx);
    }
    if let Some(fee) = metrics.avg_base_fee_gwei {
        println!("  • Avg Base Fee: {} Gwei", fee);
    }
    if let Some(count) = metrics.block_count {
        println!("  • Blocks Analyzed: {}", count);
    }
    println!(
        "  • Status: {}",
        if metrics.ok { "✅ SOUND" } else { "🚨 UNSOUND" }
    );
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    if args.from_block > args.to_block {
        eprintln!("❌ Invalid range: --from-block must be <= --to-block");
        process::exit(1);
    }

    let cfg = ScanConfig {
        rpc_url: args.rpc,
        from_block: args.from_block,
        to_block: args.to_block,
        step: args.step,
        timeout_secs: args.timeout,
        json: args.json,
    };

    let client = match EthRpcClient::new(&cfg.rpc_url, cfg.timeout_secs) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ RPC connection failed: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = client.block_number().await {
        eprintln!("❌ RPC connection failed: {}", e);
        process::exit(1);
    }

    println!("🔧 zk-block-soundness");
    println!("🔗 RPC: {}", cfg.rpc_url);
    println!(
        "🧱 Range: {} → {} (step={})",
        cfg.from_block, cfg.to_block, cfg.step
    );
    println!("🕒 Start Time: {}", now_utc());

    let started = Instant::now();
    let blocks = scan_range(&client, &cfg).await;
    let metrics = aggregate(&blocks);
    let elapsed = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;

    print_summary(&metrics);
    println!("⏱️ Completed in {}s", elapsed);

    if cfg.json {
        let report = ScanReport {
            rpc: cfg.rpc_url.clone(),
            range: [cfg.from_block, cfg.to_block, cfg.step],
            timestamp_utc: now_utc(),
            metrics: metrics.clone(),
            blocks,
            elapsed_seconds: elapsed,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(doc) => println!("{}", doc),
            Err(e) => eprintln!("⚠️  Failed to serialize JSON report: {}", e),
        }
    }

    process::exit(if metrics.ok { 0 } else { 2 });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_applies_documented_defaults() {
        let args =
            Cli::try_parse_from(["zk-block-soundness", "--from-block", "100", "--to-block", "200"])
                .unwrap();
        assert_eq!(args.from_block, 100);
        assert_eq!(args.to_block, 200);
        assert_eq!(args.step, 5);
        assert_eq!(args.timeout, 30);
        assert!(!args.json);
        assert_eq!(args.rpc, config::default_rpc_url());
    }

    #[test]
    fn cli_requires_both_range_bounds() {
        assert!(Cli::try_parse_from(["zk-block-soundness", "--from-block", "100"]).is_err());
        assert!(Cli::try_parse_from(["zk-block-soundness", "--to-block", "100"]).is_err());
    }

    #[test]
    fn cli_rejects_zero_step() {
        let result = Cli::try_parse_from([
            "zk-block-soundness",
            "--from-block",
            "1",
            "--to-block",
            "2",
            "--step",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_a_full_invocation() {
        let args = Cli::try_parse_from([
            "zk-block-soundness",
            "--rpc",
            "http://localhost:8545",
            "--from-block",
            "19000000",
            "--to-block",
            "19000100",
            "--step",
            "10",
            "--timeout",
            "5",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.rpc, "http://localhost:8545");
        assert_eq!(args.step, 10);
        assert_eq!(args.timeout, 5);
        assert!(args.json);
    }
}
