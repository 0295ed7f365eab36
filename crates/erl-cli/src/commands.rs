use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use erl_ledger::{
    read_export_file, verify_receipts, LedgerConfig, LedgerStats, Receipt, ReceiptLedger,
    VerificationResult, VerifyMode,
};
use erl_types::LedgerTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::info;

use crate::cli::*;
use crate::demo;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Demo(args) => cmd_demo(args, format),
        Command::Verify(args) => cmd_verify(args, format),
        Command::Stats(args) => cmd_stats(args, format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LedgerConfig> {
    match path {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(LedgerConfig::default()),
    }
}

fn load_export(path: &Path) -> anyhow::Result<Vec<Receipt>> {
    read_export_file(path).with_context(|| format!("failed to read ledger {}", path.display()))
}

fn cmd_demo(args: DemoArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let ledger = ReceiptLedger::new(&config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let summary = demo::run_session(&ledger, &mut rng, LedgerTime::wall_clock_ms())?;
    let stats = ledger.stats();
    let verification = ledger.verify();

    if let Some(out) = &args.out {
        let file = File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
        ledger.export_to(BufWriter::new(file))?;
        info!(path = %out.display(), receipts = ledger.len(), "ledger exported");
    }

    match format {
        OutputFormat::Json => {
            let doc = json!({
                "session_id": summary.session_id.to_string(),
                "passed": summary.passed,
                "failed": summary.failed,
                "anchor_root": summary.anchor_root,
                "stats": stats,
                "verification": verification,
                "export": args.out.as_ref().map(|p| p.display().to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Text => {
            println!(
                "{} Session {} complete",
                "✓".green().bold(),
                summary.session_id.to_string().cyan()
            );
            println!();
            for (index, receipt) in ledger.receipts().iter().enumerate() {
                print_receipt(index, receipt);
            }
            println!();
            println!(
                "  Verifications: {} passed, {} failed",
                summary.passed.to_string().green(),
                summary.failed.to_string().red()
            );
            println!("  Anchor root: {}", summary.anchor_root.as_str().yellow());
            println!();
            print_stats(&stats);
            print_verification(&verification);
            if let Some(out) = &args.out {
                println!("  Exported to {}", out.display().to_string().bold());
            }
        }
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let hasher = load_config(args.config.as_deref())?.hash.build_hasher()?;
    let receipts = load_export(&args.file)?;
    let mode = if args.links_only {
        VerifyMode::Links
    } else {
        VerifyMode::Full
    };

    let result = verify_receipts(&hasher, &receipts, mode);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_verification(&result),
    }

    if !result.valid {
        anyhow::bail!("receipt chain in {} failed verification", args.file.display());
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let hasher = load_config(args.config.as_deref())?.hash.build_hasher()?;
    let receipts = load_export(&args.file)?;
    let stats = LedgerStats::from_receipts(&hasher, &receipts);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => print_stats(&stats),
    }
    Ok(())
}

fn print_receipt(index: usize, receipt: &Receipt) {
    let prev = if receipt.is_genesis() {
        "GENESIS".dimmed().to_string()
    } else {
        receipt
            .prev_hash
            .hash()
            .map_or("", |h| h.short())
            .dimmed()
            .to_string()
    };
    let receipt_type = if receipt.is_anchor() {
        receipt.receipt_type.magenta().bold()
    } else {
        receipt.receipt_type.normal()
    };
    println!(
        "  {:>3}  {:<26} {} <- {}",
        index,
        receipt_type,
        receipt.payload_hash.short().yellow(),
        prev
    );
}

fn print_stats(stats: &LedgerStats) {
    println!(
        "Receipts: {} ({} anchors)",
        stats.total_receipts.to_string().bold(),
        stats.anchor_count
    );
    for (receipt_type, count) in &stats.by_type {
        println!("  {:<26} {}", receipt_type, count);
    }
    if let Some(ts) = stats.last_receipt_timestamp {
        println!("Last receipt: {}", ts);
    }
    println!("Merkle root: {}", stats.merkle_root.as_str().yellow());
    let chain = if stats.chain_valid {
        "valid".green()
    } else {
        "BROKEN".red().bold()
    };
    println!("Chain: {}", chain);
}

fn print_verification(result: &VerificationResult) {
    let mode = match result.mode {
        VerifyMode::Links => "links",
        VerifyMode::Full => "links + payloads",
    };
    match &result.violation {
        None => {
            println!("{} Receipt chain integrity verified", "✓".green().bold());
            println!("  Receipts: {}", result.total_receipts);
            println!("  Checks: {}", mode);
            if let Some(root) = &result.merkle_root {
                println!("  Merkle root: {}", root.as_str().yellow());
            }
        }
        Some(violation) => {
            println!("{} {}", "✗".red().bold(), violation.to_string().red());
            println!("  Receipts: {}", result.total_receipts);
            println!("  Checks: {}", mode);
        }
    }
}
