use crate::analyzer::DerivativesAnalyzer;
use crate::config::{self, AnalyzerConfig};
use crate::error::AnalyzerError;
use crate::models::{AnalysisResult, MarketSnapshot, OptionStrategy, Recommendation};
use crate::strategy::{bull_call_spread, iron_condor};
use crate::validation::validate_chain;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings resolved once by the binary and shared by every command
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub lot_size: Option<f64>,
    pub condor_width: f64,
    pub as_of: NaiveDate,
}

/// Load and validate one snapshot file
pub fn load_snapshot(path: &Path) -> Result<MarketSnapshot, AnalyzerError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AnalyzerError::Io(format!("{}: {}", path.display(), e)))?;
    let snapshot: MarketSnapshot = serde_json::from_str(&raw)?;
    validate_chain(&snapshot.chain)?;
    Ok(snapshot)
}

/// Snapshot files in a directory, sorted by name
pub fn list_snapshots(dir: &Path) -> Result<Vec<PathBuf>, AnalyzerError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Lot size: explicit override, then the futures contract, then the default
fn resolve_lot_size(settings: &RunSettings, snapshot: &MarketSnapshot) -> f64 {
    settings
        .lot_size
        .or_else(|| {
            snapshot
                .futures
                .as_ref()
                .map(|f| f.lot_size as f64)
                .filter(|l| *l > 0.0)
        })
        .unwrap_or(config::DEFAULT_LOT_SIZE)
}

pub fn analyze_snapshot(settings: &RunSettings, snapshot: &MarketSnapshot) -> AnalysisResult {
    let analyzer = DerivativesAnalyzer::new(
        AnalyzerConfig::default()
            .with_lot_size(resolve_lot_size(settings, snapshot))
            .with_condor_width(settings.condor_width),
    );
    analyzer.analyze_at(
        Some(&snapshot.chain),
        snapshot.futures.as_ref(),
        Utc::now(),
        settings.as_of,
    )
}

fn banner(title: &str) {
    println!("{}", "=".repeat(60).blue());
    println!("{}", title.green().bold());
    println!("{}", "=".repeat(60).blue());
    println!();
}

/// Derivatives command handler - one entry point per execution mode
pub struct AnalyzerCommands;

impl AnalyzerCommands {
    /// Analyze one snapshot file and write the result
    pub fn run_single(settings: &RunSettings) -> Result<()> {
        banner("F&O Derivatives Analysis");

        println!("{} Loading snapshot {}...", "→".cyan(), settings.input.display().to_string().yellow());
        let snapshot = load_snapshot(&settings.input)
            .with_context(|| format!("loading {}", settings.input.display()))?;

        let result = analyze_snapshot(settings, &snapshot);
        Self::display_result(&result);

        std::fs::write(&settings.output, serde_json::to_string_pretty(&result)?)
            .with_context(|| format!("writing {}", settings.output.display()))?;
        println!("{} Saved analysis to {}", "✓".green(), settings.output.display());
        println!("{}", "=".repeat(60).blue());

        Ok(())
    }

    /// Analyze every snapshot in a directory, tickers in parallel
    pub fn run_batch(settings: &RunSettings) -> Result<()> {
        banner("F&O Batch Analysis");

        let paths = list_snapshots(&settings.input)
            .with_context(|| format!("listing {}", settings.input.display()))?;
        println!("{} Found {} snapshots", "✓".green(), paths.len());
        println!();

        let start_time = std::time::Instant::now();

        let outcomes: Vec<(PathBuf, Result<AnalysisResult, AnalyzerError>)> = paths
            .par_iter()
            .map(|path| {
                let outcome = load_snapshot(path).map(|s| analyze_snapshot(settings, &s));
                (path.clone(), outcome)
            })
            .collect();

        let elapsed = start_time.elapsed();

        let mut successful = Vec::new();
        let mut failed = Vec::new();

        for (path, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    successful.push(result);
                    print!("{}", ".".green());
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Snapshot skipped");
                    failed.push((path.display().to_string(), e.to_string()));
                    print!("{}", "✗".red());
                }
            }
        }
        println!("\n");

        Self::display_batch_summary(&successful, &failed, elapsed);

        std::fs::write(&settings.output, serde_json::to_string_pretty(&successful)?)
            .with_context(|| format!("writing {}", settings.output.display()))?;
        println!("{} Saved {} analyses to {}", "✓".green(), successful.len(), settings.output.display());

        info!(ok = successful.len(), failed = failed.len(), "Batch complete");
        println!();
        println!("{}", "=".repeat(60).blue());
        println!("{}", "Done!".green().bold());
        println!("{}", "=".repeat(60).blue());

        Ok(())
    }

    /// Build the standard strategies for one snapshot
    pub fn run_strategies(settings: &RunSettings) -> Result<()> {
        banner("F&O Strategy Builder");

        let snapshot = load_snapshot(&settings.input)
            .with_context(|| format!("loading {}", settings.input.display()))?;
        let lot_size = resolve_lot_size(settings, &snapshot);

        println!("{} Ticker: {}", "✓".green(), snapshot.chain.ticker.yellow());
        println!("{} Spot: {:.2}", "✓".green(), snapshot.chain.spot_price);
        println!("{} Lot size: {}", "✓".green(), lot_size);
        println!();

        let strategies = vec![
            bull_call_spread(&snapshot.chain, lot_size),
            iron_condor(&snapshot.chain, settings.condor_width, lot_size),
        ];
        for strategy in &strategies {
            Self::display_strategy(strategy);
        }

        std::fs::write(&settings.output, serde_json::to_string_pretty(&strategies)?)
            .with_context(|| format!("writing {}", settings.output.display()))?;
        println!("{} Saved strategies to {}", "✓".green(), settings.output.display());
        println!("{}", "=".repeat(60).blue());

        Ok(())
    }

    fn display_result(result: &AnalysisResult) {
        let chain = &result.details.chain_analysis;

        println!("{}", "Chain".cyan().bold());
        println!("{} Spot: {:.2}  ATM: {:.0}", "✓".green(), chain.spot_price, chain.atm_strike);
        println!("{} PCR: {:.2} ({:?})", "✓".green(), chain.pcr, chain.sentiment);
        println!("{} Max pain: {:.0}", "✓".green(), chain.max_pain);
        println!("{} ATM IV: {:.2}%  Skew: {:.2}", "✓".green(), chain.atm_iv, chain.iv_skew);
        println!(
            "{} Support: {:.0}  Resistance: {:.0}",
            "✓".green(),
            chain.oi_sr_levels.support,
            chain.oi_sr_levels.resistance
        );
        if let Some(basis) = &result.details.futures_basis {
            println!(
                "{} Basis: {:.2} ({:.2}%, {:.2}% annualized)",
                "✓".green(),
                basis.basis,
                basis.basis_pct,
                basis.annualized_basis_pct
            );
        }
        println!();

        println!("{}", "Signals".cyan().bold());
        for signal in &result.signals {
            println!(
                "  {} {:<10} {:?} ({:.2}) {}",
                "•".blue(),
                signal.source.yellow(),
                signal.signal_type,
                signal.confidence,
                signal.reason
            );
        }
        println!();

        let rec = result.recommendation.label();
        let rec = match result.recommendation {
            Recommendation::StrongBuy | Recommendation::ModerateBuy => rec.green(),
            Recommendation::Hold => rec.yellow(),
            _ => rec.red(),
        };
        println!("{} {} ({:.0}%)", "→".cyan(), rec.bold(), result.confidence * 100.0);
        println!("{} {}", "ℹ".blue(), result.summary);
        println!();
    }

    fn display_strategy(strategy: &OptionStrategy) {
        println!("{}", strategy.name.cyan().bold());
        if strategy.is_placeholder() {
            println!("  {} Required strikes not found in chain", "⚠".yellow());
            println!();
            return;
        }
        for leg in &strategy.legs {
            println!(
                "  {} {:?} {} {:.0} @ {:.2}",
                "•".blue(),
                leg.action,
                leg.option_type.code(),
                leg.strike_price,
                leg.premium
            );
        }
        println!("  Net premium: {:.2}", strategy.net_premium);
        println!("  Max profit: {:.2}  Max loss: {:.2}", strategy.max_profit, strategy.max_loss);
        let breakevens: Vec<String> = strategy.breakevens.iter().map(|b| format!("{:.2}", b)).collect();
        println!("  Breakeven: {}", breakevens.join(", "));
        println!();
    }

    fn display_batch_summary(
        successful: &[AnalysisResult],
        failed: &[(String, String)],
        elapsed: std::time::Duration,
    ) {
        println!("{}", "=".repeat(60).blue());
        println!("{}", "Summary".cyan().bold());
        println!("{}", "=".repeat(60).blue());
        println!("{} Successful: {}", "✓".green(), successful.len());
        println!("{} Failed: {}", "✗".red(), failed.len());
        println!("{} Time taken: {:.2}s", "⏱".yellow(), elapsed.as_secs_f64());
        println!();

        for result in successful.iter().take(10) {
            println!(
                "  {} {} → {} ({:.0}%)",
                "✓".green(),
                result.ticker.yellow(),
                result.recommendation.label(),
                result.confidence * 100.0
            );
        }
        if successful.len() > 10 {
            println!("  ... and {} more", successful.len() - 10);
        }
        println!();

        if !failed.is_empty() {
            println!("{}", "Failed Snapshots:".red());
            for (path, error) in failed.iter().take(10) {
                println!("  {} {} → {}", "✗".red(), path.yellow(), error.chars().take(80).collect::<String>());
            }
            if failed.len() > 10 {
                println!("  ... and {} more", failed.len() - 10);
            }
            println!();
        }
    }

    /// Print usage instructions
    pub fn print_usage() {
        eprintln!("Set FNO_MODE environment variable to control execution mode");
        eprintln!("Examples:");
        eprintln!("  FNO_MODE=single FNO_INPUT=chain.json cargo run        # Analyze one snapshot");
        eprintln!("  FNO_MODE=batch FNO_INPUT=snapshots cargo run          # Analyze a directory");
        eprintln!("  FNO_MODE=strategies FNO_INPUT=chain.json FNO_LOT_SIZE=75 cargo run");
    }
}
