use crate::aggregator::aggregate_signals;
use crate::basis::{analyze_basis, days_to_expiry};
use crate::chain::{analyze_chain, ChainSnapshot};
use crate::config::{self, AnalyzerConfig};
use crate::models::{
    AnalysisResult, AnalysisType, DerivativesDetails, FuturesContract, OptionChain, Signal,
    SignalType,
};
use crate::oi_buildup::{analyze_oi_buildup, OiBuildupAnalysis};
use crate::pcr::{calculate_pcr, PcrAnalysis};
use crate::strategy::{bull_call_spread, iron_condor};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

/// Spot vs max pain: far above pulls down, far below pulls up
pub fn max_pain_signal(spot_price: f64, max_pain: f64) -> Option<Signal> {
    if max_pain <= 0.0 {
        return None;
    }

    let distance_pct = (spot_price - max_pain) / max_pain * 100.0;
    let (signal_type, reason) = if distance_pct > config::MAX_PAIN_DISTANCE_PCT {
        (
            SignalType::Sell,
            format!("Spot {:.2}% above max pain {:.0}; expiry pull is lower", distance_pct, max_pain),
        )
    } else if distance_pct < -config::MAX_PAIN_DISTANCE_PCT {
        (
            SignalType::Buy,
            format!("Spot {:.2}% below max pain {:.0}; expiry pull is higher", distance_pct.abs(), max_pain),
        )
    } else {
        (
            SignalType::Neutral,
            format!("Spot within {:.0}% of max pain {:.0}", config::MAX_PAIN_DISTANCE_PCT, max_pain),
        )
    };

    Some(Signal::new("MaxPain", signal_type, config::MAX_PAIN_CONFIDENCE, reason))
}

/// Rich put IV over call IV means demand for downside protection
pub fn iv_skew_signal(iv_skew: f64) -> Option<Signal> {
    if iv_skew > config::IV_SKEW_THRESHOLD {
        Some(Signal::new(
            "IVSkew",
            SignalType::Sell,
            config::IV_SKEW_CONFIDENCE,
            format!("Put IV exceeds call IV by {:.2} points; hedging demand elevated", iv_skew),
        ))
    } else {
        None
    }
}

/// All signals derived from one chain/futures snapshot, in a fixed order
pub fn collect_signals(
    snapshot: &ChainSnapshot,
    pcr: &PcrAnalysis,
    buildup: &OiBuildupAnalysis,
) -> Vec<Signal> {
    [
        pcr.to_signal(),
        max_pain_signal(snapshot.spot_price, snapshot.max_pain),
        buildup.to_signal(),
        iv_skew_signal(snapshot.iv_skew),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn build_summary(
    ticker: &str,
    snapshot: &ChainSnapshot,
    pcr: &PcrAnalysis,
    buildup: &OiBuildupAnalysis,
    net_score: f64,
    recommendation: &str,
    confidence: f64,
) -> String {
    let mut summary = format!(
        "{}: PCR {:.2} ({}), max pain {:.0}, ATM {:.0} IV {:.2}%, IV skew {:.2}",
        ticker,
        snapshot.pcr,
        pcr.signal.label(),
        snapshot.max_pain,
        snapshot.atm_strike,
        snapshot.atm_iv,
        snapshot.iv_skew,
    );

    if let Some(b) = buildup.futures_buildup {
        summary.push_str(&format!(", futures {}", b.label()));
    }

    summary.push_str(&format!(
        ". Net score {:+.2} -> {} ({:.0}% confidence)",
        net_score,
        recommendation,
        confidence * 100.0
    ));
    summary
}

/// Turns an option chain and optional futures contract into one recommendation
#[derive(Debug, Clone, Default)]
pub struct DerivativesAnalyzer {
    config: AnalyzerConfig,
}

impl DerivativesAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze as of now
    pub fn analyze(
        &self,
        chain: Option<&OptionChain>,
        futures: Option<&FuturesContract>,
    ) -> AnalysisResult {
        let now = Utc::now();
        self.analyze_at(chain, futures, now, now.date_naive())
    }

    /// Analyze with an explicit timestamp and reference date; output depends only on inputs
    pub fn analyze_at(
        &self,
        chain: Option<&OptionChain>,
        futures: Option<&FuturesContract>,
        timestamp: DateTime<Utc>,
        as_of: NaiveDate,
    ) -> AnalysisResult {
        let contracts = chain.map(|c| c.contracts.as_slice()).unwrap_or(&[]);
        let ticker = chain
            .map(|c| c.ticker.clone())
            .or_else(|| futures.map(|f| f.ticker.clone()))
            .unwrap_or_default();

        let snapshot = analyze_chain(chain);
        let pcr_analysis = calculate_pcr(contracts);
        let oi_buildup = analyze_oi_buildup(contracts, futures);

        let signals = collect_signals(&snapshot, &pcr_analysis, &oi_buildup);
        let aggregate = aggregate_signals(&signals);

        let futures_basis = match (futures, chain) {
            (Some(f), Some(c)) => days_to_expiry(&c.expiry_date, as_of)
                .map(|days| analyze_basis(Some(f), c.spot_price, days)),
            _ => None,
        };

        let strategies = chain
            .filter(|c| !c.contracts.is_empty())
            .map(|c| {
                vec![
                    bull_call_spread(c, self.config.lot_size),
                    iron_condor(c, self.config.condor_width, self.config.lot_size),
                ]
            })
            .unwrap_or_default();

        let summary = build_summary(
            &ticker,
            &snapshot,
            &pcr_analysis,
            &oi_buildup,
            aggregate.net_score,
            aggregate.recommendation.label(),
            aggregate.confidence,
        );

        info!(
            ticker = %ticker,
            signals = signals.len(),
            net_score = aggregate.net_score,
            recommendation = aggregate.recommendation.label(),
            confidence = aggregate.confidence,
            "Derivatives analysis complete"
        );

        AnalysisResult {
            ticker,
            analysis_type: AnalysisType::Derivatives,
            agent_name: self.config.agent_name.clone(),
            signals,
            recommendation: aggregate.recommendation,
            confidence: aggregate.confidence,
            summary,
            details: DerivativesDetails {
                chain_analysis: snapshot,
                pcr_analysis,
                oi_buildup,
                futures_basis,
                strategies,
            },
            timestamp,
        }
    }
}
