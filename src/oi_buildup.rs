use crate::config;
use crate::models::{FuturesContract, OptionContract, OptionType, Signal, SignalType};
use serde::{Deserialize, Serialize};

/// Positioning regime read from price change vs OI change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuildupType {
    LongBuildup,
    ShortBuildup,
    LongUnwinding,
    ShortCovering,
}

impl BuildupType {
    pub fn label(&self) -> &'static str {
        match self {
            BuildupType::LongBuildup => "Long Buildup",
            BuildupType::ShortBuildup => "Short Buildup",
            BuildupType::LongUnwinding => "Long Unwinding",
            BuildupType::ShortCovering => "Short Covering",
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            BuildupType::LongBuildup => "Price and OI rising together; fresh longs are being added",
            BuildupType::ShortBuildup => "Price falling as OI rises; fresh shorts are being added",
            BuildupType::LongUnwinding => "Price and OI falling together; longs are exiting",
            BuildupType::ShortCovering => "Price rising as OI falls; shorts are covering",
        }
    }
}

/// Classify a (price change, OI change) pair.
///
/// Unchanged price falls through to `LongBuildup` whatever the OI did.
pub fn classify_buildup(price_change: f64, oi_change: f64) -> BuildupType {
    if price_change < 0.0 {
        if oi_change > 0.0 {
            BuildupType::ShortBuildup
        } else if oi_change < 0.0 {
            BuildupType::LongUnwinding
        } else {
            BuildupType::LongBuildup
        }
    } else if price_change > 0.0 && oi_change < 0.0 {
        BuildupType::ShortCovering
    } else {
        BuildupType::LongBuildup
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrikeBuildup {
    pub strike_price: f64,
    pub option_type: OptionType,
    pub oi_change: i64,
    pub oi_change_pct: f64,
    pub price_change: f64,
    pub buildup: BuildupType,
    pub bias: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OiBuildupAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub futures_buildup: Option<BuildupType>,

    #[serde(default)]
    pub futures_interpretation: String,

    /// Top put strikes by absolute OI change
    pub put_buildups: Vec<StrikeBuildup>,

    /// Top call strikes by absolute OI change
    pub call_buildups: Vec<StrikeBuildup>,
}

impl OiBuildupAnalysis {
    /// Futures regime as a signal; None without a futures contract
    pub fn to_signal(&self) -> Option<Signal> {
        let buildup = self.futures_buildup?;

        let (signal_type, confidence) = match buildup {
            BuildupType::LongBuildup => (SignalType::Buy, config::BUILDUP_CONFIDENCE),
            BuildupType::ShortCovering => (SignalType::Buy, config::BUILDUP_REVERSAL_CONFIDENCE),
            BuildupType::ShortBuildup => (SignalType::Sell, config::BUILDUP_CONFIDENCE),
            BuildupType::LongUnwinding => (SignalType::Sell, config::BUILDUP_REVERSAL_CONFIDENCE),
        };

        Some(Signal::new(
            "FuturesOI",
            signal_type,
            confidence,
            format!("Futures {}: {}", buildup.label(), buildup.interpretation()),
        ))
    }
}

fn strike_bias(option_type: OptionType, oi_change: i64) -> &'static str {
    match (option_type, oi_change > 0) {
        (OptionType::Put, true) => "support building (bullish)",
        (OptionType::Put, false) => "support weakening",
        (OptionType::Call, true) => "resistance building (bearish)",
        (OptionType::Call, false) => "resistance weakening",
    }
}

/// Contracts of one kind with nonzero OI change, largest absolute change first
fn rank_strikes(contracts: &[OptionContract], option_type: OptionType) -> Vec<StrikeBuildup> {
    let mut ranked: Vec<StrikeBuildup> = contracts
        .iter()
        .filter(|c| c.option_type == option_type && c.oi_change != 0)
        .map(|c| StrikeBuildup {
            strike_price: c.strike_price,
            option_type,
            oi_change: c.oi_change,
            oi_change_pct: c.oi_change_pct,
            price_change: c.price_change,
            buildup: classify_buildup(c.price_change, c.oi_change as f64),
            bias: strike_bias(option_type, c.oi_change).to_string(),
        })
        .collect();

    // Stable sort keeps input order among equal changes
    ranked.sort_by(|a, b| b.oi_change.unsigned_abs().cmp(&a.oi_change.unsigned_abs()));
    ranked.truncate(config::TOP_BUILDUPS_PER_SIDE);
    ranked
}

/// Futures regime plus the most active option strikes on each side
pub fn analyze_oi_buildup(
    contracts: &[OptionContract],
    futures: Option<&FuturesContract>,
) -> OiBuildupAnalysis {
    let futures_buildup =
        futures.map(|f| classify_buildup(f.price_change, f.oi_change as f64));

    OiBuildupAnalysis {
        futures_buildup,
        futures_interpretation: futures_buildup
            .map(|b| b.interpretation().to_string())
            .unwrap_or_default(),
        put_buildups: rank_strikes(contracts, OptionType::Put),
        call_buildups: rank_strikes(contracts, OptionType::Call),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_all_sign_combinations() {
        assert_eq!(classify_buildup(1.0, 1.0), BuildupType::LongBuildup);
        assert_eq!(classify_buildup(-1.0, 1.0), BuildupType::ShortBuildup);
        assert_eq!(classify_buildup(-1.0, -1.0), BuildupType::LongUnwinding);
        assert_eq!(classify_buildup(1.0, -1.0), BuildupType::ShortCovering);
        // Unchanged price defaults to long buildup
        assert_eq!(classify_buildup(0.0, 1.0), BuildupType::LongBuildup);
        assert_eq!(classify_buildup(0.0, -1.0), BuildupType::LongBuildup);
        assert_eq!(classify_buildup(0.0, 0.0), BuildupType::LongBuildup);
        assert_eq!(classify_buildup(1.0, 0.0), BuildupType::LongBuildup);
    }

    #[test]
    fn test_rank_keeps_top_five_by_abs_change() {
        let contracts: Vec<OptionContract> = (0..8)
            .map(|i| {
                let mut c = OptionContract::new(100.0 + i as f64, OptionType::Put, 1.0, 1000);
                c.oi_change = if i % 2 == 0 { (i as i64 + 1) * 100 } else { -(i as i64 + 1) * 100 };
                c
            })
            .collect();

        let ranked = rank_strikes(&contracts, OptionType::Put);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].oi_change, -800);
        assert_eq!(ranked[1].oi_change, 700);
        assert_eq!(ranked[0].bias, "support weakening");
        assert_eq!(ranked[1].bias, "support building (bullish)");
    }

    #[test]
    fn test_unchanged_oi_is_skipped() {
        let contracts = vec![OptionContract::new(100.0, OptionType::Call, 1.0, 1000)];
        let analysis = analyze_oi_buildup(&contracts, None);
        assert!(analysis.call_buildups.is_empty());
        assert!(analysis.futures_buildup.is_none());
        assert!(analysis.to_signal().is_none());
    }

    #[test]
    fn test_futures_signal_confidence() {
        let futures = FuturesContract {
            ticker: "NIFTY".to_string(),
            last_price: 25100.0,
            price_change: 50.0,
            open_interest: 1_000_000,
            oi_change: -20_000,
            lot_size: 25,
        };
        let analysis = analyze_oi_buildup(&[], Some(&futures));
        assert_eq!(analysis.futures_buildup, Some(BuildupType::ShortCovering));

        let signal = analysis.to_signal().unwrap();
        assert_eq!(signal.signal_type, SignalType::Buy);
        assert_eq!(signal.confidence, config::BUILDUP_REVERSAL_CONFIDENCE);
    }
}
