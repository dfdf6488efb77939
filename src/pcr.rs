use crate::config;
use crate::models::{OptionContract, OptionType, Signal, SignalType};
use serde::{Deserialize, Serialize};

/// Five-band reading of the OI put/call ratio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PcrSignal {
    StronglyBullish,
    Bullish,
    Neutral,
    Bearish,
    StronglyBearish,
}

impl PcrSignal {
    /// Bands are inclusive at their lower bound and checked high to low
    pub fn from_pcr(pcr: f64) -> Self {
        if pcr >= config::PCR_STRONGLY_BULLISH {
            PcrSignal::StronglyBullish
        } else if pcr >= config::PCR_BULLISH {
            PcrSignal::Bullish
        } else if pcr >= config::PCR_NEUTRAL {
            PcrSignal::Neutral
        } else if pcr >= config::PCR_BEARISH {
            PcrSignal::Bearish
        } else {
            PcrSignal::StronglyBearish
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            PcrSignal::StronglyBullish => {
                "Heavy put writing; writers expect the underlying to hold or rise"
            }
            PcrSignal::Bullish => "More puts than calls outstanding; support is being built",
            PcrSignal::Neutral => "Put and call positioning is balanced",
            PcrSignal::Bearish => "Call writing dominates; resistance is being built overhead",
            PcrSignal::StronglyBearish => {
                "Very low put/call ratio; heavy call writing caps the upside"
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PcrSignal::StronglyBullish => "strongly bullish",
            PcrSignal::Bullish => "bullish",
            PcrSignal::Neutral => "neutral",
            PcrSignal::Bearish => "bearish",
            PcrSignal::StronglyBearish => "strongly bearish",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PcrAnalysis {
    pub total_call_oi: u64,
    pub total_put_oi: u64,
    pub total_call_volume: u64,
    pub total_put_volume: u64,
    pub pcr: f64,
    pub pcr_volume: f64,
    pub signal: PcrSignal,
    pub interpretation: String,
}

impl PcrAnalysis {
    /// Signal for aggregation; None when there is no call OI to compare against
    pub fn to_signal(&self) -> Option<Signal> {
        if self.total_call_oi == 0 {
            return None;
        }

        let (signal_type, confidence) = match self.signal {
            PcrSignal::StronglyBullish => (SignalType::Buy, config::PCR_STRONG_CONFIDENCE),
            PcrSignal::Bullish => (SignalType::Buy, config::PCR_CONFIDENCE),
            PcrSignal::Neutral => (SignalType::Neutral, config::PCR_NEUTRAL_CONFIDENCE),
            PcrSignal::Bearish => (SignalType::Sell, config::PCR_CONFIDENCE),
            PcrSignal::StronglyBearish => (SignalType::Sell, config::PCR_STRONG_CONFIDENCE),
        };

        Some(Signal::new(
            "PCR",
            signal_type,
            confidence,
            format!(
                "PCR {:.2} is {}: {}",
                self.pcr,
                self.signal.label(),
                self.interpretation
            ),
        ))
    }
}

/// Ratio guarded against a zero denominator
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Put/call ratio by OI and by volume
pub fn calculate_pcr(contracts: &[OptionContract]) -> PcrAnalysis {
    let mut total_call_oi = 0u64;
    let mut total_put_oi = 0u64;
    let mut total_call_volume = 0u64;
    let mut total_put_volume = 0u64;

    for contract in contracts {
        match contract.option_type {
            OptionType::Call => {
                total_call_oi += contract.open_interest;
                total_call_volume += contract.volume;
            }
            OptionType::Put => {
                total_put_oi += contract.open_interest;
                total_put_volume += contract.volume;
            }
        }
    }

    let pcr = ratio(total_put_oi, total_call_oi);
    let signal = PcrSignal::from_pcr(pcr);

    PcrAnalysis {
        total_call_oi,
        total_put_oi,
        total_call_volume,
        total_put_volume,
        pcr,
        pcr_volume: ratio(total_put_volume, total_call_volume),
        signal,
        interpretation: signal.interpretation().to_string(),
    }
}
