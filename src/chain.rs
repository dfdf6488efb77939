use crate::config;
use crate::max_pain::{calculate_max_pain, strike_oi_table};
use crate::models::{OptionChain, OptionContract, OptionType};
use crate::pcr::calculate_pcr;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Coarse three-band view of PCR
    pub fn from_pcr(pcr: f64) -> Self {
        if pcr > config::SENTIMENT_BULLISH_PCR {
            Sentiment::Bullish
        } else if pcr < config::SENTIMENT_BEARISH_PCR {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StrikeOi {
    pub strike_price: f64,
    pub open_interest: f64,
}

/// OI walls: heaviest call strikes overhead, heaviest put strikes below
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OiLevels {
    /// Max call OI strike
    pub resistance: f64,
    /// Max put OI strike
    pub support: f64,
    pub resistance_levels: Vec<StrikeOi>,
    pub support_levels: Vec<StrikeOi>,
}

/// Chain-level metrics for one expiry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChainSnapshot {
    pub ticker: String,
    pub spot_price: f64,
    pub pcr: f64,
    pub max_pain: f64,
    pub atm_strike: f64,
    pub atm_iv: f64,
    pub iv_skew: f64,
    pub oi_sr_levels: OiLevels,
    pub sentiment: Sentiment,
}

/// Find ATM strike (closest to spot across both kinds, prefer floor on a tie)
pub fn find_atm_strike(contracts: &[OptionContract], spot_price: f64) -> f64 {
    let mut closest_strike = 0.0;
    let mut min_distance = f64::MAX;

    for contract in contracts {
        let strike = contract.strike_price;
        let distance = (strike - spot_price).abs();

        if distance < min_distance || (distance == min_distance && strike < closest_strike) {
            min_distance = distance;
            closest_strike = strike;
        }
    }

    closest_strike
}

/// Call and put IV at the ATM strike, when both are quoted
fn atm_ivs(contracts: &[OptionContract], atm_strike: f64) -> Option<(f64, f64)> {
    let iv_at = |kind: OptionType| {
        contracts
            .iter()
            .find(|c| c.option_type == kind && c.strike_price == atm_strike)
            .map(|c| c.implied_volatility)
            .filter(|iv| *iv > 0.0)
    };

    Some((iv_at(OptionType::Call)?, iv_at(OptionType::Put)?))
}

/// Top strikes by OI for one side, heaviest first; lower strike wins a tie
fn rank_levels(rows: &[(f64, f64)]) -> Vec<StrikeOi> {
    let mut levels: Vec<StrikeOi> = rows
        .iter()
        .filter(|(_, oi)| *oi > 0.0)
        .map(|&(strike_price, open_interest)| StrikeOi { strike_price, open_interest })
        .collect();

    levels.sort_by(|a, b| {
        b.open_interest
            .total_cmp(&a.open_interest)
            .then(a.strike_price.total_cmp(&b.strike_price))
    });
    levels.truncate(config::OI_LEVELS_PER_SIDE);
    levels
}

pub fn calculate_oi_levels(contracts: &[OptionContract]) -> OiLevels {
    let table = strike_oi_table(contracts);
    let calls: Vec<(f64, f64)> = table.iter().map(|&(s, call, _)| (s, call)).collect();
    let puts: Vec<(f64, f64)> = table.iter().map(|&(s, _, put)| (s, put)).collect();

    let resistance_levels = rank_levels(&calls);
    let support_levels = rank_levels(&puts);

    OiLevels {
        resistance: resistance_levels.first().map(|l| l.strike_price).unwrap_or(0.0),
        support: support_levels.first().map(|l| l.strike_price).unwrap_or(0.0),
        resistance_levels,
        support_levels,
    }
}

/// Derive the chain snapshot. A missing or empty chain yields the zero snapshot.
pub fn analyze_chain(chain: Option<&OptionChain>) -> ChainSnapshot {
    let Some(chain) = chain else {
        debug!("No option chain supplied, returning empty snapshot");
        return ChainSnapshot::default();
    };

    if chain.contracts.is_empty() {
        debug!(ticker = %chain.ticker, "Option chain has no contracts");
        return ChainSnapshot {
            ticker: chain.ticker.clone(),
            spot_price: chain.spot_price,
            ..ChainSnapshot::default()
        };
    }

    let contracts = &chain.contracts;
    let pcr = calculate_pcr(contracts).pcr;
    let atm_strike = find_atm_strike(contracts, chain.spot_price);

    let (atm_iv, iv_skew) = match atm_ivs(contracts, atm_strike) {
        Some((call_iv, put_iv)) => ((call_iv + put_iv) / 2.0, put_iv - call_iv),
        None => (0.0, 0.0),
    };

    ChainSnapshot {
        ticker: chain.ticker.clone(),
        spot_price: chain.spot_price,
        pcr,
        max_pain: calculate_max_pain(contracts),
        atm_strike,
        atm_iv,
        iv_skew,
        oi_sr_levels: calculate_oi_levels(contracts),
        sentiment: Sentiment::from_pcr(pcr),
    }
}
