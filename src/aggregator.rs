//! Weighted voting over directional signals.
//!
//! Shared by every analysis domain: each one produces its own signal list
//! and hands it here for the net score and the recommendation band.

use crate::config;
use crate::models::{Recommendation, Signal, SignalType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Aggregate {
    /// (BUY weight - SELL weight) / total weight, in [-1, 1]
    pub net_score: f64,
    pub recommendation: Recommendation,
    pub confidence: f64,
}

/// Net score of (direction, confidence) votes; 0 with no weight
pub fn net_score<I>(votes: I) -> f64
where
    I: IntoIterator<Item = (SignalType, f64)>,
{
    let mut buy = 0.0;
    let mut sell = 0.0;
    let mut total = 0.0;

    for (signal_type, confidence) in votes {
        match signal_type {
            SignalType::Buy => buy += confidence,
            SignalType::Sell => sell += confidence,
            SignalType::Neutral => {}
        }
        total += confidence;
    }

    if total > 0.0 { (buy - sell) / total } else { 0.0 }
}

/// Map a net score onto the recommendation bands
pub fn recommend(net: f64) -> (Recommendation, f64) {
    if net > config::AGG_STRONG_NET {
        (
            Recommendation::ModerateBuy,
            config::AGG_BASE_CONFIDENCE + net * config::AGG_NET_SCALE,
        )
    } else if net > config::AGG_WEAK_NET {
        (Recommendation::ModerateBuy, config::AGG_WEAK_CONFIDENCE)
    } else if net < -config::AGG_STRONG_NET {
        (
            Recommendation::ModerateSell,
            config::AGG_BASE_CONFIDENCE + net.abs() * config::AGG_NET_SCALE,
        )
    } else if net < -config::AGG_WEAK_NET {
        (Recommendation::ModerateSell, config::AGG_WEAK_CONFIDENCE)
    } else {
        (Recommendation::Hold, config::AGG_HOLD_CONFIDENCE)
    }
}

pub fn aggregate<I>(votes: I) -> Aggregate
where
    I: IntoIterator<Item = (SignalType, f64)>,
{
    let net = net_score(votes);
    let (recommendation, confidence) = recommend(net);

    Aggregate {
        net_score: net,
        recommendation,
        confidence,
    }
}

pub fn aggregate_signals(signals: &[Signal]) -> Aggregate {
    aggregate(signals.iter().map(|s| (s.signal_type, s.confidence)))
}
