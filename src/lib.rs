pub mod aggregator;
pub mod analyzer;
pub mod basis;
pub mod chain;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod max_pain;
pub mod models;
pub mod oi_buildup;
pub mod pcr;
pub mod strategy;
pub mod validation;

// Re-exports (public API)
pub use aggregator::{aggregate, aggregate_signals, Aggregate};
pub use analyzer::DerivativesAnalyzer;
pub use basis::{analyze_basis, days_to_expiry, BasisSignal, FuturesBasis};
pub use chain::{analyze_chain, find_atm_strike, ChainSnapshot, OiLevels, Sentiment};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use max_pain::calculate_max_pain;
pub use models::{
    AnalysisResult, AnalysisType, DerivativesDetails, FuturesContract, Greeks, LegAction,
    MarketSnapshot, OptionChain, OptionContract, OptionLeg, OptionStrategy, OptionType,
    PayoffPoint, Recommendation, Signal, SignalType,
};
pub use oi_buildup::{analyze_oi_buildup, classify_buildup, BuildupType, OiBuildupAnalysis};
pub use pcr::{calculate_pcr, PcrAnalysis, PcrSignal};
pub use strategy::{bull_call_spread, iron_condor, payoff_curve};
pub use validation::validate_chain;
