// -----------------------------------------------
// PCR SIGNAL BANDS (lower bound of each band, checked high to low)
// -----------------------------------------------
pub const PCR_STRONGLY_BULLISH: f64 = 1.5;
pub const PCR_BULLISH: f64 = 1.2;
pub const PCR_NEUTRAL: f64 = 0.8;
pub const PCR_BEARISH: f64 = 0.5;

// -----------------------------------------------
// CHAIN SENTIMENT (coarse 3-band view of PCR)
// -----------------------------------------------
pub const SENTIMENT_BULLISH_PCR: f64 = 1.2;
pub const SENTIMENT_BEARISH_PCR: f64 = 0.7;

// -----------------------------------------------
// OI LEVELS / BUILDUP RANKING
// -----------------------------------------------
pub const OI_LEVELS_PER_SIDE: usize = 3;
pub const TOP_BUILDUPS_PER_SIDE: usize = 5;

// -----------------------------------------------
// SIGNAL CONFIDENCES
// -----------------------------------------------
pub const PCR_STRONG_CONFIDENCE: f64 = 0.7;
pub const PCR_CONFIDENCE: f64 = 0.55;
pub const PCR_NEUTRAL_CONFIDENCE: f64 = 0.3;

pub const MAX_PAIN_CONFIDENCE: f64 = 0.5;
pub const MAX_PAIN_DISTANCE_PCT: f64 = 2.0;

pub const BUILDUP_CONFIDENCE: f64 = 0.6;
pub const BUILDUP_REVERSAL_CONFIDENCE: f64 = 0.45; // covering / unwinding

pub const IV_SKEW_THRESHOLD: f64 = 5.0;
pub const IV_SKEW_CONFIDENCE: f64 = 0.4;

// -----------------------------------------------
// AGGREGATION BANDS
// -----------------------------------------------
pub const AGG_STRONG_NET: f64 = 0.3;
pub const AGG_WEAK_NET: f64 = 0.1;
pub const AGG_BASE_CONFIDENCE: f64 = 0.6;
pub const AGG_NET_SCALE: f64 = 0.3;
pub const AGG_WEAK_CONFIDENCE: f64 = 0.5;
pub const AGG_HOLD_CONFIDENCE: f64 = 0.4;

// -----------------------------------------------
// STRATEGY DEFAULTS
// -----------------------------------------------
pub const DEFAULT_LOT_SIZE: f64 = 25.0;
pub const DEFAULT_CONDOR_WIDTH: f64 = 200.0;

// Payoff grid: spot * (1 -/+ range), split into this many steps
pub const PAYOFF_RANGE: f64 = 0.10;
pub const PAYOFF_STEPS: usize = 50;

// -----------------------------------------------
// FUTURES BASIS
// -----------------------------------------------
pub const BASIS_PREMIUM_PCT: f64 = 1.0;
pub const BASIS_DISCOUNT_PCT: f64 = -0.5;
pub const DAYS_PER_YEAR: f64 = 365.0;

// -----------------------------------------------
// AGENT IDENTITY
// -----------------------------------------------
pub const DEFAULT_AGENT_NAME: &str = "DerivativesAgent";

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Get the execution mode from environment or default to single
pub fn get_execution_mode() -> String {
    std::env::var("FNO_MODE").unwrap_or_else(|_| "single".to_string())
}

/// Input snapshot file (single/strategies) or directory (batch)
pub fn get_input_path(mode: &str) -> String {
    std::env::var("FNO_INPUT").unwrap_or_else(|_| {
        if mode == "batch" {
            "snapshots".to_string()
        } else {
            "chain.json".to_string()
        }
    })
}

/// Report output path
pub fn get_output_path(mode: &str) -> String {
    std::env::var("FNO_OUTPUT").unwrap_or_else(|_| match mode {
        "batch" => "batch_analysis.json".to_string(),
        "strategies" => "strategies.json".to_string(),
        _ => "analysis.json".to_string(),
    })
}

/// Lot size override; None lets the futures contract decide
pub fn get_lot_size() -> Option<f64> {
    std::env::var("FNO_LOT_SIZE")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| *v > 0.0)
}

/// Iron condor wing width
pub fn get_condor_width() -> f64 {
    std::env::var("FNO_CONDOR_WIDTH")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(DEFAULT_CONDOR_WIDTH)
}

pub fn get_log_dir() -> String {
    std::env::var("FNO_LOG_DIR").unwrap_or_else(|_| "./logs".to_string())
}

/// Reference date for days-to-expiry, `YYYY-MM-DD`
pub fn get_as_of() -> Option<String> {
    std::env::var("FNO_AS_OF").ok()
}

/// Settings the orchestrator needs beyond the market data itself
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub agent_name: String,
    pub lot_size: f64,
    pub condor_width: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            lot_size: DEFAULT_LOT_SIZE,
            condor_width: DEFAULT_CONDOR_WIDTH,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_lot_size(mut self, lot_size: f64) -> Self {
        self.lot_size = lot_size;
        self
    }

    pub fn with_condor_width(mut self, width: f64) -> Self {
        self.condor_width = width;
        self
    }
}
