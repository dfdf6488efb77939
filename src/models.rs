use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::basis::FuturesBasis;
use crate::chain::ChainSnapshot;
use crate::oi_buildup::OiBuildupAnalysis;
use crate::pcr::PcrAnalysis;

// -----------------------------------------------
// MARKET DATA (read-only input)
// -----------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    #[serde(alias = "CE")]
    Call,
    #[serde(alias = "PE")]
    Put,
}

impl OptionType {
    /// NSE short code
    pub fn code(&self) -> &'static str {
        match self {
            OptionType::Call => "CE",
            OptionType::Put => "PE",
        }
    }
}

/// Greeks as delivered by the data layer; never computed here
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

/// One call or put at a given strike
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    pub strike_price: f64,
    pub option_type: OptionType,

    #[serde(default)]
    pub expiry_date: String,

    #[serde(default)]
    pub last_price: f64,

    /// Change in premium since previous close
    #[serde(default)]
    pub price_change: f64,

    #[serde(default)]
    pub volume: u64,

    #[serde(default)]
    pub open_interest: u64,

    #[serde(default)]
    pub oi_change: i64,

    #[serde(default)]
    pub oi_change_pct: f64,

    #[serde(default)]
    pub bid_price: f64,

    #[serde(default)]
    pub ask_price: f64,

    #[serde(default)]
    pub bid_qty: u64,

    #[serde(default)]
    pub ask_qty: u64,

    /// Percentage points, as quoted by the exchange (14.5 = 14.5%)
    #[serde(default)]
    pub implied_volatility: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeks: Option<Greeks>,
}

impl OptionContract {
    /// Bare contract with only the fields the analytics key on
    pub fn new(strike_price: f64, option_type: OptionType, last_price: f64, open_interest: u64) -> Self {
        Self {
            strike_price,
            option_type,
            expiry_date: String::new(),
            last_price,
            price_change: 0.0,
            volume: 0,
            open_interest,
            oi_change: 0,
            oi_change_pct: 0.0,
            bid_price: 0.0,
            ask_price: 0.0,
            bid_qty: 0,
            ask_qty: 0,
            implied_volatility: 0.0,
            greeks: None,
        }
    }

    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }
}

/// Single-expiry option chain snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    pub ticker: String,
    pub spot_price: f64,

    #[serde(default)]
    pub expiry_date: String,

    #[serde(default)]
    pub contracts: Vec<OptionContract>,

    // Exchange-supplied aggregates; may be stale, the analytics recompute them
    #[serde(default)]
    pub total_call_oi: u64,

    #[serde(default)]
    pub total_put_oi: u64,

    #[serde(default)]
    pub pcr: f64,

    #[serde(default)]
    pub max_pain: f64,
}

impl OptionChain {
    pub fn new(ticker: impl Into<String>, spot_price: f64, contracts: Vec<OptionContract>) -> Self {
        Self {
            ticker: ticker.into(),
            spot_price,
            expiry_date: String::new(),
            contracts,
            total_call_oi: 0,
            total_put_oi: 0,
            pcr: 0.0,
            max_pain: 0.0,
        }
    }

    pub fn calls(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(|c| c.option_type == OptionType::Call)
    }

    pub fn puts(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(|c| c.option_type == OptionType::Put)
    }

    /// First contract of the given kind at exactly this strike
    pub fn find(&self, strike: f64, option_type: OptionType) -> Option<&OptionContract> {
        self.contracts
            .iter()
            .find(|c| c.option_type == option_type && c.strike_price == strike)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuturesContract {
    pub ticker: String,
    pub last_price: f64,

    #[serde(default)]
    pub price_change: f64,

    #[serde(default)]
    pub open_interest: u64,

    #[serde(default)]
    pub oi_change: i64,

    #[serde(default)]
    pub lot_size: u32,
}

// -----------------------------------------------
// SIGNALS
// -----------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Neutral,
}

/// One directional opinion from one analytic, weighted by confidence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signal {
    pub source: String,
    pub signal_type: SignalType,
    pub confidence: f64,
    pub reason: String,
}

impl Signal {
    pub fn new(
        source: impl Into<String>,
        signal_type: SignalType,
        confidence: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            signal_type,
            confidence: confidence.clamp(0.0, 1.0),
            reason: reason.into(),
        }
    }
}

// -----------------------------------------------
// STRATEGIES
// -----------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionLeg {
    pub option_type: OptionType,
    pub strike_price: f64,
    pub action: LegAction,
    pub lots: u32,
    /// Premium per unit at construction time
    pub premium: f64,
}

impl OptionLeg {
    pub fn buy(contract: &OptionContract) -> Self {
        Self::from_contract(contract, LegAction::Buy)
    }

    pub fn sell(contract: &OptionContract) -> Self {
        Self::from_contract(contract, LegAction::Sell)
    }

    fn from_contract(contract: &OptionContract, action: LegAction) -> Self {
        Self {
            option_type: contract.option_type,
            strike_price: contract.strike_price,
            action,
            lots: 1,
            premium: contract.last_price,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PayoffPoint {
    pub price: f64,
    pub pnl: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionStrategy {
    pub name: String,
    pub legs: Vec<OptionLeg>,
    /// Positive = net credit received, negative = net debit paid
    pub net_premium: f64,
    pub max_profit: f64,
    pub max_loss: f64,
    pub breakevens: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payoff: Option<Vec<PayoffPoint>>,
}

impl OptionStrategy {
    /// Named strategy with no legs, returned when the chain lacks a required contract
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legs: Vec::new(),
            net_premium: 0.0,
            max_profit: 0.0,
            max_loss: 0.0,
            breakevens: Vec::new(),
            payoff: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.legs.is_empty()
    }
}

// -----------------------------------------------
// ANALYSIS OUTPUT
// -----------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisType {
    Technical,
    Fundamental,
    Sentiment,
    Derivatives,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    ModerateBuy,
    Hold,
    ModerateSell,
    StrongSell,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "STRONG_BUY",
            Recommendation::ModerateBuy => "MODERATE_BUY",
            Recommendation::Hold => "HOLD",
            Recommendation::ModerateSell => "MODERATE_SELL",
            Recommendation::StrongSell => "STRONG_SELL",
        }
    }
}

/// Nested sub-results of one derivatives analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivativesDetails {
    pub chain_analysis: ChainSnapshot,
    pub pcr_analysis: PcrAnalysis,
    pub oi_buildup: OiBuildupAnalysis,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub futures_basis: Option<FuturesBasis>,

    #[serde(default)]
    pub strategies: Vec<OptionStrategy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub analysis_type: AnalysisType,
    pub agent_name: String,
    pub signals: Vec<Signal>,
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub summary: String,
    pub details: DerivativesDetails,
    pub timestamp: DateTime<Utc>,
}

/// On-disk input: one chain plus its optional futures contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub chain: OptionChain,

    #[serde(default)]
    pub futures: Option<FuturesContract>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_accepts_nse_codes() {
        let ce: OptionType = serde_json::from_str("\"CE\"").unwrap();
        let put: OptionType = serde_json::from_str("\"PUT\"").unwrap();
        assert_eq!(ce, OptionType::Call);
        assert_eq!(put, OptionType::Put);
        assert_eq!(serde_json::to_string(&OptionType::Call).unwrap(), "\"CALL\"");
    }

    #[test]
    fn test_leg_wire_field_names() {
        let contract = OptionContract::new(25000.0, OptionType::Call, 160.0, 1000);
        let json = serde_json::to_value(OptionLeg::buy(&contract)).unwrap();
        assert_eq!(json["strike_price"], 25000.0);
        assert_eq!(json["option_type"], "CALL");
        assert_eq!(json["action"], "BUY");
        assert_eq!(json["lots"], 1);
        assert_eq!(json["premium"], 160.0);
    }

    #[test]
    fn test_signal_confidence_clamped() {
        let s = Signal::new("PCR", SignalType::Buy, 1.7, "too sure");
        assert_eq!(s.confidence, 1.0);
    }

    #[test]
    fn test_recommendation_serializes_screaming_case() {
        let json = serde_json::to_string(&Recommendation::ModerateBuy).unwrap();
        assert_eq!(json, "\"MODERATE_BUY\"");
        assert_eq!(Recommendation::ModerateBuy.label(), "MODERATE_BUY");
    }
}
