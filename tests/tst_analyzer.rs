use chrono::{NaiveDate, TimeZone, Utc};
use fno_analyzer::{
    AnalysisType, AnalyzerConfig, BuildupType, DerivativesAnalyzer, FuturesContract,
    OptionChain, OptionContract, OptionType, Recommendation, SignalType,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(strike: f64, option_type: OptionType, premium: f64, oi: u64, iv: f64) -> OptionContract {
        let mut c = OptionContract::new(strike, option_type, premium, oi);
        c.implied_volatility = iv;
        c
    }

    fn chain(put_iv: f64) -> OptionChain {
        let mut chain = OptionChain::new(
            "NIFTY",
            25000.0,
            vec![
                contract(24800.0, OptionType::Call, 290.0, 50_000, 15.0),
                contract(24800.0, OptionType::Put, 60.0, 200_000, 17.0),
                contract(25000.0, OptionType::Call, 160.0, 100_000, 14.0),
                contract(25000.0, OptionType::Put, 140.0, 150_000, put_iv),
                contract(25200.0, OptionType::Call, 80.0, 150_000, 13.0),
                contract(25200.0, OptionType::Put, 270.0, 50_000, 14.0),
            ],
        );
        chain.expiry_date = "30-Dec-2025".to_string();
        chain
    }

    fn futures(price_change: f64, oi_change: i64) -> FuturesContract {
        FuturesContract {
            ticker: "NIFTY".to_string(),
            last_price: 25100.0,
            price_change,
            open_interest: 12_000_000,
            oi_change,
            lot_size: 75,
        }
    }

    fn run(chain: Option<&OptionChain>, futures: Option<&FuturesContract>) -> fno_analyzer::AnalysisResult {
        let analyzer = DerivativesAnalyzer::new(AnalyzerConfig::default().with_lot_size(25.0));
        let timestamp = Utc.with_ymd_and_hms(2025, 12, 10, 9, 30, 0).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
        analyzer.analyze_at(chain, futures, timestamp, as_of)
    }

    #[test]
    fn test_bullish_chain_with_long_buildup() {
        let chain = chain(15.0);
        let fut = futures(85.0, 150_000);
        let result = run(Some(&chain), Some(&fut));

        assert_eq!(result.ticker, "NIFTY");
        assert_eq!(result.analysis_type, AnalysisType::Derivatives);
        assert_eq!(result.agent_name, "DerivativesAgent");

        let sources: Vec<(&str, SignalType)> = result
            .signals
            .iter()
            .map(|s| (s.source.as_str(), s.signal_type))
            .collect();
        assert_eq!(
            sources,
            vec![
                ("PCR", SignalType::Buy),
                ("MaxPain", SignalType::Neutral),
                ("FuturesOI", SignalType::Buy),
            ]
        );

        // (0.55 + 0.6) / (0.55 + 0.5 + 0.6)
        let net = 1.15 / 1.65;
        assert_eq!(result.recommendation, Recommendation::ModerateBuy);
        assert!((result.confidence - (0.6 + net * 0.3)).abs() < 1e-9);
        assert!(result.summary.contains("NIFTY"));
        assert!(result.summary.contains("MODERATE_BUY"));
    }

    #[test]
    fn test_details_bag() {
        let chain = chain(15.0);
        let fut = futures(85.0, 150_000);
        let result = run(Some(&chain), Some(&fut));
        let details = &result.details;

        assert_eq!(details.chain_analysis.max_pain, 25000.0);
        assert_eq!(details.chain_analysis.atm_strike, 25000.0);
        assert!((details.pcr_analysis.pcr - 400_000.0 / 300_000.0).abs() < 1e-12);
        assert_eq!(details.oi_buildup.futures_buildup, Some(BuildupType::LongBuildup));

        let basis = details.futures_basis.as_ref().unwrap();
        assert_eq!(basis.days_to_expiry, 20);
        assert!((basis.basis - 100.0).abs() < 1e-9);

        assert_eq!(details.strategies.len(), 2);
        for strategy in &details.strategies {
            for leg in &strategy.legs {
                assert!(chain.find(leg.strike_price, leg.option_type).is_some());
            }
        }
    }

    #[test]
    fn test_put_skew_adds_sell_signal() {
        let chain = chain(21.0);
        let result = run(Some(&chain), None);

        let skew = result.signals.iter().find(|s| s.source == "IVSkew").unwrap();
        assert_eq!(skew.signal_type, SignalType::Sell);
        assert_eq!(skew.confidence, 0.4);
        assert!(result.details.futures_basis.is_none());
        assert!(result.signals.iter().all(|s| s.source != "FuturesOI"));
    }

    #[test]
    fn test_short_buildup_pulls_towards_sell() {
        let chain = chain(15.0);
        let fut = futures(-120.0, 300_000);
        let result = run(Some(&chain), Some(&fut));

        let fut_signal = result.signals.iter().find(|s| s.source == "FuturesOI").unwrap();
        assert_eq!(fut_signal.signal_type, SignalType::Sell);
        assert_eq!(fut_signal.confidence, 0.6);

        // (0.55 - 0.6) / 1.65 is inside the hold band
        assert_eq!(result.recommendation, Recommendation::Hold);
        assert_eq!(result.confidence, 0.4);
    }

    #[test]
    fn test_absent_chain_degenerates() {
        let result = run(None, None);
        assert!(result.signals.is_empty());
        assert_eq!(result.recommendation, Recommendation::Hold);
        assert_eq!(result.details.chain_analysis.atm_strike, 0.0);
        assert!(result.details.strategies.is_empty());
    }

    #[test]
    fn test_futures_only() {
        let fut = futures(10.0, -5_000);
        let result = run(None, Some(&fut));
        assert_eq!(result.ticker, "NIFTY");
        assert_eq!(result.signals.len(), 1);
        assert_eq!(result.signals[0].confidence, 0.45);
        assert!(result.details.futures_basis.is_none());
    }

    #[test]
    fn test_deterministic_output() {
        let chain = chain(15.0);
        let fut = futures(85.0, 150_000);
        let a = serde_json::to_string(&run(Some(&chain), Some(&fut))).unwrap();
        let b = serde_json::to_string(&run(Some(&chain), Some(&fut))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_result_wire_format() {
        let chain = chain(15.0);
        let json = serde_json::to_value(run(Some(&chain), None)).unwrap();

        assert_eq!(json["analysis_type"], "DERIVATIVES");
        assert_eq!(json["details"]["chain_analysis"]["atm_strike"], 25000.0);
        assert!(json["details"]["chain_analysis"]["oi_sr_levels"].is_object());

        let leg = &json["details"]["strategies"][0]["legs"][0];
        assert_eq!(leg["option_type"], "CALL");
        assert_eq!(leg["action"], "BUY");
        assert_eq!(leg["strike_price"], 25000.0);
        assert_eq!(leg["lots"], 1);
        assert_eq!(leg["premium"], 160.0);
    }
}
