use fno_analyzer::{
    aggregate, aggregate_signals, analyze_basis, classify_buildup, BasisSignal, BuildupType,
    FuturesContract, Recommendation, Signal, SignalType,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn futures(last_price: f64) -> FuturesContract {
        FuturesContract {
            ticker: "INFY".to_string(),
            last_price,
            price_change: 12.0,
            open_interest: 2_000_000,
            oi_change: 50_000,
            lot_size: 400,
        }
    }

    #[test]
    fn test_opposing_signals_cancel_to_hold() {
        let signals = vec![
            Signal::new("PCR", SignalType::Buy, 0.6, "bullish"),
            Signal::new("MaxPain", SignalType::Sell, 0.6, "above max pain"),
        ];
        let agg = aggregate_signals(&signals);
        assert_eq!(agg.net_score, 0.0);
        assert_eq!(agg.recommendation, Recommendation::Hold);
        assert_eq!(agg.confidence, 0.4);
    }

    #[test]
    fn test_single_buy_is_moderate_buy() {
        let signals = vec![Signal::new("PCR", SignalType::Buy, 0.6, "bullish")];
        let agg = aggregate_signals(&signals);
        assert_eq!(agg.net_score, 1.0);
        assert_eq!(agg.recommendation, Recommendation::ModerateBuy);
        assert!((agg.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_strong_sell_band() {
        let agg = aggregate([(SignalType::Sell, 0.7), (SignalType::Sell, 0.45), (SignalType::Neutral, 0.3)]);
        // net = -1.15 / 1.45
        assert!((agg.net_score + 1.15 / 1.45).abs() < 1e-9);
        assert_eq!(agg.recommendation, Recommendation::ModerateSell);
        assert!((agg.confidence - (0.6 + (1.15 / 1.45) * 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_weak_buy_band_fixed_confidence() {
        // net = (0.6 - 0.4) / 1.0 = 0.2
        let agg = aggregate([(SignalType::Buy, 0.6), (SignalType::Sell, 0.4)]);
        assert_eq!(agg.recommendation, Recommendation::ModerateBuy);
        assert_eq!(agg.confidence, 0.5);
    }

    #[test]
    fn test_buildup_table() {
        let cases = [
            (1.0, 1.0, BuildupType::LongBuildup),
            (-1.0, 1.0, BuildupType::ShortBuildup),
            (-1.0, -1.0, BuildupType::LongUnwinding),
            (1.0, -1.0, BuildupType::ShortCovering),
            (0.0, 1.0, BuildupType::LongBuildup),
            (0.0, -1.0, BuildupType::LongBuildup),
            (0.0, 0.0, BuildupType::LongBuildup),
            (-1.0, 0.0, BuildupType::LongBuildup),
        ];
        for (price, oi, expected) in cases {
            assert_eq!(classify_buildup(price, oi), expected, "price {} oi {}", price, oi);
        }
    }

    #[test]
    fn test_basis_example() {
        let basis = analyze_basis(Some(&futures(1280.0)), 1250.0, 20);
        assert!((basis.basis - 30.0).abs() < 1e-9);
        assert!((basis.basis_pct - 2.4).abs() < 1e-9);
        assert!((basis.annualized_basis_pct - 43.8).abs() < 1e-9);
        assert_eq!(basis.signal, BasisSignal::Bullish);
        assert_eq!(basis.days_to_expiry, 20);
    }

    #[test]
    fn test_basis_neutral_band() {
        let basis = analyze_basis(Some(&futures(1252.0)), 1250.0, 20);
        assert_eq!(basis.signal, BasisSignal::Neutral);
    }

    #[test]
    fn test_basis_degenerate() {
        let none = analyze_basis(None, 1250.0, 20);
        assert_eq!(none.basis, 0.0);
        assert_eq!(none.signal, BasisSignal::Neutral);

        let bad_spot = analyze_basis(Some(&futures(1280.0)), -1.0, 20);
        assert_eq!(bad_spot.basis_pct, 0.0);
        assert_eq!(bad_spot.annualized_basis_pct, 0.0);
    }
}
