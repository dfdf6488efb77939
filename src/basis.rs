use crate::config;
use crate::models::FuturesContract;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BasisSignal {
    /// Futures trading at a premium
    Bullish,
    /// Futures trading at a discount
    Bearish,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FuturesBasis {
    pub futures_price: f64,
    pub spot_price: f64,
    pub basis: f64,
    pub basis_pct: f64,
    pub annualized_basis_pct: f64,
    pub days_to_expiry: i64,
    pub signal: BasisSignal,
    pub interpretation: String,
}

/// Days from `as_of` to the expiry date.
///
/// Accepts NSE style (`30-Dec-2025`) or ISO (`2025-12-30`); None if neither parses.
/// Negative once expiry has passed.
pub fn days_to_expiry(expiry_date: &str, as_of: NaiveDate) -> Option<i64> {
    let expiry = NaiveDate::parse_from_str(expiry_date, "%d-%b-%Y")
        .or_else(|_| NaiveDate::parse_from_str(expiry_date, "%Y-%m-%d"))
        .ok()?;

    Some((expiry - as_of).num_days())
}

/// Premium/discount of futures over spot.
/// A missing contract or non-positive spot gives the zero result.
pub fn analyze_basis(
    futures: Option<&FuturesContract>,
    spot_price: f64,
    days_to_expiry: i64,
) -> FuturesBasis {
    let Some(futures) = futures else {
        return FuturesBasis::default();
    };
    if spot_price <= 0.0 {
        return FuturesBasis::default();
    }

    let basis = futures.last_price - spot_price;
    let basis_pct = basis / spot_price * 100.0;
    let annualized_basis_pct = if days_to_expiry > 0 {
        basis_pct * config::DAYS_PER_YEAR / days_to_expiry as f64
    } else {
        0.0
    };

    let (signal, interpretation) = if basis_pct > config::BASIS_PREMIUM_PCT {
        (
            BasisSignal::Bullish,
            format!("Futures at {:.2}% premium to spot; longs paying up for carry", basis_pct),
        )
    } else if basis_pct < config::BASIS_DISCOUNT_PCT {
        (
            BasisSignal::Bearish,
            format!("Futures at {:.2}% discount to spot; shorts in control", basis_pct.abs()),
        )
    } else {
        (
            BasisSignal::Neutral,
            format!("Futures basis {:.2}% is within normal carry", basis_pct),
        )
    };

    FuturesBasis {
        futures_price: futures.last_price,
        spot_price,
        basis,
        basis_pct,
        annualized_basis_pct,
        days_to_expiry,
        signal,
        interpretation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn futures(last_price: f64) -> FuturesContract {
        FuturesContract {
            ticker: "RELIANCE".to_string(),
            last_price,
            price_change: 0.0,
            open_interest: 0,
            oi_change: 0,
            lot_size: 500,
        }
    }

    #[test]
    fn test_days_to_expiry_formats() {
        let as_of = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
        assert_eq!(days_to_expiry("30-Dec-2025", as_of), Some(20));
        assert_eq!(days_to_expiry("2025-12-30", as_of), Some(20));
        assert_eq!(days_to_expiry("2025-12-09", as_of), Some(-1));
        assert_eq!(days_to_expiry("next thursday", as_of), None);
    }

    #[test]
    fn test_discount_is_bearish() {
        let result = analyze_basis(Some(&futures(990.0)), 1000.0, 10);
        assert_eq!(result.signal, BasisSignal::Bearish);
        assert!((result.basis_pct + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_expired_contract_has_no_annualized_basis() {
        let result = analyze_basis(Some(&futures(1020.0)), 1000.0, 0);
        assert_eq!(result.annualized_basis_pct, 0.0);
        assert_eq!(result.signal, BasisSignal::Bullish);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(analyze_basis(None, 1000.0, 10), FuturesBasis::default());
        assert_eq!(analyze_basis(Some(&futures(1000.0)), 0.0, 10), FuturesBasis::default());
    }
}
