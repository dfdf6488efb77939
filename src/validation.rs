use crate::error::AnalyzerError;
use crate::models::{OptionChain, OptionType};

fn check_finite(label: &str, value: f64) -> Result<(), AnalyzerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnalyzerError::InvalidInput(format!("{} must be finite and non-negative, got {}", label, value)))
    }
}

/// Structural checks the analytics assume the data layer already made
pub fn validate_chain(chain: &OptionChain) -> Result<(), AnalyzerError> {
    check_finite("spot price", chain.spot_price)?;

    let mut seen: Vec<(f64, OptionType)> = Vec::with_capacity(chain.contracts.len());

    for contract in &chain.contracts {
        check_finite("strike price", contract.strike_price)?;
        check_finite("last price", contract.last_price)?;
        check_finite("implied volatility", contract.implied_volatility)?;

        let key = (contract.strike_price, contract.option_type);
        if seen.contains(&key) {
            return Err(AnalyzerError::InvalidInput(format!(
                "{}: duplicate {} contract at strike {}",
                chain.ticker,
                contract.option_type.code(),
                contract.strike_price
            )));
        }
        seen.push(key);
    }

    Ok(())
}
