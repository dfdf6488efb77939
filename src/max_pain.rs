use crate::models::{OptionContract, OptionType};

/// Per-strike OI for both sides, strikes ascending
pub(crate) fn strike_oi_table(contracts: &[OptionContract]) -> Vec<(f64, f64, f64)> {
    let mut table: Vec<(f64, f64, f64)> = Vec::new();

    for contract in contracts {
        let oi = contract.open_interest as f64;
        let idx = match table.iter().position(|(s, _, _)| *s == contract.strike_price) {
            Some(idx) => idx,
            None => {
                table.push((contract.strike_price, 0.0, 0.0));
                table.len() - 1
            }
        };
        match contract.option_type {
            OptionType::Call => table[idx].1 += oi,
            OptionType::Put => table[idx].2 += oi,
        }
    }

    table.sort_by(|a, b| a.0.total_cmp(&b.0));
    table
}

/// Total payout option writers owe if the underlying settles at `settle`
pub fn writer_pain(table: &[(f64, f64, f64)], settle: f64) -> f64 {
    table
        .iter()
        .map(|&(strike, call_oi, put_oi)| {
            if strike < settle {
                (settle - strike) * call_oi
            } else if strike > settle {
                (strike - settle) * put_oi
            } else {
                0.0
            }
        })
        .sum()
}

/// Strike at which option writers pay out the least at expiry.
///
/// Candidates are the distinct strikes of the chain scanned in ascending
/// order; on equal pain the lowest strike wins, so the result does not
/// depend on the order contracts arrive in. Empty input yields 0.
pub fn calculate_max_pain(contracts: &[OptionContract]) -> f64 {
    let table = strike_oi_table(contracts);

    let mut max_pain = 0.0;
    let mut min_pain = f64::MAX;

    for &(candidate, _, _) in &table {
        let pain = writer_pain(&table, candidate);
        if pain < min_pain {
            min_pain = pain;
            max_pain = candidate;
        }
    }

    max_pain
}
