//! Multi-leg option structures built from a chain snapshot.
//!
//! Every builder returns a named [`OptionStrategy`]; when a required
//! contract is missing from the chain the strategy comes back with no legs
//! instead of failing.

use crate::chain::find_atm_strike;
use crate::config;
use crate::models::{
    LegAction, OptionChain, OptionContract, OptionLeg, OptionStrategy, OptionType, PayoffPoint,
};
use tracing::warn;

pub const BULL_CALL_SPREAD: &str = "Bull Call Spread";
pub const IRON_CONDOR: &str = "Iron Condor";

/// Contract of the given kind whose strike is nearest `target`; lower strike wins a tie
fn nearest_contract(
    chain: &OptionChain,
    option_type: OptionType,
    target: f64,
) -> Option<&OptionContract> {
    let mut best: Option<&OptionContract> = None;

    for contract in chain.contracts.iter().filter(|c| c.option_type == option_type) {
        let distance = (contract.strike_price - target).abs();
        let better = match best {
            None => true,
            Some(b) => {
                let best_distance = (b.strike_price - target).abs();
                distance < best_distance
                    || (distance == best_distance && contract.strike_price < b.strike_price)
            }
        };
        if better {
            best = Some(contract);
        }
    }

    best
}

/// Lowest-strike call strictly above `strike`
fn next_higher_call(chain: &OptionChain, strike: f64) -> Option<&OptionContract> {
    chain
        .calls()
        .filter(|c| c.strike_price > strike)
        .min_by(|a, b| a.strike_price.total_cmp(&b.strike_price))
}

/// Intrinsic value of one unit at expiry
fn intrinsic(option_type: OptionType, strike: f64, price: f64) -> f64 {
    match option_type {
        OptionType::Call => (price - strike).max(0.0),
        OptionType::Put => (strike - price).max(0.0),
    }
}

/// P&L of all legs at one underlying price at expiry
pub fn payoff_at(legs: &[OptionLeg], price: f64, lot_size: f64) -> f64 {
    legs.iter()
        .map(|leg| {
            let value = intrinsic(leg.option_type, leg.strike_price, price);
            let per_unit = match leg.action {
                LegAction::Buy => value - leg.premium,
                LegAction::Sell => leg.premium - value,
            };
            per_unit * lot_size * leg.lots as f64
        })
        .sum()
}

/// Expiry P&L over spot -/+ 10%: `PAYOFF_STEPS` equal steps, both ends included
pub fn payoff_curve(legs: &[OptionLeg], spot_price: f64, lot_size: f64) -> Vec<PayoffPoint> {
    let low = spot_price * (1.0 - config::PAYOFF_RANGE);
    let high = spot_price * (1.0 + config::PAYOFF_RANGE);
    let step = (high - low) / config::PAYOFF_STEPS as f64;

    (0..=config::PAYOFF_STEPS)
        .map(|i| {
            let price = low + step * i as f64;
            PayoffPoint {
                price,
                pnl: payoff_at(legs, price, lot_size),
            }
        })
        .collect()
}

/// Buy the ATM call, sell the next strike up
pub fn bull_call_spread(chain: &OptionChain, lot_size: f64) -> OptionStrategy {
    let atm_strike = find_atm_strike(&chain.contracts, chain.spot_price);

    let Some(buy) = chain.find(atm_strike, OptionType::Call) else {
        warn!(ticker = %chain.ticker, atm_strike, "No ATM call for bull call spread");
        return OptionStrategy::placeholder(BULL_CALL_SPREAD);
    };
    let Some(sell) = next_higher_call(chain, buy.strike_price) else {
        warn!(ticker = %chain.ticker, atm_strike, "No higher call strike for bull call spread");
        return OptionStrategy::placeholder(BULL_CALL_SPREAD);
    };

    let debit = (buy.last_price - sell.last_price) * lot_size;
    let net_premium = -debit;
    let max_loss = net_premium.abs();
    let max_profit = (sell.strike_price - buy.strike_price) * lot_size - max_loss;
    let breakeven = buy.strike_price + buy.last_price - sell.last_price;

    let legs = vec![OptionLeg::buy(buy), OptionLeg::sell(sell)];
    let payoff = payoff_curve(&legs, chain.spot_price, lot_size);

    OptionStrategy {
        name: BULL_CALL_SPREAD.to_string(),
        legs,
        net_premium,
        max_profit,
        max_loss,
        breakevens: vec![breakeven],
        payoff: Some(payoff),
    }
}

/// Short strangle at ATM -/+ width, hedged by longs at ATM -/+ 2*width.
/// A non-positive width falls back to the default.
pub fn iron_condor(chain: &OptionChain, width: f64, lot_size: f64) -> OptionStrategy {
    let width = if width <= 0.0 { config::DEFAULT_CONDOR_WIDTH } else { width };
    let atm = find_atm_strike(&chain.contracts, chain.spot_price);

    let legs = (
        nearest_contract(chain, OptionType::Put, atm - width),
        nearest_contract(chain, OptionType::Put, atm - 2.0 * width),
        nearest_contract(chain, OptionType::Call, atm + width),
        nearest_contract(chain, OptionType::Call, atm + 2.0 * width),
    );
    let (Some(sell_put), Some(buy_put), Some(sell_call), Some(buy_call)) = legs else {
        warn!(ticker = %chain.ticker, atm, width, "Missing wing for iron condor");
        return OptionStrategy::placeholder(IRON_CONDOR);
    };

    let credit_per_unit = sell_put.last_price - buy_put.last_price + sell_call.last_price
        - buy_call.last_price;
    let net_credit = credit_per_unit * lot_size;

    let put_width = sell_put.strike_price - buy_put.strike_price;
    let call_width = buy_call.strike_price - sell_call.strike_price;
    let max_loss = put_width.max(call_width) * lot_size - net_credit;

    let legs = vec![
        OptionLeg::sell(sell_put),
        OptionLeg::buy(buy_put),
        OptionLeg::sell(sell_call),
        OptionLeg::buy(buy_call),
    ];
    let payoff = payoff_curve(&legs, chain.spot_price, lot_size);

    OptionStrategy {
        name: IRON_CONDOR.to_string(),
        legs,
        net_premium: net_credit,
        max_profit: net_credit,
        max_loss,
        breakevens: vec![
            sell_put.strike_price - credit_per_unit,
            sell_call.strike_price + credit_per_unit,
        ],
        payoff: Some(payoff),
    }
}
