//! Amount conversion over rate tables

use crate::core::rates::Rates;

/// Converts `amount` of `base` into `target` using rates relative to `base`.
pub fn convert(rates: &Rates, base: &str, amount: f64, target: &str) -> Option<f64> {
    if base == target {
        return Some(amount);
    }
    rates.get(target).map(|rate| amount * rate)
}

/// Converts between two codes that are both listed in `rates`, going through
/// the table's own base.
pub fn cross_convert(rates: &Rates, amount: f64, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(amount);
    }
    let from_rate = rates.get(from).copied().filter(|r| *r > 0.0)?;
    let to_rate = rates.get(to)?;
    Some(amount / from_rate * to_rate)
}
