//! Hardcoded fallback rate table

use crate::core::rates::Rates;

/// Base currency of [`DEFAULT_RATES`].
pub const DEFAULT_BASE: &str = "usd";

/// Approximate rates per one US dollar, used when nothing better is known.
pub const DEFAULT_RATES: &[(&str, f64)] = &[
    ("usd", 1.0),
    ("npr", 133.5),
    ("inr", 83.1),
    ("eur", 0.92),
    ("gbp", 0.79),
    ("aud", 1.52),
    ("cad", 1.36),
    ("jpy", 149.5),
    ("cny", 7.24),
    ("thb", 35.8),
    ("bdt", 109.7),
    ("lkr", 303.0),
];

/// Returns the default rate table, relative to USD.
pub fn default_rates() -> Rates {
    DEFAULT_RATES
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect()
}
