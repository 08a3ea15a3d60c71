use crate::core::rates::{FailureReason, Rates};
use serde_json::Value;
use tracing::debug;

/// Substitutes the base currency code into a provider URL template.
pub fn render_url(template: &str, key: &str) -> String {
    template.replace("{key}", key)
}

/// Extracts the rate table stored under the `key` field of a provider
/// response such as `{"date": "2024-03-01", "usd": {"npr": 133.5}}`.
///
/// Entries that are not positive numbers are dropped.
pub fn parse_rates(key: &str, body: &str) -> Result<Rates, FailureReason> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FailureReason::Malformed(e.to_string()))?;

    let table = value
        .get(key)
        .ok_or_else(|| FailureReason::MissingBase(key.to_string()))?
        .as_object()
        .ok_or_else(|| FailureReason::Malformed(format!("'{key}' is not an object")))?;

    let rates: Rates = table
        .iter()
        .filter_map(|(code, rate)| {
            let rate = rate.as_f64().filter(|r| r.is_finite() && *r > 0.0);
            if rate.is_none() {
                debug!("Skipping unusable rate for {}", code);
            }
            rate.map(|r| (code.to_lowercase(), r))
        })
        .collect();

    if rates.is_empty() {
        return Err(FailureReason::Malformed(format!("'{key}' has no usable rates")));
    }
    Ok(rates)
}
