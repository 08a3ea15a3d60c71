use super::util::{parse_rates, render_url};
use crate::core::rates::{FailureReason, RateSource, Rates};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// A rate provider reached over HTTP, answering with a JSON body whose
/// top-level field named after the base currency holds the rate table.
pub struct HttpRateSource {
    name: String,
    url_template: String,
    client: reqwest::Client,
}

impl HttpRateSource {
    pub fn new(name: &str, url_template: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("tripfx/1.0")
            .timeout(timeout)
            .build()?;
        Ok(HttpRateSource {
            name: name.to_string(),
            url_template: url_template.to_string(),
            client,
        })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "RateSourceFetch",
        skip(self),
        fields(source = %self.name)
    )]
    async fn fetch_rates(&self, key: &str) -> Result<Rates, FailureReason> {
        let url = render_url(&self.url_template, key);
        debug!("Requesting rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FailureReason::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FailureReason::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FailureReason::Transport(e.to_string()))?;

        parse_rates(key, &body)
    }
}
