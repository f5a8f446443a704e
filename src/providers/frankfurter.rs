use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::error::RateError;
use crate::core::rates::{RateProvider, RateSeries, RateSnapshot};

/// Rate provider backed by the Frankfurter REST API.
pub struct FrankfurterProvider {
    base_url: String,
}

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize)]
struct SnapshotPayload {
    amount: f64,
    base: String,
    date: String,
    rates: BTreeMap<String, f64>,
}

impl From<SnapshotPayload> for RateSnapshot {
    fn from(payload: SnapshotPayload) -> Self {
        RateSnapshot {
            amount: payload.amount,
            base: payload.base,
            date: payload.date,
            rates: payload.rates,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RangePayload {
    base: String,
    start_date: String,
    end_date: String,
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, RateError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting rate data from {}", url);

        let client = reqwest::Client::builder().user_agent("fxlens/0.1").build()?;
        let response = client.get(&url).send().await.map_err(|e| {
            RateError::ProviderUnavailable(format!("request error: {e} for URL: {url}"))
        })?;

        if !response.status().is_success() {
            return Err(RateError::ProviderUnavailable(format!(
                "HTTP error: {} from {}",
                response.status(),
                url
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            RateError::ProviderUnavailable(format!("failed to parse response from {url}: {e}"))
        })
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterCurrencies", skip(self))]
    async fn list_currencies(&self) -> Result<BTreeMap<String, String>, RateError> {
        self.get_json("/currencies").await
    }

    #[instrument(name = "FrankfurterRate", skip(self), fields(%from, %to))]
    async fn get_rate(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<RateSnapshot, RateError> {
        let payload: SnapshotPayload = self
            .get_json(&format!("/latest?amount={amount}&from={from}&to={to}"))
            .await?;
        Ok(payload.into())
    }

    #[instrument(name = "FrankfurterLatest", skip(self), fields(%base))]
    async fn get_latest(&self, base: &str) -> Result<RateSnapshot, RateError> {
        let payload: SnapshotPayload = self.get_json(&format!("/latest?from={base}")).await?;
        Ok(payload.into())
    }

    #[instrument(name = "FrankfurterForDate", skip(self), fields(%date, %base))]
    async fn get_for_date(
        &self,
        date: &str,
        base: &str,
        target: Option<&str>,
    ) -> Result<RateSnapshot, RateError> {
        let path = match target {
            Some(to) => format!("/{date}?from={base}&to={to}"),
            None => format!("/{date}?from={base}"),
        };
        let payload: SnapshotPayload = self.get_json(&path).await?;
        Ok(payload.into())
    }

    #[instrument(name = "FrankfurterRange", skip(self), fields(%base, %target))]
    async fn get_range(
        &self,
        base: &str,
        target: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<RateSeries, RateError> {
        let payload: RangePayload = self
            .get_json(&format!(
                "/{start_date}..{end_date}?from={base}&to={target}"
            ))
            .await?;
        RateSeries::new(
            payload.base,
            payload.start_date,
            payload.end_date,
            payload.rates,
        )
    }
}
