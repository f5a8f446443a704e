//! Rate data model and the provider abstraction.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::RateError;

/// Wire-level date format used throughout: ISO 8601 `YYYY-MM-DD`.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, ISO_DATE_FORMAT).ok()
}

/// One set of rates against a base currency, as published for a single date.
///
/// Snapshots are request-scoped: produced fresh per query, never mutated, and
/// discarded as soon as a newer snapshot for the same query arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub amount: f64,
    pub base: String,
    pub date: String,
    pub rates: BTreeMap<String, f64>,
}

/// Rates for a currency pair over a contiguous date range.
///
/// Keys of `rates` are ISO 8601 dates, so the `BTreeMap` iteration order
/// (lexicographic) is also chronological. That property is load-bearing for
/// trend analysis and is enforced by [`RateSeries::new`] rather than assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    pub base: String,
    pub start_date: String,
    pub end_date: String,
    pub rates: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RateSeries {
    /// Builds a series, rejecting any date key that is not `YYYY-MM-DD`.
    ///
    /// A malformed key means the provider payload cannot be trusted to sort
    /// chronologically, so it surfaces as a provider failure.
    pub fn new(
        base: String,
        start_date: String,
        end_date: String,
        rates: BTreeMap<String, BTreeMap<String, f64>>,
    ) -> Result<Self, RateError> {
        if let Some(bad) = rates.keys().find(|date| parse_iso_date(date).is_none()) {
            return Err(RateError::ProviderUnavailable(format!(
                "malformed date key in rate series: {bad}"
            )));
        }
        Ok(RateSeries {
            base,
            start_date,
            end_date,
            rates,
        })
    }
}

/// The remote exchange-rate data service, seen through a narrow interface.
///
/// All calls are request/response; any transport failure or non-success
/// status surfaces as a typed error, never a silent default.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Currency code to display name, for every currency the provider knows.
    async fn list_currencies(&self) -> Result<BTreeMap<String, String>, RateError>;

    /// Rates for `amount` units of `from`, quoted in `to`.
    async fn get_rate(&self, amount: f64, from: &str, to: &str)
    -> Result<RateSnapshot, RateError>;

    /// Latest rates of 1 unit of `base` against all known currencies.
    async fn get_latest(&self, base: &str) -> Result<RateSnapshot, RateError>;

    /// Rates as published on `date` (ISO), optionally narrowed to one target.
    async fn get_for_date(
        &self,
        date: &str,
        base: &str,
        target: Option<&str>,
    ) -> Result<RateSnapshot, RateError>;

    /// Daily rates for the pair over `[start_date, end_date]`.
    async fn get_range(
        &self,
        base: &str,
        target: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<RateSeries, RateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_accepts_iso_date_keys() {
        let mut rates = BTreeMap::new();
        rates.insert("2024-03-01".to_string(), BTreeMap::from([("EUR".to_string(), 0.92)]));
        rates.insert("2024-03-04".to_string(), BTreeMap::from([("EUR".to_string(), 0.93)]));

        let series = RateSeries::new(
            "USD".to_string(),
            "2024-03-01".to_string(),
            "2024-03-04".to_string(),
            rates,
        )
        .expect("valid series");

        let dates: Vec<&String> = series.rates.keys().collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-04"]);
    }

    #[test]
    fn series_rejects_malformed_date_keys() {
        let rates = BTreeMap::from([(
            "03/01/2024".to_string(),
            BTreeMap::from([("EUR".to_string(), 0.92)]),
        )]);

        let result = RateSeries::new(
            "USD".to_string(),
            "2024-03-01".to_string(),
            "2024-03-04".to_string(),
            rates,
        );

        assert!(matches!(result, Err(RateError::ProviderUnavailable(_))));
    }

    #[test]
    fn iso_keys_iterate_chronologically() {
        // Lexicographic order of zero-padded ISO dates is chronological order,
        // including across month and year boundaries.
        let mut rates = BTreeMap::new();
        for date in ["2024-12-31", "2024-02-29", "2025-01-01", "2024-03-01"] {
            rates.insert(date.to_string(), BTreeMap::new());
        }
        let series = RateSeries::new(
            "EUR".to_string(),
            "2024-02-29".to_string(),
            "2025-01-01".to_string(),
            rates,
        )
        .expect("valid series");

        let dates: Vec<&String> = series.rates.keys().collect();
        assert_eq!(
            dates,
            vec!["2024-02-29", "2024-03-01", "2024-12-31", "2025-01-01"]
        );
    }
}
