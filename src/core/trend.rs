//! Short-term trend derivation for a currency pair.

use crate::core::format::day_month_label;
use crate::core::rates::RateSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Rising,
    Falling,
}

/// One chart-ready sample: a short date label and the rate on that date.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

/// Overall movement between the first and last sample of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub percent_change: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub points: Vec<TrendPoint>,
    /// Present only when at least two samples survive filtering.
    pub summary: Option<TrendSummary>,
}

/// Derives display-ready trend points and a movement summary from a series.
///
/// Dates iterate in ascending ISO order (chronological, see [`RateSeries`]).
/// Dates whose rate map lacks `target` are dropped outright rather than
/// emitted as placeholders. Label collisions across years are possible and
/// left as-is.
///
/// Callers are expected to reject a degenerate pair (`from == to`) before
/// fetching a series; `analyze` assumes the pair is real.
pub fn analyze(series: &RateSeries, target: &str) -> Trend {
    let points: Vec<TrendPoint> = series
        .rates
        .iter()
        .filter_map(|(date, rates)| {
            rates.get(target).map(|value| TrendPoint {
                label: day_month_label(date),
                value: *value,
            })
        })
        .collect();

    let summary = if points.len() >= 2 {
        let first = points[0].value;
        let last = points[points.len() - 1].value;
        let percent_change = (last - first) / first * 100.0;
        // Zero change counts as falling: the direction flips only on a
        // strictly positive move.
        let direction = if percent_change > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Falling
        };
        Some(TrendSummary {
            percent_change,
            direction,
        })
    } else {
        None
    };

    Trend { points, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn series(samples: &[(&str, &[(&str, f64)])]) -> RateSeries {
        let rates = samples
            .iter()
            .map(|(date, day_rates)| {
                (
                    date.to_string(),
                    day_rates
                        .iter()
                        .map(|(code, rate)| (code.to_string(), *rate))
                        .collect(),
                )
            })
            .collect();
        RateSeries::new(
            "USD".to_string(),
            samples.first().map(|(d, _)| d.to_string()).unwrap_or_default(),
            samples.last().map(|(d, _)| d.to_string()).unwrap_or_default(),
            rates,
        )
        .expect("test series uses ISO dates")
    }

    #[test]
    fn points_come_out_in_date_order_with_day_month_labels() {
        let series = series(&[
            ("2024-03-01", &[("EUR", 1.10)]),
            ("2024-03-02", &[("EUR", 1.12)]),
            ("2024-03-03", &[("EUR", 1.08)]),
        ]);

        let trend = analyze(&series, "EUR");

        let labels: Vec<&str> = trend.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["01/03", "02/03", "03/03"]);
        let values: Vec<f64> = trend.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.10, 1.12, 1.08]);
    }

    #[test]
    fn summary_spans_first_to_last_sample() {
        let series = series(&[
            ("2024-03-01", &[("EUR", 1.10)]),
            ("2024-03-02", &[("EUR", 1.12)]),
            ("2024-03-03", &[("EUR", 1.08)]),
        ]);

        let trend = analyze(&series, "EUR");

        let summary = trend.summary.expect("three points give a summary");
        let expected = (1.08 - 1.10) / 1.10 * 100.0;
        assert!((summary.percent_change - expected).abs() < 1e-9);
        assert!((summary.percent_change - (-1.818)).abs() < 0.001);
        assert_eq!(summary.direction, TrendDirection::Falling);
    }

    #[test]
    fn rising_when_last_sample_is_above_first() {
        let series = series(&[
            ("2024-03-01", &[("EUR", 1.00)]),
            ("2024-03-05", &[("EUR", 1.05)]),
        ]);

        let trend = analyze(&series, "EUR");

        let summary = trend.summary.expect("two points give a summary");
        assert!((summary.percent_change - 5.0).abs() < 1e-9);
        assert_eq!(summary.direction, TrendDirection::Rising);
    }

    #[test]
    fn zero_change_counts_as_falling() {
        let series = series(&[
            ("2024-03-01", &[("EUR", 1.10)]),
            ("2024-03-02", &[("EUR", 1.10)]),
        ]);

        let trend = analyze(&series, "EUR");

        let summary = trend.summary.expect("two points give a summary");
        assert_eq!(summary.percent_change, 0.0);
        assert_eq!(summary.direction, TrendDirection::Falling);
    }

    #[test]
    fn dates_without_the_target_are_dropped_entirely() {
        let series = series(&[
            ("2024-03-01", &[("EUR", 1.10)]),
            ("2024-03-02", &[("GBP", 0.79)]),
            ("2024-03-03", &[("EUR", 1.08)]),
        ]);

        let trend = analyze(&series, "EUR");

        assert_eq!(trend.points.len(), 2);
        let labels: Vec<&str> = trend.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["01/03", "03/03"]);
    }

    #[test]
    fn a_single_surviving_point_has_no_summary() {
        let series = series(&[
            ("2024-03-01", &[("EUR", 1.10)]),
            ("2024-03-02", &[("GBP", 0.79)]),
        ]);

        let trend = analyze(&series, "EUR");

        assert_eq!(trend.points.len(), 1);
        assert!(trend.summary.is_none());
    }

    #[test]
    fn an_empty_series_yields_no_points_and_no_summary() {
        let series = series(&[]);

        let trend = analyze(&series, "EUR");

        assert!(trend.points.is_empty());
        assert!(trend.summary.is_none());
    }
}
