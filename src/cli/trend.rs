use anyhow::Result;
use chrono::{Days, Local};

use crate::cli::ui::{self, StyleType, style_text};
use crate::core::format::format_rate;
use crate::core::rates::{ISO_DATE_FORMAT, RateProvider};
use crate::core::{RateError, trend};

pub async fn run(provider: &dyn RateProvider, from: &str, to: &str, days: u32) -> Result<()> {
    if from == to {
        // Degenerate pair: no range query is ever issued.
        ui::print_error(&RateError::DegenerateCurrencyPair(from.to_string()).to_string());
        return Ok(());
    }

    let end = Local::now().date_naive();
    let start = end - Days::new(u64::from(days));

    let spinner = ui::new_spinner("Loading trend...");
    let outcome = provider
        .get_range(
            from,
            to,
            &start.format(ISO_DATE_FORMAT).to_string(),
            &end.format(ISO_DATE_FORMAT).to_string(),
        )
        .await;
    spinner.finish_and_clear();

    let series = match outcome {
        Ok(series) => series,
        Err(err) => {
            ui::print_error(&err.to_string());
            return Ok(());
        }
    };

    let trend = trend::analyze(&series, to);
    if trend.points.is_empty() {
        println!(
            "{}",
            style_text(
                &format!("No {to} samples for the last {days} days."),
                StyleType::Subtle
            )
        );
        return Ok(());
    }

    println!(
        "{}",
        style_text(
            &format!("{from}/{to} over the last {days} days"),
            StyleType::Title
        )
    );
    if let Some(summary) = &trend.summary {
        println!("{}", ui::trend_line(summary.direction, summary.percent_change));
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell("Rate")]);
    for point in &trend.points {
        table.add_row(vec![
            comfy_table::Cell::new(&point.label),
            ui::rate_cell(format_rate(point.value)),
        ]);
    }
    println!("{table}");
    Ok(())
}
