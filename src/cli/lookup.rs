use anyhow::Result;
use chrono::{Local, Months};

use crate::cli::ui::{self, StyleType, style_text};
use crate::core::RateError;
use crate::core::format::{format_currency, format_rate};
use crate::core::rates::{RateProvider, parse_iso_date};

/// Historical rates for one past date, optionally narrowed to a target.
pub async fn run(
    provider: &dyn RateProvider,
    date: &str,
    base: &str,
    target: Option<&str>,
) -> Result<()> {
    let Some(parsed) = parse_iso_date(date) else {
        ui::print_error(&format!("enter the date as YYYY-MM-DD (got {date})"));
        return Ok(());
    };

    // Same bounds the date picker enforces: within the last year, not in the
    // future.
    let today = Local::now().date_naive();
    let one_year_ago = today - Months::new(12);
    if parsed > today || parsed < one_year_ago {
        ui::print_error("pick a date within the last year");
        return Ok(());
    }

    if target == Some(base) {
        ui::print_error(&RateError::DegenerateCurrencyPair(base.to_string()).to_string());
        return Ok(());
    }

    let spinner = ui::new_spinner("Looking up rates...");
    let outcome = provider.get_for_date(date, base, target).await;
    spinner.finish_and_clear();

    let snapshot = match outcome {
        Ok(snapshot) => snapshot,
        Err(err) => {
            ui::print_error(&err.to_string());
            return Ok(());
        }
    };

    match target {
        Some(to) => {
            let Some(rate) = snapshot.rates.get(to) else {
                ui::print_error(
                    &RateError::RateUnavailable {
                        currency: to.to_string(),
                    }
                    .to_string(),
                );
                return Ok(());
            };
            println!(
                "{} = {} {}",
                style_text(&format_currency(1.0, base), StyleType::ResultLabel),
                style_text(&format!("{} {to}", format_rate(*rate)), StyleType::ResultValue),
                style_text(&format!("(as of {})", snapshot.date), StyleType::Subtle),
            );
        }
        None => {
            println!(
                "{}",
                style_text(
                    &format!("Rates for 1 {base} on {}", snapshot.date),
                    StyleType::Title
                )
            );
            let mut table = ui::new_styled_table();
            table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Rate")]);
            for (code, rate) in &snapshot.rates {
                table.add_row(vec![
                    comfy_table::Cell::new(code),
                    ui::rate_cell(format_rate(*rate)),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
