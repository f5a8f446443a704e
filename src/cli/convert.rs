use anyhow::Result;

use crate::cli::ui::{self, StyleType, style_text};
use crate::core::format::format_currency;
use crate::core::rates::RateProvider;
use crate::core::{ConversionEngine, RateError};

/// Explicit one-shot conversion. Unlike the live converter, a degenerate pair
/// or non-positive amount is reported as an error here, not silently ignored.
pub async fn run(provider: &dyn RateProvider, amount: f64, from: &str, to: &str) -> Result<()> {
    if from == to {
        ui::print_error(&RateError::DegenerateCurrencyPair(from.to_string()).to_string());
        return Ok(());
    }

    let spinner = ui::new_spinner("Converting...");
    let outcome = ConversionEngine::new(provider).convert(amount, from, to).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(result) => {
            println!(
                "{} = {}",
                style_text(&format_currency(amount, from), StyleType::ResultLabel),
                style_text(&format_currency(result, to), StyleType::ResultValue),
            );
        }
        Err(err) => ui::print_error(&err.to_string()),
    }
    Ok(())
}
