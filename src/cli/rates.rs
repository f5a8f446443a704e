use anyhow::Result;

use crate::cli::ui::{self, StyleType, style_text};
use crate::core::format::format_rate;
use crate::core::rates::RateProvider;
use crate::core::{CurrencyCatalog, RateError};

/// The subset of currencies shown in the rates overview.
pub const MAJOR_CURRENCIES: [&str; 11] = [
    "EUR", "USD", "GBP", "JPY", "AUD", "CAD", "CHF", "CNY", "SEK", "NZD", "MXN",
];

pub async fn run(
    provider: &dyn RateProvider,
    catalog: &CurrencyCatalog,
    base: &str,
) -> Result<()> {
    let spinner = ui::new_spinner("Loading rates...");
    let outcome = async {
        let currencies = catalog.get_or_load(provider).await?;
        let snapshot = provider.get_latest(base).await?;
        Ok::<_, RateError>((currencies, snapshot))
    }
    .await;
    spinner.finish_and_clear();

    let (currencies, snapshot) = match outcome {
        Ok(data) => data,
        Err(err) => {
            ui::print_error(&err.to_string());
            return Ok(());
        }
    };

    println!(
        "{}",
        style_text(
            &format!("Latest rates for 1 {base} ({})", snapshot.date),
            StyleType::Title
        )
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Rate"),
    ]);

    let mut shown = 0;
    for code in MAJOR_CURRENCIES {
        let Some(rate) = snapshot.rates.get(code) else {
            continue;
        };
        let name = currencies.get(code).map(String::as_str).unwrap_or(code);
        table.add_row(vec![
            comfy_table::Cell::new(code),
            comfy_table::Cell::new(name),
            ui::rate_cell(format_rate(*rate)),
        ]);
        shown += 1;
    }

    println!("{table}");
    println!(
        "{}",
        style_text(
            &format!(
                "Showing {shown} of {} available currencies.",
                snapshot.rates.len()
            ),
            StyleType::Subtle
        )
    );
    Ok(())
}
