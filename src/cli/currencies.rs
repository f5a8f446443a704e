use anyhow::Result;

use crate::cli::ui::{self, StyleType, style_text};
use crate::core::CurrencyCatalog;
use crate::core::rates::RateProvider;

pub async fn run(provider: &dyn RateProvider, catalog: &CurrencyCatalog) -> Result<()> {
    let spinner = ui::new_spinner("Loading currencies...");
    let outcome = catalog.get_or_load(provider).await;
    spinner.finish_and_clear();

    let currencies = match outcome {
        Ok(currencies) => currencies,
        Err(err) => {
            ui::print_error(&err.to_string());
            return Ok(());
        }
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for (code, name) in &currencies {
        table.add_row(vec![code.as_str(), name.as_str()]);
    }
    println!("{table}");
    println!(
        "{}",
        style_text(
            &format!("{} currencies available.", currencies.len()),
            StyleType::Subtle
        )
    );
    Ok(())
}
