pub mod cli;
pub mod config;
pub mod core;
pub mod providers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::CurrencyCatalog;
use crate::core::rates::RateProvider;
use crate::providers::FrankfurterProvider;

pub enum AppCommand {
    Convert {
        amount: Option<f64>,
        from: Option<String>,
        to: Option<String>,
    },
    Rates {
        base: Option<String>,
    },
    Trend {
        from: Option<String>,
        to: Option<String>,
        days: Option<u32>,
    },
    Lookup {
        date: String,
        base: Option<String>,
        target: Option<String>,
    },
    Currencies,
    Watch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxlens starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider: Arc<dyn RateProvider> =
        Arc::new(FrankfurterProvider::new(&config.provider.base_url));
    let catalog = CurrencyCatalog::new();

    match command {
        AppCommand::Convert { amount, from, to } => {
            let amount = amount.unwrap_or(config.defaults.amount);
            let from = normalize(from, &config.defaults.from);
            let to = normalize(to, &config.defaults.to);
            cli::convert::run(provider.as_ref(), amount, &from, &to).await
        }
        AppCommand::Rates { base } => {
            let base = normalize(base, &config.defaults.from);
            cli::rates::run(provider.as_ref(), &catalog, &base).await
        }
        AppCommand::Trend { from, to, days } => {
            let from = normalize(from, &config.defaults.from);
            let to = normalize(to, &config.defaults.to);
            let days = days.unwrap_or(config.trend_days);
            cli::trend::run(provider.as_ref(), &from, &to, days).await
        }
        AppCommand::Lookup { date, base, target } => {
            let base = normalize(base, &config.defaults.from);
            let target = target.map(|t| t.to_uppercase());
            cli::lookup::run(provider.as_ref(), &date, &base, target.as_deref()).await
        }
        AppCommand::Currencies => cli::currencies::run(provider.as_ref(), &catalog).await,
        AppCommand::Watch => {
            cli::watch::run(provider, Duration::from_millis(config.debounce_ms)).await
        }
    }
}

fn normalize(code: Option<String>, fallback: &str) -> String {
    code.unwrap_or_else(|| fallback.to_string()).to_uppercase()
}
