use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxlens::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxlens::AppCommand {
    fn from(cmd: Commands) -> fxlens::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                fxlens::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates { base } => fxlens::AppCommand::Rates { base },
            Commands::Trend { from, to, days } => fxlens::AppCommand::Trend { from, to, days },
            Commands::Lookup { date, base, target } => {
                fxlens::AppCommand::Lookup { date, base, target }
            }
            Commands::Currencies => fxlens::AppCommand::Currencies,
            Commands::Watch => fxlens::AppCommand::Watch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(short, long)]
        amount: Option<f64>,
        /// Source currency code
        #[arg(short, long)]
        from: Option<String>,
        /// Target currency code
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Show the latest exchange rates against a base currency
    Rates {
        /// Base currency code
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Show the recent trend for a currency pair
    Trend {
        /// Source currency code
        #[arg(short, long)]
        from: Option<String>,
        /// Target currency code
        #[arg(short, long)]
        to: Option<String>,
        /// Number of days to look back
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Look up exchange rates for a past date
    Lookup {
        /// Date to look up (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Base currency code
        #[arg(short, long)]
        base: Option<String>,
        /// Target currency code
        #[arg(short = 'T', long)]
        target: Option<String>,
    },
    /// List all currencies the provider knows
    Currencies,
    /// Interactive converter: reads AMOUNT FROM TO lines from stdin
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fxlens::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fxlens::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
provider:
  base_url: "https://api.frankfurter.app"

defaults:
  from: "USD"
  to: "EUR"
  amount: 1.0

trend_days: 7
debounce_ms: 500
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
