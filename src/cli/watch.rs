//! Interactive converter: re-converts as inputs change, debounced.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::ui::{self, StyleType, style_text};
use crate::core::format::{format_currency, is_valid_amount};
use crate::core::rates::RateProvider;
use crate::core::{ConversionEngine, QuerySlot, QueryState};

/// Reads `AMOUNT FROM TO` lines from stdin and drives a debounced query
/// slot: rapid edits collapse into a single conversion, and a conversion
/// superseded mid-flight never prints.
pub async fn run(provider: Arc<dyn RateProvider>, window: Duration) -> Result<()> {
    println!(
        "{}",
        style_text(
            "Type AMOUNT FROM TO (e.g. 100 USD EUR), Ctrl-D to quit.",
            StyleType::Subtle
        )
    );

    let slot: QuerySlot<String> = QuerySlot::new(window);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll = tokio::time::interval(Duration::from_millis(100));
    // Keyed on the slot version rather than state equality: a re-submitted
    // identical conversion that resolves between two polls still prints.
    let mut last_version = slot.version();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                handle_line(&slot, &provider, line.trim()).await;
            }
            _ = poll.tick() => {
                let version = slot.version();
                if version != last_version {
                    last_version = version;
                    render_transition(&slot.state().await);
                }
            }
        }
    }
    Ok(())
}

fn render_transition(state: &QueryState<String>) {
    match state {
        QueryState::Idle => {}
        QueryState::Pending => {
            println!("{}", style_text("converting...", StyleType::Subtle));
        }
        QueryState::Resolved(line) => {
            println!("{}", style_text(line, StyleType::ResultValue));
        }
        QueryState::Failed(message) => ui::print_error(message),
    }
}

async fn handle_line(slot: &QuerySlot<String>, provider: &Arc<dyn RateProvider>, line: &str) {
    let mut parts = line.split_whitespace();
    let (Some(amount), Some(from), Some(to)) = (parts.next(), parts.next(), parts.next()) else {
        slot.clear().await;
        if !line.is_empty() {
            println!(
                "{}",
                style_text("expected: AMOUNT FROM TO", StyleType::Subtle)
            );
        }
        return;
    };

    if !is_valid_amount(amount) {
        slot.clear().await;
        println!(
            "{}",
            style_text(&format!("{amount} is not a valid amount"), StyleType::Subtle)
        );
        return;
    }
    let amount: f64 = match amount.parse() {
        Ok(value) => value,
        Err(_) => {
            slot.clear().await;
            return;
        }
    };

    let from = from.to_uppercase();
    let to = to.to_uppercase();

    // Degenerate inputs mean "no conversion requested": back to idle, no
    // query, no error.
    if amount <= 0.0 || from == to {
        debug!(%from, %to, amount, "degenerate inputs, clearing slot");
        slot.clear().await;
        return;
    }

    let provider = Arc::clone(provider);
    slot.submit(move || async move {
        let result = ConversionEngine::new(provider.as_ref())
            .convert(amount, &from, &to)
            .await?;
        Ok(format!(
            "{} = {}",
            format_currency(amount, &from),
            format_currency(result, &to)
        ))
    });
}
