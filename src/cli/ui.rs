use std::time::Duration;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::format::format_percent_change;
use crate::core::trend::TrendDirection;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    ResultLabel,
    ResultValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::ResultLabel => style(text).bold(),
        StyleType::ResultValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned cell for a numeric rate.
pub fn rate_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Directional arrow plus signed percentage, green for rising and red for
/// falling.
pub fn trend_line(direction: TrendDirection, percent_change: f64) -> String {
    let text = match direction {
        TrendDirection::Rising => format!("↗ Rising {}", format_percent_change(percent_change)),
        TrendDirection::Falling => format!("↘ Falling {}", format_percent_change(percent_change)),
    };
    match direction {
        TrendDirection::Rising => style(text).green().bold().to_string(),
        TrendDirection::Falling => style(text).red().bold().to_string(),
    }
}

/// Creates a spinner for a single in-flight provider query.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a user-facing error message; errors never crash a view.
pub fn print_error(message: &str) {
    eprintln!("{}", style_text(message, StyleType::Error));
}
