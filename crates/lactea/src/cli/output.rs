//! Output formatting utilities for CLI commands
//!
//! Tables are rendered with comfy-table; verdict cells are coloured with the
//! same three colours the dashboard uses for its badges.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use lactea_validation::Verdict;

/// Badge colour for a verdict
pub fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Precise => Color::Green,
        Verdict::Acceptable => Color::Yellow,
        Verdict::Inaccurate => Color::Red,
    }
}

/// Format a ratio (0.0 - 1.0) as a percentage
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Build a table with cyan headers
pub fn build_table(headers: &[String]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);
    table
}

/// Add a row whose last cell is a coloured verdict label
pub fn add_verdict_row(table: &mut Table, fields: &[String], verdict: Verdict) {
    let mut cells: Vec<Cell> = fields.iter().map(Cell::new).collect();
    if let Some(last) = cells.pop() {
        cells.push(last.fg(verdict_color(verdict)));
    }
    table.add_row(cells);
}

/// Print key/value lines aligned on the longest key
pub fn print_key_values(pairs: &[(&str, String)]) {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    for (key, value) in pairs {
        println!("{:<width$}  {}", key, value, width = width);
    }
}
