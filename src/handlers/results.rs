// src/handlers/results.rs
// DOCUMENTATION: Terminal rendering of search results
// PURPOSE: Print the result table, warnings and errors

use crate::errors::SearchError;
use crate::models::BusinessRecord;
use crate::services::{SearchOutcome, HEADERS};
use colored::*;

/// Widest a table column may get before values are cut
const MAX_COLUMN_WIDTH: usize = 40;

fn truncate(value: &str, width: usize) -> String {
    // Newlines would break the row layout
    let flat = value.replace(['\r', '\n'], " ");
    if flat.chars().count() <= width {
        flat
    } else {
        let cut: String = flat.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

fn columns(record: &BusinessRecord) -> [&str; 4] {
    [&record.name, &record.address, &record.phone, &record.website]
}

/// Render records as an aligned plain-text table
///
/// ```text
///   Name        Address          Phone           Website
///   ──────────────────────────────────────────────────────
///   Le Bouchon  3 Rue Merciere   04 78 00 00 00  Unavailable
/// ```
pub fn render_table(records: &[BusinessRecord]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for record in records {
        for (width, value) in widths.iter_mut().zip(columns(record)) {
            *width = (*width).max(value.chars().count()).min(MAX_COLUMN_WIDTH);
        }
    }

    let row = |values: [&str; 4]| -> String {
        let cells: Vec<String> = values
            .iter()
            .zip(widths.iter())
            .map(|(value, width)| pad(&truncate(value, *width), *width))
            .collect();
        format!("  {}", cells.join("  ").trim_end())
    };

    let rule_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let mut lines = vec![row(HEADERS), format!("  {}", "─".repeat(rule_width))];
    lines.extend(records.iter().map(|record| row(columns(record))));
    lines.join("\n")
}

/// Print a finished search
pub fn print_outcome(outcome: &SearchOutcome) {
    println!();
    if outcome.is_empty() {
        println!(
            "{}",
            "⚠️  No businesses found. Try another type or widen the search radius.".yellow()
        );
        return;
    }

    println!("{}", format!("📍 Centred on {}", outcome.location).dimmed());
    println!(
        "{}",
        format!("✅ {} businesses found!", outcome.records.len())
            .green()
            .bold()
    );
    println!();
    println!("{}", render_table(&outcome.records));

    if !outcome.detail_failures.is_empty() {
        println!();
        println!(
            "{}",
            format!(
                "⚠️  Phone and website could not be retrieved for {} business(es):",
                outcome.detail_failures.len()
            )
            .yellow()
        );
        for failure in &outcome.detail_failures {
            println!("  • {} (row {})", failure.place_name.cyan(), failure.index + 1);
        }
    }
}

/// Print a fatal error
pub fn print_error(err: &SearchError) {
    println!();
    println!("{} {}", "❌".red(), err.user_message().red().bold());
}
