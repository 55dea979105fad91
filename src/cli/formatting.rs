//! Formatting utilities for CLI output.

use std::collections::BTreeMap;

use crate::services::vlc::{Feedback, Health};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a health status, coloured by level
pub fn format_health(health: &Health) -> String {
    let color = match health {
        Health::Ok => Colors::GREEN,
        Health::Warning(_) => Colors::YELLOW,
        Health::Error(_) => Colors::RED,
    };
    format!("{}{}{}{}", Colors::BOLD, color, health, Colors::RESET)
}

/// Formats published variables as an aligned `name  value` table.
///
/// Slot names (`pname_N`) are sorted numerically after the other variables.
pub fn format_variables(variables: &BTreeMap<String, String>) -> String {
    let width = variables.keys().map(String::len).max().unwrap_or(0);

    let mut rows: Vec<(&String, &String)> = variables.iter().collect();
    rows.sort_by(|(a, _), (b, _)| display_order(a).cmp(&display_order(b)));

    rows.into_iter()
        .map(|(name, value)| {
            format!(
                "  {}{name:<width$}{}  {value}",
                Colors::DIM,
                Colors::RESET
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats active feedbacks with the colours a button would take.
pub fn format_feedbacks(feedbacks: &[Feedback]) -> String {
    if feedbacks.is_empty() {
        return format!("{}none{}", Colors::DIM, Colors::RESET);
    }

    feedbacks
        .iter()
        .map(|feedback| {
            let (fg, bg) = feedback.colors();
            format!("{feedback} ({fg} on {bg})")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_order(name: &str) -> (u8, usize, &str) {
    match name.strip_prefix("pname_") {
        Some(slot) => (1, slot.parse().unwrap_or(usize::MAX), name),
        None => (0, 0, name),
    }
}
