//! Status lines and settings tables printed by the sradl commands
//!
//! Progress goes to stdout with a one-character mark per line; tracing
//! output stays on stderr.

use colored::*;

/// Leading mark of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// A job was queued or a file renamed
    Done,
    Note,
    Warn,
    Fail,
    /// Nothing to do
    Idle,
    Start,
}

impl Mark {
    fn symbol(self) -> ColoredString {
        match self {
            Mark::Done => "✓".green(),
            Mark::Note => "●".blue(),
            Mark::Warn => "⚠".yellow(),
            Mark::Fail => "✗".red().bold(),
            Mark::Idle => "◌".dimmed(),
            Mark::Start => "▶".cyan(),
        }
    }
}

/// Print one status line
pub fn line(mark: Mark, message: &str) {
    println!("{} {}", mark.symbol(), message);
}

pub fn heading(title: &str) {
    println!("\n{}", title.bold().cyan());
}

/// `label: value` rows with the values lined up in one column
pub fn aligned_rows(rows: &[(String, String)]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count() + 1)
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            let label = format!("{}:", label);
            format!("{:<width$} {}", label, value, width = width)
        })
        .collect()
}

/// A titled block of aligned rows, or `(none)` when there are no rows
pub fn table(title: &str, rows: &[(String, String)]) {
    println!("  {}", title.bold());
    if rows.is_empty() {
        println!("    {}", "(none)".dimmed());
        return;
    }
    for row in aligned_rows(rows) {
        println!("    {}", row);
    }
}
