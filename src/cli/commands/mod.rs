pub mod download;
pub mod rename;

use crate::cli::output;
use crate::core::config::Settings;
use tracing::debug;

/// Print the effective configuration, defaults included (`-v`)
pub fn show_settings(settings: &Settings) {
    output::heading("Configuration");
    let rows: Vec<(String, String)> = settings
        .summary()
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect();
    output::table("settings", &rows);

    let runs: Vec<(String, String)> = settings
        .accessions
        .iter()
        .map(|r| (r.name.clone(), r.accession.clone()))
        .collect();
    output::table("runs", &runs);

    if let Ok(json) = serde_json::to_string_pretty(settings) {
        debug!("Effective settings:\n{}", json);
    }
}
