use crate::cli::output::{self, Mark};
use crate::core::config::Settings;
use crate::download::{check_sra_tools, submit_downloads};
use crate::tools::queue::{CommandQueue, DryRunQueue};
use anyhow::Context;

pub fn run(settings: &Settings, dry_run: bool) -> anyhow::Result<()> {
    let missing = check_sra_tools(settings);
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|t| t.to_string()).collect();
        output::line(
            Mark::Warn,
            &format!(
                "Not on this host's PATH: {} (jobs look them up on the compute node)",
                names.join(", ")
            ),
        );
    }

    if dry_run {
        let mut queue = DryRunQueue::new();
        let report = submit_downloads(settings, &mut queue)?;
        for script in queue.scripts() {
            println!("# ---- {} ({})", script.name, script.accession);
            print!("{}", script.body);
        }
        output::line(
            Mark::Note,
            &format!(
                "Dry run: {} job(s) would be submitted with '{}'",
                report.len(),
                settings.queue_cmd
            ),
        );
        return Ok(());
    }

    let mut queue = CommandQueue::from_command_line(&settings.queue_cmd)?;
    queue.ensure_available()?;

    output::line(
        Mark::Start,
        &format!(
            "Submitting {} download job(s) with '{}'",
            settings.accessions.len(),
            settings.queue_cmd
        ),
    );
    let report = submit_downloads(settings, &mut queue).context("Job submission stopped")?;

    for (record, receipt) in &report.submitted {
        let message = if receipt.message.is_empty() {
            format!("{} -> {}", record.accession, record.name)
        } else {
            format!("{} -> {}: {}", record.accession, record.name, receipt.message)
        };
        output::line(Mark::Done, &message);
    }
    output::line(
        Mark::Done,
        &format!("Submitted {} download job(s)", report.len()),
    );

    Ok(())
}
