use crate::cli::output::{self, Mark};
use crate::core::config::Settings;
use crate::core::renamer::{plan_renames, rename_files};
use crate::SradlError;
use anyhow::Context;
use std::io;
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn no_files(accession: &str, name: &str) {
    output::line(Mark::Warn, &format!("no files for {} ({})", accession, name));
}

pub fn run(settings: &Settings, dir: &Path, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        let plan = plan_renames(&settings.accessions, dir)
            .with_context(|| format!("Cannot scan {}", dir.display()))?;
        if plan.ops.is_empty() {
            output::line(Mark::Idle, "Nothing to rename");
        }
        for op in &plan.ops {
            output::line(
                Mark::Note,
                &format!(
                    "would rename {} -> {}",
                    file_name(&op.from),
                    file_name(&op.to)
                ),
            );
        }
        for record in &plan.missing {
            no_files(&record.accession, &record.name);
        }
        return Ok(());
    }

    let report = rename_files(&settings.accessions, dir)
        .with_context(|| format!("Renaming in {} failed", dir.display()))?;

    for op in &report.renamed {
        output::line(
            Mark::Done,
            &format!("{} -> {}", file_name(&op.from), file_name(&op.to)),
        );
    }
    for op in &report.skipped {
        output::line(
            Mark::Warn,
            &format!(
                "kept {}: {} already exists",
                file_name(&op.from),
                file_name(&op.to)
            ),
        );
    }
    for record in &report.missing {
        no_files(&record.accession, &record.name);
    }
    for (op, reason) in &report.failed {
        output::line(
            Mark::Fail,
            &format!("could not rename {}: {}", file_name(&op.from), reason),
        );
    }

    if report.is_noop() {
        output::line(Mark::Idle, "Nothing to rename");
    } else {
        output::line(
            Mark::Done,
            &format!("Renamed {} file(s)", report.renamed.len()),
        );
    }

    if !report.failed.is_empty() {
        return Err(SradlError::Io(io::Error::other(format!(
            "{} file(s) could not be renamed",
            report.failed.len()
        )))
        .into());
    }

    Ok(())
}
