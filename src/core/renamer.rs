//! Rename downloaded reads from accession names to display names
//!
//! fastq-dump writes `SRR123.fastq.gz` or `SRR123_1.fastq.gz`/`SRR123_2.fastq.gz`.
//! Every regular file whose name is an accession followed by `.` or `_` is
//! renamed by swapping the accession for the record's display name and
//! keeping the rest. Existing files are never overwritten.

use crate::core::accession::{accession_suffix, AccessionMap, AccessionRecord};
use crate::SradlError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A single planned or performed rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// What a rename pass would do, computed from one directory listing
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub ops: Vec<RenameOp>,
    /// Records with no matching file
    pub missing: Vec<AccessionRecord>,
}

/// Outcome of a rename pass
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub renamed: Vec<RenameOp>,
    /// Target already present, left alone
    pub skipped: Vec<RenameOp>,
    pub missing: Vec<AccessionRecord>,
    /// Renames the filesystem refused, with the reason
    pub failed: Vec<(RenameOp, String)>,
}

impl RenameReport {
    pub fn is_noop(&self) -> bool {
        self.renamed.is_empty()
    }
}

fn regular_file_names(dir: &Path) -> Result<Vec<String>, SradlError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => debug!("Skipping non UTF-8 file name {:?}", name),
        }
    }
    names.sort();
    Ok(names)
}

/// Work out the renames for `dir` without touching it
pub fn plan_renames(map: &AccessionMap, dir: &Path) -> Result<RenamePlan, SradlError> {
    if !dir.is_dir() {
        return Err(SradlError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )));
    }

    let files = regular_file_names(dir)?;
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut plan = RenamePlan::default();

    for record in map {
        let mut found = false;
        for file in &files {
            if claimed.contains(file.as_str()) {
                continue;
            }
            if let Some(rest) = accession_suffix(file, &record.accession) {
                claimed.insert(file.as_str());
                found = true;
                plan.ops.push(RenameOp {
                    from: dir.join(file),
                    to: dir.join(format!("{}{}", record.name, rest)),
                });
            }
        }
        if !found {
            plan.missing.push(record.clone());
        }
    }

    Ok(plan)
}

/// Rename every downloaded file in `dir` that belongs to a record in `map`.
/// Running it again over the same mapping changes nothing.
pub fn rename_files(map: &AccessionMap, dir: &Path) -> Result<RenameReport, SradlError> {
    let plan = plan_renames(map, dir)?;
    Ok(apply_plan(plan))
}

/// Carry out a plan. A rename that fails is recorded in the report and the
/// remaining ones still run.
pub fn apply_plan(plan: RenamePlan) -> RenameReport {
    let mut report = RenameReport {
        missing: plan.missing,
        ..Default::default()
    };

    for record in &report.missing {
        warn!("No files found for {} ({})", record.accession, record.name);
    }

    for op in plan.ops {
        if op.to.exists() {
            warn!(
                "Not renaming {}: {} already exists",
                op.from.display(),
                op.to.display()
            );
            report.skipped.push(op);
            continue;
        }
        match fs::rename(&op.from, &op.to) {
            Ok(()) => {
                info!("Renamed {} -> {}", op.from.display(), op.to.display());
                report.renamed.push(op);
            }
            Err(e) => {
                warn!("Could not rename {}: {}", op.from.display(), e);
                report.failed.push((op, e.to_string()));
            }
        }
    }

    report
}
