//! External programs driven by sradl

pub mod queue;
pub mod sratools;

pub use queue::{CommandQueue, DryRunQueue, JobQueue, JobReceipt, JobScript};

use std::path::PathBuf;

/// SRA Toolkit programs each download job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Prefetch,
    FastqDump,
}

impl Tool {
    /// Get the display name of the tool
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Prefetch => "SRA Toolkit prefetch",
            Tool::FastqDump => "SRA Toolkit fastq-dump",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolve a program name or path the way the shell would
pub fn locate(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
