pub mod commands;
pub mod output;

use clap::{ArgGroup, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sradl",
    version,
    about = "Submit SRA download jobs to a batch queue and rename the results",
    long_about = "sradl reads an INI file mapping sample names to SRA run numbers, submits one \
                  prefetch + fastq-dump job per run to a batch queue (qsub by default), and \
                  afterwards renames the downloaded reads from run accessions to sample names.",
    after_help = "Input file example:\n\n  [Config]\n  ranges = False\n  prefix = SRR\n\n  \
                  [SRR_code]\n  liver = 1234567\n  brain = 1234570",
    group(ArgGroup::new("action").required(true).args(["dw", "rename"]))
)]
pub struct Cli {
    /// Input file(s) with the names and the SRR codes
    #[arg(short = 'i', long = "inp", value_name = "INPUT_FILE", num_args = 1.., required = true)]
    pub inp: Vec<PathBuf>,

    /// Submit download jobs to the queue
    #[arg(long = "dw")]
    pub dw: bool,

    /// Rename downloaded files to the names in the input file
    #[arg(long = "rename")]
    pub rename: bool,

    /// Print out all configuration details
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Directory holding the downloaded files (rename only)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Show what would be submitted or renamed without doing it
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// What a run does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Download,
    Rename,
}

impl Cli {
    /// Parse arguments, accepting the single-dash long flags (`-inp`, `-dw`,
    /// `-rename`) of earlier versions.
    pub fn parse_normalized() -> Self {
        Cli::parse_from(normalize_legacy_args(std::env::args_os()))
    }

    pub fn action(&self) -> Action {
        if self.dw {
            Action::Download
        } else {
            Action::Rename
        }
    }
}

/// Rewrite `-inp`, `-dw` and `-rename` to their `--` forms
pub fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-inp") => OsString::from("--inp"),
            Some("-dw") => OsString::from("--dw"),
            Some("-rename") => OsString::from("--rename"),
            _ => arg,
        })
        .collect()
}
