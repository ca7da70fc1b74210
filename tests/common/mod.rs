#![allow(dead_code)]

//! Common test utilities for sradl tests
use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment that manages a temporary working directory
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(TestEnvironment {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Write an input file and return its path
    pub fn create_input_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create empty files standing in for fastq-dump output
    pub fn create_reads(&self, names: &[&str]) -> Result<()> {
        for name in names {
            fs::write(self.path(name), format!("@{}\nACGT\n+\nIIII\n", name))?;
        }
        Ok(())
    }

    pub fn listing(&self) -> Result<Vec<String>> {
        list_files(self.temp_dir.path())
    }
}

pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Get the sradl binary under test
pub fn sradl_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sradl").expect("sradl binary");
    cmd.env_remove("RUST_LOG")
        .env("SRADL_LOG", "warn")
        .env("NO_COLOR", "1");
    cmd
}

/// Input with single run numbers and no [Config] section
pub fn simple_input() -> String {
    "[SRR_code]\nliver = 1234567\nbrain = 1234570\nheart = 1234571\n".to_string()
}

/// Input with replicate ranges
pub fn ranged_input(queue_cmd: &str) -> String {
    format!(
        "[Config]\nranges = True\nprefix = SRR\nqueue_cmd = {}\n\n[SRR_code]\nliver = 100,101\nbrain = 200,200\n",
        queue_cmd
    )
}
