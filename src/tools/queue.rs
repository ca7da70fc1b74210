//! Batch queue submission
//!
//! Each download becomes a small Grid Engine style bash script. Scripts are
//! handed to a `JobQueue`; the real one pipes them into the configured queue
//! command (`qsub` by default), the dry-run one only records them.

use crate::core::accession::AccessionRecord;
use crate::core::config::Settings;
use crate::tools::sratools::{download_commands, shell_quote};
use crate::SradlError;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// A job script for one accession
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobScript {
    pub name: String,
    pub accession: String,
    pub body: String,
}

/// Make `name` acceptable as a queue job name
pub fn sanitize_job_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => cleaned,
        _ => format!("sra_{}", cleaned),
    }
}

impl JobScript {
    pub fn for_record(settings: &Settings, record: &AccessionRecord) -> Self {
        let name = sanitize_job_name(&record.name);
        let mut body = String::new();
        body.push_str("#!/usr/bin/env bash\n");
        body.push_str(&format!("#$ -N {}\n", name));
        body.push_str("#$ -cwd\n");
        body.push_str("#$ -V\n");
        body.push_str("#$ -S /bin/bash\n");
        body.push_str("set -euo pipefail\n");
        body.push_str(&format!(
            "echo {}\n",
            shell_quote(&format!("sradl: {} -> {}", record.accession, record.name))
        ));
        for line in download_commands(settings, record) {
            body.push_str(&line);
            body.push('\n');
        }

        Self {
            name,
            accession: record.accession.clone(),
            body,
        }
    }
}

/// What the queue said when it accepted a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReceipt {
    pub job: String,
    /// Trimmed stdout of the submitter, e.g. `Your job 4242 ("liver") has been submitted`
    pub message: String,
}

/// Something that accepts job scripts
pub trait JobQueue {
    /// Name shown in logs
    fn name(&self) -> &str;

    /// Submit one script. Failures are returned as they are, never retried.
    fn submit(&mut self, script: &JobScript) -> Result<JobReceipt, SradlError>;
}

/// Pipes scripts into an external submission command
pub struct CommandQueue {
    command_line: String,
    program: String,
    args: Vec<String>,
}

impl CommandQueue {
    /// `command_line` is split on whitespace: the program, then its arguments
    pub fn from_command_line(command_line: &str) -> Result<Self, SradlError> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| SradlError::Config("queue command is empty".to_string()))?;
        Ok(Self {
            command_line: command_line.trim().to_string(),
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Fail early when the submission command cannot be found
    pub fn ensure_available(&self) -> Result<PathBuf, SradlError> {
        crate::tools::locate(&self.program).ok_or_else(|| {
            SradlError::Tool(format!(
                "queue command '{}' was not found on PATH",
                self.program
            ))
        })
    }
}

impl JobQueue for CommandQueue {
    fn name(&self) -> &str {
        &self.command_line
    }

    fn submit(&mut self, script: &JobScript) -> Result<JobReceipt, SradlError> {
        debug!("Running {} for job {}", self.command_line, script.name);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SradlError::Tool(format!("failed to start '{}': {}", self.command_line, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A submitter that exits without reading is reported by its status below
            match stdin.write_all(script.body.as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => return Err(SradlError::Io(e)),
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SradlError::Tool(format!(
                "'{}' rejected job {} ({}): {}",
                self.command_line,
                script.name,
                output.status,
                stderr.trim()
            )));
        }

        Ok(JobReceipt {
            job: script.name.clone(),
            message: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        })
    }
}

/// Records scripts instead of submitting them
#[derive(Debug, Default)]
pub struct DryRunQueue {
    scripts: Vec<JobScript>,
}

impl DryRunQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripts(&self) -> &[JobScript] {
        &self.scripts
    }
}

impl JobQueue for DryRunQueue {
    fn name(&self) -> &str {
        "dry run"
    }

    fn submit(&mut self, script: &JobScript) -> Result<JobReceipt, SradlError> {
        self.scripts.push(script.clone());
        Ok(JobReceipt {
            job: script.name.clone(),
            message: "not submitted (dry run)".to_string(),
        })
    }
}
