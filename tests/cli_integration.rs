mod common;

use anyhow::Result;
use pretty_assertions::assert_eq;
use predicates::prelude::*;

use common::*;

#[test]
fn test_cli_help_command() {
    let mut cmd = sradl_cmd();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--dw"))
        .stdout(predicate::str::contains("--rename"))
        .stdout(predicate::str::contains("[SRR_code]"));
}

#[test]
fn test_verbose_shows_defaults() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("runs.ini", &simple_input())?;

    let mut cmd = sradl_cmd();
    cmd.arg("-inp").arg(&input).arg("-dw").arg("-v").arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::is_match(r"ranges:\s+false").unwrap())
        .stdout(predicate::str::is_match(r"prefetch:\s+prefetch").unwrap())
        .stdout(predicate::str::is_match(r"fastq-dump:\s+fastq-dump").unwrap())
        .stdout(predicate::str::is_match(r"queue command:\s+qsub").unwrap())
        .stdout(predicate::str::is_match(r"liver:\s+SRR1234567").unwrap());
    Ok(())
}

#[test]
fn test_dry_run_prints_job_scripts() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("runs.ini", &ranged_input("qsub -q long.q"))?;

    let mut cmd = sradl_cmd();
    cmd.arg("-inp").arg(&input).arg("-dw").arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#$ -N liver_0"))
        .stdout(predicate::str::contains("#$ -N liver_1"))
        .stdout(predicate::str::contains("#$ -N brain_0"))
        .stdout(predicate::str::contains("fastq-dump --split-files --gzip SRR101"))
        .stdout(predicate::str::contains("3 job(s) would be submitted"));
    Ok(())
}

#[test]
fn test_download_pipes_scripts_into_queue_command() -> Result<()> {
    let env = TestEnvironment::new()?;
    // `cat` accepts every job and echoes it back as its receipt
    let input = env.create_input_file("runs.ini", &ranged_input("cat"))?;

    let mut cmd = sradl_cmd();
    cmd.arg("--inp").arg(&input).arg("--dw");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Submitted 3 download job(s)"));
    Ok(())
}

#[test]
fn test_rename_is_idempotent() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("runs.ini", &ranged_input("qsub"))?;
    env.create_reads(&[
        "SRR100_1.fastq.gz",
        "SRR100_2.fastq.gz",
        "SRR101.fastq.gz",
        "SRR200_1.fastq.gz",
    ])?;

    let run = || {
        let mut cmd = sradl_cmd();
        cmd.arg("-inp")
            .arg(&input)
            .arg("-rename")
            .arg("--dir")
            .arg(env.temp_dir.path());
        cmd.assert().success();
    };

    run();
    let first = env.listing()?;
    assert_eq!(
        first,
        vec![
            "brain_0_1.fastq.gz",
            "liver_0_1.fastq.gz",
            "liver_0_2.fastq.gz",
            "liver_1.fastq.gz",
            "runs.ini",
        ]
    );

    run();
    assert_eq!(env.listing()?, first);
    Ok(())
}

#[test]
fn test_rename_dry_run_changes_nothing() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("runs.ini", &simple_input())?;
    env.create_reads(&["SRR1234567.fastq.gz"])?;

    let mut cmd = sradl_cmd();
    cmd.arg("-inp")
        .arg(&input)
        .arg("-rename")
        .arg("--dry-run")
        .arg("--dir")
        .arg(env.temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "would rename SRR1234567.fastq.gz -> liver.fastq.gz",
        ));
    assert!(env.path("SRR1234567.fastq.gz").exists());
    Ok(())
}

#[test]
fn test_download_warns_about_tools_missing_locally() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file(
        "runs.ini",
        "[Config]\nprefetch_path = /nonexistent/prefetch\nfqdump_path = sh\n[SRR_code]\nliver = 1\n",
    )?;

    let mut cmd = sradl_cmd();
    cmd.arg("-inp").arg(&input).arg("-dw").arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SRA Toolkit prefetch"))
        .stdout(predicate::str::contains("SRA Toolkit fastq-dump").not());
    Ok(())
}
