use crate::core::accession::AccessionRecord;
use crate::core::config::Settings;
use crate::tools::queue::{JobQueue, JobReceipt, JobScript};
use crate::tools::{locate, Tool};
use crate::SradlError;
use tracing::{info, warn};

/// Jobs accepted by the queue, in submission order
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub submitted: Vec<(AccessionRecord, JobReceipt)>,
}

impl DownloadReport {
    pub fn len(&self) -> usize {
        self.submitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submitted.is_empty()
    }
}

/// Warn about SRA tools that are not visible from here. Jobs usually run on
/// compute nodes with their own PATH, so this never fails the run.
pub fn check_sra_tools(settings: &Settings) -> Vec<Tool> {
    let mut missing = Vec::new();
    for (tool, program) in [
        (Tool::Prefetch, &settings.prefetch_exe),
        (Tool::FastqDump, &settings.fqdump_exe),
    ] {
        if locate(program).is_none() {
            warn!("{} ('{}') not found on this host's PATH", tool, program);
            missing.push(tool);
        }
    }
    missing
}

/// Submit one download job per record, in input order.
///
/// Stops at the first rejected submission and returns that error; jobs
/// submitted before it stay queued.
pub fn submit_downloads<Q>(settings: &Settings, queue: &mut Q) -> Result<DownloadReport, SradlError>
where
    Q: JobQueue + ?Sized,
{
    let mut report = DownloadReport::default();

    for record in &settings.accessions {
        let script = JobScript::for_record(settings, record);
        let receipt = queue.submit(&script)?;
        info!(
            "Submitted {} as job {} via {}",
            record.accession,
            receipt.job,
            queue.name()
        );
        report.submitted.push((record.clone(), receipt));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accession::AccessionMap;
    use crate::tools::queue::DryRunQueue;
    use pretty_assertions::assert_eq;

    /// Accepts a fixed number of jobs, then fails
    struct FlakyQueue {
        accepted: usize,
        limit: usize,
    }

    impl JobQueue for FlakyQueue {
        fn name(&self) -> &str {
            "flaky"
        }

        fn submit(&mut self, script: &JobScript) -> Result<JobReceipt, SradlError> {
            if self.accepted == self.limit {
                return Err(SradlError::Tool("queue is full".to_string()));
            }
            self.accepted += 1;
            Ok(JobReceipt {
                job: script.name.clone(),
                message: format!("job {}", self.accepted),
            })
        }
    }

    fn settings() -> Settings {
        Settings {
            ranges: true,
            accessions: AccessionMap::build(vec![("liver", "5,7")], "SRR", true).unwrap(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_submits_in_input_order() {
        let mut queue = DryRunQueue::new();
        let report = submit_downloads(&settings(), &mut queue).unwrap();

        assert_eq!(report.len(), 3);
        let accessions: Vec<&str> = queue
            .scripts()
            .iter()
            .map(|s| s.accession.as_str())
            .collect();
        assert_eq!(accessions, vec!["SRR5", "SRR6", "SRR7"]);
    }

    #[test]
    fn test_first_failure_aborts() {
        let mut queue = FlakyQueue {
            accepted: 0,
            limit: 1,
        };
        let err = submit_downloads(&settings(), &mut queue).unwrap_err();

        assert!(matches!(err, SradlError::Tool(_)));
        assert_eq!(queue.accepted, 1);
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut queue: Box<dyn JobQueue> = Box::new(DryRunQueue::new());
        let report = submit_downloads(&settings(), queue.as_mut()).unwrap();
        assert_eq!(report.submitted[2].0.name, "liver_2");
    }

    #[test]
    fn test_check_sra_tools_reports_missing() {
        let settings = Settings {
            prefetch_exe: "sh".to_string(),
            fqdump_exe: "/nonexistent/fastq-dump".to_string(),
            ..Settings::default()
        };
        assert_eq!(check_sra_tools(&settings), vec![Tool::FastqDump]);
    }
}
