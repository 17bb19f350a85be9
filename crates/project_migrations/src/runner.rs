// crates/project_migrations/src/runner.rs

use std::path::PathBuf;

use text_patch::processor::{DefaultFilePatcher, PatchOutcome};

use crate::config::MigrationConfig;
use crate::error::MigrationError;
use crate::plan::FileJob;

/// Outcome of one step on one file.
#[derive(Debug)]
pub struct StepReport {
    pub file: PathBuf,
    pub step: &'static str,
    pub result: Result<PatchOutcome, MigrationError>,
}

impl StepReport {
    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}

/// Runs every step of `job` against its file, in order, and writes the file
/// back once if anything changed.
///
/// A failing step leaves the text as the previous step produced it; later
/// steps still run.
pub fn execute_job(job: &FileJob, config: &MigrationConfig, dry_run: bool) -> Vec<StepReport> {
    let report = |step: &'static str, result| StepReport {
        file: job.path.clone(),
        step,
        result,
    };

    if !job.path.is_file() {
        return job
            .steps
            .iter()
            .map(|step| report(step.name(), Ok(PatchOutcome::Skipped("file not found".to_string()))))
            .collect();
    }

    let patcher = DefaultFilePatcher::new(dry_run);
    let original = match patcher.read(&job.path) {
        Ok(text) => text,
        Err(err) => return vec![report("read", Err(MigrationError::from(err)))],
    };

    let mut reports = Vec::with_capacity(job.steps.len());
    let mut current = original.clone();
    for step in &job.steps {
        let result = match step.apply(&current, config) {
            Ok(None) => {
                log::warn!(
                    "Unable to find {:?} in {}. Try updating it manually",
                    step.marker(),
                    job.path.display()
                );
                Ok(PatchOutcome::Skipped("marker not found".to_string()))
            }
            Ok(Some(text)) if text == current => Ok(PatchOutcome::Unchanged),
            Ok(Some(text)) => {
                current = text;
                Ok(PatchOutcome::Updated)
            }
            Err(err) => Err(err.with_origin(&job.path)),
        };
        reports.push(report(step.name(), result));
    }

    if let Err(err) = patcher.commit(&job.path, &original, &current) {
        reports.push(report("write", Err(MigrationError::from(err))));
    }
    reports
}
