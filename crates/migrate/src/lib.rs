// crates/migrate/src/lib.rs

use std::fmt;
use std::fs;
use std::path::Path;
use std::thread;

use anyhow::{anyhow, bail, Context, Result};
use package_deps::DependencySet;
use project_migrations::{build_plan, execute_job, MigrationConfig, StepReport};
use text_patch::processor::{patch_file_with_patcher, DefaultFilePatcher, FileEdit, PatchOutcome};

pub mod config;
pub mod logging;

pub use config::AppConfig;

/// Every step's result, in plan order.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub steps: Vec<StepReport>,
}

impl MigrationReport {
    pub fn count(&self, pred: impl Fn(&StepReport) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(*s)).count()
    }

    pub fn updated(&self) -> usize {
        self.count(|s| matches!(s.result, Ok(PatchOutcome::Updated)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s.result, Ok(PatchOutcome::Skipped(_))))
    }

    pub fn errors(&self) -> usize {
        self.count(StepReport::is_error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match &step.result {
                Ok(outcome) => writeln!(f, "[{}] {}: {}", step.step, step.file.display(), outcome)?,
                Err(err) => writeln!(f, "[{}] {}: error: {}", step.step, step.file.display(), err)?,
            }
        }
        write!(
            f,
            "{} step(s): {} updated, {} skipped, {} failed",
            self.steps.len(),
            self.updated(),
            self.skipped(),
            self.errors()
        )
    }
}

/// Migrates the native projects under `app.project_dir`.
///
/// Files are migrated concurrently, one thread per file; steps on the same
/// file run in order. The report lists steps in plan order regardless of
/// which file finished first.
pub fn run_migration(app: &AppConfig, config: &MigrationConfig) -> Result<MigrationReport> {
    let layout = app.layout();
    let package_json = layout.package_json();
    if !package_json.is_file() {
        bail!(
            "{} not found; run this from the root of your app or pass --project-dir",
            package_json.display()
        );
    }
    let text = fs::read_to_string(&package_json)
        .with_context(|| format!("Failed to read {}", package_json.display()))?;
    let deps = DependencySet::from_package_json(&text)
        .with_context(|| format!("Failed to parse {}", package_json.display()))?;
    log::debug!("{} dependencies found", deps.len());

    let plan = build_plan(&layout, &deps, config);
    log::info!("{} file(s), {} step(s) planned", plan.jobs.len(), plan.step_count());

    let per_file: Vec<Vec<StepReport>> = thread::scope(|scope| {
        let handles: Vec<_> = plan
            .jobs
            .iter()
            .map(|job| scope.spawn(move || execute_job(job, config, app.dry_run)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| anyhow!("migration worker panicked")))
            .collect::<Result<_>>()
    })?;

    Ok(MigrationReport {
        steps: per_file.into_iter().flatten().collect(),
    })
}

/// Replaces every region of `file` bounded by `start`/`end`. A missing start
/// marker is an error.
pub fn replace_in_file(file: &Path, start: &str, end: &str, replacement: &str, dry_run: bool) -> Result<PatchOutcome> {
    patch_required(file, FileEdit::replace(start, end, replacement).required(), dry_run)
}

/// Removes every braced block of `file` starting at a line containing
/// `marker`. A missing marker is an error.
pub fn remove_block_in_file(file: &Path, marker: &str, dry_run: bool) -> Result<PatchOutcome> {
    patch_required(file, FileEdit::remove_block(marker).required(), dry_run)
}

fn patch_required(file: &Path, edit: FileEdit, dry_run: bool) -> Result<PatchOutcome> {
    if !file.is_file() {
        bail!("{} does not exist", file.display());
    }
    let patcher = DefaultFilePatcher::new(dry_run);
    let outcome = patch_file_with_patcher(&patcher, file, &[edit])
        .with_context(|| format!("Failed to patch {}", file.display()))?;
    Ok(outcome)
}
