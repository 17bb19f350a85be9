// crates/migrate/src/config.rs

use std::env;
use std::path::PathBuf;

use project_migrations::ProjectLayout;

/// Runtime configuration composed from CLI flags and environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub project_dir: PathBuf,
    pub ios_dir: Option<PathBuf>,
    pub android_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl AppConfig {
    /// Fills in values the CLI left unset from the environment:
    /// `MIGRATE_PROJECT_DIR` and `MIGRATE_DRY_RUN=1`.
    pub fn with_env_overrides(mut self, project_dir_given: bool) -> Self {
        if !project_dir_given {
            if let Ok(dir) = env::var("MIGRATE_PROJECT_DIR") {
                self.project_dir = PathBuf::from(dir);
            }
        }
        if env::var("MIGRATE_DRY_RUN").map(|v| v == "1").unwrap_or(false) {
            self.dry_run = true;
        }
        self
    }

    /// Native project locations. Relative `--ios-dir`/`--android-dir` values
    /// resolve against the project directory.
    pub fn layout(&self) -> ProjectLayout {
        let mut layout = ProjectLayout::new(&self.project_dir);
        if let Some(ios) = &self.ios_dir {
            layout.ios_app_dir = self.project_dir.join(ios);
        }
        if let Some(android) = &self.android_dir {
            layout.android_dir = self.project_dir.join(android);
        }
        layout
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            ios_dir: None,
            android_dir: None,
            dry_run: false,
            verbose: false,
        }
    }
}
