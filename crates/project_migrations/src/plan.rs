// crates/project_migrations/src/plan.rs

use std::path::{Path, PathBuf};

use package_deps::{apply_updates, plan_updates, DependencySet};

use crate::android::{
    update_config_changes, update_gradle_classpaths, update_gradle_variables, update_wrapper_distribution,
};
use crate::config::MigrationConfig;
use crate::error::MigrationError;
use crate::ios::{remove_legacy_block, update_pbxproj_deployment_target, update_podfile_platform};

pub const IOS_PACKAGE: &str = "@capacitor/ios";
pub const ANDROID_PACKAGE: &str = "@capacitor/android";

/// Where the native projects live inside a user project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    /// Directory holding the Podfile and `App.xcodeproj`.
    pub ios_app_dir: PathBuf,
    pub android_dir: PathBuf,
}

impl ProjectLayout {
    /// The conventional `ios/App` and `android` layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            ios_app_dir: root.join("ios").join("App"),
            android_dir: root.join("android"),
            root,
        }
    }

    pub fn package_json(&self) -> PathBuf {
        self.root.join("package.json")
    }

    /// Directory with the app's Swift sources (`ios/App/App`).
    pub fn ios_target_dir(&self) -> PathBuf {
        self.ios_app_dir.join("App")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepKind {
    PackageJson,
    PodfilePlatform,
    PbxprojDeploymentTarget,
    RemoveLegacyBlock { marker: String },
    GradleClasspaths,
    GradleVariables,
    ManifestConfigChanges,
    GradleWrapper,
}

impl StepKind {
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::PackageJson => "package.json dependencies",
            StepKind::PodfilePlatform => "Podfile platform",
            StepKind::PbxprojDeploymentTarget => "Xcode deployment target",
            StepKind::RemoveLegacyBlock { .. } => "legacy code block",
            StepKind::GradleClasspaths => "Gradle classpaths",
            StepKind::GradleVariables => "Gradle variables",
            StepKind::ManifestConfigChanges => "AndroidManifest configChanges",
            StepKind::GradleWrapper => "Gradle wrapper",
        }
    }

    /// Start marker named in "not found" messages.
    pub fn marker(&self) -> &str {
        match self {
            StepKind::PackageJson => "dependencies",
            StepKind::PodfilePlatform => migration_markers::PODFILE_PLATFORM_START,
            StepKind::PbxprojDeploymentTarget => migration_markers::PBXPROJ_DEPLOYMENT_TARGET_START,
            StepKind::RemoveLegacyBlock { marker } => marker,
            StepKind::GradleClasspaths => migration_markers::CLASSPATH_PREFIX,
            StepKind::GradleVariables => "ext {",
            StepKind::ManifestConfigChanges => migration_markers::CONFIG_CHANGES_START,
            StepKind::GradleWrapper => migration_markers::WRAPPER_DISTRIBUTION_START,
        }
    }

    /// Applies the step to a file's text. `Ok(None)` means the step's start
    /// marker is not in the text.
    pub fn apply(&self, text: &str, config: &MigrationConfig) -> Result<Option<String>, MigrationError> {
        let result = match self {
            StepKind::PackageJson => return update_package_json(text, config),
            StepKind::PodfilePlatform => update_podfile_platform(text, &config.ios_deployment_target),
            StepKind::PbxprojDeploymentTarget => {
                update_pbxproj_deployment_target(text, &config.ios_deployment_target)
            }
            StepKind::RemoveLegacyBlock { marker } => remove_legacy_block(text, marker),
            StepKind::GradleClasspaths => update_gradle_classpaths(text, &config.classpaths),
            StepKind::GradleVariables => update_gradle_variables(text, &config.gradle_variables),
            StepKind::ManifestConfigChanges => update_config_changes(text, &config.config_changes),
            StepKind::GradleWrapper => update_wrapper_distribution(text, &config.gradle_version),
        };
        Ok(result?)
    }
}

fn update_package_json(text: &str, config: &MigrationConfig) -> Result<Option<String>, MigrationError> {
    let deps = DependencySet::from_package_json(text)?;
    if deps.is_empty() {
        return Ok(None);
    }
    let packages: Vec<&str> = config.framework_packages.iter().map(String::as_str).collect();
    let updates = plan_updates(&deps, &packages, &config.framework_version);
    for update in &updates {
        log::debug!("{}: {} -> {}", update.name, update.from, update.to);
    }
    Ok(Some(apply_updates(text, &updates)?))
}

/// All steps touching one file, applied in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileJob {
    pub path: PathBuf,
    pub steps: Vec<StepKind>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MigrationPlan {
    pub jobs: Vec<FileJob>,
}

impl MigrationPlan {
    fn push(&mut self, path: PathBuf, step: StepKind) {
        match self.jobs.iter_mut().find(|job| job.path == path) {
            Some(job) => job.steps.push(step),
            None => self.jobs.push(FileJob { path, steps: vec![step] }),
        }
    }

    pub fn step_count(&self) -> usize {
        self.jobs.iter().map(|job| job.steps.len()).sum()
    }
}

/// Builds the plan for a project. Platform steps are only planned when the
/// project depends on that platform's package and its directory exists.
pub fn build_plan(layout: &ProjectLayout, deps: &DependencySet, config: &MigrationConfig) -> MigrationPlan {
    let mut plan = MigrationPlan::default();
    plan.push(layout.package_json(), StepKind::PackageJson);

    if platform_enabled(deps, IOS_PACKAGE, &layout.ios_app_dir) {
        plan.push(layout.ios_app_dir.join("Podfile"), StepKind::PodfilePlatform);
        plan.push(
            layout.ios_app_dir.join("App.xcodeproj").join("project.pbxproj"),
            StepKind::PbxprojDeploymentTarget,
        );
        for (file, marker) in &config.ios_legacy_blocks {
            plan.push(
                layout.ios_target_dir().join(file),
                StepKind::RemoveLegacyBlock { marker: marker.clone() },
            );
        }
    }

    if platform_enabled(deps, ANDROID_PACKAGE, &layout.android_dir) {
        let android = &layout.android_dir;
        plan.push(android.join("build.gradle"), StepKind::GradleClasspaths);
        plan.push(android.join("variables.gradle"), StepKind::GradleVariables);
        plan.push(
            android.join("app").join("src").join("main").join("AndroidManifest.xml"),
            StepKind::ManifestConfigChanges,
        );
        plan.push(
            android.join("gradle").join("wrapper").join("gradle-wrapper.properties"),
            StepKind::GradleWrapper,
        );
    }

    plan
}

fn platform_enabled(deps: &DependencySet, package: &str, dir: &Path) -> bool {
    if !deps.contains(package) {
        log::debug!("{} not in dependencies, skipping its native project", package);
        return false;
    }
    if !dir.is_dir() {
        log::debug!("{} does not exist, skipping its native project", dir.display());
        return false;
    }
    true
}
