// crates/project_migrations/src/config.rs

use migration_markers::{
    DEFAULT_CLASSPATHS, DEFAULT_CONFIG_CHANGES, DEFAULT_FRAMEWORK_VERSION, DEFAULT_GRADLE_VERSION,
    DEFAULT_IOS_DEPLOYMENT_TARGET, DEFAULT_NUMERIC_VARIABLES, DEFAULT_STRING_VARIABLES,
    FRAMEWORK_PACKAGES, IOS_LEGACY_BLOCKS,
};

use crate::android::GradleValue;

/// Target values for every migration step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationConfig {
    pub ios_deployment_target: String,
    /// `(dependency coordinates, version)` for `android/build.gradle`.
    pub classpaths: Vec<(String, String)>,
    pub gradle_variables: Vec<(String, GradleValue)>,
    pub config_changes: String,
    pub gradle_version: String,
    pub framework_version: String,
    pub framework_packages: Vec<String>,
    /// `(path relative to the iOS target dir, block start marker)`.
    pub ios_legacy_blocks: Vec<(String, String)>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        let owned = |pairs: &[(&str, &str)]| -> Vec<(String, String)> {
            pairs.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
        };

        let mut gradle_variables: Vec<(String, GradleValue)> = DEFAULT_NUMERIC_VARIABLES
            .iter()
            .map(|(name, n)| (name.to_string(), GradleValue::Number(*n)))
            .collect();
        gradle_variables.extend(
            DEFAULT_STRING_VARIABLES
                .iter()
                .map(|(name, v)| (name.to_string(), GradleValue::Text(v.to_string()))),
        );

        Self {
            ios_deployment_target: DEFAULT_IOS_DEPLOYMENT_TARGET.to_string(),
            classpaths: owned(DEFAULT_CLASSPATHS),
            gradle_variables,
            config_changes: DEFAULT_CONFIG_CHANGES.to_string(),
            gradle_version: DEFAULT_GRADLE_VERSION.to_string(),
            framework_version: DEFAULT_FRAMEWORK_VERSION.to_string(),
            framework_packages: FRAMEWORK_PACKAGES.iter().map(|p| p.to_string()).collect(),
            ios_legacy_blocks: owned(IOS_LEGACY_BLOCKS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MigrationConfig::default();
        assert_eq!(config.ios_deployment_target, "13.0");
        assert_eq!(config.classpaths.len(), 2);
        assert_eq!(
            config.gradle_variables[0],
            ("minSdkVersion".to_string(), GradleValue::Number(22))
        );
        assert!(config
            .gradle_variables
            .iter()
            .any(|(name, value)| name == "junitVersion" && *value == GradleValue::Text("4.13.2".to_string())));
        assert!(config.framework_packages.contains(&"@capacitor/core".to_string()));
    }
}
