// crates/migration_markers/src/lib.rs

//! Literal markers and default target values shared by every migration step.

// --- iOS ---

/// Podfile platform line, value bounded by a single quote.
pub const PODFILE_PLATFORM_START: &str = "platform :ios, '";
pub const PODFILE_PLATFORM_END: &str = "'";

/// Build setting in `project.pbxproj`, value bounded by `;`.
pub const PBXPROJ_DEPLOYMENT_TARGET_START: &str = "IPHONEOS_DEPLOYMENT_TARGET = ";
pub const PBXPROJ_DEPLOYMENT_TARGET_END: &str = ";";

pub const DEFAULT_IOS_DEPLOYMENT_TARGET: &str = "13.0";

// --- Android ---

/// Prefix of a Gradle classpath line; the dependency coordinates and a `:`
/// follow, then the version up to the closing quote.
pub const CLASSPATH_PREFIX: &str = "classpath '";
pub const CLASSPATH_END: &str = "'";

pub const ANDROID_GRADLE_PLUGIN: &str = "com.android.tools.build:gradle";
pub const GOOGLE_SERVICES_PLUGIN: &str = "com.google.gms:google-services";

pub const DEFAULT_CLASSPATHS: &[(&str, &str)] = &[
    (ANDROID_GRADLE_PLUGIN, "8.2.1"),
    (GOOGLE_SERVICES_PLUGIN, "4.4.0"),
];

pub const CONFIG_CHANGES_START: &str = "android:configChanges=\"";
pub const CONFIG_CHANGES_END: &str = "\"";
pub const DEFAULT_CONFIG_CHANGES: &str =
    "orientation|keyboardHidden|keyboard|screenSize|locale|smallestScreenSize|screenLayout|uiMode|navigation";

/// The wrapper URL runs to the end of its line.
pub const WRAPPER_DISTRIBUTION_START: &str = "distributionUrl=";
pub const DEFAULT_GRADLE_VERSION: &str = "8.2.1";

/// Numeric `variables.gradle` entries.
pub const DEFAULT_NUMERIC_VARIABLES: &[(&str, u32)] = &[
    ("minSdkVersion", 22),
    ("compileSdkVersion", 34),
    ("targetSdkVersion", 34),
];

/// Quoted `variables.gradle` entries.
pub const DEFAULT_STRING_VARIABLES: &[(&str, &str)] = &[
    ("androidxActivityVersion", "1.8.0"),
    ("androidxAppCompatVersion", "1.6.1"),
    ("androidxCoordinatorLayoutVersion", "1.2.0"),
    ("androidxCoreVersion", "1.12.0"),
    ("androidxFragmentVersion", "1.6.2"),
    ("coreSplashScreenVersion", "1.0.1"),
    ("androidxWebkitVersion", "1.9.0"),
    ("junitVersion", "4.13.2"),
    ("androidxJunitVersion", "1.1.5"),
    ("androidxEspressoCoreVersion", "3.5.1"),
    ("cordovaAndroidVersion", "10.1.1"),
];

// --- Legacy code ---

/// `(path relative to the iOS target dir, start marker)` of blocks the new
/// templates no longer carry.
pub const IOS_LEGACY_BLOCKS: &[(&str, &str)] = &[("AppDelegate.swift", "override func touchesBegan")];

// --- package.json ---

pub const DEFAULT_FRAMEWORK_VERSION: &str = "^6.0.0";

/// Packages that move in lock step with the framework major version.
pub const FRAMEWORK_PACKAGES: &[&str] = &[
    "@capacitor/core",
    "@capacitor/cli",
    "@capacitor/android",
    "@capacitor/ios",
    "@capacitor/action-sheet",
    "@capacitor/app",
    "@capacitor/app-launcher",
    "@capacitor/browser",
    "@capacitor/camera",
    "@capacitor/clipboard",
    "@capacitor/device",
    "@capacitor/dialog",
    "@capacitor/filesystem",
    "@capacitor/geolocation",
    "@capacitor/haptics",
    "@capacitor/keyboard",
    "@capacitor/local-notifications",
    "@capacitor/motion",
    "@capacitor/network",
    "@capacitor/preferences",
    "@capacitor/push-notifications",
    "@capacitor/screen-reader",
    "@capacitor/share",
    "@capacitor/splash-screen",
    "@capacitor/status-bar",
    "@capacitor/text-zoom",
    "@capacitor/toast",
];

/// Start marker for a classpath entry of `dependency`.
pub fn classpath_start(dependency: &str) -> String {
    format!("{}{}:", CLASSPATH_PREFIX, dependency)
}

/// Gradle wrapper distribution URL for `version`, escaped the way
/// `gradle-wrapper.properties` stores it.
pub fn wrapper_distribution_url(version: &str) -> String {
    format!("https\\://services.gradle.org/distributions/gradle-{}-all.zip", version)
}

/// Start marker for a `package.json` dependency entry.
pub fn package_json_entry_start(name: &str) -> String {
    format!("\"{}\": \"", name)
}
