// crates/project_migrations/src/lib.rs

//! Migration steps for the native iOS and Android projects of a user app.
//!
//! Each step is a text transform built on `text_patch`. [`build_plan`] decides
//! which steps apply to a project and groups them per file; [`execute_job`]
//! runs the steps of one file.

pub mod android;
mod bump;
pub mod config;
pub mod error;
pub mod ios;
pub mod plan;
pub mod runner;

pub use android::GradleValue;
pub use bump::bump_bounded;
pub use config::MigrationConfig;
pub use error::MigrationError;
pub use plan::{build_plan, FileJob, MigrationPlan, ProjectLayout, StepKind};
pub use runner::{execute_job, StepReport};
