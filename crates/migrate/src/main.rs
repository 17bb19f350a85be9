use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use migrate::logging::init_logging;
use migrate::{remove_block_in_file, replace_in_file, run_migration, AppConfig};
use project_migrations::MigrationConfig;

fn cli() -> Command {
    let file_arg = Arg::new("file")
        .long("file")
        .required(true)
        .num_args(1)
        .value_parser(clap::value_parser!(PathBuf))
        .help("File to patch");

    Command::new("migrate")
        .version("0.1.0")
        .about("Migrates the native iOS and Android projects of an app to the next framework major version")
        .arg(
            Arg::new("project_dir")
                .long("project-dir")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("Root of the app (the directory holding package.json)"),
        )
        .arg(
            Arg::new("ios_dir")
                .long("ios-dir")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("iOS project directory, relative to the project dir (default: ios/App)"),
        )
        .arg(
            Arg::new("android_dir")
                .long("android-dir")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("Android project directory, relative to the project dir (default: android)"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Report what would change without writing files"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose logging"),
        )
        .subcommand(Command::new("run").about("Run every migration step (the default)"))
        .subcommand(
            Command::new("replace")
                .about("Replace the text between two markers in a file")
                .arg(file_arg.clone())
                .arg(Arg::new("start").long("start").required(true).num_args(1).help("Start marker"))
                .arg(Arg::new("end").long("end").required(true).num_args(1).help("End marker"))
                .arg(
                    Arg::new("replacement")
                        .long("replacement")
                        .required(true)
                        .num_args(1)
                        .allow_hyphen_values(true)
                        .help("Text to put between the markers"),
                ),
        )
        .subcommand(
            Command::new("remove-block")
                .about("Remove a brace-delimited block starting at a marker line")
                .arg(file_arg)
                .arg(Arg::new("marker").long("marker").required(true).num_args(1).help("Start marker")),
        )
}

/// Global flags are read from the subcommand's matches, which also see
/// values given before the subcommand name.
fn app_config(matches: &ArgMatches) -> AppConfig {
    let globals = matches.subcommand().map(|(_, sub)| sub).unwrap_or(matches);
    let project_dir = globals.get_one::<PathBuf>("project_dir").cloned();
    let given = project_dir.is_some();
    AppConfig {
        project_dir: project_dir.unwrap_or_else(|| PathBuf::from(".")),
        ios_dir: globals.get_one::<PathBuf>("ios_dir").cloned(),
        android_dir: globals.get_one::<PathBuf>("android_dir").cloned(),
        dry_run: globals.get_flag("dry_run"),
        verbose: globals.get_flag("verbose"),
    }
    .with_env_overrides(given)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let app = app_config(&matches);
    init_logging(app.verbose);

    match matches.subcommand() {
        Some(("replace", sub)) => {
            let file = sub.get_one::<PathBuf>("file").expect("required by clap");
            let outcome = replace_in_file(
                &app.project_dir.join(file),
                sub.get_one::<String>("start").expect("required by clap"),
                sub.get_one::<String>("end").expect("required by clap"),
                sub.get_one::<String>("replacement").expect("required by clap"),
                app.dry_run,
            )?;
            println!("{}: {}", file.display(), outcome);
        }
        Some(("remove-block", sub)) => {
            let file = sub.get_one::<PathBuf>("file").expect("required by clap");
            let outcome = remove_block_in_file(
                &app.project_dir.join(file),
                sub.get_one::<String>("marker").expect("required by clap"),
                app.dry_run,
            )?;
            println!("{}: {}", file.display(), outcome);
        }
        _ => {
            println!("--------------------------------------------------");
            println!("Project directory: {}", app.project_dir.display());
            if app.dry_run {
                println!("Dry run: no files will be written");
            }
            println!("--------------------------------------------------");

            let report = run_migration(&app, &MigrationConfig::default())?;
            println!("{}", report);
            println!("--------------------------------------------------");

            if report.has_errors() {
                eprintln!("Some steps failed. Update those files manually.");
                std::process::exit(1);
            }
            println!("Migration complete.");
        }
    }

    Ok(())
}
