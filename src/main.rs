#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use session_tester::config::{Preferences, default_preferences_path};
use session_tester::save_cmd::SaveOptions;
use session_tester::{SessionResult, config_cmd, publish_cmd, save_cmd, show_cmd};

#[derive(Parser, Debug)]
#[command(name = "session-tester")]
#[command(about = "Record exploratory testing sessions and publish them as HTML", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set SESSION_TESTER_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// Preferences file (defaults to <config dir>/session-tester/preferences.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured session root for this run
    #[arg(long = "root", global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a testing session that ends now
    Save {
        /// Tester name (defaults to the configured tester)
        #[arg(long)]
        tester: Option<String>,
        /// Session mission / charter
        #[arg(long)]
        mission: String,
        /// How long the session ran, in minutes
        #[arg(long, default_value_t = 0)]
        minutes: u32,
        /// Task performed (repeatable)
        #[arg(long = "task")]
        tasks: Vec<String>,
        /// Data file used (repeatable)
        #[arg(long)]
        data: Vec<String>,
        /// Test note (repeatable)
        #[arg(long = "note")]
        notes: Vec<String>,
        /// Issue raised (repeatable)
        #[arg(long = "issue")]
        issues: Vec<String>,
        /// Bug found (repeatable)
        #[arg(long = "bug")]
        bugs: Vec<String>,
        /// Environment detail (repeatable)
        #[arg(long)]
        environment: Vec<String>,
        /// Product area covered (repeatable)
        #[arg(long)]
        area: Vec<String>,
        /// Append a summary of this machine to the environment
        #[arg(long)]
        detect_environment: bool,
    },

    /// Print a stored session
    Show {
        /// Path to a testing_session_*.xml file
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Publish all stored sessions as a static HTML report
    Publish {
        /// Existing directory to publish into (defaults to the configured web report path)
        dir: Option<PathBuf>,
    },

    /// Inspect or change preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print current preferences
    Show,
    /// Restore default preferences
    Reset,
    /// Change one or more preferences
    Set {
        #[arg(long)]
        tester_name: Option<String>,
        #[arg(long)]
        web_report_path: Option<PathBuf>,
        #[arg(long)]
        session_root: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("SESSION_TESTER_LOG").unwrap_or_else(|_| {
        if verbose { "session_tester=debug".to_string() } else { "session_tester=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn run(cli: Cli) -> SessionResult<()> {
    let config_path = cli.config.unwrap_or_else(default_preferences_path);
    let mut prefs = Preferences::load_or_create(&config_path)?;
    let mut effective = prefs.clone();
    if let Some(root) = cli.root {
        effective.session_root = root;
    }

    match cli.command {
        Commands::Save { tester, mission, minutes, tasks, data, notes, issues, bugs, environment, area, detect_environment } => {
            let opts = SaveOptions {
                tester,
                mission,
                minutes,
                tasks,
                data,
                notes,
                issues,
                bugs,
                environment,
                area,
                detect_environment,
            };
            let path = save_cmd::run(&effective, opts)?;
            println!("{}", path.display());
        }
        Commands::Show { file, json } => show_cmd::run(&file, json)?,
        Commands::Publish { dir } => {
            let summary = publish_cmd::run(&effective, dir)?;
            println!("{}", summary.report_dir.display());
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(&effective, &config_path)?,
            ConfigAction::Reset => config_cmd::reset(&mut prefs, &config_path)?,
            ConfigAction::Set { tester_name, web_report_path, session_root } => {
                config_cmd::set(&mut prefs, &config_path, tester_name, web_report_path, session_root)?
            }
        },
    }
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_override_is_global() {
        let cli = Cli::try_parse_from(["session-tester", "publish", "--root", "/tmp/sessions"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/sessions")));
        assert!(matches!(cli.command, Commands::Publish { dir: None }));
    }

    #[test]
    fn test_root_override_and_stored_session_root_are_distinct() {
        let cli = Cli::try_parse_from([
            "session-tester",
            "--root",
            "/tmp/once",
            "config",
            "set",
            "--session-root",
            "/tmp/stored",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/once")));
        match cli.command {
            Commands::Config {
                action: ConfigAction::Set { session_root, .. },
            } => assert_eq!(session_root, Some(PathBuf::from("/tmp/stored"))),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
