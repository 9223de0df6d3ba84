//! Registrar Command-Line Interface
//!
//! Admin console for a student-management service: browse and edit
//! students, courses and enrollments from the terminal.
//!
//! ```text
//!   registrar dashboard
//!   registrar students list --search hopper
//!   registrar courses add --name Compilers --code CS301 --credits 4
//!   registrar enrollments grade 3 A+
//!   registrar shell
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod ui;

use commands::common::{Target, report_error};
use commands::courses::CourseAction;
use commands::enrollments::EnrollmentAction;
use commands::students::StudentAction;
use commands::{courses, dashboard, enrollments, shell, students};

/// Registrar - student, course and enrollment administration
#[derive(Parser)]
#[command(name = "registrar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: <config dir>/registrar/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding the config file and REGISTRAR_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use a seeded in-process registrar instead of a server
    #[arg(long, global = true)]
    sim: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show record counts and recent activity
    Dashboard,

    /// Manage students
    Students {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Manage courses
    Courses {
        #[command(subcommand)]
        action: CourseAction,
    },

    /// Manage enrollments
    Enrollments {
        #[command(subcommand)]
        action: EnrollmentAction,
    },

    /// Interactive console
    Shell,

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match config::Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
        if let Err(e) = config.validate() {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }

    // Setup logging: -v wins, then RUST_LOG, then the configured level
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let target = Target {
        config,
        sim: cli.sim,
    };

    // Execute command
    let result = match cli.command {
        Commands::Dashboard => dashboard::execute(&target).await,
        Commands::Students { action } => students::execute(&target, action).await,
        Commands::Courses { action } => courses::execute(&target, action).await,
        Commands::Enrollments { action } => enrollments::execute(&target, action).await,
        Commands::Shell => shell::execute(&target).await,
        Commands::Config => commands::config::execute(&target, cli.config.as_deref()),
    };

    // API failures were already shown as notifications
    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
