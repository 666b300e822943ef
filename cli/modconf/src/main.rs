//! modconf CLI: inspect and edit per-module compiler settings.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modconf", version, about = "Per-module compiler settings")]
struct Cli {
    /// Project directory (default: current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the target platforms known to the toolchain
    Platforms,
    /// List configured modules
    List,
    /// Configure a module with default arguments for a platform
    Init {
        /// Module name
        module: String,
        /// Target platform (e.g., "JVM 1.8", jvm-1.6, js, common)
        #[arg(long)]
        platform: Option<String>,
        /// Replace existing settings
        #[arg(long)]
        force: bool,
    },
    /// Show a module's settings and derived views
    Show {
        /// Module name
        module: String,
        /// Output format (human, toml, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Change a module's settings
    Set {
        /// Module name
        module: String,
        /// Language version, or "latest" to track the newest stable release
        #[arg(long)]
        language_version: Option<String>,
        /// API version, or "latest" to track the newest stable release
        #[arg(long)]
        api_version: Option<String>,
        /// Coroutine support (enable, warn, error)
        #[arg(long)]
        coroutines: Option<String>,
        /// JVM bytecode target (e.g., 1.8)
        #[arg(long)]
        jvm_target: Option<String>,
        /// Additional command-line arguments; an empty string clears them
        #[arg(long = "override", allow_hyphen_values = true)]
        override_text: Option<String>,
    },
    /// Remove a module's settings
    Remove {
        /// Module name
        module: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let project_dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Platforms => commands::platforms::list(),
        Commands::List => commands::list::run(&project_dir),
        Commands::Init {
            module,
            platform,
            force,
        } => commands::init::run(&project_dir, &module, platform.as_deref(), force),
        Commands::Show { module, format } => commands::show::run(&project_dir, &module, format.as_deref()),
        Commands::Set {
            module,
            language_version,
            api_version,
            coroutines,
            jvm_target,
            override_text,
        } => commands::set::run(
            &project_dir,
            &module,
            &commands::set::Changes {
                language_version,
                api_version,
                coroutines,
                jvm_target,
                override_text,
            },
        ),
        Commands::Remove { module } => commands::remove::run(&project_dir, &module),
    }
}
