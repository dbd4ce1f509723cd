use clap::{Parser, Subcommand};
use profile_stats::commands::*;
use profile_stats::core::{command_init::RunOptions, error::Result, print_error};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "profile-stats")]
#[command(about = "Collects GitHub statistics and renders a profile README and SVG cards")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Profile file with personal rows and the open-source allow-list
    #[arg(long, global = true, default_value = "profile.json")]
    profile: PathBuf,

    /// Directory holding the LOC, PR and icon snapshots
    #[arg(long, global = true, default_value = "cache")]
    cache_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect statistics and write README.md plus the SVG cards
    Update(UpdateArgs),
    /// Collect statistics and print them as JSON
    Stats,
}

fn run(cli: Cli) -> Result<()> {
    let options = RunOptions {
        profile_path: cli.profile,
        cache_dir: cli.cache_dir,
    };

    match cli.command {
        Commands::Update(args) => execute_update(&options, args),
        Commands::Stats => execute_stats(&options),
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        log::error!("Run failed: {e}");
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
