//! badgegen CLI - filter park lists and generate badge SQL from CSV files
//!
//! Each subcommand runs one pipeline once and prints a one-line summary.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use badgegen::{Config, PipelineSummary};

#[derive(Parser)]
#[command(name = "badgegen")]
#[command(version, about = "Filter park lists and generate badge SQL inserts from CSV files", long_about = None)]
struct Cli {
    /// Path to YAML config (default: $BADGEGEN_CONFIG, then ./badgegen.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the summary as JSON instead of a sentence
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep active state parks from the all-parks CSV
    FilterStateParks {
        /// Input CSV (default: <scripts_dir>/all_parks.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV (default: <scripts_dir>/active_state_parks.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate one multi-row INSERT of county badges
    CountyBadges {
        /// Input CSV (default: <scripts_dir>/uscounties.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output SQL (default: <scripts_dir>/insert_counties.sql)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate one INSERT per active state park
    StateParkBadges {
        /// Input CSV (default: <scripts_dir>/active_state_parks.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output SQL (default: <scripts_dir>/insert_state_park_badges.sql)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the state park filter, state park badges and county badges in order
    All,

    /// Print the resolved configuration without running anything
    Validate,
}

/// CLI paths are used as given; configured paths resolve against scripts_dir
fn pick_path(config: &Config, cli: Option<PathBuf>, configured: &Path) -> PathBuf {
    cli.unwrap_or_else(|| config.resolve(configured))
}

fn print_summary(summary: &PipelineSummary, json: bool) -> Result<(), String> {
    if json {
        let line = summary
            .to_json()
            .map_err(|e| format!("Failed to serialize summary: {}", e))?;
        println!("{}", line);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let summaries = match cli.command {
        Commands::FilterStateParks { input, output } => {
            let section = &config.state_parks;
            vec![badgegen::filter_state_parks(
                &pick_path(&config, input, &section.input),
                &pick_path(&config, output, &section.output),
                &section.filter,
            )
            .map_err(|e| e.to_string())?]
        }
        Commands::CountyBadges { input, output } => {
            let section = &config.county_badges;
            vec![badgegen::generate_county_badges(
                &pick_path(&config, input, &section.input),
                &pick_path(&config, output, &section.output),
                config.duplicates,
            )
            .map_err(|e| e.to_string())?]
        }
        Commands::StateParkBadges { input, output } => {
            let section = &config.state_park_badges;
            vec![badgegen::generate_state_park_badges(
                &pick_path(&config, input, &section.input),
                &pick_path(&config, output, &section.output),
                &section.badge_options(),
                config.duplicates,
            )
            .map_err(|e| e.to_string())?]
        }
        Commands::All => {
            let mut printed = Ok(());
            badgegen::run_all(&config, |summary| {
                if printed.is_ok() {
                    printed = print_summary(summary, cli.json);
                }
            })
            .map_err(|e| e.to_string())?;
            return printed;
        }
        Commands::Validate => {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| format!("Failed to render config: {}", e))?;
            print!("{}", yaml);
            return Ok(());
        }
    };

    for summary in &summaries {
        print_summary(summary, cli.json)?;
    }

    Ok(())
}

fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout only carries summaries
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
