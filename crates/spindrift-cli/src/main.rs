//! Spindrift command-line interface.
//!
//! Run dispersion scans from TOML job files:
//! ```sh
//! spindrift run job.toml
//! spindrift validate job.toml
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spindrift")]
#[command(about = "Spindrift: Linear Spin-Wave Theory Dispersion Engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a dispersion scan from a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file (including the model) without scanning.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Spindrift LSWT");
            println!("==============");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_scan(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            // CSV dispersion (default on)
            if job.output.save_csv {
                let csv_path = out_dir.join("dispersion.csv");
                runner::write_dispersion_csv(&result.points, &csv_path, &job)?;
            }

            // JSON dispersion (optional)
            if job.output.save_json {
                let json_path = out_dir.join("dispersion.json");
                runner::write_dispersion_json(&result.points, &json_path)?;
            }

            println!("Scan complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            let model = runner::build_model(&job)?;
            println!(
                "Configuration is valid: {} ({} sites, {} couplings)",
                config.display(),
                model.num_sites(),
                model.couplings().len()
            );
            Ok(())
        }
    }
}
