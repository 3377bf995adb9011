//! Frix command-line interface.
//!
//! Run a friction sweep from a TOML parameter file:
//! ```sh
//! frix run params.toml friction.csv --threads 8
//! frix validate params.toml
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use frix_cli::{config, runner};

#[derive(Parser)]
#[command(name = "frix")]
#[command(about = "Frix: nonequilibrium friction sweeps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sweep described by a parameter file.
    Run {
        /// Path to the TOML parameter file.
        params: PathBuf,
        /// Output file; one `step_value,computed_value` line per sweep
        /// point, written after the sweep completes.
        output: PathBuf,
        /// Worker threads. Defaults to all hardware threads; requesting
        /// more than the hardware provides aborts the run.
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Check a parameter file without computing anything.
    Validate {
        /// Path to the TOML parameter file.
        params: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            params,
            output,
            threads,
        } => {
            let (sweep, results) = runner::run_sweep(&params, threads)?;
            runner::write_sweep_csv(&output, &sweep, &results)?;
            println!("Sweep complete: {} points -> {}", sweep.len(), output.display());
            Ok(())
        }
        Commands::Validate { params } => {
            let job = config::JobFile::load(&params)?;
            let (start, end, steps) = job.sweep.bounds();
            println!("Parameter file is valid: {}", params.display());
            println!(
                "  {} sweep of {:?} over [{start}, {end}] in {steps} steps ({:?} scale)",
                job.sweep.kind(),
                job.sweep.variable(),
                job.sweep.scale(),
            );
            Ok(())
        }
    }
}
