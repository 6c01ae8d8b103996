//! ═══════════════════════════════════════════════════════════════════════════════
//! vOMEGA — Verification Entry Point
//! ═══════════════════════════════════════════════════════════════════════════════
//! No arguments reproduces the reference run. Report on stdout, diagnostics
//! on stderr. Exit 0 whether or not the threshold is reached.
//! ═══════════════════════════════════════════════════════════════════════════════

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use vomega::config::DEFAULT_N;
use vomega::{RefinerParams, VerificationConfig};

#[derive(Parser)]
#[command(name = "vomega")]
#[command(about = "Information-Awareness Unified Variational Principle verification", long_about = None)]
struct Cli {
    /// Field length N
    #[arg(short, long, default_value_t = DEFAULT_N)]
    n: usize,

    /// Learning rate (fraction of the gap closed per step)
    #[arg(long, default_value_t = 0.05)]
    lr: f64,

    /// Maximum number of refinement steps
    #[arg(short, long, default_value_t = 3000)]
    steps: usize,

    /// Convergence threshold on J
    #[arg(short, long, default_value_t = 0.01, allow_hyphen_values = true)]
    tol: f64,

    /// Seed for the initial fields (OS entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Diagnostic verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> VerificationConfig {
        VerificationConfig {
            n: self.n,
            refiner: RefinerParams {
                lr: self.lr,
                steps: self.steps,
                tol: self.tol,
            },
            seed: self.seed,
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    vomega::run(&cli.config(), &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_reference_run() {
        let cli = Cli::parse_from(["vomega"]);
        assert_eq!(cli.config(), VerificationConfig::default());
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn test_parameters_override_defaults() {
        let cli = Cli::parse_from([
            "vomega", "--n", "64", "--lr", "0.1", "--steps", "50", "--tol", "-1", "--seed", "7",
            "-vv",
        ]);
        let config = cli.config();
        assert_eq!(config.n, 64);
        assert_eq!(config.refiner.lr, 0.1);
        assert_eq!(config.refiner.steps, 50);
        assert_eq!(config.refiner.tol, -1.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(cli.log_level(), Level::DEBUG);
    }
}
