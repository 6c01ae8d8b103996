//! ═══════════════════════════════════════════════════════════════════════════════
//! REPORT — Console Presentation of a Verification Run
//! ═══════════════════════════════════════════════════════════════════════════════
//! Fixed output order:
//!   banner → outcome + "Final J" → "Verification complete." → first 10 J → final J
//! ═══════════════════════════════════════════════════════════════════════════════

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::config::VerificationConfig;
use crate::refiner::{Outcome, Refinement};

pub const BANNER: &str =
    "=== Verification: Information-Awareness Unified Variational Principle (vOmega) ===";

pub const WARNING: &str = "[WARNING] Variational equilibrium threshold not reached.";

pub const COMPLETE: &str = "Verification complete.";

/// How many leading history values the summary shows
pub const HEAD_LEN: usize = 10;

/// Everything the driver knows once a run is over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub config: VerificationConfig,
    /// Seed actually used for initialization
    pub seed: u64,
    pub refinement: Refinement,
}

impl RunSummary {
    pub fn converged(&self) -> bool {
        self.refinement.outcome.is_converged()
    }

    /// Last recorded J
    pub fn final_j(&self) -> f64 {
        self.refinement.outcome.final_j()
    }
}

/// J as printed on the console: always a decimal point or an exponent
/// (`0.0`, `12.0`, `1e-20`)
pub fn format_j(j: f64) -> String {
    format!("{:?}", j)
}

/// `[a, b, c]` with each value formatted by `format_j`
pub fn format_values(values: &[f64]) -> String {
    let body: Vec<String> = values.iter().map(|&v| format_j(v)).collect();
    format!("[{}]", body.join(", "))
}

pub fn write_banner<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", BANNER)?;
    writeln!(out)
}

/// Success or warning line, each followed by the terminating J
pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome) -> std::io::Result<()> {
    match *outcome {
        Outcome::Converged { step, j } => {
            writeln!(out, "[SUCCESS] delta_Omega = 0 achieved at step {}", step)?;
            writeln!(out, "Final J: {}", format_j(j))
        }
        Outcome::Exhausted { j } => {
            writeln!(out, "{}", WARNING)?;
            writeln!(out, "Final J: {}", format_j(j))
        }
    }
}

/// Closing block: completion line, history head, final J
pub fn write_summary<W: Write>(out: &mut W, refinement: &Refinement) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", COMPLETE)?;
    writeln!(
        out,
        "First 10 J values: {}",
        format_values(refinement.head(HEAD_LEN))
    )?;
    if let Some(&last) = refinement.history.last() {
        writeln!(out, "Final J: {}", format_j(last))?;
    }
    Ok(())
}

/// Full report in the fixed order
pub fn write_report<W: Write>(out: &mut W, refinement: &Refinement) -> std::io::Result<()> {
    write_banner(out)?;
    write_outcome(out, &refinement.outcome)?;
    write_summary(out, refinement)
}
