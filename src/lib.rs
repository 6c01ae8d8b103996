//! ═══════════════════════════════════════════════════════════════════════════════
//! vOMEGA — Information–Awareness Variational Verification
//! ═══════════════════════════════════════════════════════════════════════════════
//! Coupled fields P (information) and A (awareness) relax toward Q and A_eq
//! until J = KL(P ‖ Q) + ‖A - A_eq‖² drops below threshold or the step
//! budget runs out.
//! ═══════════════════════════════════════════════════════════════════════════════

// ═══════════════════════════════════════════════════════════════════════════════
// NUMERICS — Functional, fields, relaxation loop
// ═══════════════════════════════════════════════════════════════════════════════

pub mod divergence;
pub mod fields;
pub mod refiner;

// ═══════════════════════════════════════════════════════════════════════════════
// SHELL — Configuration, errors, console report
// ═══════════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod error;
pub mod report;

pub use config::VerificationConfig;
pub use divergence::{joint_functional, kl_divergence, squared_distance, CLAMP_FLOOR};
pub use error::{VomegaError, VomegaResult};
pub use fields::CoupledFields;
pub use refiner::{evolve, Outcome, Refinement, Refiner, RefinerParams};
pub use report::RunSummary;

use std::io::Write;

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use tracing::info;

/// Initialize fields from `config`, refine, and write the report to `out`.
///
/// Both outcomes return `Ok`; errors are reserved for invalid parameters
/// and failed writes.
pub fn run<W: Write>(config: &VerificationConfig, out: &mut W) -> VomegaResult<RunSummary> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| OsRng.next_u64());
    info!(
        n = config.n,
        lr = config.refiner.lr,
        steps = config.refiner.steps,
        tol = config.refiner.tol,
        seed,
        "starting verification run"
    );

    report::write_banner(out)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut fields = CoupledFields::random(config.n, &mut rng)?;
    let refinement = evolve(&mut fields, config.refiner)?;

    report::write_outcome(out, &refinement.outcome)?;
    report::write_summary(out, &refinement)?;

    Ok(RunSummary {
        config: config.clone(),
        seed,
        refinement,
    })
}
