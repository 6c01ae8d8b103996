//! ═══════════════════════════════════════════════════════════════════════════════
//! CONFIG — Verification Run Parameters
//! ═══════════════════════════════════════════════════════════════════════════════
//! N, learning rate, step budget, threshold, seed. Nothing else is tunable.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, VomegaResult};
use crate::refiner::RefinerParams;

/// Field length used by the reference run
pub const DEFAULT_N: usize = 1000;

/// Parameters for one verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Length of P, Q, A, A_eq
    pub n: usize,

    /// Refiner parameters (lr, steps, tol)
    pub refiner: RefinerParams,

    /// PRNG seed for initial fields. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_N,
            refiner: RefinerParams::default(),
            seed: None,
        }
    }
}

impl VerificationConfig {
    /// Default run with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Reject parameters the refiner cannot run with
    pub fn validate(&self) -> VomegaResult<()> {
        if self.n == 0 {
            return Err(ConfigError::invalid("n", "field length must be at least 1").into());
        }
        self.refiner.validate()
    }
}
