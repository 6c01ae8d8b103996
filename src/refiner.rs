//! ═══════════════════════════════════════════════════════════════════════════════
//! REFINER — Fixed-Point Relaxation of the Joint Functional
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Each iteration:
//!   1. J ← J(P, Q, A, A_eq), appended to history
//!   2. J < tol → converged at this step, no update applied
//!   3. P, A move a fraction lr of the remaining gap toward Q, A_eq
//!
//! Absent clipping, both gaps shrink by (1 - lr) per step. The threshold is
//! tested on the pre-update J, so detection lags the state by one step.
//!
//! The loop is pure: it returns a `Refinement` and leaves console output to
//! `report`. Progress goes out as tracing events.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::{ConfigError, VomegaResult};
use crate::fields::CoupledFields;

/// Emit a debug progress event every this many steps
const PROGRESS_EVERY: usize = 500;

/// Upper bound on history pre-allocation; the step budget may be far larger
const HISTORY_RESERVE: usize = 4096;

/// Learning rate, step budget, convergence threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinerParams {
    /// Fraction of the remaining gap closed per step. Values above 1
    /// overshoot the target; the post-update clip absorbs it.
    pub lr: f64,
    /// Maximum number of iterations
    pub steps: usize,
    /// Converged once J < tol (strict)
    pub tol: f64,
}

impl Default for RefinerParams {
    fn default() -> Self {
        Self {
            lr: 0.05,
            steps: 3000,
            tol: 0.01,
        }
    }
}

impl RefinerParams {
    pub fn validate(&self) -> VomegaResult<()> {
        if !(self.lr > 0.0 && self.lr.is_finite()) {
            return Err(
                ConfigError::invalid("lr", format!("must be positive and finite, got {}", self.lr))
                    .into(),
            );
        }
        if self.steps == 0 {
            return Err(ConfigError::invalid("steps", "step budget must be at least 1").into());
        }
        // Negative tol is allowed: it makes the threshold unreachable
        if !self.tol.is_finite() {
            return Err(
                ConfigError::invalid("tol", format!("must be finite, got {}", self.tol)).into(),
            );
        }
        Ok(())
    }
}

/// How the refinement ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// J dropped below tol at `step`
    Converged { step: usize, j: f64 },
    /// Step budget ran out; `j` is the last recorded value
    Exhausted { j: f64 },
}

impl Outcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged { .. })
    }

    /// The J value the run ended on
    pub fn final_j(&self) -> f64 {
        match *self {
            Outcome::Converged { j, .. } | Outcome::Exhausted { j } => j,
        }
    }
}

/// Result of a refinement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refinement {
    pub outcome: Outcome,
    /// One J per executed iteration, including the terminating one
    pub history: Vec<f64>,
}

impl Refinement {
    /// Number of iterations executed
    pub fn iterations(&self) -> usize {
        self.history.len()
    }

    /// First `k` history values (fewer if the run was shorter)
    pub fn head(&self, k: usize) -> &[f64] {
        &self.history[..k.min(self.history.len())]
    }
}

/// What a single iteration did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    /// J was below tol; fields untouched
    Converged(f64),
    /// J recorded, fields relaxed
    Relaxed(f64),
}

/// Step-wise driver over borrowed fields
pub struct Refiner<'a> {
    fields: &'a mut CoupledFields,
    params: RefinerParams,
    history: Vec<f64>,
}

impl<'a> Refiner<'a> {
    pub fn new(fields: &'a mut CoupledFields, params: RefinerParams) -> VomegaResult<Self> {
        params.validate()?;
        Ok(Self {
            fields,
            params,
            history: Vec::with_capacity(params.steps.min(HISTORY_RESERVE)),
        })
    }

    pub fn fields(&self) -> &CoupledFields {
        &*self.fields
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Steps executed so far
    pub fn step_index(&self) -> usize {
        self.history.len()
    }

    /// Evaluate, record, and relax unless below threshold
    pub fn step(&mut self) -> StepResult {
        let j = self.fields.functional();
        self.history.push(j);

        if j < self.params.tol {
            return StepResult::Converged(j);
        }

        self.fields.relax(self.params.lr);
        trace!(step = self.history.len() - 1, j, "relaxed");
        StepResult::Relaxed(j)
    }

    /// Run until convergence or until the step budget is spent
    pub fn run(mut self) -> Refinement {
        while self.history.len() < self.params.steps {
            let t = self.history.len();
            match self.step() {
                StepResult::Converged(j) => {
                    info!(step = t, j, "variational equilibrium reached");
                    return Refinement {
                        outcome: Outcome::Converged { step: t, j },
                        history: self.history,
                    };
                }
                StepResult::Relaxed(j) => {
                    if t % PROGRESS_EVERY == 0 {
                        debug!(
                            step = t,
                            j,
                            information_gap = self.fields.information_gap(),
                            awareness_gap = self.fields.awareness_gap(),
                            "refining"
                        );
                    }
                }
            }
        }

        // validate() guarantees steps >= 1, so history is non-empty
        let j = self.history.last().copied().unwrap_or(f64::NAN);
        warn!(steps = self.params.steps, j, "threshold not reached within step budget");
        Refinement {
            outcome: Outcome::Exhausted { j },
            history: self.history,
        }
    }
}

/// Relax `fields` toward equilibrium under `params`
pub fn evolve(fields: &mut CoupledFields, params: RefinerParams) -> VomegaResult<Refinement> {
    Ok(Refiner::new(fields, params)?.run())
}
