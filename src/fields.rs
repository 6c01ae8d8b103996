//! ═══════════════════════════════════════════════════════════════════════════════
//! FIELDS — The Coupled Information / Awareness Arrays
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Four arrays of equal length N:
//! - P     information distribution (mutated, Σ = 1 at every iteration start)
//! - Q     reference distribution (uniform 1/N, immutable)
//! - A     awareness vector (mutated, clipped ≥ CLAMP_FLOOR, never normalized)
//! - A_eq  awareness equilibrium (all ones, immutable)
//!
//! Lengths are checked once at construction; every later operation is
//! element-wise over matching indices.
//! ═══════════════════════════════════════════════════════════════════════════════

use rand::Rng;

use crate::divergence::{joint_functional, CLAMP_FLOOR};
use crate::error::{ValidationError, VomegaResult};

/// Allowed deviation of Σ P and Σ Q from 1 at construction
pub const SIMPLEX_TOLERANCE: f64 = 1e-6;

/// P, Q, A, A_eq with matching lengths
#[derive(Debug, Clone, PartialEq)]
pub struct CoupledFields {
    p: Vec<f64>,
    q: Vec<f64>,
    a: Vec<f64>,
    a_eq: Vec<f64>,
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), ValidationError> {
    match values.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(ValidationError::NonFinite { field, index }),
        None => Ok(()),
    }
}

fn check_non_negative(field: &'static str, values: &[f64]) -> Result<(), ValidationError> {
    match values.iter().position(|&x| x < 0.0) {
        Some(index) => Err(ValidationError::Negative { field, index }),
        None => Ok(()),
    }
}

fn check_distribution(field: &'static str, values: &[f64]) -> Result<(), ValidationError> {
    check_non_negative(field, values)?;
    let sum: f64 = values.iter().sum();
    if (sum - 1.0).abs() > SIMPLEX_TOLERANCE {
        return Err(ValidationError::NotNormalized { field, sum });
    }
    Ok(())
}

fn check_pair(
    left: &'static str,
    l: &[f64],
    right: &'static str,
    r: &[f64],
) -> Result<(), ValidationError> {
    if l.is_empty() {
        return Err(ValidationError::Empty(left));
    }
    if l.len() != r.len() {
        return Err(ValidationError::LengthMismatch {
            left,
            left_len: l.len(),
            right,
            right_len: r.len(),
        });
    }
    Ok(())
}

impl CoupledFields {
    /// Build from explicit arrays.
    ///
    /// `P`/`Q` and `A`/`A_eq` must pair up, and both pairs must share N.
    /// `P` and `Q` must be non-negative and sum to 1 within
    /// `SIMPLEX_TOLERANCE`; `A` must be non-negative. Nothing is normalized
    /// here.
    pub fn new(p: Vec<f64>, q: Vec<f64>, a: Vec<f64>, a_eq: Vec<f64>) -> VomegaResult<Self> {
        check_pair("p", &p, "q", &q)?;
        check_pair("a", &a, "a_eq", &a_eq)?;
        check_pair("p", &p, "a", &a)?;
        check_finite("p", &p)?;
        check_finite("q", &q)?;
        check_finite("a", &a)?;
        check_finite("a_eq", &a_eq)?;
        check_distribution("p", &p)?;
        check_distribution("q", &q)?;
        check_non_negative("a", &a)?;
        Ok(Self { p, q, a, a_eq })
    }

    /// Reference initial condition of length `n`:
    /// P ~ U[0,1) normalized, Q = 1/N, A ~ U[0,1), A_eq = 1.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> VomegaResult<Self> {
        if n == 0 {
            return Err(ValidationError::Empty("p").into());
        }

        let mut p: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
        let total: f64 = p.iter().sum();
        if total > 0.0 {
            p.iter_mut().for_each(|x| *x /= total);
        } else {
            // Every draw came back 0.0
            p.fill(1.0 / n as f64);
        }

        let a: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();

        Self::new(p, uniform(n), a, vec![1.0; n])
    }

    /// P = Q = 1/N, A = A_eq = 1. J is zero here.
    pub fn equilibrium(n: usize) -> VomegaResult<Self> {
        Self::new(uniform(n), uniform(n), vec![1.0; n], vec![1.0; n])
    }

    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    pub fn p(&self) -> &[f64] {
        &self.p
    }

    pub fn q(&self) -> &[f64] {
        &self.q
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn a_eq(&self) -> &[f64] {
        &self.a_eq
    }

    /// Joint functional J on the current state
    pub fn functional(&self) -> f64 {
        joint_functional(&self.p, &self.q, &self.a, &self.a_eq)
    }

    /// One relaxation step toward (Q, A_eq).
    ///
    /// P ← P - lr(P - Q), clipped ≥ CLAMP_FLOOR, renormalized to Σ = 1.
    /// A ← A - lr(A - A_eq), clipped ≥ CLAMP_FLOOR.
    pub fn relax(&mut self, lr: f64) {
        for (pi, &qi) in self.p.iter_mut().zip(&self.q) {
            *pi = (*pi - lr * (*pi - qi)).max(CLAMP_FLOOR);
        }
        let total: f64 = self.p.iter().sum();
        self.p.iter_mut().for_each(|x| *x /= total);

        for (ai, &ei) in self.a.iter_mut().zip(&self.a_eq) {
            *ai = (*ai - lr * (*ai - ei)).max(CLAMP_FLOOR);
        }
    }

    /// Σ|P - Q|, the L1 gap of the information term
    pub fn information_gap(&self) -> f64 {
        self.p.iter().zip(&self.q).map(|(x, y)| (x - y).abs()).sum()
    }

    /// Σ|A - A_eq|, the L1 gap of the awareness term
    pub fn awareness_gap(&self) -> f64 {
        self.a.iter().zip(&self.a_eq).map(|(x, y)| (x - y).abs()).sum()
    }
}

fn uniform(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}
