//! Divergence Evaluator — the joint functional J
//!
//! # Definition
//!
//! ```text
//!   J(P, Q, A, A_eq) = KL(P ‖ Q) + ‖A - A_eq‖²
//! ```
//!
//! The relative-entropy term clamps every `P[i]` and `Q[i]` into
//! `[CLAMP_FLOOR, 1]` before taking the log. Clamping acts on local values
//! only; the caller's slices are read, never written.
//!
//! For normalized `P` and `Q`, KL ≥ 0 (Gibbs), so J ≥ 0.

/// Lower clamp bound for probabilities and for post-update clipping
pub const CLAMP_FLOOR: f64 = 1e-15;

#[inline]
fn clamp_probability(x: f64) -> f64 {
    x.clamp(CLAMP_FLOOR, 1.0)
}

/// Relative entropy KL(P ‖ Q) over clamped copies of `p` and `q`.
///
/// Pairs beyond the shorter slice are ignored; `CoupledFields` rules out
/// mismatched lengths before this is reached.
pub fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .map(|(&pi, &qi)| {
            let pi = clamp_probability(pi);
            let qi = clamp_probability(qi);
            pi * (pi / qi).ln()
        })
        .sum()
}

/// Squared Euclidean distance Σ (a[i] - a_eq[i])², unclamped
pub fn squared_distance(a: &[f64], a_eq: &[f64]) -> f64 {
    a.iter()
        .zip(a_eq)
        .map(|(&x, &y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// J = KL(P ‖ Q) + ‖A - A_eq‖²
pub fn joint_functional(p: &[f64], q: &[f64], a: &[f64], a_eq: &[f64]) -> f64 {
    kl_divergence(p, q) + squared_distance(a, a_eq)
}
