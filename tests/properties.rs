//! Property Tests - Invariants of the functional and the relaxation step

use proptest::prelude::*;

use vomega::{joint_functional, kl_divergence, CoupledFields};

/// Strictly positive weights normalized into a distribution
fn distribution(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1e-3f64..1.0, n).prop_map(|mut w| {
        let total: f64 = w.iter().sum();
        w.iter_mut().for_each(|x| *x /= total);
        w
    })
}

fn awareness(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..3.0, n)
}

fn coupled(n: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    (distribution(n), distribution(n), awareness(n), awareness(n))
}

fn any_coupled() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    (1usize..64).prop_flat_map(coupled)
}

proptest! {
    #[test]
    fn functional_is_non_negative((p, q, a, a_eq) in any_coupled()) {
        let j = joint_functional(&p, &q, &a, &a_eq);
        prop_assert!(j >= -1e-12, "J = {}", j);
    }

    #[test]
    fn functional_vanishes_on_identical_inputs((p, _q, a, _a_eq) in any_coupled()) {
        let j = joint_functional(&p, &p, &a, &a);
        prop_assert!(j.abs() < 1e-12, "J = {}", j);
    }

    #[test]
    fn kl_leaves_inputs_untouched((p, q, _a, _a_eq) in any_coupled()) {
        let (p0, q0) = (p.clone(), q.clone());
        let _ = kl_divergence(&p, &q);
        prop_assert_eq!(p, p0);
        prop_assert_eq!(q, q0);
    }

    #[test]
    fn relax_preserves_simplex_and_sign(
        (p, q, a, a_eq) in any_coupled(),
        lr in 0.001f64..=1.0,
        steps in 1usize..20,
    ) {
        let mut fields = CoupledFields::new(p, q, a, a_eq).unwrap();
        for _ in 0..steps {
            fields.relax(lr);
            let sum: f64 = fields.p().iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "sum(P) = {}", sum);
            prop_assert!(fields.p().iter().all(|&x| x >= 0.0));
            prop_assert!(fields.a().iter().all(|&x| x >= 0.0));
        }
    }
}
