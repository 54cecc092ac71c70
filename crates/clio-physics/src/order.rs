// ─────────────────────────────────────────────────────────────────────
// Nine Owls — Kuramoto Order Parameter
// ─────────────────────────────────────────────────────────────────────
//! r·e^{iψ} = (1/N) Σ_j e^{iθ_j}
//!
//! r ∈ [0, 1] measures phase coherence, ψ is the mean phase. Works on
//! unwrapped phases since only e^{iθ} enters.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// One coherence sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderParameter {
    /// Coherence magnitude r ∈ [0, 1].
    pub r: f64,
    /// Mean phase ψ ∈ (−π, π].
    pub psi: f64,
}

impl OrderParameter {
    pub fn of(theta: &[f64]) -> Self {
        let (r, psi) = order_parameter(theta);
        Self { r, psi }
    }
}

/// Compute (r, ψ). An empty phase vector yields (0, 0).
pub fn order_parameter(theta: &[f64]) -> (f64, f64) {
    if theta.is_empty() {
        return (0.0, 0.0);
    }
    let sum: Complex64 = theta.iter().map(|&th| Complex64::from_polar(1.0, th)).sum();
    let z = sum / theta.len() as f64;
    (z.norm().clamp(0.0, 1.0), z.arg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_all_equal_is_one() {
        for phase in [0.0, 0.5, -2.0, 123.4] {
            let (r, psi) = order_parameter(&[phase; 9]);
            assert!((r - 1.0).abs() < 1e-9, "R={r} should be ~1.0");
            let expected = Complex64::from_polar(1.0, phase).arg();
            assert!((psi - expected).abs() < 1e-9, "psi={psi} vs {expected}");
        }
    }

    #[test]
    fn test_evenly_spaced_nine_is_zero() {
        let theta: Vec<f64> = (0..9).map(|i| i as f64 * TAU / 9.0).collect();
        let (r, _) = order_parameter(&theta);
        assert!(r < 1e-6, "R={r} should be near 0 for uniform phases");
    }

    #[test]
    fn test_bounded() {
        // Deterministic pseudo-scatter, including large unwrapped values.
        for seed in 0..50u32 {
            let theta: Vec<f64> = (0..7)
                .map(|i| ((seed * 31 + i * 17) as f64).sin() * 1e3)
                .collect();
            let (r, psi) = order_parameter(&theta);
            assert!((-1e-9..=1.0 + 1e-9).contains(&r), "R={r}");
            assert!(psi.abs() <= PI + 1e-12);
        }
    }

    #[test]
    fn test_unwrapped_equivalent() {
        let a = [0.1, 0.4, 1.3];
        let b = [0.1 + TAU, 0.4 - 2.0 * TAU, 1.3 + 5.0 * TAU];
        let (ra, pa) = order_parameter(&a);
        let (rb, pb) = order_parameter(&b);
        assert!((ra - rb).abs() < 1e-9);
        assert!((pa - pb).abs() < 1e-9);
    }

    #[test]
    fn test_antiphase_pair() {
        let (r, _) = order_parameter(&[0.0, PI]);
        assert!(r < 1e-12);
    }

    #[test]
    fn test_mean_phase() {
        let op = OrderParameter::of(&[0.2, 0.4]);
        assert!((op.psi - 0.3).abs() < 1e-12);
        assert!((op.r - 0.1_f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        assert_eq!(order_parameter(&[]), (0.0, 0.0));
    }
}
