// ─────────────────────────────────────────────────────────────────────
// Nine Owls — Breathing-Cycle Run Output
// ─────────────────────────────────────────────────────────────────────

use serde::Serialize;

use clio_physics::{CouplingSchedule, OrderParameter, PhaseHistory, Regime};
use clio_types::OwlSpec;

/// Per-regime coherence means for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BreathingSummary {
    /// Mean r over t < t_switch_on.
    pub diastole_mean_r: f64,
    /// Mean r over t_switch_on ≤ t ≤ t_switch_off.
    pub systole_mean_r: f64,
    /// Mean r over t > t_switch_off.
    pub recovery_mean_r: f64,
    pub peak_r: f64,
    pub final_r: f64,
}

/// Immutable result of one run. All per-sample arrays share the
/// length of `times`.
#[derive(Debug, Clone, Serialize)]
pub struct BreathingRun {
    pub times: Vec<f64>,
    pub phases: PhaseHistory,
    /// r(t).
    pub coherence: Vec<f64>,
    /// ψ(t).
    pub mean_phase: Vec<f64>,
    /// Natural frequencies used for the run.
    pub omega: Vec<f64>,
    pub schedule: CouplingSchedule,
    /// `None` when the caller supplied phases and frequencies directly.
    pub seed: Option<u64>,
    pub owl_specs: Vec<OwlSpec>,
}

impl BreathingRun {
    pub(crate) fn assemble(
        times: Vec<f64>,
        phases: PhaseHistory,
        omega: Vec<f64>,
        schedule: CouplingSchedule,
        seed: Option<u64>,
        owl_specs: Vec<OwlSpec>,
    ) -> Self {
        let mut coherence = Vec::with_capacity(times.len());
        let mut mean_phase = Vec::with_capacity(times.len());
        for row in phases.rows() {
            let op = OrderParameter::of(row);
            coherence.push(op.r);
            mean_phase.push(op.psi);
        }
        Self {
            times,
            phases,
            coherence,
            mean_phase,
            omega,
            schedule,
            seed,
            owl_specs,
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn n_sites(&self) -> usize {
        self.phases.n_sites()
    }

    pub fn order_at(&self, k: usize) -> OrderParameter {
        OrderParameter {
            r: self.coherence[k],
            psi: self.mean_phase[k],
        }
    }

    /// Role attached to site `i`, if the run carries a catalog.
    pub fn site_label(&self, i: usize) -> Option<&OwlSpec> {
        self.owl_specs.get(i)
    }

    /// Mean r over samples with t0 ≤ t ≤ t1. `None` if no sample falls
    /// in the window.
    pub fn mean_coherence_between(&self, t0: f64, t1: f64) -> Option<f64> {
        mean(
            self.times
                .iter()
                .zip(&self.coherence)
                .filter(|(t, _)| **t >= t0 && **t <= t1)
                .map(|(_, &r)| r),
        )
    }

    pub fn mean_coherence_in(&self, regime: Regime) -> Option<f64> {
        mean(
            self.times
                .iter()
                .zip(&self.coherence)
                .filter(|(t, _)| self.schedule.regime(**t) == regime)
                .map(|(_, &r)| r),
        )
    }

    /// Empty regimes report 0.0.
    pub fn summary(&self) -> BreathingSummary {
        BreathingSummary {
            diastole_mean_r: self.mean_coherence_in(Regime::Diastole).unwrap_or(0.0),
            systole_mean_r: self.mean_coherence_in(Regime::Systole).unwrap_or(0.0),
            recovery_mean_r: self.mean_coherence_in(Regime::Recovery).unwrap_or(0.0),
            peak_r: self.coherence.iter().copied().fold(0.0, f64::max),
            final_r: self.coherence.last().copied().unwrap_or(0.0),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
