// ─────────────────────────────────────────────────────────────────────
// Nine Owls — CLIO Engine (Breathing-Cycle Orchestrator)
// ─────────────────────────────────────────────────────────────────────
//! One run, in order:
//!   1. Geometry from config (built once, at construction)
//!   2. Closed time grid 0..=t_end with step dt
//!   3. Natural frequencies ω_i = base + σ·N(0,1)   ┐ one ChaCha8 stream
//!   4. Initial phases θ_i(0) ~ U[0, 2π)           ┘ seeded per run
//!   5. Euler integration under K(t)
//!   6. Order parameter (r, ψ) at every sample

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use clio_physics::{simulate_kuramoto, CouplingSchedule, Geometry};
use clio_types::{
    default_owl_specs, validate_horizon, ClioConfig, ClioError, ClioResult, FrequencyConfig,
    OwlSpec, N_OWLS,
};

use crate::run::BreathingRun;

/// Relative slack when deciding whether t_end is a whole number of steps.
const GRID_TOL: f64 = 1e-9;

/// Upper bound on integration steps per run.
pub const MAX_GRID_STEPS: usize = 100_000_000;

/// Uniform grid from 0 that covers `t_end`: samples k·dt for
/// k = 0..=ceil(t_end/dt). When t_end is a whole number of steps the
/// last sample is exactly `t_end`.
///
/// Fails when t_end/dt is not finite or exceeds [`MAX_GRID_STEPS`].
pub fn time_grid(t_end: f64, dt: f64) -> ClioResult<Vec<f64>> {
    validate_horizon(t_end, dt)?;
    let ratio = t_end / dt;
    if !ratio.is_finite() || ratio > MAX_GRID_STEPS as f64 {
        return Err(ClioError::config(format!(
            "t_end/dt = {ratio:e} exceeds {MAX_GRID_STEPS} steps"
        )));
    }
    let steps = (ratio - GRID_TOL * ratio.max(1.0)).ceil() as usize;
    let mut times: Vec<f64> = (0..=steps).map(|k| k as f64 * dt).collect();
    if let Some(last) = times.last_mut() {
        if (*last - t_end).abs() <= GRID_TOL * dt.max(t_end) {
            *last = t_end;
        }
    }
    Ok(times)
}

/// ω_i = base_omega + noise_std · ξ_i, ξ_i ~ N(0, 1).
pub fn sample_frequencies<R: Rng>(rng: &mut R, n: usize, config: &FrequencyConfig) -> Vec<f64> {
    (0..n)
        .map(|_| {
            let xi: f64 = rng.sample(StandardNormal);
            config.base_omega + config.noise_std * xi
        })
        .collect()
}

/// θ_i ~ U[0, 2π).
pub fn sample_initial_phases<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(0.0..TAU)).collect()
}

/// CLIO: Cognitive Loop via In-Situ Optimization.
///
/// Owns the validated configuration, the read-only geometry, and the
/// schedule. The configuration is fixed at construction. Every `run`
/// allocates its own buffers and its own generator, so one engine can
/// serve many independent runs (including from several threads through
/// `&self`).
#[derive(Debug, Clone)]
pub struct ClioEngine {
    cfg: ClioConfig,
    geometry: Geometry,
    schedule: CouplingSchedule,
    owl_specs: Vec<OwlSpec>,
}

impl ClioEngine {
    /// Validate `config` and build geometry and schedule. Nothing is
    /// simulated here.
    pub fn new(config: ClioConfig) -> ClioResult<Self> {
        config.validate()?;
        let geometry = Geometry::from_config(&config.geometry)?;
        let schedule = CouplingSchedule::from_config(&config.coupling)?;
        // The role catalog only labels the canonical nine.
        let owl_specs = if geometry.n() == N_OWLS {
            default_owl_specs()
        } else {
            Vec::new()
        };
        Ok(Self {
            cfg: config,
            geometry,
            schedule,
            owl_specs,
        })
    }

    pub fn default_params() -> ClioResult<Self> {
        Self::new(ClioConfig::default())
    }

    pub fn from_json(json: &str) -> ClioResult<Self> {
        Self::new(ClioConfig::from_json(json)?)
    }

    /// Replace the site labels. Must provide one spec per site.
    pub fn with_owl_specs(mut self, specs: Vec<OwlSpec>) -> ClioResult<Self> {
        if specs.len() != self.geometry.n() {
            return Err(ClioError::config(format!(
                "owl_specs has {} entries for {} sites",
                specs.len(),
                self.geometry.n()
            )));
        }
        self.owl_specs = specs;
        Ok(self)
    }

    pub fn config(&self) -> &ClioConfig {
        &self.cfg
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn schedule(&self) -> &CouplingSchedule {
        &self.schedule
    }

    pub fn owl_specs(&self) -> &[OwlSpec] {
        &self.owl_specs
    }

    pub fn n_sites(&self) -> usize {
        self.geometry.n()
    }

    /// Run with the configured horizon, step, and seed.
    pub fn run_breathing_cycle(&self) -> ClioResult<BreathingRun> {
        self.run(self.cfg.t_end, self.cfg.dt, self.cfg.seed)
    }

    /// Full breathing cycle over [0, t_end] with step `dt`.
    ///
    /// Frequencies are drawn before initial phases, both from one
    /// generator seeded with `seed`: equal arguments give bit-identical
    /// output on the same platform.
    pub fn run(&self, t_end: f64, dt: f64, seed: u64) -> ClioResult<BreathingRun> {
        let times = time_grid(t_end, dt)?;
        let n = self.n_sites();
        log::debug!(
            "CLIO run: n={n} samples={} dt={dt} seed={seed} geometry={}",
            times.len(),
            self.geometry.mode
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let omega = sample_frequencies(&mut rng, n, &self.cfg.frequency);
        let theta0 = sample_initial_phases(&mut rng, n);

        let run = self.integrate(times, &theta0, omega, Some(seed))?;
        let s = run.summary();
        log::info!(
            "CLIO run done: seed={seed} R diastole={:.3} systole={:.3} recovery={:.3} final={:.3}",
            s.diastole_mean_r,
            s.systole_mean_r,
            s.recovery_mean_r,
            s.final_r
        );
        Ok(run)
    }

    /// Run on a caller-supplied grid, initial phases, and frequencies.
    /// No sampling takes place.
    pub fn run_with(
        &self,
        times: &[f64],
        theta0: &[f64],
        omega: &[f64],
    ) -> ClioResult<BreathingRun> {
        if theta0.len() != self.n_sites() {
            return Err(ClioError::dims(format!(
                "theta0 length {} != site count {}",
                theta0.len(),
                self.n_sites()
            )));
        }
        self.integrate(times.to_vec(), theta0, omega.to_vec(), None)
    }

    fn integrate(
        &self,
        times: Vec<f64>,
        theta0: &[f64],
        omega: Vec<f64>,
        seed: Option<u64>,
    ) -> ClioResult<BreathingRun> {
        let phases = simulate_kuramoto(
            &times,
            theta0,
            &omega,
            &self.geometry.adjacency,
            self.schedule.as_fn(),
        )?;
        Ok(BreathingRun::assemble(
            times,
            phases,
            omega,
            self.schedule,
            seed,
            self.owl_specs.clone(),
        ))
    }
}
