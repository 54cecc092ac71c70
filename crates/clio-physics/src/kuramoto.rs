// ─────────────────────────────────────────────────────────────────────
// Nine Owls — Kuramoto Vector Field + Euler Integrator
// ─────────────────────────────────────────────────────────────────────
//! Forward-Euler integrator for the graph Kuramoto model:
//!
//!   dθ_i/dt = ω_i + (K(t)/N) Σ_j A_ij sin(θ_j − θ_i)
//!
//! Phases are left unwrapped. First-order, fixed step, no stability
//! check: Δt must be small against max(|ω|, K).

use serde::{Deserialize, Serialize};

use clio_types::{ClioError, ClioResult};

use crate::geometry::Adjacency;

fn check_dims(theta: &[f64], omega: &[f64], adjacency: &Adjacency) -> ClioResult<()> {
    let n = theta.len();
    if omega.len() != n {
        return Err(ClioError::dims(format!(
            "omega length {} != theta length {n}",
            omega.len()
        )));
    }
    if adjacency.n() != n {
        return Err(ClioError::dims(format!(
            "adjacency is {0}×{0}, theta length {n}",
            adjacency.n()
        )));
    }
    Ok(())
}

/// Write dθ/dt into `out`. Inputs must already agree in length.
fn rhs_into(theta: &[f64], omega: &[f64], adjacency: &Adjacency, k: f64, out: &mut [f64]) {
    let n = theta.len();
    let k_over_n = k / n.max(1) as f64;
    for i in 0..n {
        let row = adjacency.row(i);
        let mut coupling = 0.0;
        for j in 0..n {
            coupling += row[j] * (theta[j] - theta[i]).sin();
        }
        out[i] = omega[i] + k_over_n * coupling;
    }
}

/// Right-hand side of the Kuramoto ODE.
///
/// `t` is accepted for interface uniformity; the field depends on time
/// only through `k`.
pub fn kuramoto_rhs(
    _t: f64,
    theta: &[f64],
    omega: &[f64],
    adjacency: &Adjacency,
    k: f64,
) -> ClioResult<Vec<f64>> {
    check_dims(theta, omega, adjacency)?;
    let mut out = vec![0.0; theta.len()];
    rhs_into(theta, omega, adjacency, k, &mut out);
    Ok(out)
}

/// Advance `theta` in place by one Euler step of size `dt` at coupling `k`.
///
/// `scratch` holds dθ/dt and must have the same length as `theta`.
pub fn euler_step(
    theta: &mut [f64],
    omega: &[f64],
    adjacency: &Adjacency,
    k: f64,
    dt: f64,
    scratch: &mut [f64],
) -> ClioResult<()> {
    check_dims(theta, omega, adjacency)?;
    if scratch.len() != theta.len() {
        return Err(ClioError::dims(format!(
            "scratch length {} != theta length {}",
            scratch.len(),
            theta.len()
        )));
    }
    rhs_into(theta, omega, adjacency, k, scratch);
    for (th, d) in theta.iter_mut().zip(scratch.iter()) {
        *th += dt * d;
    }
    Ok(())
}

/// Phase trajectory: one row of N phases per time sample, T×N row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseHistory {
    n: usize,
    data: Vec<f64>,
}

impl PhaseHistory {
    /// Number of time samples.
    pub fn len(&self) -> usize {
        if self.n == 0 {
            0
        } else {
            self.data.len() / self.n
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of oscillators.
    pub fn n_sites(&self) -> usize {
        self.n
    }

    /// (T, N).
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.n)
    }

    /// Phases at sample `k`.
    pub fn row(&self, k: usize) -> &[f64] {
        &self.data[k * self.n..(k + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.n.max(1))
    }

    /// Trajectory of site `i` across all samples.
    pub fn site(&self, i: usize) -> Vec<f64> {
        self.rows().map(|row| row[i]).collect()
    }

    pub fn last(&self) -> Option<&[f64]> {
        self.len().checked_sub(1).map(|k| self.row(k))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Integrate from `theta0` over the strictly increasing grid `times`.
///
/// For each step (t_prev, t_curr): K = coupling(t_prev),
/// θ ← θ + (t_curr − t_prev) · f(θ). Row 0 is `theta0` unchanged.
pub fn simulate_kuramoto<F>(
    times: &[f64],
    theta0: &[f64],
    omega: &[f64],
    adjacency: &Adjacency,
    coupling: F,
) -> ClioResult<PhaseHistory>
where
    F: Fn(f64) -> f64,
{
    check_dims(theta0, omega, adjacency)?;
    if times.is_empty() {
        return Err(ClioError::dims("time grid is empty"));
    }
    if let Some(k) = times.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(ClioError::dims(format!(
            "time grid not strictly increasing at index {}",
            k + 1
        )));
    }

    let n = theta0.len();
    let mut data = Vec::with_capacity(times.len() * n);
    data.extend_from_slice(theta0);

    let mut theta = theta0.to_vec();
    let mut dtheta = vec![0.0; n];
    for w in times.windows(2) {
        let (t_prev, t_curr) = (w[0], w[1]);
        euler_step(&mut theta, omega, adjacency, coupling(t_prev), t_curr - t_prev, &mut dtheta)?;
        data.extend_from_slice(&theta);
    }

    Ok(PhaseHistory { n, data })
}
