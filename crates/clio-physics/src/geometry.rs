// ─────────────────────────────────────────────────────────────────────
// Nine Owls — Sphere Geometry and Adjacency
// ─────────────────────────────────────────────────────────────────────
//! Site placement on S² and the geodesic-threshold interaction graph.
//!
//! Layouts:
//!   - twisted prism: N=9, triads at +45°/0°/−45° latitude, polar
//!     triads rotated +60° in longitude against the equator
//!   - Fibonacci sphere: golden-angle spiral for arbitrary N
//!
//! Adjacency: A_ij = 1 iff acos(p_i · p_j) ≤ θ_max, symmetric,
//! zero diagonal. O(N²) pairwise scan.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use clio_types::{ClioError, ClioResult, GeometryConfig, GeometryMode, N_OWLS};

/// Added to the spiral point norm before division.
pub const NORM_EPS: f64 = 1e-12;

/// Below this a spiral point is reported as numerically degenerate.
const DEGENERATE_NORM: f64 = 1e-9;

pub type Vec3 = [f64; 3];

#[inline]
pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn norm(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Great-circle angle between two unit vectors (rad).
#[inline]
pub fn geodesic_angle(a: &Vec3, b: &Vec3) -> f64 {
    dot(a, b).clamp(-1.0, 1.0).acos()
}

/// (latitude, longitude) in radians → point on the unit sphere.
pub fn spherical_to_cart(lat_rad: f64, lon_rad: f64) -> Vec3 {
    [
        lat_rad.cos() * lon_rad.cos(),
        lat_rad.cos() * lon_rad.sin(),
        lat_rad.sin(),
    ]
}

/// Thomson-like twisted prism for N=9.
///
/// Site order: north triad, equatorial triad, south triad.
pub fn twisted_prism_positions() -> Vec<Vec3> {
    const LAT_DEG: [f64; 3] = [45.0, 0.0, -45.0];
    const LON_EQUATOR_DEG: [f64; 3] = [0.0, 120.0, 240.0];
    const TWIST_DEG: f64 = 60.0;

    let mut pts = Vec::with_capacity(N_OWLS);
    for (ring, &lat) in LAT_DEG.iter().enumerate() {
        // Equatorial ring is the only untwisted one.
        let twist = if ring == 1 { 0.0 } else { TWIST_DEG };
        for &lon in &LON_EQUATOR_DEG {
            pts.push(spherical_to_cart(lat.to_radians(), (lon + twist).to_radians()));
        }
    }
    pts
}

/// Golden-angle spiral with `n` points, normalised to unit length.
pub fn fibonacci_sphere_positions(n: usize) -> Vec<Vec3> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let nf = n as f64;

    (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / nf;
            let radius = (1.0 - y * y).max(0.0).sqrt();
            let azimuth = i as f64 * golden_angle;
            let p = [radius * azimuth.cos(), y, radius * azimuth.sin()];

            let len = norm(&p);
            if len < DEGENERATE_NORM {
                log::warn!("fibonacci_sphere: near-zero norm {len:.3e} at site {i}, using epsilon");
            }
            let inv = 1.0 / (len + NORM_EPS);
            [p[0] * inv, p[1] * inv, p[2] * inv]
        })
        .collect()
}

/// Symmetric 0/1 interaction matrix, n×n row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjacency {
    n: usize,
    weights: Vec<f64>,
}

impl Adjacency {
    /// No edges.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            weights: vec![0.0; n * n],
        }
    }

    /// Every distinct pair coupled.
    pub fn complete(n: usize) -> Self {
        let mut a = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                a.connect(i, j);
            }
        }
        a
    }

    /// Wrap a row-major matrix, rejecting anything that is not a
    /// symmetric 0/1 matrix with zero diagonal.
    pub fn from_row_major(n: usize, weights: Vec<f64>) -> ClioResult<Self> {
        if weights.len() != n * n {
            return Err(ClioError::dims(format!(
                "adjacency needs {} entries for n={n}, got {}",
                n * n,
                weights.len()
            )));
        }
        let a = Self { n, weights };
        if !a.is_valid() {
            return Err(ClioError::config(
                "adjacency must be symmetric 0/1 with zero diagonal",
            ));
        }
        Ok(a)
    }

    fn connect(&mut self, i: usize, j: usize) {
        let n = self.n;
        self.weights[i * n + j] = 1.0;
        self.weights[j * n + i] = 1.0;
    }

    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.weights[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn degree(&self, i: usize) -> usize {
        self.row(i).iter().filter(|&&w| w != 0.0).count()
    }

    pub fn neighbours(&self, i: usize) -> Vec<usize> {
        self.row(i)
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .map(|(j, _)| j)
            .collect()
    }

    /// Undirected edge count.
    pub fn edge_count(&self) -> usize {
        (0..self.n).map(|i| self.degree(i)).sum::<usize>() / 2
    }

    /// Symmetric, zero diagonal, entries in {0, 1}.
    pub fn is_valid(&self) -> bool {
        let n = self.n;
        for i in 0..n {
            if self.get(i, i) != 0.0 {
                return false;
            }
            for j in 0..n {
                let w = self.get(i, j);
                if (w != 0.0 && w != 1.0) || w != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}

/// Build adjacency from a geodesic threshold in radians.
pub fn adjacency_from_threshold(positions: &[Vec3], max_geodesic: f64) -> Adjacency {
    let n = positions.len();
    let mut a = Adjacency::empty(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if geodesic_angle(&positions[i], &positions[j]) <= max_geodesic {
                a.connect(i, j);
            }
        }
    }
    a
}

/// Positions plus the interaction graph derived from them. Read-only
/// once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub mode: GeometryMode,
    pub positions: Vec<Vec3>,
    pub adjacency: Adjacency,
    /// Threshold actually used (rad).
    pub max_geodesic: f64,
}

impl Geometry {
    pub fn from_config(config: &GeometryConfig) -> ClioResult<Self> {
        config.validate()?;
        let positions = match config.mode {
            GeometryMode::TwistedPrism => twisted_prism_positions(),
            GeometryMode::FibonacciSphere => fibonacci_sphere_positions(config.n_sites),
        };
        let max_geodesic = config.adjacency_angle_rad();
        let adjacency = adjacency_from_threshold(&positions, max_geodesic);
        log::debug!(
            "geometry {}: n={} threshold={:.1}° edges={}",
            config.mode,
            positions.len(),
            config.adjacency_angle_deg,
            adjacency.edge_count()
        );
        Ok(Self {
            mode: config.mode,
            positions,
            adjacency,
            max_geodesic,
        })
    }

    /// Build from a textual layout selector, e.g. `"twisted_prism"`.
    pub fn from_selector(
        selector: &str,
        adjacency_angle_deg: f64,
        n_sites: usize,
    ) -> ClioResult<Self> {
        let mode: GeometryMode = selector.parse()?;
        Self::from_config(&GeometryConfig {
            mode,
            adjacency_angle_deg,
            n_sites,
        })
    }

    pub fn n(&self) -> usize {
        self.positions.len()
    }

    pub fn degree(&self, i: usize) -> usize {
        self.adjacency.degree(i)
    }

    pub fn neighbours(&self, i: usize) -> Vec<usize> {
        self.adjacency.neighbours(i)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }
}
