// ─────────────────────────────────────────────────────────────────────
// Nine Owls — CLIO Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Numerical core of the breathing cycle: sphere geometry and
//! adjacency, the three-phase coupling schedule, the Kuramoto Euler
//! integrator, and the order parameter.

pub mod geometry;
pub mod kuramoto;
pub mod order;
pub mod schedule;

pub use geometry::{
    adjacency_from_threshold, fibonacci_sphere_positions, twisted_prism_positions, Adjacency,
    Geometry, Vec3,
};
pub use kuramoto::{euler_step, kuramoto_rhs, simulate_kuramoto, PhaseHistory};
pub use order::{order_parameter, OrderParameter};
pub use schedule::{CouplingSchedule, Regime};
