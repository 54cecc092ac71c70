// ─────────────────────────────────────────────────────────────────────
// Nine Owls — CLIO Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Breathing-cycle orchestrator for the Nine Owls Kuramoto network.
//!
//! A run drives nine (or N) phase oscillators on S² through a
//! diastole → systole → recovery coupling schedule and records the
//! phase history together with the order parameter r(t), ψ(t).
//!
//! # Invariants
//!
//! 1. **Single seeded stream**: frequencies and initial phases come from
//!    one `ChaCha8Rng` created per run, in that order. Same
//!    `(t_end, dt, seed)` and config ⇒ identical output.
//!
//! 2. **Fail fast**: configuration and grid errors are returned before
//!    any integration work; no partial run is ever produced.
//!
//! 3. **Read-only geometry**: positions and adjacency are built once in
//!    `ClioEngine::new` and never touched by a run.

pub mod engine;
pub mod run;

pub use engine::{sample_frequencies, sample_initial_phases, time_grid, ClioEngine, MAX_GRID_STEPS};
pub use run::{BreathingRun, BreathingSummary};
