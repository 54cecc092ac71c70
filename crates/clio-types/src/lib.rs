// ─────────────────────────────────────────────────────────────────────
// Nine Owls — CLIO Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Configuration, error hierarchy, and role catalog for the CLIO
//! breathing-cycle kernel (Cognitive Loop via In-Situ Optimization).

pub mod config;
pub mod error;
pub mod roles;

pub use config::{
    validate_horizon, ClioConfig, CouplingConfig, FrequencyConfig, GeometryConfig, GeometryMode,
    N_OWLS,
};
pub use error::{ClioError, ClioResult};
pub use roles::{default_owl_specs, owl_spec, OwlRole, OwlSpec, Tier, OWL_SPECS};
