// ─────────────────────────────────────────────────────────────────────
// Nine Owls — Breathing Coupling Schedule
// ─────────────────────────────────────────────────────────────────────
//! Three-phase step schedule K(t):
//!
//!   K(t) = K_low   t < t_on          (diastole)
//!        = K_high  t_on ≤ t ≤ t_off  (systole)
//!        = K_low   t > t_off         (recovery)
//!
//! The systole window is closed at both ends: K(t_off) is still K_high.

use serde::{Deserialize, Serialize};

use clio_types::{ClioResult, CouplingConfig};

/// Which part of the breathing cycle a time falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Diastole,
    Systole,
    Recovery,
}

/// Pure function of time. Evaluated on demand; never tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouplingSchedule {
    pub k_low: f64,
    pub k_high: f64,
    pub t_switch_on: f64,
    pub t_switch_off: f64,
}

impl Default for CouplingSchedule {
    fn default() -> Self {
        Self::from_validated(&CouplingConfig::default())
    }
}

impl CouplingSchedule {
    pub fn new(k_low: f64, k_high: f64, t_switch_on: f64, t_switch_off: f64) -> ClioResult<Self> {
        Self::from_config(&CouplingConfig {
            k_low,
            k_high,
            t_switch_on,
            t_switch_off,
        })
    }

    pub fn from_config(config: &CouplingConfig) -> ClioResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &CouplingConfig) -> Self {
        Self {
            k_low: config.k_low,
            k_high: config.k_high,
            t_switch_on: config.t_switch_on,
            t_switch_off: config.t_switch_off,
        }
    }

    /// Constant coupling `k` at every t.
    pub fn constant(k: f64) -> Self {
        Self {
            k_low: k,
            k_high: k,
            t_switch_on: 0.0,
            t_switch_off: f64::INFINITY,
        }
    }

    #[inline]
    pub fn regime(&self, t: f64) -> Regime {
        if t < self.t_switch_on {
            Regime::Diastole
        } else if t > self.t_switch_off {
            Regime::Recovery
        } else {
            Regime::Systole
        }
    }

    /// K(t).
    #[inline]
    pub fn coupling(&self, t: f64) -> f64 {
        match self.regime(t) {
            Regime::Systole => self.k_high,
            Regime::Diastole | Regime::Recovery => self.k_low,
        }
    }

    /// Borrow as a plain `Fn(f64) -> f64` for the integrator.
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |t| self.coupling(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let s = CouplingSchedule::default();
        assert_eq!(s.coupling(10.0 - 1e-6), 0.5);
        assert_eq!(s.coupling(10.0), 4.0);
        assert_eq!(s.coupling(40.0), 4.0);
        assert_eq!(s.coupling(40.0 + 1e-6), 0.5);
    }

    #[test]
    fn test_regimes() {
        let s = CouplingSchedule::default();
        assert_eq!(s.regime(0.0), Regime::Diastole);
        assert_eq!(s.regime(25.0), Regime::Systole);
        assert_eq!(s.regime(40.0), Regime::Systole);
        assert_eq!(s.regime(59.0), Regime::Recovery);
    }

    #[test]
    fn test_off_grid_times() {
        let s = CouplingSchedule::new(0.1, 2.0, 1.0, 2.0).unwrap();
        assert_eq!(s.coupling(-3.7), 0.1);
        assert_eq!(s.coupling(1.2345), 2.0);
        assert_eq!(s.coupling(1e9), 0.1);
    }

    #[test]
    fn test_invalid_window() {
        assert!(CouplingSchedule::new(0.5, 4.0, 40.0, 10.0).is_err());
        assert!(CouplingSchedule::new(0.5, 4.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_constant() {
        let s = CouplingSchedule::constant(0.0);
        assert_eq!(s.coupling(-1.0), 0.0);
        assert_eq!(s.coupling(1e12), 0.0);
    }

    #[test]
    fn test_as_fn_matches() {
        let s = CouplingSchedule::default();
        let k = s.as_fn();
        for t in [0.0, 9.99, 10.0, 30.0, 40.0, 40.01] {
            assert_eq!(k(t), s.coupling(t));
        }
    }
}
