// ─────────────────────────────────────────────────────────────────────
// Nine Owls — CLIO Run Configuration
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClioError, ClioResult};

/// Number of sites in the canonical Nine Owls network.
pub const N_OWLS: usize = 9;

/// Layout strategy for placing oscillator sites on S².
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryMode {
    /// Fixed N=9: three latitude triads, polar triads twisted by +60°.
    #[default]
    #[serde(rename = "twisted_prism")]
    TwistedPrism,
    /// Golden-angle spiral, approximately uniform for any N.
    #[serde(
        rename = "fibonacci_sphere",
        alias = "fibonacci-sphere-like",
        alias = "tammes_like"
    )]
    FibonacciSphere,
}

impl GeometryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwistedPrism => "twisted_prism",
            Self::FibonacciSphere => "fibonacci_sphere",
        }
    }
}

impl fmt::Display for GeometryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryMode {
    type Err = ClioError;

    fn from_str(s: &str) -> ClioResult<Self> {
        match s {
            "twisted_prism" => Ok(Self::TwistedPrism),
            "fibonacci_sphere" | "fibonacci-sphere-like" | "tammes_like" => {
                Ok(Self::FibonacciSphere)
            }
            other => Err(ClioError::config(format!(
                "unsupported geometry mode: {other}"
            ))),
        }
    }
}

/// Geometry selection and adjacency threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub mode: GeometryMode,
    /// Maximum geodesic angle (degrees) for two sites to be coupled.
    /// Default: 80.0.
    pub adjacency_angle_deg: f64,
    /// Site count. The twisted prism only exists for 9.
    /// Default: 9.
    pub n_sites: usize,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            mode: GeometryMode::TwistedPrism,
            adjacency_angle_deg: 80.0,
            n_sites: N_OWLS,
        }
    }
}

impl GeometryConfig {
    pub fn twisted_prism(adjacency_angle_deg: f64) -> Self {
        Self {
            mode: GeometryMode::TwistedPrism,
            adjacency_angle_deg,
            n_sites: N_OWLS,
        }
    }

    pub fn fibonacci_sphere(n_sites: usize, adjacency_angle_deg: f64) -> Self {
        Self {
            mode: GeometryMode::FibonacciSphere,
            adjacency_angle_deg,
            n_sites,
        }
    }

    /// Adjacency threshold in radians.
    pub fn adjacency_angle_rad(&self) -> f64 {
        self.adjacency_angle_deg.to_radians()
    }

    pub fn validate(&self) -> ClioResult<()> {
        if self.n_sites == 0 {
            return Err(ClioError::config("n_sites must be >= 1, got 0"));
        }
        if self.mode == GeometryMode::TwistedPrism && self.n_sites != N_OWLS {
            return Err(ClioError::config(format!(
                "twisted_prism requires n_sites = {N_OWLS}, got {}",
                self.n_sites
            )));
        }
        if !(0.0..=180.0).contains(&self.adjacency_angle_deg) {
            return Err(ClioError::config(format!(
                "adjacency_angle_deg must be in [0, 180], got {}",
                self.adjacency_angle_deg
            )));
        }
        Ok(())
    }
}

/// Three-phase breathing schedule: K_low → K_high → K_low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingConfig {
    /// Diastole coupling. Default: 0.5.
    pub k_low: f64,
    /// Systole coupling. Default: 4.0.
    pub k_high: f64,
    /// Start of systole. Default: 10.0.
    pub t_switch_on: f64,
    /// End of systole (inclusive). Default: 40.0.
    pub t_switch_off: f64,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            k_low: 0.5,
            k_high: 4.0,
            t_switch_on: 10.0,
            t_switch_off: 40.0,
        }
    }
}

impl CouplingConfig {
    pub fn validate(&self) -> ClioResult<()> {
        for (name, v) in [
            ("k_low", self.k_low),
            ("k_high", self.k_high),
            ("t_switch_on", self.t_switch_on),
            ("t_switch_off", self.t_switch_off),
        ] {
            if !v.is_finite() {
                return Err(ClioError::config(format!("{name} must be finite, got {v}")));
            }
        }
        if self.t_switch_off <= self.t_switch_on {
            return Err(ClioError::config(format!(
                "t_switch_off must be > t_switch_on, got {} <= {}",
                self.t_switch_off, self.t_switch_on
            )));
        }
        Ok(())
    }
}

/// Natural frequency model: ω_i = base_omega + noise_std · N(0, 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    /// Default: 1.0.
    pub base_omega: f64,
    /// Default: 0.1.
    pub noise_std: f64,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            base_omega: 1.0,
            noise_std: 0.1,
        }
    }
}

impl FrequencyConfig {
    pub fn validate(&self) -> ClioResult<()> {
        if !self.base_omega.is_finite() {
            return Err(ClioError::config(format!(
                "base_omega must be finite, got {}",
                self.base_omega
            )));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(ClioError::config(format!(
                "noise_std must be finite and >= 0, got {}",
                self.noise_std
            )));
        }
        Ok(())
    }
}

/// Everything needed to reproduce a breathing-cycle run bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClioConfig {
    pub geometry: GeometryConfig,
    pub coupling: CouplingConfig,
    pub frequency: FrequencyConfig,
    /// Simulation horizon. Default: 60.0.
    pub t_end: f64,
    /// Euler step. Default: 0.05.
    pub dt: f64,
    /// Seed for the single per-run generator. Default: 0.
    pub seed: u64,
}

impl Default for ClioConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            coupling: CouplingConfig::default(),
            frequency: FrequencyConfig::default(),
            t_end: 60.0,
            dt: 0.05,
            seed: 0,
        }
    }
}

impl ClioConfig {
    /// Validate horizon, step, and every nested section.
    pub fn validate(&self) -> ClioResult<()> {
        validate_horizon(self.t_end, self.dt)?;
        self.geometry.validate()?;
        self.coupling.validate()?;
        self.frequency.validate()?;
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ClioResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ClioError::config(format!("JSON parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> ClioResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ClioError::config(format!("JSON encode error: {e}")))
    }
}

/// Check a (t_end, dt) pair before building a time grid.
pub fn validate_horizon(t_end: f64, dt: f64) -> ClioResult<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(ClioError::config(format!("dt must be > 0, got {dt}")));
    }
    if !t_end.is_finite() || t_end <= 0.0 {
        return Err(ClioError::config(format!("t_end must be > 0, got {t_end}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(ClioConfig::default().validate().is_ok());
        assert_eq!(GeometryMode::default(), GeometryMode::TwistedPrism);
    }

    #[test]
    fn test_default_coupling_values() {
        let c = CouplingConfig::default();
        assert_eq!(c.k_low, 0.5);
        assert_eq!(c.k_high, 4.0);
        assert_eq!(c.t_switch_on, 10.0);
        assert_eq!(c.t_switch_off, 40.0);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "twisted_prism".parse::<GeometryMode>().unwrap(),
            GeometryMode::TwistedPrism
        );
        assert_eq!(
            "fibonacci-sphere-like".parse::<GeometryMode>().unwrap(),
            GeometryMode::FibonacciSphere
        );
        assert_eq!(
            "tammes_like".parse::<GeometryMode>().unwrap(),
            GeometryMode::FibonacciSphere
        );
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "icosahedron".parse::<GeometryMode>().unwrap_err();
        assert!(matches!(err, ClioError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_zero_dt_rejected() {
        let cfg = ClioConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ClioError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_negative_dt_rejected() {
        assert!(validate_horizon(10.0, -0.1).is_err());
        assert!(validate_horizon(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let c = CouplingConfig {
            t_switch_on: 40.0,
            t_switch_off: 10.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
        let equal = CouplingConfig {
            t_switch_on: 10.0,
            t_switch_off: 10.0,
            ..Default::default()
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_zero_sites_rejected() {
        let g = GeometryConfig::fibonacci_sphere(0, 80.0);
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_twisted_prism_wrong_n_rejected() {
        let g = GeometryConfig {
            n_sites: 12,
            ..Default::default()
        };
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(GeometryConfig::twisted_prism(181.0).validate().is_err());
        assert!(GeometryConfig::twisted_prism(-1.0).validate().is_err());
        assert!(GeometryConfig::twisted_prism(180.0).validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = ClioConfig::from_json(
            r#"{"seed": 42, "geometry": {"mode": "fibonacci-sphere-like", "n_sites": 12}}"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.geometry.mode, GeometryMode::FibonacciSphere);
        assert_eq!(cfg.geometry.n_sites, 12);
        assert_eq!(cfg.geometry.adjacency_angle_deg, 80.0);
        assert_eq!(cfg.dt, 0.05);
    }

    #[test]
    fn test_from_json_unknown_mode() {
        let err = ClioConfig::from_json(r#"{"geometry": {"mode": "cube"}}"#).unwrap_err();
        assert!(matches!(err, ClioError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_json_invalid_values() {
        let err = ClioConfig::from_json(r#"{"dt": -1.0}"#).unwrap_err();
        assert!(err.to_string().contains("dt must be > 0"), "{err}");
    }

    #[test]
    fn test_json_roundtrip_preserves_mode() {
        let cfg = ClioConfig {
            geometry: GeometryConfig::fibonacci_sphere(16, 60.0),
            seed: 7,
            ..Default::default()
        };
        let back = ClioConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
