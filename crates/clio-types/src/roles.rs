// ─────────────────────────────────────────────────────────────────────
// Nine Owls — Role Catalog
// ─────────────────────────────────────────────────────────────────────
//! Static labels for the nine oscillator sites.
//!
//! Roles are descriptive only: nothing in the dynamics reads them.
//! The engine pairs catalog entry i with site i.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The nine Owl roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwlRole {
    Oper,
    Oact,
    Ocom,
    Oplan,
    Orea,
    Ometa,
    Omem,
    Oworld,
    Oeth,
}

impl OwlRole {
    pub const ALL: [OwlRole; 9] = [
        OwlRole::Oper,
        OwlRole::Oact,
        OwlRole::Ocom,
        OwlRole::Oplan,
        OwlRole::Orea,
        OwlRole::Ometa,
        OwlRole::Omem,
        OwlRole::Oworld,
        OwlRole::Oeth,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Oper => "Oper",
            Self::Oact => "Oact",
            Self::Ocom => "Ocom",
            Self::Oplan => "Oplan",
            Self::Orea => "Orea",
            Self::Ometa => "Ometa",
            Self::Omem => "Omem",
            Self::Oworld => "Oworld",
            Self::Oeth => "Oeth",
        }
    }
}

impl fmt::Display for OwlRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Role tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Operational,
    Strategic,
    Foundational,
}

/// Descriptive record for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwlSpec {
    pub role: OwlRole,
    pub tier: Tier,
    pub short_name: &'static str,
    pub description: &'static str,
}

const fn spec(
    role: OwlRole,
    tier: Tier,
    short_name: &'static str,
    description: &'static str,
) -> OwlSpec {
    OwlSpec {
        role,
        tier,
        short_name,
        description,
    }
}

/// Canonical catalog, one entry per site.
pub const OWL_SPECS: [OwlSpec; 9] = [
    spec(
        OwlRole::Oper,
        Tier::Operational,
        "Perception",
        "Multimodal encoding into latent space.",
    ),
    spec(
        OwlRole::Oact,
        Tier::Operational,
        "Action",
        "Tool use, API calls, external actuation.",
    ),
    spec(
        OwlRole::Ocom,
        Tier::Operational,
        "Communication",
        "Dialogue with users, explanation, external language interface.",
    ),
    spec(
        OwlRole::Oplan,
        Tier::Strategic,
        "Planning",
        "Goal decomposition, search over futures, plan refinement.",
    ),
    spec(
        OwlRole::Orea,
        Tier::Strategic,
        "Reasoning",
        "Logical checks, consistency analysis, counterexample search.",
    ),
    spec(
        OwlRole::Ometa,
        Tier::Strategic,
        "Meta",
        "Global control of coupling and temperature; monitors uncertainty.",
    ),
    spec(
        OwlRole::Omem,
        Tier::Foundational,
        "Memory",
        "Long-term memory, retrieval, episodic context.",
    ),
    spec(
        OwlRole::Oworld,
        Tier::Foundational,
        "WorldModel",
        "Predictive modeling of environment dynamics.",
    ),
    spec(
        OwlRole::Oeth,
        Tier::Foundational,
        "Ethics",
        "Values, constraints, and veto power over unsafe or misaligned plans.",
    ),
];

/// Owned copy of the canonical catalog.
pub fn default_owl_specs() -> Vec<OwlSpec> {
    OWL_SPECS.to_vec()
}

/// Look up the record for a role.
pub fn owl_spec(role: OwlRole) -> &'static OwlSpec {
    // Discriminant order == catalog order.
    &OWL_SPECS[role as usize]
}
