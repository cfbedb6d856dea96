//! The closed set of mitigation policies recognised by the engine.
//!
//! Policies are a fixed enumeration rather than free-form string keys so that
//! a typo in reference data or calling code fails at load/compile time
//! instead of silently having no effect. The per-policy reference data (cost
//! entries, attenuation coefficients, certification weights) lives in the
//! model configuration and is validated against this enumeration on load.
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// The maximum intensity reduction percentage that can be selected
pub const INTENSITY_MAX: u32 = 50;

/// The step size for the intensity reduction percentage
pub const INTENSITY_STEP: u32 = 5;

/// A mitigation policy that can be toggled or tuned by the user
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PolicyId {
    /// Mandate fully shielded fixtures (ULOR = 0)
    FullShielding,
    /// Maximum colour temperature for new installations
    CctLimits,
    /// Reduce overall lighting levels by a chosen percentage
    IntensityReduction,
    /// Automated dimming during late-night hours
    Curfews,
    /// Adaptive controls for municipal streetlights
    StreetlightDimming,
    /// Warm LEDs as the default procurement specification
    WarmLeds,
    /// Special protections for light-sensitive areas
    DarkSkyOverlays,
    /// University campus lighting retrofit
    CampusLighting,
    /// Physical light barriers along major highways
    HighwayBarriers,
    /// Light-absorbing road surface materials
    LowAlbedoSurfaces,
    /// Community education programme
    CommunityEducation,
    /// Sky quality monitoring programme
    MonitoringProgram,
}

impl PolicyId {
    /// The kind of value this policy carries
    pub fn kind(self) -> PolicyKind {
        match self {
            PolicyId::IntensityReduction => PolicyKind::Percent,
            _ => PolicyKind::Toggle,
        }
    }
}

/// The kind of value associated with a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// The policy is either adopted or not
    Toggle,
    /// The policy carries a bounded percentage
    Percent,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Toggle => write!(f, "boolean"),
            PolicyKind::Percent => write!(f, "percentage"),
        }
    }
}

/// The value assigned to a policy in a settings record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyValue {
    /// Whether a boolean policy is adopted
    Toggle(bool),
    /// The percentage selected for a numeric policy
    Percent(u32),
}

impl PolicyValue {
    /// The kind of value this is
    pub fn kind(self) -> PolicyKind {
        match self {
            PolicyValue::Toggle(_) => PolicyKind::Toggle,
            PolicyValue::Percent(_) => PolicyKind::Percent,
        }
    }

    /// Whether the value represents an active policy (true, or a nonzero percentage)
    pub fn is_active(self) -> bool {
        match self {
            PolicyValue::Toggle(on) => on,
            PolicyValue::Percent(pct) => pct > 0,
        }
    }
}

impl From<bool> for PolicyValue {
    fn from(on: bool) -> Self {
        PolicyValue::Toggle(on)
    }
}

impl From<u32> for PolicyValue {
    fn from(pct: u32) -> Self {
        PolicyValue::Percent(pct)
    }
}
