//! Defines the `ModelParameters` struct, which represents the contents of `model.toml`.
//!
//! Every parameter has a canonical default, so a model directory only needs a
//! `model.toml` at all if it wants to tune something. The attenuation,
//! certification and cost tables deliberately weight the same policies
//! differently: they model independent concerns.
use crate::input::{input_err_msg, read_toml};
use crate::policy::{INTENSITY_MAX, PolicyId, PolicyKind};
use crate::units::Dimensionless;
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

const MODEL_PARAMETERS_FILE_NAME: &str = "model.toml";

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_floor, Dimensionless, Dimensionless(0.2));
define_param_default!(
    default_attenuation,
    IndexMap<PolicyId, Dimensionless>,
    IndexMap::from([
        (PolicyId::FullShielding, Dimensionless(0.75)),
        (PolicyId::CctLimits, Dimensionless(0.85)),
        (PolicyId::Curfews, Dimensionless(0.70)),
        (PolicyId::StreetlightDimming, Dimensionless(0.90)),
        (PolicyId::DarkSkyOverlays, Dimensionless(0.80)),
    ])
);
define_param_default!(
    default_policy_points,
    IndexMap<PolicyId, f64>,
    IndexMap::from([
        (PolicyId::FullShielding, 30.0),
        (PolicyId::CctLimits, 25.0),
        (PolicyId::Curfews, 25.0),
    ])
);
define_param_default!(default_intensity_points_per_percent, f64, 0.4);
define_param_default!(
    default_infrastructure_points,
    IndexMap<PolicyId, f64>,
    IndexMap::from([
        (PolicyId::StreetlightDimming, 40.0),
        (PolicyId::WarmLeds, 35.0),
        (PolicyId::CampusLighting, 25.0),
    ])
);
define_param_default!(
    default_protection_points,
    IndexMap<PolicyId, f64>,
    IndexMap::from([
        (PolicyId::DarkSkyOverlays, 50.0),
        (PolicyId::HighwayBarriers, 25.0),
        (PolicyId::LowAlbedoSurfaces, 25.0),
    ])
);
define_param_default!(default_policy_threshold, f64, 70.0);
define_param_default!(default_infrastructure_threshold, f64, 60.0);
define_param_default!(default_protection_threshold, f64, 50.0);
define_param_default!(default_ready_threshold, u32, 70);
define_param_default!(default_in_progress_threshold, u32, 40);

/// Parameters for the mitigation factor calculation
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MitigationParameters {
    /// The lowest value the mitigation factor can take.
    ///
    /// Some fraction of skyglow (atmospheric scatter from sources outside the
    /// modelled area) cannot be mitigated by local policy.
    #[serde(default = "default_floor")]
    pub floor: Dimensionless,
    /// Per-policy attenuation coefficients.
    ///
    /// Each active policy multiplies the factor by its coefficient; policies
    /// without an entry have no direct effect on radiance. The intensity
    /// reduction policy must not appear here as its attenuation is derived
    /// from the selected percentage.
    #[serde(default = "default_attenuation")]
    pub attenuation: IndexMap<PolicyId, Dimensionless>,
}

impl Default for MitigationParameters {
    fn default() -> Self {
        Self {
            floor: default_floor(),
            attenuation: default_attenuation(),
        }
    }
}

/// The weights of the five certification requirements, in percent
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RequirementWeights {
    /// Weight of the lighting ordinance requirement
    pub lighting_ordinance: u32,
    /// Weight of the public lighting retrofit requirement
    pub public_lighting_retrofit: u32,
    /// Weight of the protected areas requirement
    pub protected_areas: u32,
    /// Weight of the community education requirement
    pub community_education: u32,
    /// Weight of the monitoring programme requirement
    pub monitoring_program: u32,
}

impl Default for RequirementWeights {
    fn default() -> Self {
        Self {
            lighting_ordinance: 30,
            public_lighting_retrofit: 25,
            protected_areas: 20,
            community_education: 15,
            monitoring_program: 10,
        }
    }
}

impl RequirementWeights {
    /// The sum of all five weights
    fn total(&self) -> u32 {
        self.lighting_ordinance
            + self.public_lighting_retrofit
            + self.protected_areas
            + self.community_education
            + self.monitoring_program
    }
}

/// Parameters for the certification readiness calculation
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CertificationParameters {
    /// Points each policy contributes to the lighting policy category
    #[serde(default = "default_policy_points")]
    pub policy_points: IndexMap<PolicyId, f64>,
    /// Points contributed to the policy category per percent of intensity reduction
    #[serde(default = "default_intensity_points_per_percent")]
    pub intensity_points_per_percent: f64,
    /// Points each policy contributes to the infrastructure category
    #[serde(default = "default_infrastructure_points")]
    pub infrastructure_points: IndexMap<PolicyId, f64>,
    /// Points each policy contributes to the protected areas category
    #[serde(default = "default_protection_points")]
    pub protection_points: IndexMap<PolicyId, f64>,
    /// Category score above which the lighting ordinance requirement is met
    #[serde(default = "default_policy_threshold")]
    pub policy_threshold: f64,
    /// Category score above which the retrofit requirement is met
    #[serde(default = "default_infrastructure_threshold")]
    pub infrastructure_threshold: f64,
    /// Category score above which the protected areas requirement is met
    #[serde(default = "default_protection_threshold")]
    pub protection_threshold: f64,
    /// The percentage weight each requirement carries
    #[serde(default)]
    pub requirement_weights: RequirementWeights,
    /// Progress at or above which readiness is "Ready"
    #[serde(default = "default_ready_threshold")]
    pub ready_threshold: u32,
    /// Progress at or above which readiness is "In Progress"
    #[serde(default = "default_in_progress_threshold")]
    pub in_progress_threshold: u32,
}

impl Default for CertificationParameters {
    fn default() -> Self {
        toml::from_str("").expect("Cannot create certification parameters from empty TOML")
    }
}

/// Represents the contents of the entire model parameters file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ModelParameters {
    /// Parameters for the mitigation factor calculation
    #[serde(default)]
    pub mitigation: MitigationParameters,
    /// Parameters for the certification readiness calculation
    #[serde(default)]
    pub certification: CertificationParameters,
}

/// Check that an attenuation table is valid
fn check_attenuation(attenuation: &IndexMap<PolicyId, Dimensionless>) -> Result<()> {
    for (&policy, &coefficient) in attenuation {
        ensure!(
            policy.kind() == PolicyKind::Toggle,
            "Policy {policy} cannot have an attenuation coefficient"
        );
        ensure!(
            coefficient.is_finite()
                && coefficient > Dimensionless(0.0)
                && coefficient <= Dimensionless(1.0),
            "Attenuation coefficient for {policy} must be in the range (0, 1]"
        );
    }

    Ok(())
}

/// Check that a category's maximum achievable score exceeds its threshold.
///
/// Without this, a model could declare a requirement that stays unmet with
/// every policy adopted, making full certification progress unreachable.
fn check_threshold_reachable(name: &str, max_score: f64, threshold: f64) -> Result<()> {
    ensure!(
        (0.0..=100.0).contains(&threshold),
        "{name} threshold must be between 0 and 100"
    );
    ensure!(
        max_score.min(100.0) > threshold,
        "{name} threshold ({threshold}) is unreachable: the maximum achievable score is {max_score}"
    );

    Ok(())
}

impl MitigationParameters {
    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        ensure!(
            self.floor.is_finite()
                && self.floor > Dimensionless(0.0)
                && self.floor <= Dimensionless(1.0),
            "Mitigation floor must be in the range (0, 1]"
        );

        check_attenuation(&self.attenuation)
    }
}

impl CertificationParameters {
    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        ensure!(
            self.intensity_points_per_percent >= 0.0,
            "intensity_points_per_percent cannot be negative"
        );

        let weights = &self.requirement_weights;
        ensure!(
            weights.total() == 100,
            "Requirement weights must total 100, got {}",
            weights.total()
        );

        let max_policy: f64 = self.policy_points.values().sum::<f64>()
            + f64::from(INTENSITY_MAX) * self.intensity_points_per_percent;
        check_threshold_reachable("policy", max_policy, self.policy_threshold)?;
        check_threshold_reachable(
            "infrastructure",
            self.infrastructure_points.values().sum(),
            self.infrastructure_threshold,
        )?;
        check_threshold_reachable(
            "protection",
            self.protection_points.values().sum(),
            self.protection_threshold,
        )?;

        ensure!(
            self.in_progress_threshold < self.ready_threshold && self.ready_threshold <= 100,
            "Readiness thresholds must satisfy in_progress < ready <= 100"
        );

        Ok(())
    }
}

impl ModelParameters {
    /// Read a model parameters file from the specified directory.
    ///
    /// If the file is not present, the canonical defaults are used.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The parameters as a [`ModelParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<ModelParameters> {
        let file_path = model_dir.as_ref().join(MODEL_PARAMETERS_FILE_NAME);
        let params: ModelParameters = if file_path.is_file() {
            read_toml(&file_path)?
        } else {
            ModelParameters::default()
        };

        params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        self.mitigation.validate()?;
        self.certification.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ModelParameters::default().validate().is_ok());
    }

    #[test]
    fn test_from_path_no_file() {
        let dir = tempdir().unwrap();
        let params = ModelParameters::from_path(dir.path()).unwrap();
        assert_eq!(params, ModelParameters::default());
    }

    #[test]
    fn test_from_path_overrides_floor() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(MODEL_PARAMETERS_FILE_NAME)).unwrap();
            writeln!(file, "[mitigation]\nfloor = 0.25").unwrap();
        }

        let params = ModelParameters::from_path(dir.path()).unwrap();
        assert_eq!(params.mitigation.floor, Dimensionless(0.25));
        assert_eq!(params.mitigation.attenuation, default_attenuation());
    }

    #[test]
    fn test_check_attenuation_rejects_numeric_policy() {
        let attenuation = IndexMap::from([(PolicyId::IntensityReduction, Dimensionless(0.5))]);
        assert_error!(
            check_attenuation(&attenuation),
            "Policy intensity_reduction cannot have an attenuation coefficient"
        );
    }

    #[test]
    fn test_check_attenuation_rejects_out_of_range_coefficient() {
        for coefficient in [0.0, -0.5, 1.5, f64::NAN] {
            let attenuation = IndexMap::from([(PolicyId::Curfews, Dimensionless(coefficient))]);
            assert!(check_attenuation(&attenuation).is_err());
        }
    }

    #[test]
    fn test_validate_rejects_bad_weight_total() {
        let params = CertificationParameters {
            requirement_weights: RequirementWeights {
                lighting_ordinance: 50,
                ..RequirementWeights::default()
            },
            ..CertificationParameters::default()
        };
        assert_error!(
            params.validate(),
            "Requirement weights must total 100, got 120"
        );
    }

    #[test]
    fn test_validate_rejects_unreachable_threshold() {
        let params = CertificationParameters {
            protection_threshold: 100.0,
            ..CertificationParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_readiness_thresholds() {
        let params = CertificationParameters {
            ready_threshold: 30,
            ..CertificationParameters::default()
        };
        assert_error!(
            params.validate(),
            "Readiness thresholds must satisfy in_progress < ready <= 100"
        );
    }
}
