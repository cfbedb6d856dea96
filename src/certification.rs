//! Scoring of dark-sky certification readiness.
//!
//! Certification uses its own per-policy weight tables, distinct from the
//! cost model and the attenuation coefficients: the same toggle can be cheap,
//! optically minor and still a large step towards certification.
use crate::mitigation::MitigationSettings;
use crate::model::parameters::CertificationParameters;
use crate::policy::PolicyId;
use crate::units::Dimensionless;
use indexmap::IndexMap;
use strum::{Display, EnumIter, IntoEnumIterator};

/// A named certification requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, serde::Serialize)]
pub enum Requirement {
    /// A lighting ordinance is substantially in place
    #[strum(to_string = "Lighting Ordinance")]
    #[serde(rename = "Lighting Ordinance")]
    LightingOrdinance,
    /// Public lighting has been substantially retrofitted
    #[strum(to_string = "Public Lighting Retrofit")]
    #[serde(rename = "Public Lighting Retrofit")]
    PublicLightingRetrofit,
    /// Sensitive areas are formally protected
    #[strum(to_string = "Protected Areas")]
    #[serde(rename = "Protected Areas")]
    ProtectedAreas,
    /// A community education programme is running
    #[strum(to_string = "Community Education")]
    #[serde(rename = "Community Education")]
    CommunityEducation,
    /// A sky quality monitoring programme is running
    #[strum(to_string = "Monitoring Program")]
    #[serde(rename = "Monitoring Program")]
    MonitoringProgram,
}

/// Whether a single requirement is met, and the weight it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementStatus {
    /// The requirement
    pub requirement: Requirement,
    /// Whether it is currently met
    pub met: bool,
    /// Its percentage weight towards overall progress
    pub weight: u32,
}

/// The readiness tier derived from overall certification progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, serde::Serialize)]
pub enum ReadinessTier {
    /// Progress has reached the application threshold
    #[strum(to_string = "Ready")]
    #[serde(rename = "Ready")]
    Ready,
    /// Meaningful progress, but not yet ready to apply
    #[strum(to_string = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    /// Little or no progress yet
    #[strum(to_string = "Getting Started")]
    #[serde(rename = "Getting Started")]
    GettingStarted,
}

/// The full certification-readiness picture for a settings record.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificationStatus {
    /// Lighting policy category score, 0-100
    pub policy_score: Dimensionless,
    /// Infrastructure category score, 0-100
    pub infrastructure_score: Dimensionless,
    /// Protected areas category score, 0-100
    pub protection_score: Dimensionless,
    /// Mean of the three category scores, 0-100
    pub overall_score: Dimensionless,
    /// Status of each of the five requirements, in canonical order
    pub requirements: Vec<RequirementStatus>,
    /// Sum of the weights of the met requirements, 0-100
    pub progress: u32,
    /// The readiness tier for the current progress
    pub readiness: ReadinessTier,
}

/// Sum the points of the active policies in a weight table, capped at 100
fn category_score(
    settings: &MitigationSettings,
    points: &IndexMap<PolicyId, f64>,
    extra: f64,
) -> Dimensionless {
    let score: f64 = points
        .iter()
        .filter(|&(&policy, _)| settings.is_active(policy))
        .map(|(_, &points)| points)
        .sum();

    Dimensionless((score + extra).min(100.0))
}

/// Compute the certification status for the given settings.
pub fn compute_certification_status(
    settings: &MitigationSettings,
    params: &CertificationParameters,
) -> CertificationStatus {
    // The intensity slider contributes to the policy category in proportion
    // to the selected percentage
    let intensity_points =
        f64::from(settings.intensity_reduction) * params.intensity_points_per_percent;

    let policy_score = category_score(settings, &params.policy_points, intensity_points);
    let infrastructure_score = category_score(settings, &params.infrastructure_points, 0.0);
    let protection_score = category_score(settings, &params.protection_points, 0.0);
    let overall_score =
        Dimensionless((policy_score.0 + infrastructure_score.0 + protection_score.0) / 3.0);

    let weights = &params.requirement_weights;
    let requirements: Vec<_> = Requirement::iter()
        .map(|requirement| {
            let (met, weight) = match requirement {
                Requirement::LightingOrdinance => (
                    policy_score.0 > params.policy_threshold,
                    weights.lighting_ordinance,
                ),
                Requirement::PublicLightingRetrofit => (
                    infrastructure_score.0 > params.infrastructure_threshold,
                    weights.public_lighting_retrofit,
                ),
                Requirement::ProtectedAreas => (
                    protection_score.0 > params.protection_threshold,
                    weights.protected_areas,
                ),
                Requirement::CommunityEducation => (
                    settings.community_education,
                    weights.community_education,
                ),
                Requirement::MonitoringProgram => (
                    settings.monitoring_program,
                    weights.monitoring_program,
                ),
            };

            RequirementStatus {
                requirement,
                met,
                weight,
            }
        })
        .collect();

    let progress = requirements
        .iter()
        .filter(|status| status.met)
        .map(|status| status.weight)
        .sum();

    let readiness = if progress >= params.ready_threshold {
        ReadinessTier::Ready
    } else if progress >= params.in_progress_threshold {
        ReadinessTier::InProgress
    } else {
        ReadinessTier::GettingStarted
    };

    CertificationStatus {
        policy_score,
        infrastructure_score,
        protection_score,
        overall_score,
        requirements,
        progress,
        readiness,
    }
}
