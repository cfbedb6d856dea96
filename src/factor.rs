//! Reduction of a settings record to the fraction of skyglow that remains.
use crate::mitigation::MitigationSettings;
use crate::model::parameters::MitigationParameters;
use crate::policy::PolicyId;
use crate::units::Dimensionless;

/// Compute the mitigation factor for the given settings.
///
/// The factor is the fraction of baseline light pollution that remains: 1.0
/// with everything off, lower as policies are adopted. Each active policy in
/// the attenuation table multiplies the factor by its coefficient exactly
/// once; the intensity reduction policy multiplies by `1 - pct/100`. The
/// result is clamped from below by the configured floor, so it always lies
/// in `[floor, 1.0]`.
pub fn compute_mitigation_factor(
    settings: &MitigationSettings,
    params: &MitigationParameters,
) -> Dimensionless {
    // NB: the table is validated not to contain IntensityReduction, so the
    // percentage cannot be applied twice
    debug_assert!(!params.attenuation.contains_key(&PolicyId::IntensityReduction));

    let mut factor = Dimensionless(1.0);

    for (&policy, &coefficient) in &params.attenuation {
        if settings.is_active(policy) {
            factor = factor * coefficient;
        }
    }

    let pct = settings.intensity_reduction;
    if pct > 0 {
        factor = factor * Dimensionless(1.0 - f64::from(pct) / 100.0);
    }

    if factor < params.floor {
        params.floor
    } else {
        factor
    }
}
