//! The mitigation settings record and the store that guards its mutation.
//!
//! [`SettingsStore`] is the single source of truth for the current settings:
//! every mutation passes through its validation, so the calculators can
//! assume a well-formed record and never fail.
use crate::policy::{INTENSITY_MAX, INTENSITY_STEP, PolicyId, PolicyKind, PolicyValue};
use crate::preset::Preset;
use crate::units::Dimensionless;
use std::str::FromStr;
use thiserror::Error;

/// An error raised when mutating a [`SettingsStore`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The supplied key does not name a recognised policy
    #[error("unrecognised policy key: {0}")]
    InvalidPolicyKey(String),
    /// The supplied value's type does not match the policy's declared kind
    #[error("policy {policy} expects a {expected} value")]
    InvalidValueType {
        /// The policy being set
        policy: PolicyId,
        /// The kind of value the policy expects
        expected: PolicyKind,
    },
    /// The supplied percentage is outside the permitted range
    #[error("intensity reduction must be between 0 and {INTENSITY_MAX} percent, got {0}")]
    OutOfRangeValue(u32),
}

/// The current value of every recognised policy.
///
/// One field per policy keeps the key set closed at compile time; keyed
/// access for callers working from a [`PolicyId`] goes through [`get`] and
/// the store's `set`.
///
/// [`get`]: MitigationSettings::get
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MitigationSettings {
    /// Full-cutoff fixtures mandate
    pub full_shielding: bool,
    /// Colour temperature limits for new installations
    pub cct_limits: bool,
    /// Light intensity reduction percentage (0 to [`INTENSITY_MAX`], steps of [`INTENSITY_STEP`])
    pub intensity_reduction: u32,
    /// Late-night lighting curfews
    pub curfews: bool,
    /// Adaptive streetlight dimming
    pub streetlight_dimming: bool,
    /// Warm LED procurement standard
    pub warm_leds: bool,
    /// Dark sky overlay zones
    pub dark_sky_overlays: bool,
    /// Campus lighting retrofit
    pub campus_lighting: bool,
    /// Highway light barriers
    pub highway_barriers: bool,
    /// Low-albedo road surfaces
    pub low_albedo_surfaces: bool,
    /// Community education programme
    pub community_education: bool,
    /// Sky quality monitoring programme
    pub monitoring_program: bool,
}

impl MitigationSettings {
    /// Get the current value of the given policy
    pub fn get(&self, policy: PolicyId) -> PolicyValue {
        match policy {
            PolicyId::FullShielding => self.full_shielding.into(),
            PolicyId::CctLimits => self.cct_limits.into(),
            PolicyId::IntensityReduction => self.intensity_reduction.into(),
            PolicyId::Curfews => self.curfews.into(),
            PolicyId::StreetlightDimming => self.streetlight_dimming.into(),
            PolicyId::WarmLeds => self.warm_leds.into(),
            PolicyId::DarkSkyOverlays => self.dark_sky_overlays.into(),
            PolicyId::CampusLighting => self.campus_lighting.into(),
            PolicyId::HighwayBarriers => self.highway_barriers.into(),
            PolicyId::LowAlbedoSurfaces => self.low_albedo_surfaces.into(),
            PolicyId::CommunityEducation => self.community_education.into(),
            PolicyId::MonitoringProgram => self.monitoring_program.into(),
        }
    }

    /// Whether the given policy is active (adopted, or a nonzero percentage)
    pub fn is_active(&self, policy: PolicyId) -> bool {
        self.get(policy).is_active()
    }

    /// The fraction of the policy's full-scale effect that currently applies.
    ///
    /// Returns `None` for inactive policies, 1.0 for adopted toggle policies
    /// and `pct/100` for the intensity reduction policy.
    pub fn activation(&self, policy: PolicyId) -> Option<Dimensionless> {
        match self.get(policy) {
            PolicyValue::Toggle(true) => Some(Dimensionless(1.0)),
            PolicyValue::Percent(pct) if pct > 0 => Some(Dimensionless(f64::from(pct) / 100.0)),
            _ => None,
        }
    }

    /// Overwrite the given policy's value without validation
    fn set_unchecked(&mut self, policy: PolicyId, value: PolicyValue) {
        match (policy, value) {
            (PolicyId::FullShielding, PolicyValue::Toggle(on)) => self.full_shielding = on,
            (PolicyId::CctLimits, PolicyValue::Toggle(on)) => self.cct_limits = on,
            (PolicyId::IntensityReduction, PolicyValue::Percent(pct)) => {
                self.intensity_reduction = pct;
            }
            (PolicyId::Curfews, PolicyValue::Toggle(on)) => self.curfews = on,
            (PolicyId::StreetlightDimming, PolicyValue::Toggle(on)) => {
                self.streetlight_dimming = on;
            }
            (PolicyId::WarmLeds, PolicyValue::Toggle(on)) => self.warm_leds = on,
            (PolicyId::DarkSkyOverlays, PolicyValue::Toggle(on)) => self.dark_sky_overlays = on,
            (PolicyId::CampusLighting, PolicyValue::Toggle(on)) => self.campus_lighting = on,
            (PolicyId::HighwayBarriers, PolicyValue::Toggle(on)) => self.highway_barriers = on,
            (PolicyId::LowAlbedoSurfaces, PolicyValue::Toggle(on)) => {
                self.low_albedo_surfaces = on;
            }
            (PolicyId::CommunityEducation, PolicyValue::Toggle(on)) => {
                self.community_education = on;
            }
            (PolicyId::MonitoringProgram, PolicyValue::Toggle(on)) => self.monitoring_program = on,
            _ => unreachable!("value validated against policy kind before storing"),
        }
    }
}

/// Validate a value against a policy's declared kind and bounds.
///
/// Percentages outside `[0, INTENSITY_MAX]` are rejected; in-range values are
/// rounded to the nearest [`INTENSITY_STEP`] before being stored.
pub fn validate_value(policy: PolicyId, value: PolicyValue) -> Result<PolicyValue, SettingsError> {
    if value.kind() != policy.kind() {
        return Err(SettingsError::InvalidValueType {
            policy,
            expected: policy.kind(),
        });
    }

    match value {
        PolicyValue::Percent(pct) => {
            if pct > INTENSITY_MAX {
                return Err(SettingsError::OutOfRangeValue(pct));
            }
            let rounded = (pct + INTENSITY_STEP / 2) / INTENSITY_STEP * INTENSITY_STEP;
            Ok(PolicyValue::Percent(rounded))
        }
        toggle => Ok(toggle),
    }
}

/// Holds the current mitigation settings and validates every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
    current: MitigationSettings,
}

impl SettingsStore {
    /// Create a store with the canonical all-off defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// The current settings record
    pub fn settings(&self) -> &MitigationSettings {
        &self.current
    }

    /// Set a single policy's value, validating its type and bounds
    pub fn set(&mut self, policy: PolicyId, value: PolicyValue) -> Result<(), SettingsError> {
        let value = validate_value(policy, value)?;
        self.current.set_unchecked(policy, value);

        Ok(())
    }

    /// Set a single policy's value from a string key
    pub fn set_by_name(&mut self, key: &str, value: PolicyValue) -> Result<(), SettingsError> {
        let policy =
            PolicyId::from_str(key).map_err(|_| SettingsError::InvalidPolicyKey(key.into()))?;

        self.set(policy, value)
    }

    /// Merge a preset over the current settings.
    ///
    /// Only the policies the preset lists change. The whole preset is
    /// validated before any of it is applied, so a failing preset leaves the
    /// store untouched and no reader can observe a partially-applied one.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<(), SettingsError> {
        let validated: Vec<_> = preset
            .policies
            .iter()
            .map(|(&policy, &value)| Ok((policy, validate_value(policy, value)?)))
            .collect::<Result<_, SettingsError>>()?;

        for (policy, value) in validated {
            self.current.set_unchecked(policy, value);
        }

        Ok(())
    }

    /// Restore the canonical all-off defaults
    pub fn reset(&mut self) {
        self.current = MitigationSettings::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{groveland, settings_all_on};
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_defaults_all_off() {
        let store = SettingsStore::new();
        for policy in PolicyId::iter() {
            assert!(!store.settings().is_active(policy));
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut store = SettingsStore::new();
        store
            .set(PolicyId::Curfews, PolicyValue::Toggle(true))
            .unwrap();
        store
            .set(PolicyId::IntensityReduction, PolicyValue::Percent(25))
            .unwrap();

        assert_eq!(
            store.settings().get(PolicyId::Curfews),
            PolicyValue::Toggle(true)
        );
        assert_eq!(store.settings().intensity_reduction, 25);
        assert!(!store.settings().is_active(PolicyId::FullShielding));
    }

    #[test]
    fn test_set_rejects_mismatched_kind() {
        let mut store = SettingsStore::new();
        assert_eq!(
            store.set(PolicyId::Curfews, PolicyValue::Percent(10)),
            Err(SettingsError::InvalidValueType {
                policy: PolicyId::Curfews,
                expected: PolicyKind::Toggle
            })
        );
        assert_eq!(
            store.set(PolicyId::IntensityReduction, PolicyValue::Toggle(true)),
            Err(SettingsError::InvalidValueType {
                policy: PolicyId::IntensityReduction,
                expected: PolicyKind::Percent
            })
        );
    }

    #[rstest]
    #[case(55)]
    #[case(100)]
    fn test_set_rejects_out_of_range_percent(#[case] pct: u32) {
        let mut store = SettingsStore::new();
        assert_eq!(
            store.set(PolicyId::IntensityReduction, PolicyValue::Percent(pct)),
            Err(SettingsError::OutOfRangeValue(pct))
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(12, 10)]
    #[case(13, 15)]
    #[case(50, 50)]
    fn test_percent_rounded_to_step(#[case] pct: u32, #[case] expected: u32) {
        let mut store = SettingsStore::new();
        store
            .set(PolicyId::IntensityReduction, PolicyValue::Percent(pct))
            .unwrap();
        assert_eq!(store.settings().intensity_reduction, expected);
    }

    #[test]
    fn test_set_by_name_unknown_key() {
        let mut store = SettingsStore::new();
        assert_eq!(
            store.set_by_name("street_light_dimming", PolicyValue::Toggle(true)),
            Err(SettingsError::InvalidPolicyKey(
                "street_light_dimming".into()
            ))
        );
    }

    #[test]
    fn test_apply_preset_round_trip() {
        let partial = Preset {
            id: "partial".into(),
            description: "A partial preset".to_string(),
            policies: [
                (PolicyId::FullShielding, PolicyValue::Toggle(true)),
                (PolicyId::IntensityReduction, PolicyValue::Percent(20)),
            ]
            .into_iter()
            .collect(),
        };

        let mut store = SettingsStore::new();
        store
            .set(PolicyId::HighwayBarriers, PolicyValue::Toggle(true))
            .unwrap();
        store.apply_preset(&partial).unwrap();

        // Listed policies take the preset's values
        for (&policy, &value) in &partial.policies {
            assert_eq!(store.settings().get(policy), value);
        }

        // Unlisted policies keep their previous values
        assert!(store.settings().highway_barriers);
    }

    #[rstest]
    fn test_apply_full_preset(groveland: Preset) {
        let mut store = SettingsStore::new();
        store.apply_preset(&groveland).unwrap();

        for (&policy, &value) in &groveland.policies {
            assert_eq!(store.settings().get(policy), value);
        }
    }

    #[rstest]
    fn test_apply_preset_invalid_leaves_store_untouched(mut groveland: Preset) {
        groveland
            .policies
            .insert(PolicyId::IntensityReduction, PolicyValue::Percent(95));

        let mut store = SettingsStore::new();
        assert_eq!(
            store.apply_preset(&groveland),
            Err(SettingsError::OutOfRangeValue(95))
        );
        assert_eq!(store, SettingsStore::new());
    }

    #[rstest]
    fn test_reset(settings_all_on: MitigationSettings) {
        let mut store = SettingsStore {
            current: settings_all_on,
        };
        store.reset();
        assert_eq!(store.settings(), &MitigationSettings::default());
    }
}
