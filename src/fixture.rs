//! Fixtures for tests
use crate::bortle::BortleClass;
use crate::cost::{CostTable, ImpactRating, PolicyCostEntry};
use crate::mitigation::MitigationSettings;
use crate::model::Model;
use crate::model::parameters::{CertificationParameters, MitigationParameters, ModelParameters};
use crate::policy::{PolicyId, PolicyValue};
use crate::preset::Preset;
use crate::units::{Dimensionless, Money, MoneyPerYear};
use crate::zone::{ZoneMap, ZoneProfile};
use indexmap::IndexMap;
use rstest::fixture;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn settings_all_on() -> MitigationSettings {
    MitigationSettings {
        full_shielding: true,
        cct_limits: true,
        intensity_reduction: 50,
        curfews: true,
        streetlight_dimming: true,
        warm_leds: true,
        dark_sky_overlays: true,
        campus_lighting: true,
        highway_barriers: true,
        low_albedo_surfaces: true,
        community_education: true,
        monitoring_program: true,
    }
}

#[fixture]
pub fn mitigation_parameters() -> MitigationParameters {
    MitigationParameters::default()
}

#[fixture]
pub fn certification_parameters() -> CertificationParameters {
    CertificationParameters::default()
}

/// The canonical cost table for the Gainesville reference model
#[fixture]
pub fn cost_table() -> CostTable {
    let entries = [
        (PolicyId::FullShielding, ImpactRating::High, 30_000.0, 0.0, -20_000.0),
        (PolicyId::CctLimits, ImpactRating::Medium, 22_500.0, 0.0, -8_000.0),
        (
            PolicyId::IntensityReduction,
            ImpactRating::High,
            7_750_000.0,
            450_000.0,
            75_000.0,
        ),
        (PolicyId::Curfews, ImpactRating::High, 1_250_000.0, 1_600_000.0, -50_000.0),
        (
            PolicyId::StreetlightDimming,
            ImpactRating::Medium,
            6_060_000.0,
            420_000.0,
            -420_000.0,
        ),
        (PolicyId::WarmLeds, ImpactRating::Medium, 5_000.0, 0.0, 0.0),
        (PolicyId::DarkSkyOverlays, ImpactRating::Medium, 115_000.0, 0.0, -20_000.0),
        (
            PolicyId::CampusLighting,
            ImpactRating::Medium,
            4_000_000.0,
            250_000.0,
            100_000.0,
        ),
        (PolicyId::HighwayBarriers, ImpactRating::Low, 500_000.0, 0.0, -10_000.0),
        (PolicyId::LowAlbedoSurfaces, ImpactRating::Low, 750_000.0, 0.0, -5_000.0),
        (
            PolicyId::CommunityEducation,
            ImpactRating::Medium,
            15_000.0,
            0.0,
            -65_000.0,
        ),
        (PolicyId::MonitoringProgram, ImpactRating::Medium, 7_500.0, 0.0, -5_000.0),
    ];

    entries
        .into_iter()
        .map(|(policy, impact, initial, savings, maintenance)| {
            (
                policy,
                PolicyCostEntry {
                    policy,
                    name: policy.to_string(),
                    impact,
                    initial_cost: Money(initial),
                    annual_savings: MoneyPerYear(savings),
                    annual_maintenance: MoneyPerYear(maintenance),
                    notes: String::new(),
                },
            )
        })
        .collect()
}

#[fixture]
pub fn zones() -> ZoneMap {
    [
        ("downtown_core", "Gainesville Downtown Core", 9, 0.9),
        ("west_suburbs", "West Gainesville Suburbs", 6, 0.6),
        ("paynes_prairie", "Paynes Prairie Preserve", 3, 0.25),
    ]
    .into_iter()
    .map(|(id, description, base_bortle, baseline_intensity)| {
        (
            id.into(),
            ZoneProfile {
                id: id.into(),
                description: description.to_string(),
                base_bortle: BortleClass::new(base_bortle).unwrap(),
                baseline_intensity: Dimensionless(baseline_intensity),
            },
        )
    })
    .collect()
}

#[fixture]
pub fn groveland() -> Preset {
    let policies: IndexMap<PolicyId, PolicyValue> = [
        (PolicyId::FullShielding, PolicyValue::Toggle(true)),
        (PolicyId::CctLimits, PolicyValue::Toggle(true)),
        (PolicyId::IntensityReduction, PolicyValue::Percent(20)),
        (PolicyId::Curfews, PolicyValue::Toggle(true)),
        (PolicyId::StreetlightDimming, PolicyValue::Toggle(true)),
        (PolicyId::WarmLeds, PolicyValue::Toggle(true)),
        (PolicyId::DarkSkyOverlays, PolicyValue::Toggle(true)),
        (PolicyId::CampusLighting, PolicyValue::Toggle(true)),
        (PolicyId::HighwayBarriers, PolicyValue::Toggle(false)),
        (PolicyId::LowAlbedoSurfaces, PolicyValue::Toggle(false)),
        (PolicyId::CommunityEducation, PolicyValue::Toggle(true)),
        (PolicyId::MonitoringProgram, PolicyValue::Toggle(true)),
    ]
    .into_iter()
    .collect();

    Preset {
        id: "groveland".into(),
        description: "Groveland, FL strategy".to_string(),
        policies,
    }
}

#[fixture]
pub fn model(cost_table: CostTable, zones: ZoneMap, groveland: Preset) -> Model {
    Model {
        parameters: ModelParameters::default(),
        zones,
        costs: cost_table,
        presets: [("groveland".into(), groveland)].into_iter().collect(),
    }
}

/// Write a minimal set of model files to `dir_path`
pub fn create_model_files(dir_path: &Path) {
    let mut zones_file = File::create(dir_path.join("zones.csv")).unwrap();
    writeln!(
        zones_file,
        "id,description,base_bortle,baseline_intensity
downtown_core,Gainesville Downtown Core,9,0.9
paynes_prairie,Paynes Prairie Preserve,3,0.25"
    )
    .unwrap();

    let mut costs_file = File::create(dir_path.join("policy_costs.csv")).unwrap();
    writeln!(costs_file, "policy,name,impact,initial_cost,annual_savings,annual_maintenance,notes").unwrap();
    for (policy, entry) in cost_table() {
        writeln!(
            costs_file,
            "{},{},{},{},{},{},",
            policy,
            entry.name,
            match entry.impact {
                ImpactRating::High => "high",
                ImpactRating::Medium => "medium",
                ImpactRating::Low => "low",
            },
            entry.initial_cost.value(),
            entry.annual_savings.value(),
            entry.annual_maintenance.value(),
        )
        .unwrap();
    }

    let mut presets_file = File::create(dir_path.join("presets.toml")).unwrap();
    writeln!(
        presets_file,
        "[[preset]]
id = \"groveland\"
description = \"Groveland, FL strategy\"

[preset.policies]
full_shielding = true
intensity_reduction = 20"
    )
    .unwrap();
}
