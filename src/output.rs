//! The module responsible for writing output data to disk.
use crate::bortle::BortleClass;
use crate::certification::{ReadinessTier, Requirement};
use crate::cost::cost_contribution;
use crate::model::Model;
use crate::policy::PolicyId;
use crate::simulation::ScenarioOutcome;
use crate::units::{Money, MoneyPerYear};
use crate::zone::ZoneID;
use anyhow::{Context, Result, ensure};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "skyglow_results";

/// The output file name for the per-scenario summary
const SCENARIO_SUMMARY_FILE_NAME: &str = "scenario_summary.csv";

/// The output file name for per-zone Bortle classes
const ZONE_BORTLE_FILE_NAME: &str = "zone_bortle.csv";

/// The output file name for certification requirements
const CERTIFICATION_FILE_NAME: &str = "certification.csv";

/// The output file name for the per-policy cost breakdown
const POLICY_COSTS_DEBUG_FILE_NAME: &str = "debug_policy_costs.csv";

/// Get the default output folder for the specified model directory
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Canonicalise in case the user has specified "."
    let model_dir = model_dir
        .canonicalize()
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory at `output_dir`.
///
/// # Returns
///
/// Whether an existing directory was overwritten, or an error if the
/// directory exists and `overwrite` was not given.
pub fn create_output_directory(output_dir: &Path, overwrite: bool) -> Result<bool> {
    let existed = output_dir.is_dir();
    if existed {
        ensure!(
            overwrite,
            "Output directory {} already exists. Pass --overwrite to replace it.",
            output_dir.display()
        );
        fs::remove_dir_all(output_dir)?;
    }

    fs::create_dir_all(output_dir)?;

    Ok(existed)
}

/// Represents a row in the scenario summary CSV file
#[derive(Serialize, Debug, PartialEq)]
struct ScenarioSummaryRow<'a> {
    scenario: &'a str,
    mitigation_factor: f64,
    total_initial_cost: Money,
    total_annual_savings: MoneyPerYear,
    total_annual_maintenance: MoneyPerYear,
    net_annual_impact: MoneyPerYear,
    /// Empty when there is no net annual saving (payback undefined)
    payback_years: Option<f64>,
    certification_progress: u32,
    readiness: ReadinessTier,
}

/// Represents a row in the per-zone Bortle class CSV file
#[derive(Serialize, Debug, PartialEq)]
struct ZoneBortleRow<'a> {
    scenario: &'a str,
    zone_id: &'a ZoneID,
    base_bortle: BortleClass,
    mitigated_bortle: BortleClass,
}

/// Represents a row in the certification requirements CSV file
#[derive(Serialize, Debug, PartialEq)]
struct CertificationRow<'a> {
    scenario: &'a str,
    requirement: Requirement,
    weight: u32,
    met: bool,
}

/// Represents a row in the per-policy cost breakdown CSV file.
///
/// Only written with `debug_model`; inactive policies are omitted.
#[derive(Serialize, Debug, PartialEq)]
struct PolicyCostDebugRow<'a> {
    scenario: &'a str,
    policy: PolicyId,
    initial_cost: Money,
    annual_savings: MoneyPerYear,
    annual_maintenance: MoneyPerYear,
}

/// Write all result files for the given scenario outcomes.
///
/// # Arguments
///
/// * `model` - The model that was evaluated
/// * `outcomes` - The evaluated scenarios, baseline first
/// * `output_path` - The folder where the results will be written
/// * `debug_model` - Whether to write additional information to CSV files
pub fn write_results(
    model: &Model,
    outcomes: &[ScenarioOutcome],
    output_path: &Path,
    debug_model: bool,
) -> Result<()> {
    let mut summary_writer = csv::Writer::from_path(output_path.join(SCENARIO_SUMMARY_FILE_NAME))?;
    let mut bortle_writer = csv::Writer::from_path(output_path.join(ZONE_BORTLE_FILE_NAME))?;
    let mut certification_writer =
        csv::Writer::from_path(output_path.join(CERTIFICATION_FILE_NAME))?;

    for outcome in outcomes {
        let scenario = outcome.scenario.as_str();
        summary_writer.serialize(ScenarioSummaryRow {
            scenario,
            mitigation_factor: outcome.factor.value(),
            total_initial_cost: outcome.costs.total_initial_cost,
            total_annual_savings: outcome.costs.total_annual_savings,
            total_annual_maintenance: outcome.costs.total_annual_maintenance,
            net_annual_impact: outcome.costs.net_annual_impact,
            payback_years: outcome.costs.payback.map(|years| years.value()),
            certification_progress: outcome.certification.progress,
            readiness: outcome.certification.readiness,
        })?;

        for (zone_id, &mitigated_bortle) in &outcome.bortle {
            bortle_writer.serialize(ZoneBortleRow {
                scenario,
                zone_id,
                base_bortle: model.zones[zone_id].base_bortle,
                mitigated_bortle,
            })?;
        }

        for status in &outcome.certification.requirements {
            certification_writer.serialize(CertificationRow {
                scenario,
                requirement: status.requirement,
                weight: status.weight,
                met: status.met,
            })?;
        }
    }

    summary_writer.flush()?;
    bortle_writer.flush()?;
    certification_writer.flush()?;

    if debug_model {
        write_policy_cost_breakdown(model, outcomes, output_path)?;
    }

    Ok(())
}

/// Write the per-policy cost contribution of every active policy.
fn write_policy_cost_breakdown(
    model: &Model,
    outcomes: &[ScenarioOutcome],
    output_path: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path.join(POLICY_COSTS_DEBUG_FILE_NAME))?;

    for outcome in outcomes {
        for (&policy, entry) in &model.costs {
            let Some((initial_cost, annual_savings, annual_maintenance)) =
                cost_contribution(&outcome.settings, entry)
            else {
                continue;
            };

            writer.serialize(PolicyCostDebugRow {
                scenario: &outcome.scenario,
                policy,
                initial_cost,
                annual_savings,
                annual_maintenance,
            })?;
        }
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::model;
    use crate::simulation::evaluate_scenarios;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_create_output_directory() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("results");

        // Fresh directory
        assert!(!create_output_directory(&output_dir, false).unwrap());

        // Existing directory without --overwrite
        assert!(create_output_directory(&output_dir, false).is_err());

        // Existing directory with --overwrite
        assert!(create_output_directory(&output_dir, true).unwrap());
    }

    #[rstest]
    fn test_write_results(model: Model) {
        let dir = tempdir().unwrap();
        let outcomes = evaluate_scenarios(&model).unwrap();

        write_results(&model, &outcomes, dir.path(), false).unwrap();
        assert!(dir.path().join(SCENARIO_SUMMARY_FILE_NAME).is_file());
        assert!(dir.path().join(ZONE_BORTLE_FILE_NAME).is_file());
        assert!(dir.path().join(CERTIFICATION_FILE_NAME).is_file());
        assert!(!dir.path().join(POLICY_COSTS_DEBUG_FILE_NAME).exists());
    }

    #[rstest]
    fn test_write_results_debug(model: Model) {
        let dir = tempdir().unwrap();
        let outcomes = evaluate_scenarios(&model).unwrap();

        write_results(&model, &outcomes, dir.path(), true).unwrap();
        assert!(dir.path().join(POLICY_COSTS_DEBUG_FILE_NAME).is_file());
    }
}
