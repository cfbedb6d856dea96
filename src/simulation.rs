//! Code for evaluating mitigation scenarios against a model.
//!
//! [`Simulator`] is the facade rendering collaborators hold: it owns the
//! settings store for one model and exposes the read-only compute functions.
//! [`run`] is the headless driver used by the CLI: it evaluates the all-off
//! baseline plus every preset and writes the results to disk.
use crate::bortle::{BortleClass, compute_bortle_class};
use crate::certification::{CertificationStatus, compute_certification_status};
use crate::cost::{CostSummary, compute_cost_summary};
use crate::factor::compute_mitigation_factor;
use crate::mitigation::{MitigationSettings, SettingsError, SettingsStore};
use crate::model::Model;
use crate::output::write_results;
use crate::policy::{PolicyId, PolicyValue};
use crate::preset::PresetID;
use crate::units::Dimensionless;
use crate::zone::ZoneID;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::info;
use std::borrow::Borrow;
use std::path::Path;

/// The name under which the all-off scenario is reported
pub const BASELINE_SCENARIO: &str = "baseline";

/// The derived metrics for one settings record evaluated against a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    /// The name of the scenario (the preset ID, or [`BASELINE_SCENARIO`])
    pub scenario: String,
    /// The settings record that was evaluated
    pub settings: MitigationSettings,
    /// The fraction of baseline skyglow that remains
    pub factor: Dimensionless,
    /// The mitigated Bortle class of each zone
    pub bortle: IndexMap<ZoneID, BortleClass>,
    /// The aggregate financial summary
    pub costs: CostSummary,
    /// The certification readiness status
    pub certification: CertificationStatus,
}

/// Owns the settings for one model and derives all metrics from them.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    model: &'a Model,
    store: SettingsStore,
}

impl<'a> Simulator<'a> {
    /// Create a simulator with all-off settings
    pub fn new(model: &'a Model) -> Self {
        Self {
            model,
            store: SettingsStore::new(),
        }
    }

    /// The current settings record
    pub fn settings(&self) -> &MitigationSettings {
        self.store.settings()
    }

    /// Set a single policy's value
    pub fn set(&mut self, policy: PolicyId, value: PolicyValue) -> Result<(), SettingsError> {
        self.store.set(policy, value)
    }

    /// Apply one of the model's presets by ID
    pub fn apply_preset(&mut self, id: &PresetID) -> Result<()> {
        let preset = self
            .model
            .presets
            .get(id)
            .with_context(|| format!("Unknown preset {id}"))?;
        self.store.apply_preset(preset)?;

        Ok(())
    }

    /// Restore the all-off defaults
    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// The mitigation factor for the current settings
    pub fn mitigation_factor(&self) -> Dimensionless {
        compute_mitigation_factor(self.settings(), &self.model.parameters.mitigation)
    }

    /// The mitigated Bortle class of every zone for the current settings
    pub fn bortle_classes(&self) -> IndexMap<ZoneID, BortleClass> {
        let factor = self.mitigation_factor();
        self.model
            .zones
            .values()
            .map(|zone| (zone.id.clone(), compute_bortle_class(zone.base_bortle, factor)))
            .collect()
    }

    /// The aggregate cost summary for the current settings
    pub fn cost_summary(&self) -> CostSummary {
        compute_cost_summary(self.settings(), &self.model.costs)
    }

    /// The certification readiness status for the current settings
    pub fn certification_status(&self) -> CertificationStatus {
        compute_certification_status(self.settings(), &self.model.parameters.certification)
    }

    /// All derived metrics for the current settings, under the given name
    pub fn outcome(&self, scenario: &str) -> ScenarioOutcome {
        ScenarioOutcome {
            scenario: scenario.to_string(),
            settings: self.settings().clone(),
            factor: self.mitigation_factor(),
            bortle: self.bortle_classes(),
            costs: self.cost_summary(),
            certification: self.certification_status(),
        }
    }
}

/// Evaluate the baseline scenario plus every preset in the model.
pub fn evaluate_scenarios(model: &Model) -> Result<Vec<ScenarioOutcome>> {
    let mut simulator = Simulator::new(model);
    let mut outcomes = vec![simulator.outcome(BASELINE_SCENARIO)];

    for id in model.presets.keys() {
        simulator.reset();
        simulator.apply_preset(id)?;
        outcomes.push(simulator.outcome(id.borrow()));
    }

    Ok(outcomes)
}

/// Run the simulation for the given model and write results to `output_path`.
///
/// # Arguments
///
/// * `model` - The model to evaluate
/// * `output_path` - The folder where the results will be written
/// * `debug_model` - Whether to write additional information to CSV files
pub fn run(model: &Model, output_path: &Path, debug_model: bool) -> Result<()> {
    let outcomes = evaluate_scenarios(model)?;

    for outcome in &outcomes {
        info!(
            "Scenario {}: mitigation factor {:.3}, certification {} ({}%)",
            outcome.scenario,
            outcome.factor.value(),
            outcome.certification.readiness,
            outcome.certification.progress
        );
    }

    write_results(model, &outcomes, output_path, debug_model)
        .context("Failed to write results.")?;

    Ok(())
}
