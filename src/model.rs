//! Code for simulation models.
//!
//! A model is a directory of reference data: tunable parameters
//! (`model.toml`), zone profiles (`zones.csv`), the policy cost table
//! (`policy_costs.csv`) and optional presets (`presets.toml`).
use crate::cost::CostTable;
use crate::input::cost::read_policy_costs;
use crate::input::preset::read_presets;
use crate::input::zone::read_zones;
use crate::preset::PresetMap;
use crate::zone::ZoneMap;
use anyhow::{Context, Result};
use std::path::Path;

pub mod parameters;
use parameters::ModelParameters;

/// Model definition
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Tunable parameters for the calculators
    pub parameters: ModelParameters,
    /// The zones for which sky darkness is simulated
    pub zones: ZoneMap,
    /// The cost table, covering every policy
    pub costs: CostTable,
    /// Named reference strategies
    pub presets: PresetMap,
}

impl Model {
    /// Read a model from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The model or an error if any of its files is missing or invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
        let model_dir = model_dir.as_ref();
        let parameters = ModelParameters::from_path(model_dir)?;
        let zones = read_zones(model_dir).context("Failed to read zone profiles.")?;
        let costs = read_policy_costs(model_dir).context("Failed to read policy cost table.")?;
        let presets = read_presets(model_dir).context("Failed to read presets.")?;

        Ok(Model {
            parameters,
            zones,
            costs,
            presets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::create_model_files;
    use tempfile::tempdir;

    #[test]
    fn test_model_from_path() {
        let dir = tempdir().unwrap();
        create_model_files(dir.path());

        let model = Model::from_path(dir.path()).unwrap();
        assert_eq!(model.parameters, ModelParameters::default());
        assert!(!model.zones.is_empty());
        assert!(!model.costs.is_empty());
    }

    #[test]
    fn test_model_from_path_missing_zones() {
        let dir = tempdir().unwrap();
        assert!(Model::from_path(dir.path()).is_err());
    }
}
