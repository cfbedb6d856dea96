//! Code for reading presets from TOML files.
use super::*;
use crate::mitigation::validate_value;
use crate::preset::{Preset, PresetMap};
use log::warn;
use serde::Deserialize;
use std::path::Path;

const PRESETS_FILE_NAME: &str = "presets.toml";

/// Represents the contents of the entire presets file.
#[derive(Debug, Deserialize, PartialEq)]
struct PresetsFile {
    preset: Vec<Preset>,
}

/// Validate a preset's policy values against the store's rules.
///
/// Percentages are normalised (rounded to the slider step) on load so that
/// applying a preset can never introduce a value the store would not accept.
fn validate_preset(preset: &mut Preset) -> Result<()> {
    for (&policy, value) in &mut preset.policies {
        *value = validate_value(policy, *value)
            .with_context(|| format!("Invalid value in preset {}", preset.id))?;
    }

    Ok(())
}

/// Reads presets from a TOML file.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// A map of the parsed presets keyed by preset ID or, if the file doesn't
/// exist, an empty map (a model without reference strategies is valid).
pub fn read_presets(model_dir: &Path) -> Result<PresetMap> {
    let file_path = model_dir.join(PRESETS_FILE_NAME);
    if !file_path.exists() {
        warn!("No presets file provided; no reference strategies will be simulated");
        return Ok(PresetMap::new());
    }

    let presets_file: PresetsFile = read_toml(&file_path)?;

    let mut presets = PresetMap::new();
    for mut preset in presets_file.preset {
        validate_preset(&mut preset).with_context(|| input_err_msg(&file_path))?;
        let id = preset.id.clone();
        ensure!(
            presets.insert(id.clone(), preset).is_none(),
            "{}: duplicate entry for ID {id}",
            input_err_msg(&file_path)
        );
    }

    Ok(presets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PolicyId, PolicyValue};
    use crate::preset::PresetID;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    /// Create an example presets file in dir_path
    fn create_presets_file(dir_path: &Path, intensity: u32) {
        let file_path = dir_path.join(PRESETS_FILE_NAME);
        let mut file = File::create(file_path).unwrap();
        writeln!(
            file,
            "[[preset]]
id = \"groveland\"
description = \"Groveland, FL strategy\"

[preset.policies]
full_shielding = true
intensity_reduction = {intensity}
highway_barriers = false"
        )
        .unwrap();
    }

    #[test]
    fn test_read_presets() {
        let dir = tempdir().unwrap();
        create_presets_file(dir.path(), 20);

        let presets = read_presets(dir.path()).unwrap();
        assert_eq!(presets.len(), 1);

        let preset = &presets[&PresetID::new("groveland")];
        assert_eq!(preset.description, "Groveland, FL strategy");
        assert_eq!(
            preset.policies.get(&PolicyId::FullShielding),
            Some(&PolicyValue::Toggle(true))
        );
        assert_eq!(
            preset.policies.get(&PolicyId::IntensityReduction),
            Some(&PolicyValue::Percent(20))
        );
        assert_eq!(
            preset.policies.get(&PolicyId::HighwayBarriers),
            Some(&PolicyValue::Toggle(false))
        );
    }

    #[test]
    fn test_read_presets_rejects_out_of_range_percent(){
        let dir = tempdir().unwrap();
        create_presets_file(dir.path(), 80);

        let error = read_presets(dir.path()).unwrap_err();
        assert!(
            error
                .chain()
                .any(|cause| cause.to_string() == "Invalid value in preset groveland")
        );
    }

    #[test]
    fn test_read_presets_non_existent() {
        let presets = read_presets(tempdir().unwrap().path()).unwrap();
        assert!(presets.is_empty());
    }
}
