//! Code for reading zone profiles from CSV files.
use super::*;
use crate::zone::ZoneMap;
use std::path::Path;

const ZONES_FILE_NAME: &str = "zones.csv";

/// Reads zone profiles from a CSV file.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// A map of the parsed zones keyed by zone ID, or an error
pub fn read_zones(model_dir: &Path) -> Result<ZoneMap> {
    read_csv_id_file(&model_dir.join(ZONES_FILE_NAME))
}
