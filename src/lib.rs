//! Common functionality for Skyglow.
#![warn(missing_docs)]
pub mod bortle;
pub mod certification;
pub mod cli;
pub mod cost;
pub mod factor;
pub mod id;
pub mod input;
pub mod log;
pub mod mitigation;
pub mod model;
pub mod output;
pub mod policy;
pub mod preset;
pub mod settings;
pub mod simulation;
pub mod units;
pub mod zone;

#[cfg(test)]
mod fixture;

use std::path::PathBuf;

/// Get the path to the directory where program configuration is stored
pub fn get_skyglow_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("skyglow");

    path
}
