//! Presets bundle the settings of a real-world reference strategy.
use crate::id::{define_id_getter, define_id_type};
use crate::policy::{PolicyId, PolicyValue};
use indexmap::IndexMap;
use serde::Deserialize;

define_id_type! {PresetID}

/// A map of [`Preset`]s, keyed by preset ID
pub type PresetMap = IndexMap<PresetID, Preset>;

/// A named, partial settings record applied to the store in one action.
///
/// Only the policies listed in `policies` are affected when the preset is
/// applied; everything else keeps its current value.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Preset {
    /// A unique identifier for the preset (e.g. "groveland")
    pub id: PresetID,
    /// A text description of the strategy the preset models
    pub description: String,
    /// The policy values the preset applies
    pub policies: IndexMap<PolicyId, PolicyValue>,
}
define_id_getter! {Preset, PresetID}
