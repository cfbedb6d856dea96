//! Zones are the named geographic areas for which sky darkness is simulated.
use crate::bortle::BortleClass;
use crate::id::{define_id_getter, define_id_type};
use crate::input::deserialise_proportion_nonzero;
use crate::units::Dimensionless;
use indexmap::IndexMap;
use serde::Deserialize;

define_id_type! {ZoneID}

/// A map of [`ZoneProfile`]s, keyed by zone ID
pub type ZoneMap = IndexMap<ZoneID, ZoneProfile>;

/// A named area with a fixed baseline darkness class.
///
/// `base_bortle` is the "as observed today, no mitigation" state and is the
/// only field the engine reads; `baseline_intensity` is carried for rendering
/// collaborators that shade the zone on a map.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ZoneProfile {
    /// A unique identifier for the zone (e.g. "downtown_core")
    pub id: ZoneID,
    /// A text description of the zone (e.g. "Gainesville Downtown Core")
    pub description: String,
    /// The zone's unmitigated Bortle class
    pub base_bortle: BortleClass,
    /// Relative radiance used when shading the zone, in (0, 1]
    #[serde(deserialize_with = "deserialise_proportion_nonzero")]
    pub baseline_intensity: Dimensionless,
}
define_id_getter! {ZoneProfile, ZoneID}
