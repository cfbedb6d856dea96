//! The cost model: per-policy cost entries and the aggregate summary.
use crate::mitigation::MitigationSettings;
use crate::policy::PolicyId;
use crate::units::{Dimensionless, Money, MoneyPerYear, Year};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use strum::IntoEnumIterator;

/// A map of [`PolicyCostEntry`]s covering every policy
pub type CostTable = IndexMap<PolicyId, PolicyCostEntry>;

/// Qualitative rating of a policy's effect on sky darkness
#[derive(
    PartialEq, Eq, Clone, Copy, Debug, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum ImpactRating {
    /// A major contribution to sky darkness
    #[string = "high"]
    High,
    /// A moderate contribution
    #[string = "medium"]
    Medium,
    /// A minor or localised contribution
    #[string = "low"]
    Low,
}

/// The reference cost data for a single policy.
///
/// `annual_maintenance` is a signed delta: positive values are an additional
/// annual saving beyond energy (e.g. longer LED lifespan), negative values an
/// additional annual expense (e.g. enforcement staffing).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PolicyCostEntry {
    /// The policy this entry prices
    pub policy: PolicyId,
    /// Human-readable name of the control
    pub name: String,
    /// Qualitative impact rating
    pub impact: ImpactRating,
    /// One-time implementation cost
    pub initial_cost: Money,
    /// Annual energy savings
    pub annual_savings: MoneyPerYear,
    /// Signed annual maintenance delta
    pub annual_maintenance: MoneyPerYear,
    /// Free-text rationale for the figures
    pub notes: String,
}

/// The aggregate financial picture for a settings record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    /// Total one-time implementation cost
    pub total_initial_cost: Money,
    /// Total annual energy savings
    pub total_annual_savings: MoneyPerYear,
    /// Total signed annual maintenance delta
    pub total_annual_maintenance: MoneyPerYear,
    /// Annual savings plus the maintenance delta
    pub net_annual_impact: MoneyPerYear,
    /// Years until cumulative net savings cover the initial cost.
    ///
    /// `None` when the net annual impact is not positive; callers should
    /// render this as "N/A", never as zero or infinity.
    pub payback: Option<Year>,
}

/// A single policy's contribution to the cost summary, scaled by its
/// activation (full-scale for adopted toggles, `pct/100` for the intensity
/// reduction policy). Returns `None` for inactive policies.
pub fn cost_contribution(
    settings: &MitigationSettings,
    entry: &PolicyCostEntry,
) -> Option<(Money, MoneyPerYear, MoneyPerYear)> {
    let scale: Dimensionless = settings.activation(entry.policy)?;

    Some((
        entry.initial_cost * scale,
        entry.annual_savings * scale,
        entry.annual_maintenance * scale,
    ))
}

/// Compute the aggregate cost summary for the given settings.
pub fn compute_cost_summary(settings: &MitigationSettings, costs: &CostTable) -> CostSummary {
    let mut total_initial_cost = Money(0.0);
    let mut total_annual_savings = MoneyPerYear(0.0);
    let mut total_annual_maintenance = MoneyPerYear(0.0);

    for policy in PolicyId::iter() {
        let Some(entry) = costs.get(&policy) else {
            continue;
        };
        let Some((initial, savings, maintenance)) = cost_contribution(settings, entry) else {
            continue;
        };

        total_initial_cost += initial;
        total_annual_savings += savings;
        total_annual_maintenance += maintenance;
    }

    let net_annual_impact = total_annual_savings + total_annual_maintenance;
    let payback =
        (net_annual_impact > MoneyPerYear(0.0)).then(|| total_initial_cost / net_annual_impact);

    CostSummary {
        total_initial_cost,
        total_annual_savings,
        total_annual_maintenance,
        net_annual_impact,
        payback,
    }
}
