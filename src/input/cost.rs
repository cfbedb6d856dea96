//! Code for reading the policy cost table from CSV files.
use super::*;
use crate::cost::{CostTable, PolicyCostEntry};
use crate::policy::PolicyId;
use itertools::Itertools;
use std::path::Path;
use strum::IntoEnumIterator;

const POLICY_COSTS_FILE_NAME: &str = "policy_costs.csv";

/// Read cost entries from an iterator, checking coverage of the policy set.
///
/// Every recognised policy must be priced exactly once: a missing entry would
/// silently zero a policy's contribution to the summary.
fn read_cost_table_from_iter<I>(iter: I) -> Result<CostTable>
where
    I: Iterator<Item = PolicyCostEntry>,
{
    let mut table = CostTable::new();
    for entry in iter {
        let policy = entry.policy;
        ensure!(
            table.insert(policy, entry).is_none(),
            "Duplicate cost entry for policy {policy}"
        );
    }

    let missing = PolicyId::iter()
        .filter(|policy| !table.contains_key(policy))
        .collect_vec();
    ensure!(
        missing.is_empty(),
        "Missing cost entries for policies: {}",
        missing.iter().join(", ")
    );

    Ok(table)
}

/// Reads the policy cost table from a CSV file.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// A map of cost entries covering every policy, or an error
pub fn read_policy_costs(model_dir: &Path) -> Result<CostTable> {
    let file_path = model_dir.join(POLICY_COSTS_FILE_NAME);
    let costs_csv = read_csv(&file_path)?;
    read_cost_table_from_iter(costs_csv).with_context(|| input_err_msg(file_path))
}
