//! Checklist conditions.
//!
//! A checklist is a static, ordered table of conditions. Each entry pairs a
//! stable name with a predicate over the snapshot and a formatter that
//! explains the reading; evaluation walks the table in order.

use serde::Serialize;

use crate::config::StrategyParams;
use crate::snapshot::IndicatorSnapshot;

pub type Predicate = fn(&IndicatorSnapshot, &StrategyParams) -> bool;
pub type Describe = fn(&IndicatorSnapshot) -> String;

pub struct Condition {
    pub name: &'static str,
    pub predicate: Predicate,
    pub reason: Describe,
}

impl std::fmt::Debug for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}

/// Outcome of one checklist entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionResult {
    pub name: &'static str,
    pub satisfied: bool,
    pub reason: String,
}

pub fn evaluate_checklist(
    checklist: &[Condition],
    snapshot: &IndicatorSnapshot,
    params: &StrategyParams,
) -> Vec<ConditionResult> {
    checklist
        .iter()
        .map(|c| ConditionResult {
            name: c.name,
            satisfied: (c.predicate)(snapshot, params),
            reason: (c.reason)(snapshot),
        })
        .collect()
}

pub fn satisfied_count(results: &[ConditionResult]) -> usize {
    results.iter().filter(|r| r.satisfied).count()
}
