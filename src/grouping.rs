//! Grouping & Ordering Engine
//!
//! Turns the unordered set of plan items for one day into the ordered block
//! sequence the training surface walks: superset blocks first, ascending by
//! group id, then every single as its own block. Output depends only on row
//! field values, never on fetch order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::PlanItem;

// ---------------------------------------------------------------------------
/// Day Block: one display/processing unit within a day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DayBlock {
    /// Back-to-back items sharing one superset_group, in superset_order.
    Superset { group: i64, items: Vec<PlanItem> },
    /// An item belonging to no superset.
    Single { item: PlanItem },
}

impl DayBlock {
    /// Number of rows inside this block.
    pub fn len(&self) -> usize {
        match self {
            DayBlock::Superset { items, .. } => items.len(),
            DayBlock::Single { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Sort key inside a superset block: superset_order ascending with absent
/// sorting first, then exercise_id and id so equal orders stay deterministic
/// under input permutation.
fn superset_row_key(item: &PlanItem) -> (i64, i64, i64) {
    (
        item.superset_order.unwrap_or(i64::MIN),
        item.exercise_id,
        item.id,
    )
}

/// Sort key among singles: non-optional before optional, then exercise_id
/// (the stable, externally meaningful tiebreak), then id.
fn single_key(item: &PlanItem) -> (bool, i64, i64) {
    (item.is_optional, item.exercise_id, item.id)
}

/// Group one day's items into its ordered block sequence.
///
/// Every input row lands in exactly one block; re-running on a permuted
/// input with identical field values yields an identical sequence.
pub fn group_day(items: Vec<PlanItem>) -> Vec<DayBlock> {
    let mut groups: BTreeMap<i64, Vec<PlanItem>> = BTreeMap::new();
    let mut singles: Vec<PlanItem> = Vec::new();

    for item in items {
        match item.superset_group {
            Some(group) => groups.entry(group).or_default().push(item),
            None => singles.push(item),
        }
    }

    let mut blocks = Vec::with_capacity(groups.len() + singles.len());

    // BTreeMap iteration gives ascending superset_group order.
    for (group, mut rows) in groups {
        rows.sort_by_key(superset_row_key);
        blocks.push(DayBlock::Superset { group, items: rows });
    }

    singles.sort_by_key(single_key);
    blocks.extend(singles.into_iter().map(|item| DayBlock::Single { item }));

    blocks
}

/// Bucket a week's rows by day_of_week. Rows outside 0..=6 are dropped; the
/// schema cannot produce them, so nothing downstream accounts for them.
pub fn split_by_day(items: Vec<PlanItem>) -> [Vec<PlanItem>; 7] {
    let mut days: [Vec<PlanItem>; 7] = Default::default();
    for item in items {
        if let Some(day) = days.get_mut(item.day_of_week as usize) {
            day.push(item);
        }
    }
    days
}

/// Group a full week's rows into per-day block sequences.
pub fn group_week(items: Vec<PlanItem>) -> [Vec<DayBlock>; 7] {
    split_by_day(items).map(group_day)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
