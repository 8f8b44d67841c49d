//! Completion/Lock State Machine
//!
//! Two independent axes per plan item: completion toggles Pending <->
//! Completed; the lock goes Unlocked -> Locked exactly once, triggered by an
//! external process. This module only reads `locked_at` and treats it as
//! authoritative.
//!
//! Transitions are pure functions over a caller-owned item; the save actions
//! below persist each transition's full field set in a single write. A save
//! failure does not roll back the locally computed item - the caller decides
//! whether to re-fetch.

use sqlx::SqlitePool;

use crate::models::{ActualEdit, PlanItem, TargetEdit};
use crate::store::{self, PlanError};

// ---------------------------------------------------------------------------
/// Target Edit Outcome
// ---------------------------------------------------------------------------

/// Result of attempting a target edit. `Locked` is a policy no-op by design
/// (stale UI state is expected and benign), never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetEditOutcome {
    Applied(PlanItem),
    Locked,
}

// ---------------------------------------------------------------------------
// Pure Transitions
// ---------------------------------------------------------------------------

/// Pending -> Completed. Each absent actual defaults to its target
/// counterpart; actuals the user already entered are left untouched. A
/// bodyweight item (no target weight) keeps an absent actual weight.
pub fn mark_completed(item: &PlanItem) -> PlanItem {
    let mut next = item.clone();
    next.completed = true;
    if next.actual_sets.is_none() {
        next.actual_sets = Some(item.target_sets);
    }
    if next.actual_reps.is_none() {
        next.actual_reps = Some(item.target_reps);
    }
    if next.actual_weight.is_none() {
        next.actual_weight = item.target_weight;
    }
    next
}

/// Completed -> Pending. Actuals persist as entered; undoing "done" must not
/// destroy recorded work.
pub fn mark_pending(item: &PlanItem) -> PlanItem {
    let mut next = item.clone();
    next.completed = false;
    next
}

/// Toggle between the two completion states.
pub fn toggle(item: &PlanItem) -> PlanItem {
    if item.completed {
        mark_pending(item)
    } else {
        mark_completed(item)
    }
}

/// Apply a target edit, rejected wholesale while the item is locked.
pub fn apply_target_edit(item: &PlanItem, edit: &TargetEdit) -> TargetEditOutcome {
    if item.is_locked() {
        return TargetEditOutcome::Locked;
    }
    let mut next = item.clone();
    next.target_sets = edit.sets;
    next.target_reps = edit.reps;
    next.target_weight = edit.weight;
    TargetEditOutcome::Applied(next)
}

/// Apply an actual edit. Actuals, like notes and the completion flag, stay
/// mutable regardless of lock state.
pub fn apply_actual_edit(item: &PlanItem, edit: &ActualEdit) -> PlanItem {
    let mut next = item.clone();
    next.actual_sets = edit.sets;
    next.actual_reps = edit.reps;
    next.actual_weight = edit.weight;
    next
}

// ---------------------------------------------------------------------------
// Save Actions
// ---------------------------------------------------------------------------

/// Toggle completion and persist the flag together with all three actuals as
/// one write. Returns the toggled item.
pub async fn save_completion(pool: &SqlitePool, item: &PlanItem) -> Result<PlanItem, PlanError> {
    let next = toggle(item);
    store::update_completion(
        pool,
        next.id,
        next.completed,
        next.actual_sets,
        next.actual_reps,
        next.actual_weight,
    )
    .await?;
    Ok(next)
}

/// Apply and persist a target edit. On a locked item this is a no-op in both
/// places: the transition rejects it locally and the store's own lock guard
/// would refuse the write anyway (this core is not the sole enforcer).
pub async fn save_targets(
    pool: &SqlitePool,
    item: &PlanItem,
    edit: &TargetEdit,
) -> Result<TargetEditOutcome, PlanError> {
    let next = match apply_target_edit(item, edit) {
        TargetEditOutcome::Applied(next) => next,
        TargetEditOutcome::Locked => return Ok(TargetEditOutcome::Locked),
    };

    let applied = store::update_targets(pool, next.id, edit).await?;
    if !applied {
        // The store saw a lock this item snapshot did not.
        return Ok(TargetEditOutcome::Locked);
    }
    Ok(TargetEditOutcome::Applied(next))
}

/// Apply and persist an actual edit. Returns the updated item.
pub async fn save_actuals(
    pool: &SqlitePool,
    item: &PlanItem,
    edit: &ActualEdit,
) -> Result<PlanItem, PlanError> {
    let next = apply_actual_edit(item, edit);
    store::update_actuals(pool, next.id, edit).await?;
    Ok(next)
}

/// Persist new notes for an item. Returns the updated item.
pub async fn save_notes(
    pool: &SqlitePool,
    item: &PlanItem,
    notes: Option<String>,
) -> Result<PlanItem, PlanError> {
    let mut next = item.clone();
    next.notes = notes;
    store::update_notes(pool, next.id, next.notes.as_deref()).await?;
    Ok(next)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
