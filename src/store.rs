//! Persistence port for the weekly plan
//!
//! Thin CRUD layer over the tabular store. The pool is injected by the
//! embedding shell; nothing here constructs or caches it. Every update is
//! field-scoped and keyed by item id, applied last-write-wins. A state
//! machine transition always persists its full affected field set in one
//! UPDATE so no inconsistent intermediate state becomes visible.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::{ActualEdit, DayMeta, PlanItem, TargetEdit};

// ---------------------------------------------------------------------------
/// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A read was rejected or the store was unreachable. Previously fetched
    /// state stays with the caller, stale but consistent.
    #[error("Fetch failed: {0}")]
    Fetch(String),
    /// A write was rejected. Carries the item id and the field set the
    /// triggering transition touched; the caller's optimistic local state is
    /// not rolled back here.
    #[error("Save failed for item {id} ({fields}): {message}")]
    Save {
        id: i64,
        fields: &'static str,
        message: String,
    },
    /// A day-meta write was rejected. Day records are keyed by weekday, not
    /// item id, so they carry their own variant.
    #[error("Save failed for day meta (day {day_of_week}): {message}")]
    SaveDayMeta { day_of_week: i64, message: String },
}

impl Serialize for PlanError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetch the full plan for one (user, week), catalog metadata joined in.
///
/// Rows come back ordered by day, superset group, superset order, exercise id
/// (ascending, NULLs first) as a convenience; the grouping engine re-derives
/// its own ordering and never relies on storage order. An absent session
/// (`user_id: None`) means no data, not an error.
pub async fn fetch_plan(
    pool: &SqlitePool,
    user_id: Option<&str>,
    week_start: NaiveDate,
) -> Result<Vec<PlanItem>, PlanError> {
    let Some(user_id) = user_id else {
        return Ok(Vec::new());
    };

    sqlx::query_as::<_, PlanItem>(
        r#"
        SELECT
            wp.id, wp.user_id, wp.week_start, wp.day_of_week, wp.exercise_id,
            e.name, e.video_url, e.coaching_tips,
            wp.target_sets, wp.target_reps, wp.target_weight,
            wp.superset_group, wp.superset_order, wp.is_optional,
            wp.completed, wp.actual_sets, wp.actual_reps, wp.actual_weight,
            wp.locked_at, wp.notes
        FROM weekly_plan wp
        JOIN exercises e ON e.id = wp.exercise_id
        WHERE wp.user_id = ? AND wp.week_start = ?
        ORDER BY wp.day_of_week ASC, wp.superset_group ASC,
                 wp.superset_order ASC, wp.exercise_id ASC
        "#,
    )
    .bind(user_id)
    .bind(week_start)
    .fetch_all(pool)
    .await
    .map_err(|e| PlanError::Fetch(format!("weekly plan: {}", e)))
}

/// Fetch day metadata for one (user, week), always 7 entries for days 0..=6.
/// Days with no stored record fall back to the built-in default titles.
pub async fn fetch_week_meta(
    pool: &SqlitePool,
    user_id: Option<&str>,
    week_start: NaiveDate,
) -> Result<Vec<DayMeta>, PlanError> {
    let mut week: Vec<DayMeta> = (0..7).map(DayMeta::fallback).collect();

    let Some(user_id) = user_id else {
        return Ok(week);
    };

    let stored = sqlx::query_as::<_, DayMeta>(
        r#"
        SELECT day_of_week, day_title, day_notes
        FROM weekly_day_meta
        WHERE user_id = ? AND week_start = ?
        "#,
    )
    .bind(user_id)
    .bind(week_start)
    .fetch_all(pool)
    .await
    .map_err(|e| PlanError::Fetch(format!("day meta: {}", e)))?;

    for meta in stored {
        if let Some(slot) = week.get_mut(meta.day_of_week as usize) {
            *slot = meta;
        }
    }

    Ok(week)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Update an item's target fields. The `locked_at IS NULL` guard makes the
/// store the authoritative enforcer of the lock; a locked row is left
/// untouched and `Ok(false)` is returned (policy no-op, not an error).
pub async fn update_targets(
    pool: &SqlitePool,
    id: i64,
    edit: &TargetEdit,
) -> Result<bool, PlanError> {
    let result = sqlx::query(
        r#"
        UPDATE weekly_plan
        SET target_sets = ?, target_reps = ?, target_weight = ?
        WHERE id = ? AND locked_at IS NULL
        "#,
    )
    .bind(edit.sets)
    .bind(edit.reps)
    .bind(edit.weight)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| PlanError::Save {
        id,
        fields: "target_sets, target_reps, target_weight",
        message: e.to_string(),
    })?;

    Ok(result.rows_affected() > 0)
}

/// Update an item's actual fields. Permitted regardless of lock state.
pub async fn update_actuals(
    pool: &SqlitePool,
    id: i64,
    edit: &ActualEdit,
) -> Result<(), PlanError> {
    sqlx::query(
        r#"
        UPDATE weekly_plan
        SET actual_sets = ?, actual_reps = ?, actual_weight = ?
        WHERE id = ?
        "#,
    )
    .bind(edit.sets)
    .bind(edit.reps)
    .bind(edit.weight)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| PlanError::Save {
        id,
        fields: "actual_sets, actual_reps, actual_weight",
        message: e.to_string(),
    })?;

    Ok(())
}

/// Persist a completion toggle: the flag and all three actuals in a single
/// write, so the defaulting transition never lands partially.
pub async fn update_completion(
    pool: &SqlitePool,
    id: i64,
    completed: bool,
    actual_sets: Option<i64>,
    actual_reps: Option<i64>,
    actual_weight: Option<f64>,
) -> Result<(), PlanError> {
    sqlx::query(
        r#"
        UPDATE weekly_plan
        SET completed = ?, actual_sets = ?, actual_reps = ?, actual_weight = ?
        WHERE id = ?
        "#,
    )
    .bind(completed)
    .bind(actual_sets)
    .bind(actual_reps)
    .bind(actual_weight)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| PlanError::Save {
        id,
        fields: "completed, actual_sets, actual_reps, actual_weight",
        message: e.to_string(),
    })?;

    Ok(())
}

/// Update an item's free-text notes. Permitted regardless of lock state.
pub async fn update_notes(
    pool: &SqlitePool,
    id: i64,
    notes: Option<&str>,
) -> Result<(), PlanError> {
    sqlx::query("UPDATE weekly_plan SET notes = ? WHERE id = ?")
        .bind(notes)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| PlanError::Save {
            id,
            fields: "notes",
            message: e.to_string(),
        })?;

    Ok(())
}

/// Create or replace the day title/notes record for one (user, week, day).
pub async fn upsert_day_meta(
    pool: &SqlitePool,
    user_id: &str,
    week_start: NaiveDate,
    meta: &DayMeta,
) -> Result<(), PlanError> {
    sqlx::query(
        r#"
        INSERT INTO weekly_day_meta (user_id, week_start, day_of_week, day_title, day_notes)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id, week_start, day_of_week) DO UPDATE SET
            day_title = excluded.day_title,
            day_notes = excluded.day_notes
        "#,
    )
    .bind(user_id)
    .bind(week_start)
    .bind(meta.day_of_week)
    .bind(&meta.day_title)
    .bind(&meta.day_notes)
    .execute(pool)
    .await
    .map_err(|e| PlanError::SaveDayMeta {
        day_of_week: meta.day_of_week,
        message: e.to_string(),
    })?;

    Ok(())
}

/// End of the week window starting at `week_start` (exclusive bound).
pub(crate) fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start
        .checked_add_days(Days::new(7))
        .unwrap_or(NaiveDate::MAX)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
