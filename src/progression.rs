//! Weight Progression Rule
//!
//! Computes next week's target weight for one exercise from the prior week's
//! average RPE and pain signal. The rule itself is a pure function with no
//! stored state; the weekly rollover process that writes next week's targets
//! invokes it once per exercise. Input validation is deliberately the
//! caller's responsibility.
//!
//! Also hosts the per-set log upsert and the week-window aggregation that
//! reduces logged sets to the rule's inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::{NewSetLog, SetLog};
use crate::store::{week_end, PlanError};

// ---------------------------------------------------------------------------
/// Lift Category: determines the base progression increment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiftCategory {
    /// Squats, deadlifts, lunges - progresses in 10s
    Lower,
    /// Presses, rows, pulls - progresses in 5s
    Upper,
}

impl std::fmt::Display for LiftCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}

impl std::str::FromStr for LiftCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            _ => Err(format!("Unknown lift category: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Progression Rule
// ---------------------------------------------------------------------------

/// Next week's target weight from this week's signals.
///
/// Evaluated in this exact order:
/// 1. avg_rpe above 8 holds the current weight (strictly above; exactly 8
///    still progresses).
/// 2. Base increment: 10 for lower-body lifts, 5 otherwise.
/// 3. Pain overrides the increment to 2.5 regardless of category.
pub fn next_weight(current: f64, avg_rpe: f64, category: LiftCategory, pain: bool) -> f64 {
    if avg_rpe > 8.0 {
        return current;
    }
    let mut increment = match category {
        LiftCategory::Lower => 10.0,
        LiftCategory::Upper => 5.0,
    };
    if pain {
        increment = 2.5;
    }
    current + increment
}

// ---------------------------------------------------------------------------
/// Week Stats: one exercise's aggregated signals for one week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekStats {
    /// Mean RPE across the week's logged sets; None when no set carried one.
    pub avg_rpe: Option<f64>,
    /// True if any set in the week reported pain.
    pub pain_reported: bool,
    pub sets_logged: i64,
}

impl WeekStats {
    /// Seed weight for next week. No logged RPE means no progression signal,
    /// so the current weight holds.
    pub fn suggest_next_weight(&self, current: f64, category: LiftCategory) -> f64 {
        match self.avg_rpe {
            Some(avg) => next_weight(current, avg, category, self.pain_reported),
            None => current,
        }
    }
}

// ---------------------------------------------------------------------------
// Database Operations
// ---------------------------------------------------------------------------

/// Record one performed set, replacing any earlier entry for the same
/// (user, date, exercise, set number). Returns the row id.
pub async fn log_set(pool: &SqlitePool, log: &NewSetLog) -> Result<i64, PlanError> {
    let result = sqlx::query(
        r#"
        INSERT INTO set_logs
            (user_id, workout_date, exercise_id, set_number, reps, weight, rpe, pain)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id, workout_date, exercise_id, set_number) DO UPDATE SET
            reps = excluded.reps,
            weight = excluded.weight,
            rpe = excluded.rpe,
            pain = excluded.pain
        "#,
    )
    .bind(&log.user_id)
    .bind(log.workout_date)
    .bind(log.exercise_id)
    .bind(log.set_number)
    .bind(log.reps)
    .bind(log.weight)
    .bind(log.rpe)
    .bind(log.pain)
    .execute(pool)
    .await
    .map_err(|e| PlanError::Save {
        id: log.exercise_id,
        fields: "set_number, reps, weight, rpe, pain",
        message: e.to_string(),
    })?;

    Ok(result.last_insert_rowid())
}

/// Fetch a user's logged sets over `[week_start, week_start + 7)`, ordered
/// by date, exercise, and set number for display.
pub async fn fetch_set_logs(
    pool: &SqlitePool,
    user_id: &str,
    week_start: NaiveDate,
) -> Result<Vec<SetLog>, PlanError> {
    sqlx::query_as::<_, SetLog>(
        r#"
        SELECT id, user_id, workout_date, exercise_id, set_number,
               reps, weight, rpe, pain
        FROM set_logs
        WHERE user_id = ? AND workout_date >= ? AND workout_date < ?
        ORDER BY workout_date ASC, exercise_id ASC, set_number ASC
        "#,
    )
    .bind(user_id)
    .bind(week_start)
    .bind(week_end(week_start))
    .fetch_all(pool)
    .await
    .map_err(|e| PlanError::Fetch(format!("set logs: {}", e)))
}

/// Aggregate one exercise's logged sets over `[week_start, week_start + 7)`.
pub async fn exercise_week_stats(
    pool: &SqlitePool,
    user_id: &str,
    exercise_id: i64,
    week_start: NaiveDate,
) -> Result<WeekStats, PlanError> {
    let (avg_rpe, pain_max, sets_logged): (Option<f64>, Option<i64>, i64) = sqlx::query_as(
        r#"
        SELECT AVG(rpe), MAX(pain), COUNT(*)
        FROM set_logs
        WHERE user_id = ? AND exercise_id = ?
          AND workout_date >= ? AND workout_date < ?
        "#,
    )
    .bind(user_id)
    .bind(exercise_id)
    .bind(week_start)
    .bind(week_end(week_start))
    .fetch_one(pool)
    .await
    .map_err(|e| PlanError::Fetch(format!("week stats: {}", e)))?;

    Ok(WeekStats {
        avg_rpe,
        pain_reported: pain_max.unwrap_or(0) != 0,
        sets_logged,
    })
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
