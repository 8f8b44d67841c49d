//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed data for the exercise catalog and weekly plan
//! - A plan-item factory for the pure engine tests

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::PlanItem;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// A fixed Monday used as the week key across tests
pub fn monday() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date")
}

/// Seed the exercise catalog. Ids 1..=5.
pub async fn seed_test_exercises(pool: &SqlitePool) {
  let exercises: Vec<(i64, &str, Option<&str>, Option<&str>)> = vec![
    (1, "Bench Press", Some("https://example.com/bench"), None),
    (2, "Barbell Row", None, Some("Pull to the lower chest")),
    (3, "Back Squat", None, None),
    (4, "Hammer Curl", None, None),
    (5, "Romanian Deadlift", None, Some("Soft knees, hips back")),
  ];

  for (id, name, video_url, coaching_tips) in exercises {
    sqlx::query(
      r#"
      INSERT OR REPLACE INTO exercises (id, name, video_url, coaching_tips)
      VALUES (?1, ?2, ?3, ?4)
      "#,
    )
    .bind(id)
    .bind(name)
    .bind(video_url)
    .bind(coaching_tips)
    .execute(pool)
    .await
    .expect("Failed to seed exercise");
  }
}

/// Seed a small plan for one (user, week): a two-item superset on day 0, a
/// required and an optional single on day 2, and one locked item on day 2.
/// Returns the inserted ids in that order; the last id is the locked row.
pub async fn seed_test_plan(pool: &SqlitePool, user_id: &str, week_start: NaiveDate) -> Vec<i64> {
  let rows: Vec<(i64, i64, i64, i64, Option<f64>, Option<i64>, Option<i64>, bool, bool)> = vec![
    // (exercise_id, day, sets, reps, weight, group, order, optional, locked)
    (1, 0, 4, 8, Some(135.0), Some(1), Some(1), false, false),
    (2, 0, 4, 8, Some(95.0), Some(1), Some(2), false, false),
    (3, 2, 5, 5, Some(205.0), None, None, false, false),
    (4, 2, 3, 12, Some(25.0), None, None, true, false),
    (5, 2, 3, 10, Some(185.0), None, None, false, true),
  ];

  let mut ids = Vec::new();

  for (exercise_id, day, sets, reps, weight, group, order, optional, locked) in rows {
    let locked_at = locked.then(Utc::now);
    let result = sqlx::query(
      r#"
      INSERT INTO weekly_plan (
        user_id, week_start, day_of_week, exercise_id,
        target_sets, target_reps, target_weight,
        superset_group, superset_order, is_optional, locked_at
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
      "#,
    )
    .bind(user_id)
    .bind(week_start)
    .bind(day)
    .bind(exercise_id)
    .bind(sets)
    .bind(reps)
    .bind(weight)
    .bind(group)
    .bind(order)
    .bind(optional)
    .bind(locked_at)
    .execute(pool)
    .await
    .expect("Failed to seed plan item");

    ids.push(result.last_insert_rowid());
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Factories
/// ---------------------------------------------------------------------------

/// A plain unlocked, not-completed single for the pure engine tests.
pub fn make_item(id: i64, exercise_id: i64, day_of_week: i64) -> PlanItem {
  PlanItem {
    id,
    user_id: "user-1".to_string(),
    week_start: monday(),
    day_of_week,
    exercise_id,
    name: format!("Exercise {}", exercise_id),
    video_url: None,
    coaching_tips: None,
    target_sets: 3,
    target_reps: 10,
    target_weight: Some(100.0),
    superset_group: None,
    superset_order: None,
    is_optional: false,
    completed: false,
    actual_sets: None,
    actual_reps: None,
    actual_weight: None,
    locked_at: None,
    notes: None,
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('exercises', 'weekly_plan', 'weekly_day_meta', 'set_logs')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_plan_returns_row_ids() {
    let pool = setup_test_db().await;
    seed_test_exercises(&pool).await;

    let ids = seed_test_plan(&pool, "user-1", monday()).await;
    assert_eq!(ids.len(), 5);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weekly_plan")
      .fetch_one(&pool)
      .await
      .expect("Failed to count plan items");
    assert_eq!(count, 5);

    // The last seeded row carries the lock
    let locked: i64 =
      sqlx::query_scalar("SELECT COUNT(*) FROM weekly_plan WHERE locked_at IS NOT NULL")
        .fetch_one(&pool)
        .await
        .expect("Failed to count locked items");
    assert_eq!(locked, 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_monday_is_week_aligned() {
    assert_eq!(monday().format("%A").to_string(), "Monday");
  }

  #[test]
  fn test_make_item_is_plain_single() {
    let item = make_item(1, 3, 2);
    assert_eq!(item.day_of_week, 2);
    assert!(item.superset_group.is_none());
    assert!(!item.completed);
    assert!(item.locked_at.is_none());
  }
}
