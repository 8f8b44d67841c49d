use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One planned exercise slot for one user, one week, one day.
///
/// Catalog metadata (`name`, `video_url`, `coaching_tips`) is denormalized
/// onto the row by the fetch join; the `exercises` table owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlanItem {
  pub id: i64,
  pub user_id: String,
  /// Monday-aligned calendar date keying the week.
  pub week_start: NaiveDate,
  /// 0..=6, Monday = 0.
  pub day_of_week: i64,
  pub exercise_id: i64,

  pub name: String,
  pub video_url: Option<String>,
  pub coaching_tips: Option<String>,

  pub target_sets: i64,
  pub target_reps: i64,
  /// None = bodyweight exercise.
  pub target_weight: Option<f64>,

  /// Items sharing a non-absent group value form a superset within their day.
  pub superset_group: Option<i64>,
  /// Intra-superset sequence; ignored when superset_group is absent.
  pub superset_order: Option<i64>,

  pub is_optional: bool,

  pub completed: bool,
  pub actual_sets: Option<i64>,
  pub actual_reps: Option<i64>,
  pub actual_weight: Option<f64>,

  /// Present = locked; target fields are immutable from then on. Set by an
  /// external process, only read here.
  pub locked_at: Option<DateTime<Utc>>,

  pub notes: Option<String>,
}

impl PlanItem {
  pub fn is_locked(&self) -> bool {
    self.locked_at.is_some()
  }
}

/// The target field set a single edit may touch. Rejected as a whole while
/// the item is locked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEdit {
  pub sets: i64,
  pub reps: i64,
  pub weight: Option<f64>,
}

/// The actual field set a single edit may touch. Always permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualEdit {
  pub sets: Option<i64>,
  pub reps: Option<i64>,
  pub weight: Option<f64>,
}

/// Per-day display/organizational record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DayMeta {
  pub day_of_week: i64,
  pub day_title: String,
  pub day_notes: Option<String>,
}

impl DayMeta {
  /// Built-in fallback for a day with no stored record.
  pub fn fallback(day_of_week: i64) -> Self {
    Self {
      day_of_week,
      day_title: default_day_title(day_of_week).to_string(),
      day_notes: None,
    }
  }
}

/// Default titles for days 0..=6 (Monday..Sunday). Out-of-range days get the
/// rest-day title.
pub fn default_day_title(day_of_week: i64) -> &'static str {
  match day_of_week {
    0 => "PUSH",
    1 => "PULL",
    2 => "LEGS",
    3 => "UPPER",
    4 => "FULL BODY",
    5 => "RUN + MOBILITY",
    _ => "RECOVERY",
  }
}
