use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One performed set, with the perceived-exertion and pain signals the
/// progression rule aggregates at week rollover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SetLog {
  pub id: i64,
  pub user_id: String,
  pub workout_date: NaiveDate,
  pub exercise_id: i64,
  pub set_number: i64,
  pub reps: i64,
  pub weight: Option<f64>,
  /// Rate of Perceived Exertion, 1-10.
  pub rpe: Option<f64>,
  pub pain: bool,
}

/// For inserting new set logs (without id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSetLog {
  pub user_id: String,
  pub workout_date: NaiveDate,
  pub exercise_id: i64,
  pub set_number: i64,
  pub reps: i64,
  pub weight: Option<f64>,
  pub rpe: Option<f64>,
  pub pain: bool,
}
