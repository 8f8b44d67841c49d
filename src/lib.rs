//! Weekly strength plan core
//!
//! Library consumed by a presentation layer. It owns the non-trivial logic
//! of the planner and nothing else:
//! - grouping and ordering a day's plan items into superset/single blocks
//! - the completion/lock state machine gating field mutations
//! - the weight progression rule seeding next week's targets
//!
//! Persistence is a SQLite pool injected by the embedding shell; every store
//! operation is async and field-scoped, last-write-wins.

pub mod completion;
pub mod db;
pub mod grouping;
pub mod models;
pub mod progression;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use completion::TargetEditOutcome;
pub use grouping::DayBlock;
pub use models::{ActualEdit, DayMeta, NewSetLog, PlanItem, SetLog, TargetEdit};
pub use progression::{next_weight, LiftCategory, WeekStats};
pub use store::PlanError;
