pub mod log;
pub mod plan;

pub use log::{NewSetLog, SetLog};
pub use plan::{default_day_title, ActualEdit, DayMeta, PlanItem, TargetEdit};
