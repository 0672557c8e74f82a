//! Service layer: one atomic read-modify-write per engagement event.
//!
//! Services resolve "entity not found" before any tracker transition
//! runs, then apply the transition inside the store's `update` closure
//! so concurrent events on the same entity serialize.

pub mod achievements;
pub mod fish;
pub mod tasks;
pub mod users;

pub use achievements::AchievementService;
pub use fish::{DailyCheckSummary, FeedAllSummary, FishService};
pub use tasks::TaskService;
pub use users::UserService;
