//! # Dopamine Hunter Core Library
//!
//! Core business logic for Dopamine Hunter, a gamified habit tracker:
//! users accrue tasks, achievements, and virtual fish pets whose
//! vitality depends on daily engagement. All operations are available
//! via a standalone CLI binary built on this crate.
//!
//! ## Architecture
//!
//! - **Engagement**: pure streak state machine over local calendar
//!   dates (same-day / consecutive-day / missed-day transitions)
//! - **Vitality**: pure hunger-meter state machine with a one-way
//!   alive/dead transition, driven by an external daily sweep
//! - **Storage**: key-value entity stores (in-memory map or JSON
//!   files) with closure-based atomic read-modify-write
//! - **Services**: one atomic store update per engagement event,
//!   with achievement progress riding along
//!
//! ## Key Components
//!
//! - [`Engagement`]: streak/visit counters and transitions
//! - [`Vitality`]: feed meter, decay, and death
//! - [`Stores`]: the entity store set services operate over
//! - [`Config`]: application configuration management

pub mod config;
pub mod engagement;
pub mod error;
pub mod model;
pub mod progression;
pub mod service;
pub mod store;
pub mod vitality;

pub use config::{Config, StorageBackend};
pub use engagement::{DayDelta, Engagement, VisitStats};
pub use error::{ConfigError, CoreError, Result, StoreError};
pub use model::{Achievement, AchievementKind, Fish, Task, TaskStatus, User};
pub use progression::Progression;
pub use service::{
    AchievementService, DailyCheckSummary, FeedAllSummary, FishService, TaskService, UserService,
};
pub use store::{EntityRecord, IdSequence, JsonStore, MemoryStore, Store, Stores};
pub use vitality::{FeedOutcome, Vitality};
