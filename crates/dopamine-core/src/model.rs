//! Entity types: users, tasks, achievements, and fish.
//!
//! Tracker state (engagement, vitality, progression) is embedded in
//! its owning entity and serde-flattened so the stored JSON stays
//! flat. An `id` of 0 means "not yet assigned"; the store assigns real
//! IDs on insert.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::engagement::Engagement;
use crate::progression::Progression;
use crate::store::EntityRecord;
use crate::vitality::Vitality;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Local>>,
    #[serde(flatten)]
    pub engagement: Engagement,
}

impl User {
    /// A fresh user with zeroed engagement counters.
    pub fn new(username: impl Into<String>, profile_pic: Option<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            profile_pic,
            created_at: None,
            engagement: Engagement::default(),
        }
    }
}

impl EntityRecord for User {
    const KIND: &'static str = "user";

    const PLURAL: &'static str = "users";

    fn id(&self) -> u64 {
        self.id
    }

    fn assign(&mut self, id: u64, created_at: DateTime<Local>) {
        self.id = id;
        self.created_at = Some(created_at);
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// A habit task owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Local>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
    pub user_id: u64,
}

impl Task {
    pub fn new(user_id: u64, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description,
            status: TaskStatus::Pending,
            created_at: None,
            completed_at: None,
            user_id,
        }
    }
}

impl EntityRecord for Task {
    const KIND: &'static str = "task";

    const PLURAL: &'static str = "tasks";

    fn id(&self) -> u64 {
        self.id
    }

    fn assign(&mut self, id: u64, created_at: DateTime<Local>) {
        self.id = id;
        self.created_at = Some(created_at);
    }
}

/// What an achievement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    /// Reach a daily streak of `streak_required`.
    Streak,
    /// Complete `total_required` tasks.
    TotalTasks,
    /// Manually awarded.
    Custom,
}

/// An achievement a user can work toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub description: String,
    pub kind: AchievementKind,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Local>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
    pub user_id: u64,

    /// Target streak for [`AchievementKind::Streak`].
    #[serde(default)]
    pub streak_required: Option<u32>,
    /// Latest observed streak, mirrored on every visit.
    #[serde(default)]
    pub current_streak: u32,

    /// Target count for [`AchievementKind::TotalTasks`].
    #[serde(default)]
    pub total_required: Option<u64>,
    /// Tasks completed since this achievement was created.
    #[serde(default)]
    pub total_completed: u64,
}

impl Achievement {
    /// A streak-kind achievement completed at `streak_required`.
    pub fn streak(
        user_id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        streak_required: u32,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            kind: AchievementKind::Streak,
            is_completed: false,
            created_at: None,
            completed_at: None,
            user_id,
            streak_required: Some(streak_required),
            current_streak: 0,
            total_required: None,
            total_completed: 0,
        }
    }

    /// A total-tasks-kind achievement completed at `total_required`.
    pub fn total_tasks(
        user_id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        total_required: u64,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            kind: AchievementKind::TotalTasks,
            is_completed: false,
            created_at: None,
            completed_at: None,
            user_id,
            streak_required: None,
            current_streak: 0,
            total_required: Some(total_required),
            total_completed: 0,
        }
    }
}

impl EntityRecord for Achievement {
    const KIND: &'static str = "achievement";

    const PLURAL: &'static str = "achievements";

    fn id(&self) -> u64 {
        self.id
    }

    fn assign(&mut self, id: u64, created_at: DateTime<Local>) {
        self.id = id;
        self.created_at = Some(created_at);
    }
}

/// A virtual fish pet owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub category: String,
    pub user_id: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Local>>,
    #[serde(flatten)]
    pub vitality: Vitality,
    #[serde(flatten)]
    pub progression: Progression,
    /// Calendar date of the last daily sweep that touched this fish.
    /// Guards the service-level sweep against double-decay; the pure
    /// vitality transition does not consult it.
    #[serde(default)]
    pub last_checked: Option<NaiveDate>,
}

impl Fish {
    pub fn new(user_id: u64, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            category: category.into(),
            user_id,
            created_at: None,
            vitality: Vitality::default(),
            progression: Progression::default(),
            last_checked: None,
        }
    }
}

impl EntityRecord for Fish {
    const KIND: &'static str = "fish";

    const PLURAL: &'static str = "fishes";

    fn id(&self) -> u64 {
        self.id
    }

    fn assign(&mut self, id: u64, created_at: DateTime<Local>) {
        self.id = id;
        self.created_at = Some(created_at);
    }
}
