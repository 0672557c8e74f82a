//! Fish operations: feeding, the daily vitality sweep, and XP flow.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::model::{Fish, User};
use crate::store::{EntityRecord, Stores};
use crate::vitality::FeedOutcome;

/// Result payload of the feed-all operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedAllSummary {
    pub message: String,
    /// Number of living fish after the sweep.
    pub fishes_fed: u64,
    /// Whether at least one fish was actually fed.
    pub fed_today: bool,
}

/// Result payload of the daily vitality sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCheckSummary {
    /// Fish that died during this sweep.
    pub deaths_today: u64,
}

/// Fish-facing operations over the entity stores.
#[derive(Clone)]
pub struct FishService {
    stores: Stores,
}

impl FishService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Create a fish for a user: meter at 5, alive, level 1.
    pub fn create(&self, user_id: u64, name: &str, category: &str) -> Result<Fish> {
        self.require_user(user_id)?;
        let fish = self.stores.fishes.insert(Fish::new(user_id, name, category))?;
        info!(fish_id = fish.id, user_id, name, "created fish");
        Ok(fish)
    }

    pub fn get(&self, fish_id: u64) -> Result<Fish> {
        self.stores.fishes.get(fish_id)?.ok_or(CoreError::NotFound {
            kind: Fish::KIND,
            id: fish_id,
        })
    }

    /// All fish belonging to `user_id`.
    pub fn list(&self, user_id: u64) -> Result<Vec<Fish>> {
        self.require_user(user_id)?;
        let mut fishes = self.stores.fishes.all()?;
        fishes.retain(|f| f.user_id == user_id);
        Ok(fishes)
    }

    /// Feed one fish. Safe no-op on a dead fish; the outcome carries
    /// the client-facing message either way.
    pub fn feed(&self, fish_id: u64, now: DateTime<Local>) -> Result<(Fish, FeedOutcome)> {
        let mut outcome = None;
        let fish = self
            .stores
            .fishes
            .update(fish_id, &mut |f: &mut Fish| {
                outcome = Some(f.vitality.feed(now));
            })?
            .ok_or(CoreError::NotFound {
                kind: Fish::KIND,
                id: fish_id,
            })?;
        let outcome = outcome.ok_or(CoreError::NotFound {
            kind: Fish::KIND,
            id: fish_id,
        })?;
        debug!(fish_id, meter = fish.vitality.feed_meter, "feed attempt");
        Ok((fish, outcome))
    }

    /// Feed every living fish a user owns.
    pub fn feed_all(&self, user_id: u64, now: DateTime<Local>) -> Result<FeedAllSummary> {
        self.require_user(user_id)?;

        let mut fed_today = false;
        let mut alive = 0;
        for fish in self.fishes_of(user_id)? {
            if !fish.vitality.alive {
                continue;
            }
            self.stores.fishes.update(fish.id, &mut |f: &mut Fish| {
                f.vitality.feed(now);
            })?;
            fed_today = true;
            alive += 1;
        }

        info!(user_id, fishes_fed = alive, "fed all fish");
        Ok(FeedAllSummary {
            message: "All fishes fed!".to_string(),
            fishes_fed: alive,
            fed_today,
        })
    }

    /// Run the daily vitality sweep over a user's fish.
    ///
    /// Idempotent per calendar day: a fish already swept today is
    /// skipped, so a rescheduled or duplicate sweep cannot decay the
    /// meter twice.
    pub fn daily_check(&self, user_id: u64, now: DateTime<Local>) -> Result<DailyCheckSummary> {
        self.require_user(user_id)?;
        let today = now.date_naive();

        let mut deaths = 0;
        for fish in self.fishes_of(user_id)? {
            if fish.last_checked == Some(today) {
                debug!(fish_id = fish.id, "already checked today, skipping");
                continue;
            }
            let mut died = false;
            self.stores.fishes.update(fish.id, &mut |f: &mut Fish| {
                died = f.vitality.daily_check(now).died;
                f.last_checked = Some(today);
            })?;
            if died {
                info!(fish_id = fish.id, user_id, "fish died of neglect");
                deaths += 1;
            }
        }

        Ok(DailyCheckSummary {
            deaths_today: deaths,
        })
    }

    /// Credit completed tasks to a fish, granting XP.
    pub fn complete_tasks(&self, fish_id: u64, num_tasks: u64) -> Result<Fish> {
        self.stores
            .fishes
            .update(fish_id, &mut |f: &mut Fish| {
                f.progression.complete_tasks(num_tasks);
            })?
            .ok_or(CoreError::NotFound {
                kind: Fish::KIND,
                id: fish_id,
            })
    }

    /// Credit a completed achievement to a fish.
    pub fn complete_achievement(&self, fish_id: u64) -> Result<Fish> {
        self.stores
            .fishes
            .update(fish_id, &mut |f: &mut Fish| {
                f.progression.complete_achievement();
            })?
            .ok_or(CoreError::NotFound {
                kind: Fish::KIND,
                id: fish_id,
            })
    }

    fn require_user(&self, user_id: u64) -> Result<()> {
        if self.stores.users.get(user_id)?.is_none() {
            return Err(CoreError::NotFound {
                kind: User::KIND,
                id: user_id,
            });
        }
        Ok(())
    }

    fn fishes_of(&self, user_id: u64) -> Result<Vec<Fish>> {
        let mut fishes = self.stores.fishes.all()?;
        fishes.retain(|f| f.user_id == user_id);
        Ok(fishes)
    }
}
