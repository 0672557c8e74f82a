//! XP and leveling for pets.
//!
//! A simple deterministic counter: level `L` requires `10 * L`
//! cumulative XP and overflow carries into the next level. Task
//! completion grants XP scaled by completed achievements.

use serde::{Deserialize, Serialize};

/// XP required per level unit: level `L` costs `L * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u64 = 10;

/// Level/XP counters for a single pet. Embedded in the `Fish` entity
/// (serde-flattened).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u64,
    #[serde(default)]
    pub tasks_completed: u64,
    #[serde(default)]
    pub achievements_completed: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            tasks_completed: 0,
            achievements_completed: 0,
        }
    }
}

impl Progression {
    /// XP needed to finish the current level.
    pub fn xp_to_next_level(&self) -> u64 {
        u64::from(self.level) * XP_PER_LEVEL
    }

    /// Add XP and carry overflow through as many level-ups as it buys.
    /// Returns the number of levels gained.
    pub fn add_xp(&mut self, xp: u64) -> u32 {
        self.xp += xp;
        let before = self.level;
        while self.xp >= self.xp_to_next_level() {
            self.xp -= self.xp_to_next_level();
            self.level += 1;
        }
        self.level - before
    }

    /// Record `num_tasks` completed tasks. XP gain is scaled by the
    /// number of completed achievements (minimum multiplier 1).
    /// Returns the XP granted.
    pub fn complete_tasks(&mut self, num_tasks: u64) -> u64 {
        self.tasks_completed += num_tasks;
        let gain = num_tasks * self.achievements_completed.max(1);
        self.add_xp(gain);
        gain
    }

    /// Record a completed achievement, raising the task XP multiplier.
    pub fn complete_achievement(&mut self) {
        self.achievements_completed += 1;
    }
}
