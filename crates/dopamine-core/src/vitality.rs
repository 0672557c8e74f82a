//! Pet vitality meter and alive/dead transition.
//!
//! Feeding and decay are deliberately decoupled: `feed` only ever
//! increments the meter, while `daily_check` applies the decay and is
//! the only place death is evaluated. An external sweep is expected to
//! run `daily_check` once per calendar day per pet; the pure function
//! itself carries no same-day guard (the service sweep does).

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Meter value a pet starts with.
pub const INITIAL_FEED_METER: i32 = 5;

/// Meter points lost per missed feeding day.
pub const DAILY_DECAY: i32 = 2;

/// Hunger/survival state for a single pet.
///
/// Embedded in the `Fish` entity (serde-flattened). `alive` is one-way
/// monotonic: once false it never becomes true again, and every
/// operation on a dead pet is a safe no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitality {
    pub feed_meter: i32,
    #[serde(default)]
    pub last_fed: Option<DateTime<Local>>,
    pub alive: bool,
}

impl Default for Vitality {
    fn default() -> Self {
        Self {
            feed_meter: INITIAL_FEED_METER,
            last_fed: None,
            alive: true,
        }
    }
}

/// Result of a feed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Meter incremented, `last_fed` updated.
    Fed,
    /// Pet is dead; nothing changed.
    Dead,
}

impl FeedOutcome {
    /// Client-facing status message.
    pub fn message(&self) -> &'static str {
        match self {
            FeedOutcome::Fed => "Fish fed successfully",
            FeedOutcome::Dead => "This fish is dead.",
        }
    }
}

/// Result of a daily decay check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyCheckOutcome {
    /// Whether the meter was decremented this call.
    pub decayed: bool,
    /// Whether the pet died this call.
    pub died: bool,
}

impl Vitality {
    /// Feed the pet at `now`.
    ///
    /// No-op on a dead pet. A feed call can never kill: death is only
    /// evaluated inside [`Vitality::daily_check`].
    pub fn feed(&mut self, now: DateTime<Local>) -> FeedOutcome {
        if !self.alive {
            return FeedOutcome::Dead;
        }
        self.feed_meter += 1;
        self.last_fed = Some(now);
        FeedOutcome::Fed
    }

    /// Apply the daily decay check at `now`.
    ///
    /// If the pet was last fed on an earlier calendar date the meter
    /// drops by [`DAILY_DECAY`]. This is a single later-date test, not
    /// a day count: several missed days are indistinguishable from one
    /// per call. After decay, a meter at or below zero is terminal --
    /// no floor clamp runs before the death check.
    pub fn daily_check(&mut self, now: DateTime<Local>) -> DailyCheckOutcome {
        let mut outcome = DailyCheckOutcome::default();
        if !self.alive {
            return outcome;
        }

        if let Some(last_fed) = self.last_fed {
            if now.date_naive() > last_fed.date_naive() {
                self.feed_meter -= DAILY_DECAY;
                outcome.decayed = true;
            }
        }

        if self.feed_meter <= 0 {
            self.alive = false;
            outcome.died = true;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn feed_increments_meter_and_anchors_date() {
        let mut v = Vitality::default();
        let outcome = v.feed(at(2025, 3, 1, 10));

        assert_eq!(outcome, FeedOutcome::Fed);
        assert_eq!(outcome.message(), "Fish fed successfully");
        assert_eq!(v.feed_meter, 6);
        assert_eq!(v.last_fed, Some(at(2025, 3, 1, 10)));
    }

    #[test]
    fn feeding_dead_pet_changes_nothing() {
        let mut v = Vitality {
            feed_meter: -1,
            last_fed: Some(at(2025, 3, 1, 10)),
            alive: false,
        };
        let before = v.clone();
        let outcome = v.feed(at(2025, 3, 5, 10));

        assert_eq!(outcome, FeedOutcome::Dead);
        assert_eq!(outcome.message(), "This fish is dead.");
        assert_eq!(v, before);
    }

    #[test]
    fn missed_day_decays_by_two() {
        let mut v = Vitality::default();
        v.feed(at(2025, 3, 1, 10));
        let outcome = v.daily_check(at(2025, 3, 2, 8));

        assert!(outcome.decayed);
        assert!(!outcome.died);
        assert_eq!(v.feed_meter, 4);
        assert!(v.alive);
    }

    #[test]
    fn multiple_missed_days_decay_once_per_call() {
        let mut v = Vitality::default();
        v.feed(at(2025, 3, 1, 10));
        // Five days later still loses only one decay step in one call.
        v.daily_check(at(2025, 3, 6, 8));

        assert_eq!(v.feed_meter, 4);
    }

    #[test]
    fn same_day_check_is_noop() {
        let mut v = Vitality::default();
        v.feed(at(2025, 3, 1, 10));
        let outcome = v.daily_check(at(2025, 3, 1, 23));

        assert!(!outcome.decayed);
        assert_eq!(v.feed_meter, 6);
        assert!(v.alive);
    }

    #[test]
    fn never_fed_pet_does_not_decay() {
        let mut v = Vitality::default();
        let outcome = v.daily_check(at(2025, 3, 1, 8));

        assert!(!outcome.decayed);
        assert_eq!(v.feed_meter, INITIAL_FEED_METER);
    }

    #[test]
    fn meter_goes_negative_before_death_check() {
        let mut v = Vitality {
            feed_meter: 1,
            last_fed: Some(at(2025, 3, 1, 10)),
            alive: true,
        };
        let outcome = v.daily_check(at(2025, 3, 2, 8));

        assert!(outcome.decayed);
        assert!(outcome.died);
        assert_eq!(v.feed_meter, -1);
        assert!(!v.alive);
    }

    #[test]
    fn death_is_terminal() {
        let mut v = Vitality {
            feed_meter: 1,
            last_fed: Some(at(2025, 3, 1, 10)),
            alive: true,
        };
        v.daily_check(at(2025, 3, 2, 8));
        assert!(!v.alive);

        // Further checks and feeds leave the corpse inert.
        let outcome = v.daily_check(at(2025, 3, 3, 8));
        assert_eq!(outcome, DailyCheckOutcome::default());
        assert_eq!(v.feed(at(2025, 3, 3, 9)), FeedOutcome::Dead);
        assert_eq!(v.feed_meter, -1);
    }

    #[test]
    fn feed_never_kills_regardless_of_meter() {
        let mut v = Vitality {
            feed_meter: -5,
            last_fed: None,
            alive: true,
        };
        let outcome = v.feed(at(2025, 3, 1, 10));

        assert_eq!(outcome, FeedOutcome::Fed);
        assert!(v.alive);
        assert_eq!(v.feed_meter, -4);
    }
}
