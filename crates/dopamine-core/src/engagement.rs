//! Daily engagement streak tracking.
//!
//! This module implements the streak state machine driving login and
//! visit rewards. A streak is the count of consecutive calendar days
//! with at least one qualifying event; the best streak is its
//! high-water mark. All day comparisons use local calendar dates and
//! ignore time of day.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Classification of the elapsed calendar days between the previous
/// engagement event and the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDelta {
    /// No prior event recorded.
    First,
    /// Same calendar day as the prior event.
    SameDay,
    /// Exactly one calendar day after the prior event.
    NextDay,
    /// Two or more calendar days after the prior event.
    Lapsed,
    /// Earlier calendar day than the prior event (clock skew or an
    /// out-of-order call). Treated like [`DayDelta::Lapsed`]: the
    /// streak resets, which keeps the transition total without
    /// trusting a timestamp that ran backwards.
    Backdated,
}

impl DayDelta {
    /// Classify `now` against an optional prior event instant.
    pub fn classify(last: Option<DateTime<Local>>, now: DateTime<Local>) -> Self {
        match last {
            None => DayDelta::First,
            Some(last) => {
                let days = (now.date_naive() - last.date_naive()).num_days();
                match days {
                    0 => DayDelta::SameDay,
                    1 => DayDelta::NextDay,
                    d if d < 0 => DayDelta::Backdated,
                    _ => DayDelta::Lapsed,
                }
            }
        }
    }
}

/// Streak/visit counters for a single user.
///
/// Embedded in the `User` entity (serde-flattened so the stored JSON
/// stays flat). All transitions go through [`Engagement::record_visit`]
/// or [`Engagement::record_login`]; both share one transition function
/// so the two call sites cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    /// Last recorded activity instant; `None` means never visited.
    #[serde(default)]
    pub last_login: Option<DateTime<Local>>,
    /// Consecutive-day engagement count.
    #[serde(default)]
    pub login_streak: u32,
    /// Lifetime visit counter, monotonically non-decreasing.
    #[serde(default)]
    pub total_visits: u64,
    /// Highest `login_streak` ever observed. Never decreases, and
    /// `best_streak >= login_streak` holds after every transition.
    #[serde(default)]
    pub best_streak: u32,
}

/// Snapshot of visit counters returned to clients after a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStats {
    pub total_visits: u64,
    pub current_daily_streak: u32,
    pub best_streak: u32,
    /// Calendar date of the visit, `YYYY-MM-DD`.
    pub last_visit_date: NaiveDate,
}

impl Engagement {
    /// Record a page visit at `now` and return the updated counters.
    pub fn record_visit(&mut self, now: DateTime<Local>) -> VisitStats {
        self.advance(now, true);
        VisitStats {
            total_visits: self.total_visits,
            current_daily_streak: self.login_streak,
            best_streak: self.best_streak,
            last_visit_date: now.date_naive(),
        }
    }

    /// Record a plain login at `now`.
    ///
    /// Same streak transition as [`Engagement::record_visit`] but
    /// without visit counting. The best-streak high-water mark is still
    /// maintained so the `best_streak >= login_streak` invariant holds
    /// after any transition, whichever path ran.
    pub fn record_login(&mut self, now: DateTime<Local>) -> DayDelta {
        self.advance(now, false)
    }

    /// Single transition function shared by both event kinds,
    /// parameterized by whether lifetime visit totals are tracked.
    fn advance(&mut self, now: DateTime<Local>, count_visit: bool) -> DayDelta {
        let delta = DayDelta::classify(self.last_login, now);
        match delta {
            DayDelta::First | DayDelta::Lapsed | DayDelta::Backdated => self.login_streak = 1,
            DayDelta::NextDay => self.login_streak += 1,
            DayDelta::SameDay => {}
        }
        if count_visit {
            self.total_visits += 1;
        }
        self.best_streak = self.best_streak.max(self.login_streak);
        // Unconditional, so the day anchor always reflects the most
        // recent touch. Harmless on same-day repeats: the delta stays 0.
        self.last_login = Some(now);
        delta
    }
}
