//! User operations: creation, lookup, and the streak engagement flow.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::engagement::VisitStats;
use crate::error::{CoreError, Result};
use crate::model::User;
use crate::store::{EntityRecord, Stores};

use super::achievements;

/// User-facing operations over the entity stores.
#[derive(Clone)]
pub struct UserService {
    stores: Stores,
}

impl UserService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Create a user with zeroed engagement counters.
    ///
    /// # Errors
    /// Rejects duplicate usernames.
    pub fn create(&self, username: &str, profile_pic: Option<String>) -> Result<User> {
        let taken = self
            .stores
            .users
            .all()?
            .iter()
            .any(|u| u.username == username);
        if taken {
            warn!(username, "rejected duplicate username");
            return Err(CoreError::DuplicateUsername(username.to_string()));
        }

        let user = self
            .stores
            .users
            .insert(User::new(username, profile_pic))?;
        info!(user_id = user.id, username, "created user");
        Ok(user)
    }

    pub fn get(&self, user_id: u64) -> Result<User> {
        self.stores.users.get(user_id)?.ok_or(CoreError::NotFound {
            kind: User::KIND,
            id: user_id,
        })
    }

    pub fn list(&self) -> Result<Vec<User>> {
        Ok(self.stores.users.all()?)
    }

    /// Record a page visit for streak tracking and return updated
    /// counters. The transition runs inside the store's atomic update,
    /// then streak achievements are brought up to date.
    pub fn record_streak_visit(&self, user_id: u64, now: DateTime<Local>) -> Result<VisitStats> {
        info!(user_id, "recording streak visit");

        let user = self
            .stores
            .users
            .update(user_id, &mut |u: &mut User| {
                u.engagement.record_visit(now);
            })?
            .ok_or_else(|| {
                warn!(user_id, "user not found for streak visit");
                CoreError::NotFound {
                    kind: User::KIND,
                    id: user_id,
                }
            })?;

        let stats = VisitStats {
            total_visits: user.engagement.total_visits,
            current_daily_streak: user.engagement.login_streak,
            best_streak: user.engagement.best_streak,
            last_visit_date: now.date_naive(),
        };
        debug!(
            user_id,
            streak = stats.current_daily_streak,
            total = stats.total_visits,
            "streak visit recorded"
        );

        achievements::note_streak(&self.stores, user_id, stats.current_daily_streak, now)?;
        Ok(stats)
    }

    /// Record a plain login: same streak transition, no visit counting.
    pub fn record_login(&self, user_id: u64, now: DateTime<Local>) -> Result<User> {
        let user = self
            .stores
            .users
            .update(user_id, &mut |u: &mut User| {
                u.engagement.record_login(now);
            })?
            .ok_or(CoreError::NotFound {
                kind: User::KIND,
                id: user_id,
            })?;
        debug!(user_id, streak = user.engagement.login_streak, "login recorded");
        Ok(user)
    }

    pub fn delete(&self, user_id: u64) -> Result<()> {
        if self.stores.users.delete(user_id)? {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                kind: User::KIND,
                id: user_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn service() -> UserService {
        UserService::new(Stores::in_memory())
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let svc = service();
        svc.create("penelope", None).unwrap();
        let err = svc.create("penelope", None).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateUsername(_)));
    }

    #[test]
    fn visit_on_unknown_user_is_not_found() {
        let svc = service();
        let err = svc.record_streak_visit(42, at(2025, 3, 1, 9)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { id: 42, .. }));
    }

    #[test]
    fn visit_persists_counters() {
        let svc = service();
        let user = svc.create("penelope", None).unwrap();

        let stats = svc.record_streak_visit(user.id, at(2025, 3, 1, 9)).unwrap();
        assert_eq!(stats.total_visits, 1);
        assert_eq!(stats.current_daily_streak, 1);

        let stored = svc.get(user.id).unwrap();
        assert_eq!(stored.engagement.total_visits, 1);
        assert_eq!(stored.engagement.last_login, Some(at(2025, 3, 1, 9)));
    }

    #[test]
    fn login_does_not_count_visits() {
        let svc = service();
        let user = svc.create("penelope", None).unwrap();

        let user = svc.record_login(user.id, at(2025, 3, 1, 9)).unwrap();
        assert_eq!(user.engagement.login_streak, 1);
        assert_eq!(user.engagement.total_visits, 0);
    }
}
