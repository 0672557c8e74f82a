//! Achievement catalogue and progress updates.
//!
//! Streak-kind achievements mirror the user's daily streak on every
//! visit; total-tasks-kind achievements advance on each completed
//! task. Progress helpers are called from the user and task services
//! so completion happens in the same flow as the triggering event.

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::model::{Achievement, AchievementKind};
use crate::store::{EntityRecord, Stores};

/// Achievement operations over the entity stores.
#[derive(Clone)]
pub struct AchievementService {
    stores: Stores,
}

impl AchievementService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Create an achievement for a user. The user must exist.
    pub fn create(&self, achievement: Achievement) -> Result<Achievement> {
        let user_id = achievement.user_id;
        if self.stores.users.get(user_id)?.is_none() {
            return Err(CoreError::NotFound {
                kind: crate::model::User::KIND,
                id: user_id,
            });
        }
        let achievement = self.stores.achievements.insert(achievement)?;
        info!(
            achievement_id = achievement.id,
            user_id, "created achievement"
        );
        Ok(achievement)
    }

    pub fn get(&self, achievement_id: u64) -> Result<Achievement> {
        self.stores
            .achievements
            .get(achievement_id)?
            .ok_or(CoreError::NotFound {
                kind: Achievement::KIND,
                id: achievement_id,
            })
    }

    /// All achievements, optionally filtered to one user.
    pub fn list(&self, user_id: Option<u64>) -> Result<Vec<Achievement>> {
        let mut achievements = self.stores.achievements.all()?;
        if let Some(user_id) = user_id {
            achievements.retain(|a| a.user_id == user_id);
        }
        Ok(achievements)
    }
}

/// Mirror a user's streak into their open streak achievements and
/// complete any whose target is reached.
pub(crate) fn note_streak(
    stores: &Stores,
    user_id: u64,
    streak: u32,
    now: DateTime<Local>,
) -> Result<()> {
    for achievement in stores.achievements.all()? {
        if achievement.user_id != user_id
            || achievement.kind != AchievementKind::Streak
            || achievement.is_completed
        {
            continue;
        }
        stores
            .achievements
            .update(achievement.id, &mut |a: &mut Achievement| {
                a.current_streak = streak;
                if let Some(required) = a.streak_required {
                    if streak >= required {
                        a.is_completed = true;
                        a.completed_at = Some(now);
                    }
                }
            })?;
    }
    Ok(())
}

/// Advance a user's open total-tasks achievements by one completion.
pub(crate) fn note_task_completed(
    stores: &Stores,
    user_id: u64,
    now: DateTime<Local>,
) -> Result<()> {
    for achievement in stores.achievements.all()? {
        if achievement.user_id != user_id
            || achievement.kind != AchievementKind::TotalTasks
            || achievement.is_completed
        {
            continue;
        }
        stores
            .achievements
            .update(achievement.id, &mut |a: &mut Achievement| {
                a.total_completed += 1;
                if let Some(required) = a.total_required {
                    if a.total_completed >= required {
                        a.is_completed = true;
                        a.completed_at = Some(now);
                    }
                }
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn setup() -> (Stores, u64) {
        let stores = Stores::in_memory();
        let user = stores.users.insert(User::new("penelope", None)).unwrap();
        (stores, user.id)
    }

    #[test]
    fn create_requires_existing_user() {
        let stores = Stores::in_memory();
        let svc = AchievementService::new(stores);
        let err = svc
            .create(Achievement::streak(9, "Week", "7 in a row", 7))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn streak_target_completes_achievement() {
        let (stores, user_id) = setup();
        let svc = AchievementService::new(stores.clone());
        let ach = svc
            .create(Achievement::streak(user_id, "Three", "3 in a row", 3))
            .unwrap();

        note_streak(&stores, user_id, 2, at(2025, 3, 2)).unwrap();
        assert!(!svc.get(ach.id).unwrap().is_completed);

        note_streak(&stores, user_id, 3, at(2025, 3, 3)).unwrap();
        let done = svc.get(ach.id).unwrap();
        assert!(done.is_completed);
        assert_eq!(done.current_streak, 3);
        assert_eq!(done.completed_at, Some(at(2025, 3, 3)));
    }

    #[test]
    fn completed_achievements_are_left_alone() {
        let (stores, user_id) = setup();
        let svc = AchievementService::new(stores.clone());
        let ach = svc
            .create(Achievement::streak(user_id, "One", "first day", 1))
            .unwrap();

        note_streak(&stores, user_id, 1, at(2025, 3, 1)).unwrap();
        note_streak(&stores, user_id, 5, at(2025, 3, 5)).unwrap();

        // current_streak froze at completion time.
        assert_eq!(svc.get(ach.id).unwrap().current_streak, 1);
    }

    #[test]
    fn task_totals_advance_and_complete() {
        let (stores, user_id) = setup();
        let svc = AchievementService::new(stores.clone());
        let ach = svc
            .create(Achievement::total_tasks(user_id, "Two", "2 tasks", 2))
            .unwrap();

        note_task_completed(&stores, user_id, at(2025, 3, 1)).unwrap();
        assert!(!svc.get(ach.id).unwrap().is_completed);

        note_task_completed(&stores, user_id, at(2025, 3, 1)).unwrap();
        let done = svc.get(ach.id).unwrap();
        assert!(done.is_completed);
        assert_eq!(done.total_completed, 2);
    }
}
