//! Task CRUD and completion flow.

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::model::{Task, TaskStatus, User};
use crate::store::{EntityRecord, Stores};

use super::achievements;

/// Task operations over the entity stores.
#[derive(Clone)]
pub struct TaskService {
    stores: Stores,
}

impl TaskService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Create a pending task for a user. The user must exist.
    pub fn create(&self, user_id: u64, title: &str, description: Option<String>) -> Result<Task> {
        if self.stores.users.get(user_id)?.is_none() {
            return Err(CoreError::NotFound {
                kind: User::KIND,
                id: user_id,
            });
        }
        let task = self
            .stores
            .tasks
            .insert(Task::new(user_id, title, description))?;
        info!(task_id = task.id, user_id, "created task");
        Ok(task)
    }

    pub fn get(&self, task_id: u64) -> Result<Task> {
        self.stores.tasks.get(task_id)?.ok_or(CoreError::NotFound {
            kind: Task::KIND,
            id: task_id,
        })
    }

    /// All tasks, optionally filtered to one user.
    pub fn list(&self, user_id: Option<u64>) -> Result<Vec<Task>> {
        let mut tasks = self.stores.tasks.all()?;
        if let Some(user_id) = user_id {
            tasks.retain(|t| t.user_id == user_id);
        }
        Ok(tasks)
    }

    /// Mark a task completed and advance the owner's total-tasks
    /// achievements. Completing an already-completed task changes
    /// nothing further.
    pub fn complete(&self, task_id: u64, now: DateTime<Local>) -> Result<Task> {
        let mut already_done = false;
        let task = self
            .stores
            .tasks
            .update(task_id, &mut |t: &mut Task| {
                if t.status == TaskStatus::Completed {
                    already_done = true;
                    return;
                }
                t.status = TaskStatus::Completed;
                t.completed_at = Some(now);
            })?
            .ok_or(CoreError::NotFound {
                kind: Task::KIND,
                id: task_id,
            })?;

        if !already_done {
            info!(task_id, user_id = task.user_id, "task completed");
            achievements::note_task_completed(&self.stores, task.user_id, now)?;
        }
        Ok(task)
    }

    pub fn delete(&self, task_id: u64) -> Result<()> {
        if self.stores.tasks.delete(task_id)? {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                kind: Task::KIND,
                id: task_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn setup() -> (TaskService, u64) {
        let stores = Stores::in_memory();
        let user = stores.users.insert(User::new("penelope", None)).unwrap();
        (TaskService::new(stores), user.id)
    }

    #[test]
    fn create_requires_existing_user() {
        let (svc, _) = setup();
        let err = svc.create(7, "water plants", None).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn complete_sets_status_and_timestamp() {
        let (svc, user_id) = setup();
        let task = svc.create(user_id, "water plants", None).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);

        let done = svc.complete(task.id, at(2025, 3, 1)).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.completed_at, Some(at(2025, 3, 1)));
    }

    #[test]
    fn completing_twice_is_idempotent() {
        let (svc, user_id) = setup();
        let task = svc.create(user_id, "water plants", None).unwrap();

        svc.complete(task.id, at(2025, 3, 1)).unwrap();
        let again = svc.complete(task.id, at(2025, 3, 5)).unwrap();

        // First completion timestamp wins.
        assert_eq!(again.completed_at, Some(at(2025, 3, 1)));
    }

    #[test]
    fn list_filters_by_user() {
        let (svc, user_id) = setup();
        let other = svc.stores.users.insert(User::new("quinn", None)).unwrap();
        svc.create(user_id, "a", None).unwrap();
        svc.create(other.id, "b", None).unwrap();

        assert_eq!(svc.list(Some(user_id)).unwrap().len(), 1);
        assert_eq!(svc.list(None).unwrap().len(), 2);
    }

    #[test]
    fn delete_unknown_task_is_not_found() {
        let (svc, _) = setup();
        assert!(matches!(
            svc.delete(99).unwrap_err(),
            CoreError::NotFound { .. }
        ));
    }
}
