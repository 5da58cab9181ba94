use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::task_query;
use crate::auth::Identity;
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskFilter, TaskPatch};
use crate::store::{StoreError, TaskRepository};

/// Task operations on behalf of an already authenticated caller.
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, identity: &Identity, task: NewTask) -> Result<Task, AppError> {
        let created = self.repo.create(identity.user_id, &task).await?;
        info!("Task {} created by user {}", created.id, identity.user_id);
        Ok(created)
    }

    /// Overwrites only the fields present in `patch`. An empty patch returns
    /// the stored task unchanged.
    pub async fn update(&self, task_id: i32, patch: TaskPatch) -> Result<Task, AppError> {
        self.repo
            .update(task_id, &patch)
            .await
            .map_err(|e| task_error(e, task_id))
    }

    pub async fn delete(&self, task_id: i32) -> Result<(), AppError> {
        self.repo
            .delete(task_id)
            .await
            .map_err(|e| task_error(e, task_id))?;
        info!("Task {} deleted", task_id);
        Ok(())
    }

    pub async fn set_done(&self, task_id: i32, done: bool) -> Result<Task, AppError> {
        self.repo
            .set_done(task_id, done)
            .await
            .map_err(|e| task_error(e, task_id))
    }

    /// Tasks of `user_id` selected by `filter`. A listing that matches
    /// nothing is reported as not found.
    pub async fn user_tasks(&self, user_id: Uuid, filter: TaskFilter) -> Result<Vec<Task>, AppError> {
        let query = task_query::resolve(&filter);
        debug!("Listing tasks of user {} with {:?}", user_id, query);

        let tasks = self.repo.list_by_owner(user_id, query).await?;
        if tasks.is_empty() {
            return Err(AppError::NotFound("Tasks not found".into()));
        }
        Ok(tasks)
    }

    /// Every stored task; an empty store is an empty list.
    pub async fn all_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = self.repo.list_all().await?;
        Ok(tasks)
    }

    /// `Ok(false)` when the task exists but belongs to someone else.
    pub async fn is_owner(&self, user_id: Uuid, task_id: i32) -> Result<bool, AppError> {
        let task = self
            .repo
            .find_by_id(task_id)
            .await
            .map_err(|e| task_error(e, task_id))?;
        Ok(task.user_id == user_id)
    }

    /// Admins may touch any task; everyone else only their own.
    pub async fn authorize(&self, identity: &Identity, task_id: i32) -> Result<(), AppError> {
        if identity.is_admin() {
            return Ok(());
        }
        if !self.is_owner(identity.user_id, task_id).await? {
            return Err(AppError::Forbidden("access denied".into()));
        }
        Ok(())
    }
}

fn task_error(error: StoreError, task_id: i32) -> AppError {
    match error {
        StoreError::NotFound => AppError::NotFound(format!("Task {} not found", task_id)),
        other => other.into(),
    }
}
