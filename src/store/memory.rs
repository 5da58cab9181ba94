//! In-process store with the same observable semantics as the PostgreSQL
//! one: serial task ids, unique logins, one session per user and owner
//! foreign keys. Used when no `DATABASE_URL` is configured and by tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::{SessionRepository, StoreError, StoreResult, TaskRepository, UserRepository};
use crate::models::task::PAGE_SIZE;
use crate::models::{NewTask, Session, Task, TaskListQuery, TaskPatch, User};

#[derive(Debug, Default)]
struct State {
    next_task_id: i32,
    tasks: Vec<Task>,
    users: HashMap<Uuid, User>,
    sessions: HashMap<String, Session>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn task_mut(&mut self, id: i32) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn create(&self, owner: Uuid, task: &NewTask) -> StoreResult<Task> {
        let mut state = self.state();
        if !state.users.contains_key(&owner) {
            return Err(StoreError::ForeignKeyViolation);
        }

        state.next_task_id += 1;
        let created = Task {
            id: state.next_task_id,
            user_id: owner,
            header: task.header.clone(),
            description: task.description.clone(),
            created_at: Utc::now(),
            start_date: task.start_date,
            done: false,
        };
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Task> {
        self.state().task_mut(id).map(|task| task.clone())
    }

    async fn list_by_owner(&self, owner: Uuid, query: TaskListQuery) -> StoreResult<Vec<Task>> {
        let state = self.state();
        let matching = state
            .tasks
            .iter()
            .filter(|task| task.user_id == owner && query.matches(task));

        let tasks = match query.offset() {
            Some(offset) => matching
                .rev()
                .skip(offset.max(0) as usize)
                .take(PAGE_SIZE as usize)
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };
        Ok(tasks)
    }

    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        Ok(self.state().tasks.clone())
    }

    async fn update(&self, id: i32, patch: &TaskPatch) -> StoreResult<Task> {
        let mut state = self.state();
        let task = state.task_mut(id)?;
        patch.apply(task);
        Ok(task.clone())
    }

    async fn set_done(&self, id: i32, done: bool) -> StoreResult<Task> {
        let mut state = self.state();
        let task = state.task_mut(id)?;
        task.done = done;
        Ok(task.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut state = self.state();
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        if state.tasks.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> StoreResult<User> {
        let mut state = self.state();
        let taken = state
            .users
            .values()
            .any(|existing| existing.id == user.id || existing.login == user.login);
        if taken {
            return Err(StoreError::UniqueViolation);
        }
        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_login(&self, login: &str) -> StoreResult<User> {
        self.state()
            .users
            .values()
            .find(|user| user.login == login)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<User> {
        self.state()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> StoreResult<Session> {
        let mut state = self.state();
        if !state.users.contains_key(&session.user_id) {
            return Err(StoreError::ForeignKeyViolation);
        }
        let taken = state.sessions.contains_key(&session.token)
            || state
                .sessions
                .values()
                .any(|existing| existing.user_id == session.user_id);
        if taken {
            return Err(StoreError::UniqueViolation);
        }
        state
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(session.clone())
    }

    async fn upsert(&self, session: &Session) -> StoreResult<Session> {
        let mut state = self.state();
        if !state.users.contains_key(&session.user_id) {
            return Err(StoreError::ForeignKeyViolation);
        }
        state
            .sessions
            .retain(|_, existing| existing.user_id != session.user_id);
        state
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(session.clone())
    }

    async fn find_by_token(&self, token: &str) -> StoreResult<Session> {
        self.state()
            .sessions
            .get(token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<()> {
        self.state().sessions.remove(token);
        Ok(())
    }
}
