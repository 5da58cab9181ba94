use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{StoreError, StoreResult, TaskRepository};
use crate::models::task::PAGE_SIZE;
use crate::models::{NewTask, Task, TaskListQuery, TaskPatch};

const TASK_COLUMNS: &str = "id, id_user, header, description, created_at, start_date, done";

#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds the `SELECT` for one listing variant.
fn list_query(owner: Uuid, query: TaskListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM task WHERE id_user = ",
        TASK_COLUMNS
    ));
    builder.push_bind(owner);

    if let Some(done) = query.done() {
        builder.push(" AND done = ").push_bind(done);
    }
    if let Some(date) = query.date() {
        builder.push(" AND start_date = ").push_bind(date);
    }

    match query.offset() {
        Some(offset) => {
            builder
                .push(" ORDER BY id DESC LIMIT ")
                .push_bind(PAGE_SIZE)
                .push(" OFFSET ")
                .push_bind(offset);
        }
        None => {
            builder.push(" ORDER BY id");
        }
    }

    builder
}

/// Builds the `UPDATE` for a non-empty patch.
fn update_query(id: i32, patch: &TaskPatch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE task SET ");
    {
        let mut fields = builder.separated(", ");
        if let Some(header) = &patch.header {
            fields.push("header = ").push_bind_unseparated(header.clone());
        }
        if let Some(description) = &patch.description {
            fields
                .push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(start_date) = patch.start_date {
            fields.push("start_date = ").push_bind_unseparated(start_date);
        }
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(format!(" RETURNING {}", TASK_COLUMNS));
    builder
}

#[async_trait]
impl TaskRepository for PgTaskStore {
    async fn create(&self, owner: Uuid, task: &NewTask) -> StoreResult<Task> {
        let sql = format!(
            "INSERT INTO task (id_user, header, description, start_date) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            TASK_COLUMNS
        );
        let created = sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .bind(&task.header)
            .bind(&task.description)
            .bind(task.start_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Task> {
        let sql = format!("SELECT {} FROM task WHERE id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn list_by_owner(&self, owner: Uuid, query: TaskListQuery) -> StoreResult<Vec<Task>> {
        let mut builder = list_query(owner, query);
        let tasks = builder
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        let sql = format!("SELECT {} FROM task ORDER BY id", TASK_COLUMNS);
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn update(&self, id: i32, patch: &TaskPatch) -> StoreResult<Task> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut builder = update_query(id, patch);
        let task = builder
            .build_query_as::<Task>()
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn set_done(&self, id: i32, done: bool) -> StoreResult<Task> {
        let sql = format!(
            "UPDATE task SET done = $1 WHERE id = $2 RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(done)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM task WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
