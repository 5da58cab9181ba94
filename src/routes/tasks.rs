use crate::{
    app::AppState,
    auth::Identity,
    error::AppError,
    models::{datetime, NewTask, StatusUpdate, TaskFilter, TaskPatch},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

/// Query string of `GET /task/list`; every parameter is optional.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub status: Option<bool>,
    #[serde(default, deserialize_with = "datetime::option::deserialize")]
    pub datetime: Option<NaiveDateTime>,
}

impl From<ListQuery> for TaskFilter {
    fn from(query: ListQuery) -> Self {
        TaskFilter {
            page: query.page,
            done: query.status,
            date: query.datetime,
        }
    }
}

/// Query string of `GET /task/pagination`.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: u32,
    pub status: Option<bool>,
}

/// Query string of `GET /task/filter`.
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(deserialize_with = "datetime::deserialize")]
    pub datetime: NaiveDateTime,
    pub status: bool,
}

/// Lists the caller's tasks.
///
/// ## Query Parameters:
/// - `page` (optional): 1-based page of 3 tasks, newest first. `0` or absent lists everything.
/// - `status` (optional): `true` or `false` to match the completion flag.
/// - `datetime` (optional): exact start date, `DD.MM.YYYY HH:MM`.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `400 Bad Request`: a parameter could not be parsed.
/// - `404 Not Found`: nothing matched.
#[get("/list")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = state
        .tasks
        .user_tasks(identity.user_id, query.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Lists one page of the caller's tasks; `page` is required.
#[get("/pagination")]
pub async fn paginate_tasks(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PaginationQuery>,
) -> Result<impl Responder, AppError> {
    let filter = TaskFilter {
        page: Some(query.page),
        done: query.status,
        date: None,
    };
    let tasks = state.tasks.user_tasks(identity.user_id, filter).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Lists the caller's tasks whose start date equals `datetime` exactly and
/// whose completion flag equals `status`. Both parameters are required.
#[get("/filter")]
pub async fn filter_tasks(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<FilterQuery>,
) -> Result<impl Responder, AppError> {
    let filter = TaskFilter {
        page: None,
        done: Some(query.status),
        date: Some(query.datetime),
    };
    let tasks = state.tasks.user_tasks(identity.user_id, filter).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Every task of every user. Admins only.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, `[]` when there are none.
/// - `403 Forbidden`: the caller is not an admin.
#[get("/all")]
pub async fn all_tasks(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden("access denied".into()));
    }
    let tasks = state.tasks.all_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
///
/// ## Request Body:
/// - `header`: 1 to 200 characters.
/// - `description` (optional): up to 1000 characters.
/// - `start_date`: `DD.MM.YYYY HH:MM`.
///
/// ## Responses:
/// - `201 Created`: the new `Task`.
/// - `422 Unprocessable Entity`: a field fails validation.
#[post("/add")]
pub async fn create_task(
    state: web::Data<AppState>,
    identity: Identity,
    task_data: web::Json<NewTask>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state.tasks.create(&identity, task_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Overwrites the fields present in the body. Owner or admin only.
///
/// An empty string is a value: `{"header": ""}` clears the header.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `403 Forbidden`: the task belongs to someone else.
/// - `404 Not Found`: no task with this id.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    identity: Identity,
    task_id: web::Path<i32>,
    patch: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    patch.validate()?;
    let task_id = task_id.into_inner();

    state.tasks.authorize(&identity, task_id).await?;
    let task = state.tasks.update(task_id, patch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Marks a task done or not done. Owner or admin only.
#[put("/{id}/status")]
pub async fn set_task_status(
    state: web::Data<AppState>,
    identity: Identity,
    task_id: web::Path<i32>,
    status: web::Json<StatusUpdate>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    state.tasks.authorize(&identity, task_id).await?;
    let task = state.tasks.set_done(task_id, status.done).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task. Owner or admin only.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `403 Forbidden`: the task belongs to someone else.
/// - `404 Not Found`: no task with this id.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    identity: Identity,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    state.tasks.authorize(&identity, task_id).await?;
    state.tasks.delete(task_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
