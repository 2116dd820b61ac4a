use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use sea_orm::Iterable;
use std::sync::Arc;

use super::request::{CreateRequest, TaskForm, UpdateRequest};
use super::{Task, TaskError, TaskService, TaskStatus};
use crate::database::ConnectionProvider;
use crate::web::ErrorMessageTemplate;

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    id: Option<String>,
}

impl TaskQuery {
    fn raw_id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// Custom error type for task page handlers.
#[derive(Debug, thiserror::Error)]
enum TaskPageError {
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// Represents a task service error.
    #[error("Task service error: {0}")]
    Service(#[from] TaskError),
}

impl IntoResponse for TaskPageError {
    fn into_response(self) -> Response {
        let (status_code, user_facing_error_message) = match &self {
            TaskPageError::Service(TaskError::InvalidTitle) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The title must be between 1 and 20 characters long.",
            ),
            TaskPageError::Service(TaskError::InvalidDescription) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The description must be between 1 and 500 characters long.",
            ),
            TaskPageError::Service(TaskError::TaskNotFound(_)) => (
                StatusCode::NOT_FOUND,
                "This task was deleted or the ID is invalid.",
            ),
            TaskPageError::Service(TaskError::ConnectionFailure(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The task database is unavailable. Please try again later.",
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred while processing your request. Please try again later.",
            ),
        };
        if status_code.is_server_error() {
            tracing::error!("Task request failed: {}", self);
        }

        let error_template = ErrorMessageTemplate::new(status_code, user_facing_error_message);
        let Ok(rendered) = error_template.render() else {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };
        (status_code, Html(rendered)).into_response()
    }
}

#[derive(Clone, Debug)]
pub struct TaskState {
    pub connections: Arc<ConnectionProvider>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    cards: String,
}

#[derive(Template)]
#[template(path = "task.html")]
struct TaskPageTemplate {
    form: String,
}

#[derive(Template)]
#[template(path = "tasks/task_cards.html")]
struct TaskCardsTemplate<'a> {
    tasks: &'a [Task],
}

/// One entry of the status drop-down on the edit form.
struct StatusOption {
    value: String,
    label: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "tasks/task_form.html")]
struct TaskFormTemplate<'a> {
    task: &'a Task,
    status_options: Vec<StatusOption>,
}

impl<'a> TaskFormTemplate<'a> {
    fn new(task: &'a Task) -> Self {
        let status_options = TaskStatus::iter()
            .map(|status| StatusOption {
                value: status.as_value(),
                label: status.label(),
                selected: status == task.status(),
            })
            .collect();
        Self {
            task,
            status_options,
        }
    }
}

/// Renders every task as a summary card coloured by its status.
pub fn render_task_cards(tasks: &[Task]) -> askama::Result<String> {
    TaskCardsTemplate { tasks }.render()
}

/// Renders the edit/delete form of a single task.
pub fn render_task_form(task: &Task) -> askama::Result<String> {
    TaskFormTemplate::new(task).render()
}

fn render_index(tasks: &[Task]) -> Result<Html<String>, TaskPageError> {
    let cards = render_task_cards(tasks)?;
    let page = IndexTemplate { cards }.render()?;
    Ok(Html(page))
}

fn render_task_page(task: &Task) -> Result<Html<String>, TaskPageError> {
    let form = render_task_form(task)?;
    let page = TaskPageTemplate { form }.render()?;
    Ok(Html(page))
}

/// Treats an unreadable body as an empty submission.
fn submitted_form(form: Result<Form<TaskForm>, FormRejection>) -> TaskForm {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Ignoring unreadable form submission: {}", rejection);
            TaskForm::default()
        }
    }
}

/// Handler for GET / that displays the create form and all tasks.
#[tracing::instrument(skip(state))]
async fn index_handler(State(state): State<Arc<TaskState>>) -> Result<Html<String>, TaskPageError> {
    let db = state.connections.connection().await?;
    let task_service = TaskService::new(db);
    let tasks = task_service.list_tasks().await?;
    render_index(&tasks)
}

/// Handler for POST / that creates a task and redirects to the listing.
#[tracing::instrument(skip(state))]
async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Result<Response, TaskPageError> {
    let form = submitted_form(form);
    let db = state.connections.connection().await?;
    let task_service = TaskService::new(db);

    if let Some(request) = CreateRequest::from_form(&form) {
        task_service.create_task(request).await?;
        return Ok(Redirect::to("/").into_response());
    }

    let tasks = task_service.list_tasks().await?;
    Ok(render_index(&tasks)?.into_response())
}

/// Handler for GET /task?id=N that displays the edit form of one task.
#[tracing::instrument(skip(state))]
async fn task_handler(
    State(state): State<Arc<TaskState>>,
    Query(query): Query<TaskQuery>,
) -> Result<Html<String>, TaskPageError> {
    let db = state.connections.connection().await?;
    let task_service = TaskService::new(db);
    let task = task_service.find_task(query.raw_id()).await?;
    render_task_page(&task)
}

/// Handler for POST /task?id=N that updates or deletes the task.
///
/// An update redirects back to the task page, a delete to the listing.
#[tracing::instrument(skip(state))]
async fn task_submission_handler(
    State(state): State<Arc<TaskState>>,
    Query(query): Query<TaskQuery>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Result<Response, TaskPageError> {
    let form = submitted_form(form);
    let db = state.connections.connection().await?;
    let task_service = TaskService::new(db);

    if let Some(request) = UpdateRequest::from_form(&form) {
        let id = task_service.update_task(query.raw_id(), request).await?;
        return Ok(Redirect::to(&format!("/task?id={}", id)).into_response());
    }

    if form.is_delete() {
        task_service.delete_task(query.raw_id()).await?;
        return Ok(Redirect::to("/").into_response());
    }

    let task = task_service.find_task(query.raw_id()).await?;
    Ok(render_task_page(&task)?.into_response())
}

/// Creates and returns the task router with the listing and task pages.
pub fn create_task_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(create_task_handler))
        .route("/task", get(task_handler).post(task_submission_handler))
        .with_state(state)
}
