use sea_orm::DatabaseConnection;

use super::request::{CreateRequest, UpdateRequest};
use super::validation::{sanitize_id, valid_description, valid_title};
use super::{Task, TaskError, TaskRepository};

/// Validates task input and drives the repository for each user action.
pub struct TaskService<'a> {
    repository: TaskRepository<'a>,
}

impl TaskService<'_> {
    pub fn new(db: &DatabaseConnection) -> TaskService<'_> {
        TaskService {
            repository: TaskRepository::new(db),
        }
    }

    /// Creates a task from a create submission.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task`, or `InvalidTitle` / `InvalidDescription`
    /// without touching storage when the input is out of bounds.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, request: CreateRequest) -> Result<Task, TaskError> {
        check_fields(&request.title, &request.description)?;
        let task = self
            .repository
            .create(request.title, request.description)
            .await?;
        tracing::info!("Created task {}", task.id());
        Ok(task)
    }

    /// Replaces a task's fields from an update submission.
    ///
    /// # Arguments
    ///
    /// * `raw_id` - The task ID as found in the page's query string.
    /// * `request` - The submitted fields.
    ///
    /// # Returns
    ///
    /// A `Result` containing the sanitized ID. Updating an ID that does not
    /// resolve to a task is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, raw_id: &str, request: UpdateRequest) -> Result<i32, TaskError> {
        check_fields(&request.title, &request.description)?;
        let id = sanitize_id(raw_id);
        if id <= 0 {
            tracing::debug!("Skipping update for invalid ID {:?}", raw_id);
            return Ok(id);
        }
        let rows = self
            .repository
            .update(id, request.title, request.description, request.status)
            .await?;
        if rows == 0 {
            tracing::debug!("No task with ID {} to update", id);
        }
        Ok(id)
    }

    /// Deletes a task. Deleting an ID that does not resolve to a task is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, raw_id: &str) -> Result<i32, TaskError> {
        let id = sanitize_id(raw_id);
        if id <= 0 {
            tracing::debug!("Skipping delete for invalid ID {:?}", raw_id);
            return Ok(id);
        }
        let rows = self.repository.delete(id).await?;
        if rows > 0 {
            tracing::info!("Deleted task {}", id);
        }
        Ok(id)
    }

    /// Looks up the task to show on its own page.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Task`, or `TaskNotFound` when the ID does not
    /// resolve to one. Non-positive IDs are rejected without querying storage.
    #[tracing::instrument(skip(self))]
    pub async fn find_task(&self, raw_id: &str) -> Result<Task, TaskError> {
        let id = sanitize_id(raw_id);
        if id <= 0 || !self.repository.exists_by_id(id).await? {
            return Err(TaskError::TaskNotFound(id));
        }
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::TaskNotFound(id))
    }

    /// Retrieves every task, `done` before `to-do`.
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.repository.get_all().await
    }
}

fn check_fields(title: &str, description: &str) -> Result<(), TaskError> {
    if !valid_title(title) {
        return Err(TaskError::InvalidTitle);
    }
    if !valid_description(description) {
        return Err(TaskError::InvalidDescription);
    }
    Ok(())
}
