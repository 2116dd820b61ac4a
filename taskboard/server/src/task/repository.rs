use crate::entities::*;
use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::*;

use super::{Task, TaskError, TaskStatus};

/// Logs a failed statement and converts it into a `TaskError`.
fn report(operation: &'static str) -> impl FnOnce(DbErr) -> TaskError {
    move |err| {
        tracing::error!("Failed to {}: {}", operation, err);
        TaskError::Database(err)
    }
}

/// SQL access to the `tasks` table.
pub struct TaskRepository<'a> {
    db: &'a DatabaseConnection,
}

impl TaskRepository<'_> {
    pub fn new(db: &DatabaseConnection) -> TaskRepository<'_> {
        TaskRepository { db }
    }

    /// Inserts a new task with status `to-do`.
    ///
    /// # Arguments
    ///
    /// * `title` - The title of the task.
    /// * `description` - The description of the task.
    ///
    /// # Returns
    ///
    /// A `Result` containing the stored `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, title: String, description: String) -> Result<Task, TaskError> {
        let active_model = task::ActiveModel {
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(description),
            status: ActiveValue::Set(TaskStatus::ToDo),
            update_date: ActiveValue::Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        let created_model = active_model
            .insert(self.db)
            .await
            .map_err(report("create task"))?;
        Ok(Task::from(created_model))
    }

    /// Replaces title, description and status of the task with the given ID.
    ///
    /// `update_date` only moves when one of the fields actually changes, so
    /// repeating an update leaves the row untouched.
    ///
    /// # Returns
    ///
    /// A `Result` containing the number of affected rows, `0` when no task has this ID.
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        title: String,
        description: String,
        status: TaskStatus,
    ) -> Result<u64, TaskError> {
        let changed = Condition::any()
            .add(task::Column::Title.ne(title.clone()))
            .add(task::Column::Description.ne(description.clone()))
            .add(task::Column::Status.ne(status));
        let update_date: SimpleExpr =
            Expr::case(changed, Expr::value(Utc::now().fixed_offset()))
                .finally(Expr::col(task::Column::UpdateDate))
                .into();

        // Every right-hand side is evaluated against the row before the update.
        let result = task::Entity::update_many()
            .col_expr(task::Column::UpdateDate, update_date)
            .col_expr(task::Column::Title, Expr::value(title))
            .col_expr(task::Column::Description, Expr::value(description))
            .col_expr(task::Column::Status, Expr::value(status.as_value()))
            .filter(task::Column::Id.eq(id))
            .exec(self.db)
            .await
            .map_err(report("update task"))?;
        Ok(result.rows_affected)
    }

    /// Deletes the task with the given ID.
    ///
    /// # Returns
    ///
    /// A `Result` containing the number of affected rows, `0` when no task has this ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<u64, TaskError> {
        let result = task::Entity::delete_by_id(id)
            .exec(self.db)
            .await
            .map_err(report("delete task"))?;
        Ok(result.rows_affected)
    }

    /// Checks whether a task with the given ID exists.
    #[tracing::instrument(skip(self))]
    pub async fn exists_by_id(&self, id: i32) -> Result<bool, TaskError> {
        let count = task::Entity::find_by_id(id)
            .count(self.db)
            .await
            .map_err(report("check task existence"))?;
        Ok(count > 0)
    }

    /// Retrieves all tasks, `done` before `to-do`.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Task>, TaskError> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Status)
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await
            .map_err(report("list tasks"))?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Retrieves a single task. Callers check `exists_by_id` first.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Task>, TaskError> {
        let task = task::Entity::find_by_id(id)
            .one(self.db)
            .await
            .map_err(report("fetch task"))?;
        Ok(task.map(Task::from))
    }
}
