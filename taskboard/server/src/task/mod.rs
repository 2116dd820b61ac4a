use crate::entities::*;
use chrono::{DateTime, FixedOffset};
use sea_orm::{ActiveEnum, Iterable};

pub mod repository;
pub mod request;
pub mod service;
pub mod validation;
pub mod web;

pub use crate::entities::sea_orm_active_enums::TaskStatus;
pub use repository::TaskRepository;
pub use service::TaskService;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Task {
    id: i32,
    title: String,
    description: String,
    status: TaskStatus,
    update_date: DateTime<FixedOffset>,
}

impl Task {
    pub fn new(
        id: i32,
        title: String,
        description: String,
        status: TaskStatus,
        update_date: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            update_date,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the title of the task.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description of the task.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status of the task.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the time of the last write to the task.
    pub fn update_date(&self) -> DateTime<FixedOffset> {
        self.update_date
    }

    /// Returns the last write time formatted for display.
    pub fn edited_at(&self) -> String {
        self.update_date.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(
            model.id,
            model.title,
            model.description,
            model.status,
            model.update_date,
        )
    }
}

/// Display attributes of a status.
#[derive(Debug, PartialEq, Eq)]
pub struct StatusStyle {
    pub status: TaskStatus,
    pub color: &'static str,
    pub label: &'static str,
}

/// Indexed by `TaskStatus as usize`.
const STATUS_STYLES: [StatusStyle; 2] = [
    StatusStyle {
        status: TaskStatus::ToDo,
        color: "#ff8181",
        label: "To do",
    },
    StatusStyle {
        status: TaskStatus::Done,
        color: "#60c088",
        label: "Done",
    },
];

impl TaskStatus {
    pub fn style(self) -> &'static StatusStyle {
        &STATUS_STYLES[self as usize]
    }

    /// Background colour used when rendering a task with this status.
    pub fn color(self) -> &'static str {
        self.style().color
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        self.style().label
    }

    /// Value stored in the database and submitted by forms.
    pub fn as_value(self) -> String {
        self.to_value()
    }

    /// Parses a submitted form value (`to-do` or `done`).
    pub fn from_value(value: &str) -> Option<Self> {
        TaskStatus::iter().find(|status| status.to_value() == value)
    }
}

/// Error type for task operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The title is empty or longer than 20 characters.
    #[error("Title must be between 1 and 20 characters")]
    InvalidTitle,
    /// The description is empty or longer than 500 characters.
    #[error("Description must be between 1 and 500 characters")]
    InvalidDescription,
    #[error("Task with ID {0} not found")]
    TaskNotFound(i32),
    /// The database could not be reached.
    #[error("Database connection failed: {0}")]
    ConnectionFailure(#[source] sea_orm::DbErr),
    /// A statement failed on a live connection.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
