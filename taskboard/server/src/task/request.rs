use serde::Deserialize;

use super::TaskStatus;

/// Raw fields of a task form submission.
///
/// Every field is optional: which submit button was pressed decides which
/// record, if any, can be derived from it.
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "submit-create")]
    pub submit_create: Option<String>,
    #[serde(rename = "submit-update")]
    pub submit_update: Option<String>,
    #[serde(rename = "submit-delete")]
    pub submit_delete: Option<String>,
}

impl TaskForm {
    pub fn is_delete(&self) -> bool {
        self.submit_delete.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
}

impl CreateRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Derives a create record from a form sent with the `submit-create` button.
    ///
    /// Returns `None` when the button was not pressed or a field is missing.
    pub fn from_form(form: &TaskForm) -> Option<Self> {
        form.submit_create.as_ref()?;
        Some(Self {
            title: sanitize_text(form.title.as_deref()?),
            description: sanitize_text(form.description.as_deref()?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl UpdateRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
        }
    }

    /// Derives an update record from a form sent with the `submit-update` button.
    ///
    /// Returns `None` when the button was not pressed, a field is missing or
    /// the status is not a known value.
    pub fn from_form(form: &TaskForm) -> Option<Self> {
        form.submit_update.as_ref()?;
        let status = form.status.as_deref().map(str::trim)?;
        let Some(status) = TaskStatus::from_value(status) else {
            tracing::warn!("Ignoring update with unknown status {:?}", status);
            return None;
        };
        Some(Self {
            title: sanitize_text(form.title.as_deref()?),
            description: sanitize_text(form.description.as_deref()?),
            status,
        })
    }
}

/// Trims surrounding whitespace and drops control characters, keeping line breaks and tabs.
///
/// HTML escaping happens when templates render, not here.
pub fn sanitize_text(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
