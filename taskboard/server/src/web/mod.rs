use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use migration::MigratorTrait;
use sea_orm::ConnectOptions;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config;
use crate::database::ConnectionProvider;
use crate::task::web::{TaskState, create_task_router};

/// Custom error type for web handler operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error during template rendering.
    /// The specific `askama::Error` is captured as the source of this error.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let user_facing_error_message =
            "An unexpected error occurred while processing your request. Please try again later.";
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!(
                "<h1>Internal Server Error</h1><p>{}</p>",
                user_facing_error_message
            )),
        )
            .into_response()
    }
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let connections = Arc::new(ConnectionProvider::new(ConnectOptions::new(
        config.database_url(),
    )));
    let db = connections.connection().await?;
    migration::Migrator::up(db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let task_state = Arc::new(TaskState { connections });
    let app = create_router(task_state);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the full application: task pages, health check and request tracing.
pub fn create_router(task_state: Arc<TaskState>) -> Router {
    Router::new()
        .merge(create_task_router(task_state))
        .route("/health", axum::routing::get(health_check_handler))
        .fallback(not_found_handler)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
pub async fn not_found_handler() -> Result<(StatusCode, Html<String>), WebError> {
    let template = ErrorMessageTemplate::new(StatusCode::NOT_FOUND, "This page does not exist.");
    let rendered = template.render()?;
    Ok((StatusCode::NOT_FOUND, Html(rendered)))
}

#[derive(Template)]
#[template(path = "error_message.html")]
pub(crate) struct ErrorMessageTemplate {
    status: u16,
    reason: &'static str,
    message: &'static str,
}

impl ErrorMessageTemplate {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message,
        }
    }
}
