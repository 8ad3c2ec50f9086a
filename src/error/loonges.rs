use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum LoongesError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),
}

impl IntoResponse for LoongesError {
    fn into_response(self) -> Response {
        // Storage, actor and template failures all surface as a bare 500;
        // the detail stays in the log.
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal server error occurred.",
        )
            .into_response()
    }
}
