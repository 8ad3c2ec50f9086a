//! Message inbox. Every route here sits behind [`RequireAdmin`].
//!
//! [`RequireAdmin`]: crate::server::guards::auth::RequireAdmin

use crate::error::LoongesError;
use crate::server::router::LoongesState;
use axum::{
    Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use minijinja::context;
use tracing::info;

pub const MESSAGES_PATH: &str = "/admin/messages";

pub fn router() -> Router<LoongesState> {
    Router::new()
        .route(MESSAGES_PATH, get(list_messages))
        .route("/admin/messages/delete/{id}", post(delete_message))
}

/// GET /admin/messages — all messages, newest first.
async fn list_messages(State(state): State<LoongesState>) -> Result<Html<String>, LoongesError> {
    let messages = state.db.list_messages().await?;
    state
        .pages
        .render("admin_messages.html", context! { messages })
}

/// POST /admin/messages/delete/{id}
///
/// Same redirect whether or not the row existed.
async fn delete_message(
    State(state): State<LoongesState>,
    Path(id): Path<i64>,
) -> Result<Redirect, LoongesError> {
    let removed = state.db.delete_message(id).await?;
    info!(id, removed, "contact message delete requested");
    Ok(Redirect::to(MESSAGES_PATH))
}
