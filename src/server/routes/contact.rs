use crate::db::NewContactMessage;
use crate::error::LoongesError;
use crate::server::router::LoongesState;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use minijinja::context;
use serde::Deserialize;
use thiserror::Error as ThisError;
use tracing::debug;

pub fn router() -> Router<LoongesState> {
    Router::new().route("/contact", get(contact_page).post(contact_submit))
}

/// Raw form fields. Absent fields deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Email is required.")]
    EmailRequired,
    #[error("Message is required.")]
    MessageRequired,
}

impl ContactForm {
    /// Presence check only, in the order name, email, message; the first
    /// empty field is the one reported. Whitespace counts as content.
    pub fn validate(self) -> Result<NewContactMessage, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if self.message.is_empty() {
            return Err(ValidationError::MessageRequired);
        }
        Ok(NewContactMessage {
            name: self.name,
            email: self.email,
            message: self.message,
        })
    }
}

async fn contact_page(State(state): State<LoongesState>) -> Result<Html<String>, LoongesError> {
    state.pages.render("contact.html", context! {})
}

/// POST /contact
///
/// Valid submissions are stored, a notification is attempted, and the client
/// is sent back to the form. The mail outcome never changes the response.
/// Invalid submissions re-render the empty form; the validation message is
/// only logged.
async fn contact_submit(
    State(state): State<LoongesState>,
    Form(form): Form<ContactForm>,
) -> Result<Response, LoongesError> {
    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => {
            debug!(error = %e, "contact form rejected");
            return Ok(contact_page(State(state)).await?.into_response());
        }
    };

    let stored = state.db.insert_message(new).await?;
    state.notifier.notify(&stored).await;

    Ok(Redirect::to("/contact").into_response())
}
