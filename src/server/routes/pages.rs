use crate::catalog;
use crate::error::LoongesError;
use crate::server::router::LoongesState;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use minijinja::context;

pub fn router() -> Router<LoongesState> {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/products", get(products))
        .route("/product/{id}", get(product_detail))
        .route("/factory", get(factory))
}

async fn index(State(state): State<LoongesState>) -> Result<Html<String>, LoongesError> {
    state.pages.render("index.html", context! {})
}

async fn about(State(state): State<LoongesState>) -> Result<Html<String>, LoongesError> {
    state.pages.render("about.html", context! {})
}

async fn factory(State(state): State<LoongesState>) -> Result<Html<String>, LoongesError> {
    state.pages.render("factory.html", context! {})
}

async fn products(State(state): State<LoongesState>) -> Result<Html<String>, LoongesError> {
    state
        .pages
        .render("products.html", context! { products => catalog::all() })
}

/// Accepts only unsigned decimal digits, so `-1`, `+1` and `abc` do not
/// address a product at all.
fn parse_product_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// GET /product/{id}
///
/// Segments that are not a non-negative integer are 404. Integers missing
/// from the catalog render the default entry.
async fn product_detail(
    State(state): State<LoongesState>,
    Path(raw_id): Path<String>,
) -> Result<Response, LoongesError> {
    let Some(id) = parse_product_id(&raw_id) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let product = catalog::find(id);
    Ok(state
        .pages
        .render("product_detail.html", context! { product })?
        .into_response())
}
