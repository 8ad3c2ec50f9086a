use crate::db::DbActorHandle;
use crate::notify::Notifier;
use crate::render::Pages;
use crate::server::guards::auth::RequireAdmin;
use crate::server::routes::{admin, contact, pages};

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Everything a handler may touch. Built once in `main` and cloned per request.
#[derive(Clone)]
pub struct LoongesState {
    pub db: DbActorHandle,
    pub notifier: Notifier,
    pub pages: Arc<Pages>,
    pub admin_password: Arc<str>,
}

impl LoongesState {
    pub fn new(
        db: DbActorHandle,
        notifier: Notifier,
        pages: Pages,
        admin_password: Arc<str>,
    ) -> Self {
        Self {
            db,
            notifier,
            pages: Arc::new(pages),
            admin_password,
        }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

struct AccessRecord<'a> {
    status: StatusCode,
    request_id: &'a str,
    method: &'a Method,
    version: Version,
    path: &'a str,
    latency_ms: u64,
    user_agent: &'a str,
}

impl AccessRecord<'_> {
    fn emit(&self) {
        let line = format!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            self.status.as_u16(),
            self.request_id,
            self.method.as_str(),
            format_http_version(self.version),
            self.path,
            self.latency_ms,
            self.user_agent
        );
        if self.status.is_server_error() {
            error!("{line}");
        } else if self.status.is_client_error() {
            warn!("{line}");
        } else {
            info!("{line}");
        }
    }
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    AccessRecord {
        status: resp.status(),
        request_id: &request_id,
        method: &method,
        version,
        path: uri.path(),
        latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        user_agent: &user_agent,
    }
    .emit();

    resp
}

pub fn loonges_router(state: LoongesState, static_dir: &Path) -> Router {
    let admin = admin::router().layer(middleware::from_extractor_with_state::<RequireAdmin, _>(
        state.clone(),
    ));

    Router::new()
        .merge(pages::router())
        .merge(contact::router())
        .merge(admin)
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
