#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use base64::Engine as _;
use loonges::db::DbActorHandle;
use loonges::error::MailError;
use loonges::notify::{Mailer, Notification, Notifier};
use loonges::render::Pages;
use loonges::server::router::{LoongesState, loonges_router};
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "s3cret-inbox";
pub const MAILBOX: &str = "inbox@loonges.test";

/// Records every notification it is asked to deliver.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Records every attempt and fails it.
#[derive(Default)]
pub struct FailingMailer {
    pub attempts: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        self.attempts.lock().unwrap().push(notification.clone());
        let err = "unreachable-relay"
            .parse::<lettre::Address>()
            .expect_err("address without @ must not parse");
        Err(MailError::Address(err))
    }
}

pub fn temp_database(tag: &str) -> (PathBuf, String) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "loonges-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let database_url = format!("sqlite:{}", temp_path.display());
    (temp_path, database_url)
}

pub fn remove_database(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

pub struct TestApp {
    pub app: Router,
    pub db: DbActorHandle,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn(tag: &str, mailer: Arc<dyn Mailer>) -> Self {
        let (db_path, database_url) = temp_database(tag);
        let db = loonges::db::spawn(&database_url)
            .await
            .expect("failed to spawn DbActor");

        let state = LoongesState::new(
            db.clone(),
            Notifier::new(mailer, MAILBOX),
            Pages::new().expect("templates compile"),
            Arc::from(ADMIN_PASSWORD),
        );
        let app = loonges_router(state, Path::new("static"));

        Self { app, db, db_path }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        remove_database(&self.db_path);
    }
}

pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

pub fn contact_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn get_as_admin(uri: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", basic_auth("admin", password))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn post_as_admin(uri: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", basic_auth("admin", password))
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}
