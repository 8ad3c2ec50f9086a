//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the actor that owns the pool; all access goes through its handle

pub mod actor;
pub mod models;
pub mod schema;

pub use models::{ContactMessage, NewContactMessage};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
