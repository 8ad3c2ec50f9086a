pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod notify;
pub mod render;
pub mod server;

pub use error::LoongesError;
