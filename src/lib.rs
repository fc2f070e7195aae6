pub mod auth;
pub mod config;
mod db;
pub mod error;
pub mod migrate;
pub mod observability;
pub mod routes;

pub use db::*;
pub use routes::{AppState, router};
