//! LocalLibrary Catalog Server
//!
//! A Rust implementation of the LocalLibrary catalog service, providing a
//! REST JSON API for browsing books, authors and copies, and for managing
//! loans. Handlers return context objects for an external presentation
//! layer and issue redirects after successful mutations.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
