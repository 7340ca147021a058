//! Application state - Dependency injection container.
//!
//! Provides centralized access to the application services and the
//! database handle used by the health check.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{ReviewService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Review service
    pub review_service: Arc<dyn ReviewService>,
    /// Database connection, absent when services are injected directly
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            user_service: container.users(),
            review_service: container.reviews(),
            database: Some(database),
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, review_service: Arc<dyn ReviewService>) -> Self {
        Self {
            user_service,
            review_service,
            database: None,
        }
    }
}
