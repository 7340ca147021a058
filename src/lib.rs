//! Reviews API - users, reviews, review photos and comments over HTTP
//!
//! Requests flow through three layers, each behind a trait so the layer
//! below can be swapped or mocked.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, request DTOs and the password hashing port
//! - **services**: Use cases (user registration, reviews, comments)
//! - **infra**: Database connection, migrations and repositories
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Review, ReviewDetails, User};
pub use errors::{AppError, AppResult};
