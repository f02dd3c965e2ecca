//! # CRM Service
//!
//! REST backend for actor accounts and customer records, with bcrypt
//! password storage and JWT bearer authentication on actor routes.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: actor and customer use cases
//! - **infrastructure**: crypto (bcrypt, JWT), SeaORM persistence, in-memory storage
//! - **interfaces**: axum HTTP API with Swagger documentation
//! - **server**: runtime wiring, tracing and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;
