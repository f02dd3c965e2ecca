//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, validated JSON
//! - `middleware`: bearer-token authentication
//! - `modules`: handlers and DTOs per resource, plus health/metrics/request-id
//! - `router`: route table and Swagger UI

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use common::{ApiError, ApiResponse};
pub use middleware::{auth_middleware, AuthState, AuthenticatedActor};
pub use router::{create_api_router, ApiDoc, AppState};
