//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, EmptyData};
use super::middleware::{auth_middleware, AuthState};
use super::modules::actors::{self, ActorHandlerState};
use super::modules::customers::{self, CustomerHandlerState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use crate::application::{ActorService, CustomerService};

/// Everything the HTTP layer needs. Handlers pull their own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub actors: Arc<ActorService>,
    pub customers: Arc<CustomerService>,
    pub auth: AuthState,
    pub health: HealthState,
    pub metrics: MetricsState,
}

impl FromRef<AppState> for ActorHandlerState {
    fn from_ref(s: &AppState) -> Self {
        ActorHandlerState {
            service: Arc::clone(&s.actors),
        }
    }
}

impl FromRef<AppState> for CustomerHandlerState {
    fn from_ref(s: &AppState) -> Self {
        CustomerHandlerState {
            service: Arc::clone(&s.customers),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        s.metrics.clone()
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /actor/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        actors::create_actor,
        actors::login,
        actors::get_actor,
        actors::update_actor,
        actors::delete_actor,
        customers::create_customer,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            actors::CreateActorRequest,
            actors::LoginRequest,
            actors::LoginResponse,
            actors::UpdateActorRequest,
            actors::ActorDto,
            customers::CreateCustomerRequest,
            customers::UpdateCustomerRequest,
            customers::CustomerDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Actors", description = "Actor accounts: registration, login (JWT) and management"),
        (name = "Customers", description = "Customer records"),
    ),
    info(
        title = "CRM Service API",
        version = "1.0.0",
        description = "REST API for actor accounts and customer records",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the full application router.
pub fn create_api_router(state: AppState) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.auth.clone(), auth_middleware);

    // GET/PUT address the actor by numeric id; DELETE reads the same
    // segment as a username.
    let protected_actor_routes = Router::new()
        .route(
            "/actor/{id}",
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .route_layer(auth_layer);

    let public_actor_routes = Router::new()
        .route("/actor", post(actors::create_actor))
        .route("/actor/login", post(actors::login));

    let customer_routes = Router::new()
        .route("/customer", post(customers::create_customer))
        .route(
            "/customer/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .merge(public_actor_routes)
        .merge(protected_actor_routes)
        .merge(customer_routes)
        .with_state(state)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
