//! Actor API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use tracing::debug;

use super::dto::{ActorDto, CreateActorRequest, LoginRequest, LoginResponse, UpdateActorRequest};
use crate::application::ActorService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{parse_id, ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedActor;

#[derive(Clone)]
pub struct ActorHandlerState {
    pub service: Arc<ActorService>,
}

#[utoipa::path(
    post,
    path = "/actor",
    tag = "Actors",
    request_body = CreateActorRequest,
    responses(
        (status = 201, description = "Actor registered", body = ApiResponse<ActorDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_actor(
    State(state): State<ActorHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateActorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActorDto>>), ApiError> {
    let actor = state.service.register(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Success create actor",
            "Success register",
            ActorDto::from(actor),
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/actor/login",
    tag = "Actors",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued; also returned in the Authorization header", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<ActorHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(HeaderMap, Json<ApiResponse<LoginResponse>>), ApiError> {
    let result = state
        .service
        .login(&request.username, &request.password)
        .await?;

    let header_value = HeaderValue::from_str(&result.token)
        .map_err(|e| DomainError::Internal(format!("Token is not a valid header value: {}", e)))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, header_value);

    let response = LoginResponse {
        token: result.token,
        token_type: "Bearer".to_string(),
        expires_in: result.expires_in,
    };

    Ok((
        headers,
        Json(ApiResponse::success("Success login actor", "Success login", response)),
    ))
}

#[utoipa::path(
    get,
    path = "/actor/{id}",
    tag = "Actors",
    params(("id" = i32, Path, description = "Actor ID")),
    responses(
        (status = 200, description = "Actor found", body = ApiResponse<ActorDto>),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Actor not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_actor(
    State(state): State<ActorHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ActorDto>>, ApiError> {
    let id = parse_id(&id)?;
    let actor = state.service.get_actor(id).await?;
    Ok(Json(ApiResponse::success(
        "Success get actor",
        "Success",
        ActorDto::from(actor),
    )))
}

#[utoipa::path(
    put,
    path = "/actor/{id}",
    tag = "Actors",
    params(("id" = i32, Path, description = "Actor ID")),
    request_body = UpdateActorRequest,
    responses(
        (status = 200, description = "Actor updated", body = ApiResponse<ActorDto>),
        (status = 400, description = "Invalid id or body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Actor not found"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_actor(
    State(state): State<ActorHandlerState>,
    Extension(caller): Extension<AuthenticatedActor>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateActorRequest>,
) -> Result<Json<ApiResponse<ActorDto>>, ApiError> {
    let id = parse_id(&id)?;
    debug!(caller = %caller.username, actor_id = id, "Updating actor");
    let actor = state.service.update_actor(id, request.into()).await?;
    Ok(Json(ApiResponse::success(
        "Update",
        "Success update",
        ActorDto::from(actor),
    )))
}

#[utoipa::path(
    delete,
    path = "/actor/{username}",
    tag = "Actors",
    params(("username" = String, Path, description = "Username of the actor to delete")),
    responses(
        (status = 200, description = "Actor deleted", body = ApiResponse<EmptyData>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Actor not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_actor(
    State(state): State<ActorHandlerState>,
    Extension(caller): Extension<AuthenticatedActor>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    debug!(caller = %caller.username, %username, "Deleting actor");
    state.service.delete_actor(&username).await?;
    Ok(Json(ApiResponse::success("Delete", "Success delete", EmptyData {})))
}
