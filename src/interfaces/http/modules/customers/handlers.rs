//! Customer API handlers (unauthenticated)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateCustomerRequest, CustomerDto, UpdateCustomerRequest};
use crate::application::CustomerService;
use crate::interfaces::http::common::{parse_id, ApiError, ApiResponse, EmptyData, ValidatedJson};

#[derive(Clone)]
pub struct CustomerHandlerState {
    pub service: Arc<CustomerService>,
}

#[utoipa::path(
    post,
    path = "/customer",
    tag = "Customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_customer(
    State(state): State<CustomerHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerDto>>), ApiError> {
    let customer = state.service.create_customer(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Success create customer",
            "Success",
            CustomerDto::from(customer),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/customer/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = ApiResponse<CustomerDto>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<CustomerHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CustomerDto>>, ApiError> {
    let customer = state.service.get_customer(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(
        "Success get customer",
        "Success",
        CustomerDto::from(customer),
    )))
}

#[utoipa::path(
    put,
    path = "/customer/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerDto>),
        (status = 400, description = "Invalid id or body"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    State(state): State<CustomerHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerDto>>, ApiError> {
    let id = parse_id(&id)?;
    let customer = state.service.update_customer(id, request.into()).await?;
    Ok(Json(ApiResponse::success(
        "Update",
        "Success update",
        CustomerDto::from(customer),
    )))
}

#[utoipa::path(
    delete,
    path = "/customer/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted", body = ApiResponse<EmptyData>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn delete_customer(
    State(state): State<CustomerHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state.service.delete_customer(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success("Delete", "Success delete", EmptyData {})))
}
