//! User management API handlers
//!
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension,
};

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::interfaces::http::common::{
    created, ok, record_id, ApiResponse, ApiResult, EmptyData, OrFail, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(State(state): State<UserHandlerState>) -> ApiResult<Vec<UserDto>> {
    let users = state
        .user_service
        .list_users()
        .await
        .or_fail("Error getting the users")?;

    ok(
        "Users retrieved successfully",
        users.into_iter().map(UserDto::from).collect(),
    )
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 400, description = "User id is not valid"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<UserDto> {
    let id = record_id("User", &id)?;
    let user = state
        .user_service
        .get_user(id)
        .await
        .or_fail("Error getting the user by id")?;

    ok("User was found", UserDto::from(user))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error or user already exists")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserDto> {
    let user = state
        .user_service
        .register(&request.name, &request.email, &request.password)
        .await
        .or_fail("Error creating user")?;

    created("User created successfully", UserDto::from(user))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid id, body, or not the same user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let id = record_id("User", &id)?;
    let user = state
        .user_service
        .update_user(&caller.caller(), id, request.into())
        .await
        .or_fail("Error updating user")?;

    ok("User updated successfully", UserDto::from(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<EmptyData>),
        (status = 400, description = "Invalid id or user still has orders"),
        (status = 403, description = "Not the account owner or an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<EmptyData> {
    let id = record_id("User", &id)?;
    state
        .user_service
        .delete_user(&caller.caller(), id)
        .await
        .or_fail("Error deleting the user")?;

    ok("User successfully deleted", EmptyData {})
}
