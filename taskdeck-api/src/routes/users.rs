/// User endpoints
///
/// # Endpoints
///
/// - `GET /api/users/` - List all users
/// - `POST /api/users/` - Create a user
/// - `GET /api/users/:id/` - Get a user by id
/// - `PATCH /api/users/:id/` - Partial update (merge semantics)
/// - `DELETE /api/users/:id/` - Delete after password re-verification
///
/// Passwords are accepted on create/update/delete but never included in any
/// response body.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::models::{CreateUser, UpdateUser, User};
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address (must be unique)
    #[validate(
        email(message = "Invalid email format"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: String,

    /// Password (stored opaquely, required again on deletion)
    #[validate(length(min = 1, max = 255, message = "Password must be 1-255 characters"))]
    pub password: String,
}

/// Update user request - all fields optional, at least one required
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Password must be 1-255 characters"))]
    pub password: Option<String>,
}

/// Delete user request - the stored password must be re-supplied
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteUserRequest {
    #[validate(length(min = 1, max = 255, message = "Password is required"))]
    pub password: String,
}

/// User as exposed over the API (password excluded)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// List response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub status: &'static str,
    pub count: usize,
    pub users: Vec<UserResponse>,
}

/// Single-user response
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub status: &'static str,
    pub user: UserResponse,
}

/// Mutation response carrying a message and the affected user
#[derive(Debug, Serialize)]
pub struct UserMutationResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user: UserResponse,
}

/// Deletion response
#[derive(Debug, Serialize)]
pub struct UserDeletedResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /api/users/`
///
/// Lists all users in insertion order.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UsersListResponse>> {
    let users = state.store.list_users().await?;

    Ok(Json(UsersListResponse {
        status: "success",
        count: users.len(),
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// `POST /api/users/`
///
/// Creates a user.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: email already exists
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserMutationResponse>)> {
    req.validate().map_err(validation_error)?;

    let user = state
        .store
        .create_user(CreateUser {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserMutationResponse {
            status: "success",
            message: "User created successfully",
            user: user.into(),
        }),
    ))
}

/// `GET /api/users/:id/`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserEnvelope>> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserEnvelope {
        status: "success",
        user: user.into(),
    }))
}

/// `PATCH /api/users/:id/`
///
/// Partial update: only supplied fields overwrite stored values.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed or no fields supplied
/// - `404 Not Found`: user does not exist
/// - `409 Conflict`: new email already belongs to another user
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserMutationResponse>> {
    req.validate().map_err(validation_error)?;

    let update = UpdateUser {
        name: req.name,
        email: req.email,
        password: req.password,
    };

    if update.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "body".to_string(),
            message: "At least one of name, email, password must be provided".to_string(),
        }]));
    }

    let user = state
        .store
        .update_user(id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserMutationResponse {
        status: "success",
        message: "User updated successfully",
        user: user.into(),
    }))
}

/// `DELETE /api/users/:id/`
///
/// Deletes a user after verifying the supplied password matches the stored
/// value exactly.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: password missing
/// - `404 Not Found`: user does not exist
/// - `401 Unauthorized`: password does not match
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<DeleteUserRequest>,
) -> ApiResult<Json<UserDeletedResponse>> {
    req.validate().map_err(validation_error)?;

    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if user.password != req.password {
        return Err(ApiError::Unauthorized("Incorrect password".to_string()));
    }

    state.store.delete_user(id).await?;

    Ok(Json(UserDeletedResponse {
        status: "success",
        message: "User deleted successfully",
    }))
}
