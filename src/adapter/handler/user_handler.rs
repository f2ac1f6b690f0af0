use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::{AppState, ErrorResponse};
use crate::domain::entity::user::{ProfileUpdate, RegisterUserRequest};
use crate::usecase::register_user::RegisterUserError;
use crate::usecase::update_profile::UpdateProfileError;

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "User registered"),
        (status = 400, description = "Invalid registration data"),
        (status = 500, description = "User creation failed"),
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> impl IntoResponse {
    match state.register_user_uc.execute(req).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "User registered successfully."})),
        )
            .into_response(),
        Err(RegisterUserError::InvalidData) => {
            let err = ErrorResponse::new("USERMGMT_INVALID_USER_DATA", "Invalid user data.");
            (StatusCode::BAD_REQUEST, Json(err)).into_response()
        }
        Err(RegisterUserError::PasswordRequired) => {
            let err = ErrorResponse::new("USERMGMT_PASSWORD_REQUIRED", "Password is required.");
            (StatusCode::BAD_REQUEST, Json(err)).into_response()
        }
        Err(RegisterUserError::InvalidPasswordEncoding) => {
            let err = ErrorResponse::new(
                "USERMGMT_PASSWORD_ENCODING_INVALID",
                "Invalid Base64 format for password.",
            );
            (StatusCode::BAD_REQUEST, Json(err)).into_response()
        }
        Err(RegisterUserError::AlreadyExists) => {
            let err = ErrorResponse::new("USERMGMT_USER_EXISTS", "User already exists.");
            (StatusCode::BAD_REQUEST, Json(err)).into_response()
        }
        Err(RegisterUserError::Internal(msg)) => {
            tracing::error!(error = %msg, "user registration failed");
            let err = ErrorResponse::new("USERMGMT_CREATE_FAILED", "Failed to create user.");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Update failed"),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> impl IntoResponse {
    match state.update_profile_uc.execute(id, &update).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "User information updated successfully."})),
        )
            .into_response(),
        Err(UpdateProfileError::NotFound(_)) => {
            let err = ErrorResponse::new("USERMGMT_USER_NOT_FOUND", "User not found.");
            (StatusCode::NOT_FOUND, Json(err)).into_response()
        }
        Err(UpdateProfileError::Internal(msg)) => {
            tracing::error!(error = %msg, user_id = %id, "profile update failed");
            let err = ErrorResponse::new(
                "USERMGMT_UPDATE_FAILED",
                "Failed to update user information.",
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}
