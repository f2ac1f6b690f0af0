use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorResponse};
use crate::domain::entity::user::UserProjection;
use crate::usecase::authenticate_google_user::AuthenticateError;

/// POST /api/v1/auth/google/validate のリクエストボディ。
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GoogleAuthRequest {
    pub token: String,
}

/// 認証成功時のレスポンスボディ。
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub user: UserProjection,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/google/validate",
    request_body = GoogleAuthRequest,
    responses(
        (status = 200, description = "User authenticated, session token issued", body = AuthResponse),
        (status = 400, description = "ID token missing"),
        (status = 401, description = "Google token invalid"),
        (status = 404, description = "No local user for the verified identity"),
        (status = 500, description = "Internal error"),
    )
)]
pub async fn validate_google_user(
    State(state): State<AppState>,
    Json(req): Json<GoogleAuthRequest>,
) -> impl IntoResponse {
    match state.authenticate_google_uc.execute(&req.token).await {
        Ok(result) => (
            StatusCode::OK,
            Json(AuthResponse {
                user: result.user,
                token: result.token,
            }),
        )
            .into_response(),
        Err(AuthenticateError::MalformedRequest) => {
            let err = ErrorResponse::new("USERMGMT_TOKEN_REQUIRED", "Google ID token is required.");
            (StatusCode::BAD_REQUEST, Json(err)).into_response()
        }
        Err(AuthenticateError::Unauthorized) => {
            let err = ErrorResponse::new("USERMGMT_GOOGLE_TOKEN_INVALID", "Invalid Google token.");
            (StatusCode::UNAUTHORIZED, Json(err)).into_response()
        }
        Err(AuthenticateError::NotFound(_)) => {
            let err = ErrorResponse::new(
                "USERMGMT_USER_NOT_FOUND",
                "User does not exist in the database.",
            );
            (StatusCode::NOT_FOUND, Json(err)).into_response()
        }
        Err(AuthenticateError::Internal(msg)) => {
            tracing::error!(error = %msg, "google authentication failed unexpectedly");
            let err = ErrorResponse::new("USERMGMT_INTERNAL", "Internal server error.");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}

/// POST /api/v1/auth/token/validate のリクエストボディ。
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/token/validate",
    request_body = ValidateTokenRequest,
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Token is invalid"),
    )
)]
pub async fn validate_session_token(
    State(state): State<AppState>,
    Json(req): Json<ValidateTokenRequest>,
) -> impl IntoResponse {
    match state.validate_session_token_uc.execute(&req.token) {
        Ok(claims) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "valid": true,
                "claims": claims
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "session token validation failed");
            let err = ErrorResponse::new("USERMGMT_SESSION_TOKEN_INVALID", "Token validation failed");
            (StatusCode::UNAUTHORIZED, Json(err)).into_response()
        }
    }
}
