pub mod auth_handler;
pub mod health;
pub mod user_handler;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::repository::UserRepository;
use crate::domain::service::SessionTokenService;
use crate::infrastructure::IdentityVerifier;
use crate::usecase::{
    AuthenticateGoogleUserUseCase, RegisterUserUseCase, UpdateProfileUseCase,
    ValidateSessionTokenUseCase,
};

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub authenticate_google_uc: Arc<AuthenticateGoogleUserUseCase>,
    pub register_user_uc: Arc<RegisterUserUseCase>,
    pub update_profile_uc: Arc<UpdateProfileUseCase>,
    pub validate_session_token_uc: Arc<ValidateSessionTokenUseCase>,
    pub db_pool: Option<sqlx::PgPool>,
}

impl AppState {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        user_repo: Arc<dyn UserRepository>,
        token_service: Arc<SessionTokenService>,
        db_pool: Option<sqlx::PgPool>,
    ) -> Self {
        Self {
            authenticate_google_uc: Arc::new(AuthenticateGoogleUserUseCase::new(
                verifier,
                user_repo.clone(),
                token_service.clone(),
            )),
            register_user_uc: Arc::new(RegisterUserUseCase::new(user_repo.clone())),
            update_profile_uc: Arc::new(UpdateProfileUseCase::new(user_repo)),
            validate_session_token_uc: Arc::new(ValidateSessionTokenUseCase::new(token_service)),
            db_pool,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handler::validate_google_user,
        auth_handler::validate_session_token,
        user_handler::register_user,
        user_handler::update_user,
        health::healthz,
        health::readyz,
    ),
    components(schemas(
        auth_handler::GoogleAuthRequest,
        auth_handler::ValidateTokenRequest,
        auth_handler::AuthResponse,
        crate::domain::entity::user::RegisterUserRequest,
        crate::domain::entity::user::ProfileUpdate,
        crate::domain::entity::user::UserProjection,
        crate::domain::entity::claims::SessionClaims,
        ErrorResponse,
        ErrorBody,
    )),
)]
struct ApiDoc;

/// REST API ルーターを構築する。
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route(
            "/api/v1/auth/google/validate",
            post(auth_handler::validate_google_user),
        )
        .route(
            "/api/v1/auth/token/validate",
            post(auth_handler::validate_session_token),
        )
        .route("/api/v1/users", post(user_handler::register_user))
        .route("/api/v1/users/{id}", put(user_handler::update_user))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

/// ErrorResponse は統一エラーレスポンス。
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub request_id: String,
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
                request_id: uuid::Uuid::new_v4().to_string(),
                details: vec![],
            },
        }
    }
}
