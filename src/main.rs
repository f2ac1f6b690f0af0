use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use usermgmt_server::adapter::handler::{self, AppState};
use usermgmt_server::adapter::repository::user_postgres::UserPostgresRepository;
use usermgmt_server::domain::service::SessionTokenService;
use usermgmt_server::infrastructure::database::DatabaseConfig;
use usermgmt_server::infrastructure::google_verifier::GoogleVerifierConfig;
use usermgmt_server::infrastructure::{GoogleTokenVerifier, IdentityVerifier};

/// Application configuration.
#[derive(Debug, Clone, serde::Deserialize)]
struct Config {
    app: AppConfig,
    server: ServerConfig,
    auth: AuthConfig,
    #[serde(default)]
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone, serde::Deserialize)]
struct AppConfig {
    name: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default = "default_environment")]
    environment: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

#[derive(Debug, Clone, serde::Deserialize)]
struct ServerConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    /// ブラウザフロントエンドに許可するオリジン。
    #[serde(default)]
    cors_allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, serde::Deserialize)]
struct AuthConfig {
    jwt: JwtConfig,
    google: GoogleVerifierConfig,
}

#[derive(Debug, Clone, serde::Deserialize)]
struct JwtConfig {
    secret: SecretString,
    issuer: String,
    audience: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let config_content = std::fs::read_to_string(&config_path)?;
    let cfg: Config = serde_yaml::from_str(&config_content)?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting user management server"
    );

    // セッショントークンサービス（署名鍵・issuer・audience は起動時に検証する）
    let token_service = Arc::new(SessionTokenService::new(
        &cfg.auth.jwt.secret,
        &cfg.auth.jwt.issuer,
        &cfg.auth.jwt.audience,
    )?);

    // Google ID トークン検証器（client_id は起動時に検証する）
    let verifier: Arc<dyn IdentityVerifier> =
        Arc::new(GoogleTokenVerifier::new(cfg.auth.google.clone())?);

    // Database pool (optional)
    let db_pool = if let Some(ref db_config) = cfg.database {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| db_config.connection_url());
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(db_config.max_open_conns)
            .connect(&url)
            .await?;
        info!("database connection pool established");
        Some(pool)
    } else if let Ok(url) = std::env::var("DATABASE_URL") {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(25)
            .connect(&url)
            .await?;
        info!("database connection pool established from DATABASE_URL");
        Some(pool)
    } else {
        info!("no database configured, using stub repository");
        None
    };

    // User repository (PostgreSQL > Stub)
    let user_repo: Arc<dyn usermgmt_server::domain::repository::UserRepository> =
        if let Some(ref pool) = db_pool {
            Arc::new(UserPostgresRepository::new(pool.clone()))
        } else {
            Arc::new(StubUserRepository)
        };

    let state = AppState::new(verifier, user_repo, token_service, db_pool.clone());

    // CORS (フロントエンドのオリジンのみ許可)
    let origins = cfg
        .server
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("invalid cors origin {}: {}", origin, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    // Router
    let app = handler::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let rest_addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("REST server starting on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Stub implementation for dev mode ---

/// StubUserRepository は DB 未設定時の開発用リポジトリ。
/// 検索は常に空を返し、書き込みはエラーとなる。
struct StubUserRepository;

#[async_trait::async_trait]
impl usermgmt_server::domain::repository::UserRepository for StubUserRepository {
    async fn find_by_login_id(
        &self,
        _login_id: &str,
    ) -> anyhow::Result<Option<usermgmt_server::domain::entity::user::User>> {
        Ok(None)
    }

    async fn find_active_by_id(
        &self,
        _id: uuid::Uuid,
    ) -> anyhow::Result<Option<usermgmt_server::domain::entity::user::User>> {
        Ok(None)
    }

    async fn create(
        &self,
        user: &usermgmt_server::domain::entity::user::User,
    ) -> anyhow::Result<()> {
        anyhow::bail!("stub user repository: cannot create user {}", user.login_id)
    }

    async fn update_profile(
        &self,
        id: uuid::Uuid,
        _update: &usermgmt_server::domain::entity::user::ProfileUpdate,
    ) -> anyhow::Result<bool> {
        anyhow::bail!("stub user repository: cannot update user {}", id)
    }
}
