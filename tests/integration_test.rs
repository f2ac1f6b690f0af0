use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use secrecy::SecretString;
use tower::ServiceExt;
use uuid::Uuid;

// Re-export from the crate
use usermgmt_server::adapter::handler::{router, AppState};
use usermgmt_server::domain::entity::google_identity::GoogleIdentity;
use usermgmt_server::domain::entity::user::{ProfileUpdate, SessionCredentials, User};
use usermgmt_server::domain::repository::UserRepository;
use usermgmt_server::domain::service::SessionTokenService;
use usermgmt_server::infrastructure::IdentityVerifier;

const TEST_SECRET: &str = "integration-signing-key-0123456789abcdef01234567";
const TEST_ISSUER: &str = "http://localhost:8080/";
const TEST_AUDIENCE: &str = "http://localhost:3001/";

// --- Test doubles ---

struct TestIdentityVerifier {
    should_succeed: bool,
    email: String,
}

#[async_trait::async_trait]
impl IdentityVerifier for TestIdentityVerifier {
    async fn verify(&self, _id_token: &str) -> anyhow::Result<GoogleIdentity> {
        if self.should_succeed {
            Ok(GoogleIdentity {
                sub: "109876543210987654321".to_string(),
                email: self.email.clone(),
                email_verified: true,
                name: "Integration Test".to_string(),
                picture: None,
            })
        } else {
            anyhow::bail!("token verification failed")
        }
    }
}

struct TestUserRepository {
    users: tokio::sync::RwLock<Vec<User>>,
}

impl TestUserRepository {
    fn seeded(users: Vec<User>) -> Self {
        Self {
            users: tokio::sync::RwLock::new(users),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for TestUserRepository {
    async fn find_by_login_id(&self, login_id: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.login_id == login_id).cloned())
    }

    async fn find_active_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id && u.is_active).cloned())
    }

    async fn create(&self, user: &User) -> anyhow::Result<()> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> anyhow::Result<bool> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.user_name = update.user_name.clone();
            user.phone_no = update.phone_no.clone();
            user.address = update.address.clone();
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

// --- Helpers ---

fn make_token_service() -> Arc<SessionTokenService> {
    Arc::new(
        SessionTokenService::new(
            &SecretString::from(TEST_SECRET.to_string()),
            TEST_ISSUER,
            TEST_AUDIENCE,
        )
        .unwrap(),
    )
}

fn make_user(id: Uuid, login_id: &str, active: bool) -> User {
    User {
        id,
        login_id: login_id.to_string(),
        user_name: "Integration Test".to_string(),
        role: 1,
        is_active: active,
        created_on: Utc::now(),
        phone_no: None,
        address: None,
        remarks: None,
        password_hash: String::new(),
        password_salt: String::new(),
    }
}

fn make_app(verifier_succeeds: bool, verified_email: &str, users: Vec<User>) -> axum::Router {
    let verifier = TestIdentityVerifier {
        should_succeed: verifier_succeeds,
        email: verified_email.to_string(),
    };
    let state = AppState::new(
        Arc::new(verifier),
        Arc::new(TestUserRepository::seeded(users)),
        make_token_service(),
        None,
    );
    router(state)
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_healthz() {
    let app = make_app(true, "test@example.com", vec![]);

    let req = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_readyz_without_database() {
    let app = make_app(true, "test@example.com", vec![]);

    let req = Request::builder()
        .uri("/readyz")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "ready");
    assert_eq!(json["checks"]["database"], "skipped");
}

#[tokio::test]
async fn test_google_validate_existing_user_returns_token() {
    let user_id = Uuid::new_v4();
    let app = make_app(
        true,
        "test@example.com",
        vec![make_user(user_id, "test@example.com", true)],
    );

    let resp = app
        .oneshot(json_post(
            "/api/v1/auth/google/validate",
            r#"{"token":"valid-google-token"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["user"]["email"], "test@example.com");
    assert_eq!(json["user"]["user_id"], user_id.to_string());
    assert_eq!(json["user"]["role"], 1);

    // 発行されたトークンは独立に検証でき、クレームがユーザー属性と一致する
    let token = json["token"].as_str().unwrap();
    let claims = make_token_service().decode_and_validate(token).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.name, "Integration Test");
    assert_eq!(claims.email, "test@example.com");
    assert_eq!(claims.role, "1");
}

#[tokio::test]
async fn test_google_validate_invalid_token_is_unauthorized() {
    let app = make_app(
        false,
        "test@example.com",
        vec![make_user(Uuid::new_v4(), "test@example.com", true)],
    );

    let resp = app
        .oneshot(json_post(
            "/api/v1/auth/google/validate",
            r#"{"token":"invalid-google-token"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(resp).await;
    assert_eq!(json["error"]["message"], "Invalid Google token.");
}

#[tokio::test]
async fn test_google_validate_unknown_user_is_not_found() {
    let app = make_app(true, "nouser@example.com", vec![]);

    let resp = app
        .oneshot(json_post(
            "/api/v1/auth/google/validate",
            r#"{"token":"valid-token-no-user"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json = body_json(resp).await;
    assert_eq!(
        json["error"]["message"],
        "User does not exist in the database."
    );
}

#[tokio::test]
async fn test_google_validate_empty_token_is_bad_request() {
    let app = make_app(true, "test@example.com", vec![]);

    let resp = app
        .oneshot(json_post(
            "/api/v1/auth/google/validate",
            r#"{"token":""}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_token_roundtrip_over_http() {
    let token = make_token_service()
        .issue(&SessionCredentials {
            user_id: Uuid::new_v4(),
            name: "Integration Test".to_string(),
            email: "test@example.com".to_string(),
            role: 2,
        })
        .unwrap();

    let app = make_app(true, "test@example.com", vec![]);
    let resp = app
        .oneshot(json_post(
            "/api/v1/auth/token/validate",
            format!(r#"{{"token":"{}"}}"#, token),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["claims"]["role"], "2");
    assert_eq!(json["claims"]["iss"], TEST_ISSUER);
}

#[tokio::test]
async fn test_session_token_validate_rejects_foreign_token() {
    // 別の鍵で署名されたトークンは拒否される
    let foreign_service = SessionTokenService::new(
        &SecretString::from("foreign-signing-key-0123456789abcdef012345678".to_string()),
        TEST_ISSUER,
        TEST_AUDIENCE,
    )
    .unwrap();
    let token = foreign_service
        .issue(&SessionCredentials {
            user_id: Uuid::new_v4(),
            name: "Intruder".to_string(),
            email: "intruder@example.com".to_string(),
            role: 1,
        })
        .unwrap();

    let app = make_app(true, "test@example.com", vec![]);
    let resp = app
        .oneshot(json_post(
            "/api/v1/auth/token/validate",
            format!(r#"{{"token":"{}"}}"#, token),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_authenticate() {
    let app = make_app(true, "newuser@example.com", vec![]);

    let password = BASE64_STANDARD.encode(b"SecurePass123");
    let register_body = serde_json::json!({
        "login_id": "newuser@example.com",
        "user_name": "New User",
        "password": password,
        "role": 1
    })
    .to_string();

    let resp = app
        .clone()
        .oneshot(json_post("/api/v1/users", register_body.clone()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["message"], "User registered successfully.");

    // 登録済みユーザーは Google 認証フローで見つかる
    let resp = app
        .clone()
        .oneshot(json_post(
            "/api/v1/auth/google/validate",
            r#"{"token":"valid-google-token"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // 同じ login_id での再登録は拒否される
    let resp = app
        .oneshot(json_post("/api/v1/users", register_body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_success() {
    let user_id = Uuid::new_v4();
    let app = make_app(
        true,
        "olduser@example.com",
        vec![make_user(user_id, "olduser@example.com", true)],
    );

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/v1/users/{}", user_id))
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"user_name":"Updated User","phone_no":"1234567890","address":"123 New Address"}"#,
        ))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["message"], "User information updated successfully.");
}

#[tokio::test]
async fn test_update_profile_unknown_user() {
    let app = make_app(true, "test@example.com", vec![]);

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/v1/users/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"user_name":"Updated User"}"#))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json = body_json(resp).await;
    assert_eq!(json["error"]["message"], "User not found.");
}

#[tokio::test]
async fn test_update_profile_inactive_user_is_not_found() {
    let user_id = Uuid::new_v4();
    let app = make_app(
        true,
        "inactive@example.com",
        vec![make_user(user_id, "inactive@example.com", false)],
    );

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/v1/users/{}", user_id))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"user_name":"Updated User"}"#))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
