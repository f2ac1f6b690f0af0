use std::sync::Arc;

use crate::domain::entity::user::{SessionCredentials, UserProjection};
use crate::domain::repository::UserRepository;
use crate::domain::service::SessionTokenService;
use crate::infrastructure::IdentityVerifier;

/// AuthenticateError は Google トークン検証からセッショントークン発行までの
/// フローにおけるエラーを表す。リトライは行わず、すべての失敗は終端となる。
#[derive(Debug, thiserror::Error)]
pub enum AuthenticateError {
    #[error("google id token is required")]
    MalformedRequest,

    #[error("invalid google token")]
    Unauthorized,

    #[error("user not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// AuthenticatedUser は認証成功時の結果。
/// クライアントへ返却するユーザー表現と発行済みセッショントークンを持つ。
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: UserProjection,
    pub token: String,
}

/// AuthenticateGoogleUserUseCase は Google ID トークンを検証し、
/// 対応するローカルユーザーに対してセッショントークンを発行するユースケース。
pub struct AuthenticateGoogleUserUseCase {
    verifier: Arc<dyn IdentityVerifier>,
    user_repo: Arc<dyn UserRepository>,
    token_service: Arc<SessionTokenService>,
}

impl AuthenticateGoogleUserUseCase {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        user_repo: Arc<dyn UserRepository>,
        token_service: Arc<SessionTokenService>,
    ) -> Self {
        Self {
            verifier,
            user_repo,
            token_service,
        }
    }

    /// ID トークンを検証し、ローカルユーザーを検索してセッショントークンを発行する。
    ///
    /// セッショントークンは、検証済みの外部 ID から見つかったユーザーに対してのみ
    /// 発行される。未知のプリンシパルに対してトークンサービスが呼ばれることはない。
    pub async fn execute(&self, id_token: &str) -> Result<AuthenticatedUser, AuthenticateError> {
        // 空のトークンは外部呼び出しの前に拒否する
        if id_token.trim().is_empty() {
            return Err(AuthenticateError::MalformedRequest);
        }

        // 検証失敗の原因（署名不正・期限切れ・audience 不一致・ネットワーク障害）は
        // 区別せず単一の認証失敗として扱う。詳細はログにのみ残す。
        let identity = match self.verifier.verify(id_token).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "google token verification failed");
                return Err(AuthenticateError::Unauthorized);
            }
        };

        let user = self
            .user_repo
            .find_by_login_id(&identity.email)
            .await
            .map_err(|e| AuthenticateError::Internal(e.to_string()))?
            .ok_or_else(|| AuthenticateError::NotFound(identity.email.clone()))?;

        let creds = SessionCredentials::from(&user);
        let token = self
            .token_service
            .issue(&creds)
            .map_err(|e| AuthenticateError::Internal(e.to_string()))?;

        Ok(AuthenticatedUser {
            user: UserProjection::from(&user),
            token,
        })
    }
}
