pub mod database;
pub mod google_verifier;

pub use google_verifier::GoogleTokenVerifier;

use crate::domain::entity::google_identity::GoogleIdentity;
use async_trait::async_trait;

/// IdentityVerifier は外部 ID トークン検証のためのトレイト。
/// 外部プロバイダが発行したトークンの署名・クレームを検証し、
/// 検証済みのユーザー属性を返す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> anyhow::Result<GoogleIdentity>;
}
