use async_trait::async_trait;

use crate::domain::entity::google_identity::GoogleIdentity;
use crate::infrastructure::IdentityVerifier;

/// GoogleVerifierConfig は Google token-info エンドポイント接続の設定を表す。
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoogleVerifierConfig {
    /// 本サービスに登録された OAuth クライアント ID。
    /// トークンの aud クレームがこの値と一致しない場合は検証失敗となる。
    pub client_id: String,
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tokeninfo_url() -> String {
    "https://oauth2.googleapis.com/tokeninfo".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// GoogleTokenVerifier は Google の token-info エンドポイントに問い合わせて
/// ID トークンを検証する IdentityVerifier 実装。
/// 1 回の検証につき 1 回の HTTP 呼び出しを行い、タイムアウトを含む
/// あらゆる失敗は呼び出し側で単一の認証失敗として扱われる。
pub struct GoogleTokenVerifier {
    config: GoogleVerifierConfig,
    http_client: reqwest::Client,
}

impl GoogleTokenVerifier {
    /// 設定値を検証して GoogleTokenVerifier を生成する。
    /// client_id が空の場合は起動時エラーとなる。
    pub fn new(config: GoogleVerifierConfig) -> anyhow::Result<Self> {
        if config.client_id.is_empty() {
            anyhow::bail!("google client_id must not be empty");
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build http client: {}", e))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> anyhow::Result<GoogleIdentity> {
        let url = format!(
            "{}?id_token={}",
            self.config.tokeninfo_url,
            urlencoding::encode(id_token)
        );

        let resp = self.http_client.get(&url).send().await?;

        if !resp.status().is_success() {
            anyhow::bail!("token-info endpoint returned {}", resp.status());
        }

        let payload: TokenInfoPayload = resp.json().await?;

        // aud は本サービスのクライアント ID と一致しなければならない
        if payload.aud != self.config.client_id {
            anyhow::bail!("token audience mismatch");
        }

        Ok(payload.into())
    }
}

/// TokenInfoPayload は token-info エンドポイントのレスポンス表現。
/// email_verified は文字列 "true" / "false" として返却される。
#[derive(Debug, serde::Deserialize)]
struct TokenInfoPayload {
    #[serde(default)]
    aud: String,
    #[serde(default)]
    sub: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    picture: Option<String>,
}

impl From<TokenInfoPayload> for GoogleIdentity {
    fn from(payload: TokenInfoPayload) -> Self {
        GoogleIdentity {
            sub: payload.sub,
            email: payload.email,
            email_verified: payload.email_verified == "true",
            name: payload.name,
            picture: payload.picture,
        }
    }
}
