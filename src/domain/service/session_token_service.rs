use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::entity::claims::SessionClaims;
use crate::domain::entity::user::SessionCredentials;

/// セッショントークンの有効期間（60 分）。発行後の延長・失効はできない。
const TOKEN_TTL_MINUTES: i64 = 60;

/// 署名鍵の最小長（バイト）。HMAC-SHA-256 の実効強度を確保する。
const MIN_KEY_BYTES: usize = 32;

/// TokenConfigError はトークンサービス構築時の設定エラーを表す。
/// 構築はプロセス起動時に一度だけ行われ、失敗した場合は起動を中断する。
#[derive(Debug, thiserror::Error)]
pub enum TokenConfigError {
    #[error("signing key must be at least {MIN_KEY_BYTES} bytes")]
    KeyTooShort,

    #[error("token issuer must not be empty")]
    EmptyIssuer,

    #[error("token audience must not be empty")]
    EmptyAudience,
}

/// TokenIssueError はトークン発行に関するエラーを表す。
/// 通常運用ではクレームのシリアライズが失敗した場合にのみ発生する。
#[derive(Debug, thiserror::Error)]
pub enum TokenIssueError {
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// TokenValidationError はトークン検証に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum TokenValidationError {
    #[error("token expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("issuer mismatch")]
    IssuerMismatch,

    #[error("audience mismatch")]
    AudienceMismatch,

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// SessionTokenService はセッショントークンの発行と検証を行うドメインサービス。
/// HS256 の対称鍵署名を使用し、I/O を伴わない純粋な計算のみで動作する。
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl std::fmt::Debug for SessionTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("encoding_key", &"<redacted>")
            .field("decoding_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl SessionTokenService {
    /// 設定値を検証してサービスを構築する。
    /// 鍵長不足・issuer / audience 欠落は起動時エラーとなり、リクエスト処理は開始されない。
    pub fn new(
        secret: &SecretString,
        issuer: &str,
        audience: &str,
    ) -> Result<Self, TokenConfigError> {
        let key_bytes = secret.expose_secret().as_bytes();
        if key_bytes.len() < MIN_KEY_BYTES {
            return Err(TokenConfigError::KeyTooShort);
        }
        if issuer.is_empty() {
            return Err(TokenConfigError::EmptyIssuer);
        }
        if audience.is_empty() {
            return Err(TokenConfigError::EmptyAudience);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key_bytes),
            decoding_key: DecodingKey::from_secret(key_bytes),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
        })
    }

    /// SessionCredentials からセッショントークンを発行する。
    pub fn issue(&self, creds: &SessionCredentials) -> Result<String, TokenIssueError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: creds.user_id.to_string(),
            name: creds.name.clone(),
            email: creds.email.clone(),
            role: creds.role.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(TOKEN_TTL_MINUTES)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenIssueError::Encoding(e.to_string()))
    }

    /// トークンをデコードし、署名・issuer・audience・有効期限を検証する。
    /// 読み取り専用の操作であり、再発行や状態の変更は行わない。
    pub fn decode_and_validate(&self, token: &str) -> Result<SessionClaims, TokenValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => TokenValidationError::Expired,
                ErrorKind::InvalidSignature => TokenValidationError::InvalidSignature,
                ErrorKind::InvalidIssuer => TokenValidationError::IssuerMismatch,
                ErrorKind::InvalidAudience => TokenValidationError::AudienceMismatch,
                _ => TokenValidationError::Malformed(e.to_string()),
            }),
        }
    }
}
