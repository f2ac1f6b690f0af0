use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entity::user::{RegisterUserRequest, User};
use crate::domain::repository::UserRepository;

/// RegisterUserError はユーザー登録に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error("invalid user data")]
    InvalidData,

    #[error("password is required")]
    PasswordRequired,

    #[error("password is not valid base64")]
    InvalidPasswordEncoding,

    #[error("user already exists")]
    AlreadyExists,

    #[error("internal error: {0}")]
    Internal(String),
}

/// RegisterUserUseCase はユーザー登録ユースケース。
/// パスワードは平文では保存せず、ソルト付き SHA-256 ダイジェストとして保存する。
pub struct RegisterUserUseCase {
    user_repo: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// リクエストを検証し、新規ユーザーを作成する。作成したユーザーの ID を返す。
    pub async fn execute(&self, req: RegisterUserRequest) -> Result<Uuid, RegisterUserError> {
        if req.login_id.trim().is_empty()
            || req.user_name.trim().is_empty()
            || req.validate().is_err()
        {
            return Err(RegisterUserError::InvalidData);
        }
        if req.password.is_empty() {
            return Err(RegisterUserError::PasswordRequired);
        }

        // パスワードは Base64 転送形式で届く
        let password_bytes = BASE64_STANDARD
            .decode(&req.password)
            .map_err(|_| RegisterUserError::InvalidPasswordEncoding)?;

        let existing = self
            .user_repo
            .find_by_login_id(&req.login_id)
            .await
            .map_err(|e| RegisterUserError::Internal(e.to_string()))?;
        if existing.is_some() {
            return Err(RegisterUserError::AlreadyExists);
        }

        let (password_hash, password_salt) = digest_password(&password_bytes);

        let user = User {
            id: Uuid::new_v4(),
            login_id: req.login_id,
            user_name: req.user_name,
            role: req.role,
            is_active: true,
            created_on: Utc::now(),
            phone_no: req.phone_no,
            address: req.address,
            remarks: req.remarks,
            password_hash,
            password_salt,
        };

        self.user_repo
            .create(&user)
            .await
            .map_err(|e| RegisterUserError::Internal(e.to_string()))?;

        Ok(user.id)
    }
}

/// 新しいソルトを生成してパスワードのダイジェストを計算する。
/// 戻り値は (ダイジェスト, ソルト) の 16 進数表現。
fn digest_password(password: &[u8]) -> (String, String) {
    let mut salt = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    (hash_password(password, &salt), hex::encode(salt))
}

fn hash_password(password: &[u8], salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password);
    hex::encode(hasher.finalize())
}
