use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User はローカルユーザーを表すドメインエンティティ。
/// login_id はメールアドレスであり、外部 ID 連携時の検索キーとなる。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub login_id: String,
    pub user_name: String,
    pub role: i32,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    // 資格情報はプロセス外に出さない
    #[serde(skip)]
    pub password_hash: String,
    #[serde(skip)]
    pub password_salt: String,
}

/// UserProjection はクライアントへ返却するユーザー表現。
/// 資格情報フィールドを含まない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct UserProjection {
    pub user_id: Uuid,
    pub user_name: String,
    pub email: String,
    pub role: i32,
    pub is_active: bool,
}

impl From<&User> for UserProjection {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            user_name: user.user_name.clone(),
            email: user.login_id.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// SessionCredentials はセッショントークン発行に必要な最小限のユーザー属性。
/// オーケストレーション層が User から組み立て、トークンサービスが一度だけ消費する。
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCredentials {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: i32,
}

impl From<&User> for SessionCredentials {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.user_name.clone(),
            email: user.login_id.clone(),
            role: user.role,
        }
    }
}

/// RegisterUserRequest はユーザー登録リクエスト。
/// password は Base64 エンコードされた平文パスワード（転送形式）。
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct RegisterUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub login_id: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: i32,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone_no: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
}

/// ProfileUpdate はプロフィール更新で書き換え可能なフィールド。
/// role・login_id・資格情報はこの経路では変更できない。
#[derive(Debug, Clone, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct ProfileUpdate {
    pub user_name: String,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}
