use serde::{Deserialize, Serialize};

/// SessionClaims はセッショントークンに埋め込まれるクレームセットを表す。
/// クレームは固定の名前付きフィールドで構成され、動的な辞書は使用しない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, utoipa::ToSchema)]
pub struct SessionClaims {
    /// ユーザー ID（UUID 文字列）。
    pub sub: String,
    /// 表示名。
    pub name: String,
    /// メールアドレス（login_id と同一）。
    pub email: String,
    /// ロール（数値ロールの文字列表現）。
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}
