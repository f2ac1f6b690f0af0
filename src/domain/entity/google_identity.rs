use serde::{Deserialize, Serialize};

/// GoogleIdentity は外部 ID プロバイダが検証済みとして主張するユーザー属性を表す。
/// Identity Verifier のみが生成し、永続化されずリクエスト終了時に破棄される。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleIdentity {
    /// 外部アカウントごとに安定した不透明な識別子。
    pub sub: String,
    /// ローカルユーザー検索キーとなるメールアドレス。
    pub email: String,
    pub email_verified: bool,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}
