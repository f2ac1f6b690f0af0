use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::user::{ProfileUpdate, User};

/// UserRepository はユーザー永続化のためのリポジトリトレイト。
/// 実装は PostgreSQL の usermgmt.users テーブルに対して CRUD 操作を行う。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// login_id（メールアドレス）でユーザーを検索する。
    async fn find_by_login_id(&self, login_id: &str) -> anyhow::Result<Option<User>>;

    /// ユーザー ID でアクティブなユーザーのみを検索する。
    async fn find_active_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// ユーザーを作成する。
    async fn create(&self, user: &User) -> anyhow::Result<()>;

    /// プロフィールフィールド（表示名・電話番号・住所）を更新する。
    /// 更新対象の行が存在しなかった場合は false を返す。
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> anyhow::Result<bool>;
}
