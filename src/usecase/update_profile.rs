use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::user::ProfileUpdate;
use crate::domain::repository::UserRepository;

/// UpdateProfileError はプロフィール更新に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("user not found: {0}")]
    NotFound(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

/// UpdateProfileUseCase はユーザープロフィール更新ユースケース。
/// アクティブなユーザーのみが更新対象となる。
pub struct UpdateProfileUseCase {
    user_repo: Arc<dyn UserRepository>,
}

impl UpdateProfileUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 表示名・電話番号・住所を更新する。
    pub async fn execute(&self, id: Uuid, update: &ProfileUpdate) -> Result<(), UpdateProfileError> {
        let user = self
            .user_repo
            .find_active_by_id(id)
            .await
            .map_err(|e| UpdateProfileError::Internal(e.to_string()))?;
        if user.is_none() {
            return Err(UpdateProfileError::NotFound(id));
        }

        let updated = self
            .user_repo
            .update_profile(id, update)
            .await
            .map_err(|e| UpdateProfileError::Internal(e.to_string()))?;
        if !updated {
            // 検索と更新の間に行が消えた場合
            return Err(UpdateProfileError::Internal(format!(
                "no rows updated for user {}",
                id
            )));
        }

        Ok(())
    }
}
