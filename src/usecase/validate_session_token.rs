use std::sync::Arc;

use crate::domain::entity::claims::SessionClaims;
use crate::domain::service::session_token_service::TokenValidationError;
use crate::domain::service::SessionTokenService;

/// ValidateSessionTokenUseCase はセッショントークン検証ユースケース。
/// デコードと検証のみを行う読み取り専用の操作で、再発行は行わない。
pub struct ValidateSessionTokenUseCase {
    token_service: Arc<SessionTokenService>,
}

impl ValidateSessionTokenUseCase {
    pub fn new(token_service: Arc<SessionTokenService>) -> Self {
        Self { token_service }
    }

    /// トークンを検証し、クレームセットを返す。
    pub fn execute(&self, token: &str) -> Result<SessionClaims, TokenValidationError> {
        self.token_service.decode_and_validate(token)
    }
}
