pub mod authenticate_google_user;
pub mod register_user;
pub mod update_profile;
pub mod validate_session_token;

pub use authenticate_google_user::AuthenticateGoogleUserUseCase;
pub use register_user::RegisterUserUseCase;
pub use update_profile::UpdateProfileUseCase;
pub use validate_session_token::ValidateSessionTokenUseCase;
