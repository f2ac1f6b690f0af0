pub mod session_token_service;

pub use session_token_service::SessionTokenService;
