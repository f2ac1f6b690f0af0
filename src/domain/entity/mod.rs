pub mod claims;
pub mod google_identity;
pub mod user;

pub use claims::SessionClaims;
pub use google_identity::GoogleIdentity;
