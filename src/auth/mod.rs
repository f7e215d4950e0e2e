pub mod authorization;
pub mod jwks;
pub mod jwt;
pub mod middleware;

pub use jwt::TokenVerifier;
pub use middleware::AuthenticatedUser;
