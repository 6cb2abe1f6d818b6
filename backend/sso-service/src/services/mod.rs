/// Service layer for sso-service
///
/// - Authentication service (login, registration, admin check)
pub mod auth;

pub use auth::AuthService;
