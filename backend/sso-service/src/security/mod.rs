/// Security module for authentication
///
/// Provides the security primitives the auth service depends on:
/// - Password hashing and verification (Argon2id)
/// - Session token issuance (HS256 via crypto-core, per-application keys)
pub mod password;
pub mod token;

pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{JwtTokenIssuer, TokenIssuer};
