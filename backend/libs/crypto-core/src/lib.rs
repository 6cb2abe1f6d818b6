//! Cryptographic primitives shared by SSO services.
//!
//! - `jwt`: session token issuance and validation with per-application keys

pub mod jwt;

pub use jwt::{issue_token, issue_token_at, validate_token, Claims};
