/// Session token issuance for SSO applications
///
/// Every token is signed with the secret of the application it was issued for
/// (HS256). A token minted for one application never verifies against another
/// application's key, and the `app_id` claim is checked on decode as well.
///
/// ## Security Design
///
/// - **Per-application keys**: no process-wide signing key, keys are passed in
///   by the caller for every operation
/// - **Stateless**: tokens are never stored; validity is signature + expiry
/// - **Unique**: every token carries a random `jti`, so two tokens issued in
///   the same second still differ
///
/// ## Usage
///
/// ```rust
/// use chrono::Duration;
/// use crypto_core::jwt::{issue_token, validate_token};
///
/// let token = issue_token(42, "alice@example.com", 1, b"app-1-secret", Duration::hours(1))
///     .expect("issue token");
/// let data = validate_token(&token, b"app-1-secret", 1).expect("valid token");
/// assert_eq!(data.claims.uid, 42);
/// ```
use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Signing algorithm for session tokens
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub uid: i64,
    /// User email at issue time
    pub email: String,
    /// Application the token is scoped to
    pub app_id: i32,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token identifier (UUID v4)
    pub jti: String,
}

// ============================================================================
// Token Generation
// ============================================================================

/// Issue a session token valid for `ttl` from now.
///
/// ## Arguments
///
/// * `user_id` - User identifier
/// * `email` - User email
/// * `app_id` - Application the token is scoped to
/// * `app_secret` - Signing secret of that application
/// * `ttl` - Lifetime of the token
///
/// ## Errors
///
/// Returns error if the secret is empty, the TTL is not positive or pushes the
/// expiry out of range, or signing fails.
pub fn issue_token(
    user_id: i64,
    email: &str,
    app_id: i32,
    app_secret: &[u8],
    ttl: Duration,
) -> Result<String> {
    issue_token_at(user_id, email, app_id, app_secret, ttl, Utc::now())
}

/// Issue a session token as if it were issued at `issued_at`.
pub fn issue_token_at(
    user_id: i64,
    email: &str,
    app_id: i32,
    app_secret: &[u8],
    ttl: Duration,
    issued_at: DateTime<Utc>,
) -> Result<String> {
    if app_secret.is_empty() {
        return Err(anyhow!("Application {app_id} has no signing secret"));
    }
    if ttl <= Duration::zero() {
        return Err(anyhow!("Token TTL must be positive"));
    }

    let expiry = issued_at
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow!("Token TTL out of range"))?;

    let claims = Claims {
        uid: user_id,
        email: email.to_string(),
        app_id,
        iat: issued_at.timestamp(),
        exp: expiry.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(JWT_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(app_secret),
    )
    .map_err(|e| anyhow!("Failed to sign session token: {e}"))
}

// ============================================================================
// Token Validation
// ============================================================================

/// Validate and decode a session token for the given application.
///
/// ## Security Guarantees
///
/// - Verifies the HS256 signature with the application's secret
/// - Checks token expiration
/// - Rejects tokens whose `app_id` claim names another application
///
/// ## Errors
///
/// Returns error if the signature is invalid, the token is expired or
/// malformed, or the token belongs to another application.
pub fn validate_token(token: &str, app_secret: &[u8], app_id: i32) -> Result<TokenData<Claims>> {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(app_secret), &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))?;

    if data.claims.app_id != app_id {
        return Err(anyhow!(
            "Token validation failed: issued for app {}, presented to app {}",
            data.claims.app_id,
            app_id
        ));
    }

    Ok(data)
}

/// Check if a token is expired
///
/// ## Note
///
/// Signature is still verified; only the expiry check is relaxed so expired
/// tokens can be told apart from forged ones.
pub fn is_token_expired(token: &str, app_secret: &[u8]) -> Result<bool> {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(app_secret), &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))?;

    Ok(data.claims.exp <= Utc::now().timestamp())
}

// ============================================================================
// Tests
// ============================================================================
