/// Integration tests for crypto-core session tokens
///
/// This test module covers:
/// - Token issuance and validation
/// - Expiration handling
/// - Application scoping of tokens
use chrono::{Duration, Utc};
use crypto_core::jwt::{is_token_expired, issue_token, issue_token_at, validate_token};

const APP_1_SECRET: &[u8] = b"app-1-secret";
const APP_2_SECRET: &[u8] = b"app-2-secret";

// ============================================================================
// Issuance
// ============================================================================

#[test]
fn test_issue_token_claims_match_inputs() {
    let token = issue_token(42, "alice@example.com", 1, APP_1_SECRET, Duration::minutes(30))
        .expect("Should issue token");

    let claims = validate_token(&token, APP_1_SECRET, 1)
        .expect("Token should validate")
        .claims;

    assert_eq!(claims.uid, 42);
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.app_id, 1);
    assert_eq!(claims.exp - claims.iat, 30 * 60);
}

#[test]
fn test_tokens_at_different_instants_differ_in_expiry() {
    let first_at = Utc::now();
    let second_at = first_at + Duration::seconds(5);

    let first = issue_token_at(42, "alice@example.com", 1, APP_1_SECRET, Duration::hours(1), first_at)
        .expect("Should issue first token");
    let second = issue_token_at(42, "alice@example.com", 1, APP_1_SECRET, Duration::hours(1), second_at)
        .expect("Should issue second token");

    assert_ne!(first, second);

    let first_claims = validate_token(&first, APP_1_SECRET, 1).unwrap().claims;
    let second_claims = validate_token(&second, APP_1_SECRET, 1).unwrap().claims;

    assert_ne!(first_claims.exp, second_claims.exp);
    assert_eq!(first_claims.uid, second_claims.uid);
    assert_eq!(first_claims.app_id, second_claims.app_id);
}

#[test]
fn test_same_instant_tokens_are_unique() {
    let now = Utc::now();
    let first = issue_token_at(42, "alice@example.com", 1, APP_1_SECRET, Duration::hours(1), now)
        .unwrap();
    let second = issue_token_at(42, "alice@example.com", 1, APP_1_SECRET, Duration::hours(1), now)
        .unwrap();

    assert_ne!(first, second, "jti should make every token unique");
}

// ============================================================================
// Application scoping
// ============================================================================

#[test]
fn test_token_rejected_with_other_app_key() {
    let token = issue_token(42, "alice@example.com", 1, APP_1_SECRET, Duration::hours(1))
        .expect("Should issue token");

    assert!(validate_token(&token, APP_2_SECRET, 2).is_err());
}

#[test]
fn test_token_rejected_for_other_app_id_even_with_shared_secret() {
    // Two applications misconfigured with the same secret
    let token = issue_token(42, "alice@example.com", 1, APP_1_SECRET, Duration::hours(1))
        .expect("Should issue token");

    let result = validate_token(&token, APP_1_SECRET, 2);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Token validation failed"));
}

// ============================================================================
// Expiration
// ============================================================================

#[test]
fn test_expired_token_fails_validation() {
    let token = issue_token_at(
        42,
        "alice@example.com",
        1,
        APP_1_SECRET,
        Duration::minutes(1),
        Utc::now() - Duration::minutes(10),
    )
    .expect("Should issue token");

    assert!(validate_token(&token, APP_1_SECRET, 1).is_err());
    assert!(is_token_expired(&token, APP_1_SECRET).expect("signature is valid"));
}

#[test]
fn test_is_token_expired_rejects_forged_token() {
    let token = issue_token(42, "alice@example.com", 1, APP_1_SECRET, Duration::hours(1))
        .expect("Should issue token");

    assert!(is_token_expired(&token, APP_2_SECRET).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    assert!(validate_token("invalid.token.here", APP_1_SECRET, 1).is_err());
    assert!(validate_token("", APP_1_SECRET, 1).is_err());
}
