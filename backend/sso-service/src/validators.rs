/// Input validation utilities for the SSO service
///
/// Shared by the gRPC binding and the authentication service so both reject
/// structurally empty input with the same message.
use crate::error::{AuthError, Result};

/// Reject an empty string field
///
/// Content is not inspected: a password made of spaces is still a password.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject the protobuf default (zero) for an identifier field
pub fn require_id<T>(field: &str, value: T) -> Result<()>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("email", "alice@example.com").is_ok());

        let err = require_non_empty("email", "").unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg == "email is required"));

        assert!(require_non_empty("password", "   ").is_ok());
        assert!(require_non_empty("password", " ").is_ok());
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("app_id", 1_i32).is_ok());
        assert!(require_id("user_id", -5_i64).is_ok());

        let err = require_id("user_id", 0_i64).unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg == "user_id is required"));
    }
}
