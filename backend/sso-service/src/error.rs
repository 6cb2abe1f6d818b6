use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Both cases are reported identically.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    AlreadyExists,

    #[error("User not found")]
    NotFound,

    /// A required external entity (the requesting application) is missing.
    #[error("Dependency failure: {0}")]
    DependencyFailure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            AuthError::InvalidCredentials => {
                Status::new(Code::Unauthenticated, "Invalid email or password")
            }
            AuthError::AlreadyExists => Status::new(Code::AlreadyExists, "User already exists"),
            AuthError::NotFound => Status::new(Code::NotFound, "User not found"),
            AuthError::DependencyFailure(msg) => Status::new(Code::FailedPrecondition, msg.clone()),
            AuthError::Validation(msg) => Status::new(Code::InvalidArgument, msg.clone()),
            AuthError::Internal(_) => {
                // Don't leak internal details in production
                Status::new(Code::Internal, "Internal server error")
            }
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Blocking task failed: {}", err);
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}

// gRPC Status conversion
impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        if let AuthError::Internal(detail) = &err {
            tracing::error!(error = %detail, "Internal error returned to client");
        }
        err.to_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.to_status().code(),
            Code::Unauthenticated
        );
        assert_eq!(AuthError::AlreadyExists.to_status().code(), Code::AlreadyExists);
        assert_eq!(AuthError::NotFound.to_status().code(), Code::NotFound);
        assert_eq!(
            AuthError::DependencyFailure("app not found".into())
                .to_status()
                .code(),
            Code::FailedPrecondition
        );
        assert_eq!(
            AuthError::Validation("email is required".into())
                .to_status()
                .code(),
            Code::InvalidArgument
        );
        assert_eq!(
            AuthError::Internal("boom".into()).to_status().code(),
            Code::Internal
        );
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let status: Status =
            AuthError::Internal("connection refused to 10.0.0.5:5432".into()).into();

        assert_eq!(status.code(), Code::Internal);
        assert!(!status.message().contains("10.0.0.5"));
    }

    #[test]
    fn test_invalid_credentials_message_is_uniform() {
        let status = AuthError::InvalidCredentials.to_status();
        assert_eq!(status.message(), "Invalid email or password");
    }

    #[test]
    fn test_anyhow_maps_to_internal() {
        let err: AuthError = anyhow::anyhow!("signing failed").into();
        assert!(matches!(err, AuthError::Internal(msg) if msg == "signing failed"));
    }
}
