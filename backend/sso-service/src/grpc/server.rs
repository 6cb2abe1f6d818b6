/// gRPC server implementation for sso-service
///
/// Implements all RPCs from sso.proto:
/// - Register: create an account, returns the user id
/// - Login: verify credentials, returns a session token for the application
/// - IsAdmin: administrative privilege of a user
///
/// Request shape is validated here before the call reaches `AuthService`;
/// domain errors are translated through `From<AuthError> for Status`.
use crate::services::AuthService;
use crate::validators::{require_id, require_non_empty};
use std::sync::Arc;
use tonic::{Request, Response, Status};

// Import generated protobuf types
pub mod sso {
    pub mod auth {
        tonic::include_proto!("auth");
    }
}

use sso::auth::auth_server::Auth;
use sso::auth::*;

/// SSO service gRPC server
#[derive(Clone)]
pub struct SsoGrpcServer {
    auth: Arc<AuthService>,
}

impl SsoGrpcServer {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

#[tonic::async_trait]
impl Auth for SsoGrpcServer {
    /// Register new user with email and password
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> std::result::Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();

        require_non_empty("email", &req.email)?;
        require_non_empty("password", &req.password)?;

        let user_id = self
            .auth
            .register_new_user(&req.email, &req.password)
            .await?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    /// Verify credentials and issue a token scoped to `app_id`
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> std::result::Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        require_non_empty("email", &req.email)?;
        require_non_empty("password", &req.password)?;
        require_id("app_id", req.app_id)?;

        let token = self
            .auth
            .login(&req.email, &req.password, req.app_id)
            .await?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> std::result::Result<Response<IsAdminResponse>, Status> {
        let req = request.into_inner();

        require_id("user_id", req.user_id)?;

        let is_admin = self.auth.is_admin(req.user_id).await?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryCredentialStore;
    use crate::error::Result;
    use crate::models::{App, User};
    use crate::security::{PasswordHasher, TokenIssuer};
    use std::time::Duration;
    use tonic::Code;

    /// Plaintext hasher so binding tests don't pay for Argon2
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String> {
            Ok(format!("plain:{}", password))
        }

        fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
            Ok(password_hash == format!("plain:{}", password))
        }
    }

    struct StaticIssuer;

    impl TokenIssuer for StaticIssuer {
        fn issue(&self, user: &User, app: &App, _ttl: Duration) -> Result<String> {
            Ok(format!("token-{}-{}", user.id, app.id))
        }
    }

    fn server() -> SsoGrpcServer {
        let store = Arc::new(InMemoryCredentialStore::new().with_app(1, "web", "secret"));
        let auth = AuthService::with_store(
            store,
            Arc::new(PlainHasher),
            Arc::new(StaticIssuer),
            Duration::from_secs(60),
        );
        SsoGrpcServer::new(Arc::new(auth))
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let server = server();

        let registered = server
            .register(Request::new(RegisterRequest {
                email: "alice@example.com".into(),
                password: "secret1".into(),
            }))
            .await
            .unwrap()
            .into_inner();

        let login = server
            .login(Request::new(LoginRequest {
                email: "alice@example.com".into(),
                password: "secret1".into(),
                app_id: 1,
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(login.token, format!("token-{}-1", registered.user_id));
    }

    #[tokio::test]
    async fn test_whitespace_password_is_accepted() {
        let server = server();

        server
            .register(Request::new(RegisterRequest {
                email: "spaces@example.com".into(),
                password: "   ".into(),
            }))
            .await
            .expect("non-empty password should register");

        let login = server
            .login(Request::new(LoginRequest {
                email: "spaces@example.com".into(),
                password: "   ".into(),
                app_id: 1,
            }))
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn test_validation_messages() {
        let server = server();

        let status = server
            .register(Request::new(RegisterRequest {
                email: String::new(),
                password: "secret1".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "email is required");

        let status = server
            .login(Request::new(LoginRequest {
                email: "alice@example.com".into(),
                password: String::new(),
                app_id: 1,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.message(), "password is required");

        let status = server
            .login(Request::new(LoginRequest {
                email: "alice@example.com".into(),
                password: "secret1".into(),
                app_id: 0,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "app_id is required");

        let status = server
            .is_admin(Request::new(IsAdminRequest { user_id: 0 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "user_id is required");
    }

    #[tokio::test]
    async fn test_domain_errors_map_to_codes() {
        let server = server();

        let status = server
            .login(Request::new(LoginRequest {
                email: "bob@example.com".into(),
                password: "secret1".into(),
                app_id: 1,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);

        let register = || {
            server.register(Request::new(RegisterRequest {
                email: "alice@example.com".into(),
                password: "secret1".into(),
            }))
        };
        register().await.unwrap();
        assert_eq!(register().await.unwrap_err().code(), Code::AlreadyExists);

        let status = server
            .login(Request::new(LoginRequest {
                email: "alice@example.com".into(),
                password: "secret1".into(),
                app_id: 2,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::FailedPrecondition);

        let status = server
            .is_admin(Request::new(IsAdminRequest { user_id: 404 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }
}
