/// Authentication service
///
/// Owns the business rules of the SSO service: credential verification,
/// registration and the admin check. Storage, hashing and signing are reached
/// only through the collaborator traits, so the service holds no per-request
/// state and is shared as `Arc<AuthService>` across request handlers.
use crate::db::{AppProvider, StoreError, UserProvider, UserSaver};
use crate::error::{AuthError, Result};
use crate::security::{PasswordHasher, TokenIssuer};
use crate::validators::require_non_empty;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument, warn};

/// Plaintext behind the hash verified when the email is unknown
const DUMMY_PASSWORD: &str = "sso-service-dummy-password";

pub struct AuthService {
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
    // Hashed with the configured work factor on first use
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            hasher,
            token_issuer,
            token_ttl,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Build a service whose three store roles are served by one adapter
    pub fn with_store<S>(
        store: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self
    where
        S: UserSaver + UserProvider + AppProvider + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store,
            hasher,
            token_issuer,
            token_ttl,
        )
    }

    /// Verify credentials and issue a session token scoped to `app_id`
    ///
    /// ## Errors
    ///
    /// - `Validation`: empty email or password
    /// - `InvalidCredentials`: unknown email or wrong password, reported identically
    /// - `DependencyFailure`: the application does not exist
    /// - `Internal`: store, hasher or signing failure
    #[instrument(name = "auth.login", skip_all, fields(email = %email, app_id = app_id))]
    pub async fn login(&self, email: &str, password: &str, app_id: i32) -> Result<String> {
        require_non_empty("email", email)?;
        require_non_empty("password", password)?;

        info!("attempting to login user");

        let user = match self.user_provider.user(email).await {
            Ok(user) => user,
            Err(StoreError::UserNotFound) => {
                warn!("user not found");
                self.verify_dummy(password).await;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(store_failure("failed to get user", e)),
        };

        let hasher = Arc::clone(&self.hasher);
        let candidate = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let password_matches =
            tokio::task::spawn_blocking(move || hasher.verify(&candidate, &stored_hash))
                .await?
                .map_err(|e| {
                    error!(error = %e, "password verification failed");
                    internal(e)
                })?;

        if !password_matches {
            warn!(user_id = user.id, "invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self.app_provider.app(app_id).await {
            Ok(app) => app,
            Err(StoreError::AppNotFound) => {
                warn!("app not found");
                return Err(AuthError::DependencyFailure(format!(
                    "app {} not found",
                    app_id
                )));
            }
            Err(e) => return Err(store_failure("failed to get app", e)),
        };

        let token = self
            .token_issuer
            .issue(&user, &app, self.token_ttl)
            .map_err(|e| {
                error!(error = %e, "failed to generate token");
                internal(e)
            })?;

        info!(user_id = user.id, "user logged in successfully");

        Ok(token)
    }

    /// Hash the password and persist a new user, returning its id
    ///
    /// ## Errors
    ///
    /// - `Validation`: empty email or password
    /// - `AlreadyExists`: the email is already registered
    /// - `Internal`: hasher or store failure
    #[instrument(name = "auth.register_new_user", skip_all, fields(email = %email))]
    pub async fn register_new_user(&self, email: &str, password: &str) -> Result<i64> {
        require_non_empty("email", email)?;
        require_non_empty("password", password)?;

        info!("registering user");

        let hasher = Arc::clone(&self.hasher);
        let plaintext = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await?
            .map_err(|e| {
                error!(error = %e, "failed to generate password hash");
                internal(e)
            })?;

        let user_id = match self.user_saver.save_user(email, &password_hash).await {
            Ok(id) => id,
            Err(StoreError::UserExists) => {
                warn!("user already exists");
                return Err(AuthError::AlreadyExists);
            }
            Err(e) => return Err(store_failure("failed to save user", e)),
        };

        info!(user_id, "user registered");

        Ok(user_id)
    }

    /// Report whether the user holds administrative privilege
    ///
    /// The rule is owned by the store. A missing user is `NotFound`, never `false`.
    #[instrument(name = "auth.is_admin", skip_all, fields(user_id = user_id))]
    pub async fn is_admin(&self, user_id: i64) -> Result<bool> {
        info!("checking if user is admin");

        let is_admin = match self.user_provider.is_admin(user_id).await {
            Ok(flag) => flag,
            Err(StoreError::UserNotFound) => {
                warn!("user not found");
                return Err(AuthError::NotFound);
            }
            Err(e) => return Err(store_failure("failed to check if user is admin", e)),
        };

        info!(is_admin, "checked if user is admin");

        Ok(is_admin)
    }
}

impl AuthService {
    /// Spend one password verification so an unknown email takes as long as a
    /// wrong password. The outcome is discarded.
    async fn verify_dummy(&self, password: &str) {
        let dummy_hash = self
            .dummy_hash
            .get_or_try_init(|| async {
                let hasher = Arc::clone(&self.hasher);
                Ok::<String, AuthError>(
                    tokio::task::spawn_blocking(move || hasher.hash(DUMMY_PASSWORD)).await??,
                )
            })
            .await;

        let dummy_hash = match dummy_hash {
            Ok(hash) => hash.clone(),
            Err(e) => {
                debug!(error = %e, "failed to prepare dummy hash");
                return;
            }
        };

        let hasher = Arc::clone(&self.hasher);
        let candidate = password.to_owned();
        let outcome =
            tokio::task::spawn_blocking(move || hasher.verify(&candidate, &dummy_hash)).await;
        if let Err(e) = outcome {
            debug!(error = %e, "dummy verification task failed");
        }
    }
}

fn store_failure(context: &str, err: StoreError) -> AuthError {
    error!(error = %err, "{}", context);
    AuthError::Internal(format!("{}: {}", context, err))
}

// Collaborator failures always surface as Internal, whatever variant they carry
fn internal(err: AuthError) -> AuthError {
    match err {
        AuthError::Internal(_) => err,
        other => AuthError::Internal(other.to_string()),
    }
}
