/// Password hashing and verification using Argon2id
use crate::config::PasswordSettings;
use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// One-way password hashing with constant-time verification
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    ///
    /// Returns `Ok(false)` on mismatch. A malformed hash is an error.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Argon2id hasher
///
/// ## Security
///
/// - Algorithm: Argon2id, version 0x13
/// - Salt: Random 16-byte salt generated per password from the OS RNG
/// - Work factor: memory cost, iterations and lanes from `PasswordSettings`
/// - Output: PHC-formatted string, parameters embedded, safe for database storage
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new(settings: &PasswordSettings) -> Result<Self> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| AuthError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(password_hash)
    }

    /// Uses the parameters embedded in the stored hash, so hashes created with
    /// an older work factor keep verifying after the settings change.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Internal(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}
