/// SSO Service Library
///
/// Verifies user credentials, issues per-application session tokens,
/// registers accounts and answers admin-privilege checks.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: Credential store traits and adapters (PostgreSQL, in-memory)
/// - `error`: Error types
/// - `grpc`: gRPC server implementation
/// - `models`: Data models
/// - `security`: Password hashing and token issuance
/// - `services`: Authentication business logic
/// - `telemetry`: Tracing subscriber setup
/// - `validators`: Input validation
pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod models;
pub mod security;
pub mod services;
pub mod telemetry;
pub mod validators;

// Re-export commonly used types
pub use error::{AuthError, Result};
pub use grpc::SsoGrpcServer;
pub use services::AuthService;
