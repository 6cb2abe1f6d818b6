/// Tracing subscriber setup
///
/// `local` logs human-readable output at debug level; `dev` and `prod` log
/// JSON, at debug and info level respectively. `RUST_LOG` overrides the
/// default filter.
use crate::config::Environment;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init_tracing(env: Environment) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(env))
        .with_target(false);

    let result = match env {
        Environment::Local => builder.pretty().try_init(),
        Environment::Dev | Environment::Prod => builder.json().try_init(),
    };

    result.map_err(|e| anyhow!("Failed to initialize tracing: {}", e))
}

fn env_filter(env: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(env)))
}

fn default_directives(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "sso_service=debug,info",
        Environment::Prod => "info",
    }
}
