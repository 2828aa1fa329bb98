//! Environment selection and per-environment API settings.
//!
//! Everything is read from process environment variables once:
//!
//! | variable | meaning |
//! |---|---|
//! | `SHIFTDESK_ENVIRONMENT` | `development`, `test` or `production` (default `test`) |
//! | `SHIFTDESK_{DEV,TEST,PROD}_BASE_URL` | base URL override for that environment |
//! | `SHIFTDESK_{DEV,TEST,PROD}_TIMEOUT` | timeout override in milliseconds |

use std::sync::OnceLock;

use shiftdesk_types::{ApiConfig, Environment};

pub const ENVIRONMENT_VAR: &str = "SHIFTDESK_ENVIRONMENT";

static RESOLVED: OnceLock<ApiConfig> = OnceLock::new();

fn var_prefix(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "SHIFTDESK_DEV",
        Environment::Test => "SHIFTDESK_TEST",
        Environment::Production => "SHIFTDESK_PROD",
    }
}

/// Built-in base URL used when no override is set.
pub fn default_base_url(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "http://localhost:5000",
        Environment::Test => "https://api-test.shiftdesk.app",
        Environment::Production => "https://api.shiftdesk.app",
    }
}

/// Unset or unrecognized values select `test`.
pub fn resolve_environment(value: Option<&str>) -> Environment {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

/// Build the config from an arbitrary variable lookup.
///
/// Pure: the same lookup always yields the same config.
pub fn resolve_with<F>(lookup: F) -> ApiConfig
where
    F: Fn(&str) -> Option<String>,
{
    let environment = resolve_environment(lookup(ENVIRONMENT_VAR).as_deref());
    let prefix = var_prefix(environment);

    let base_url = lookup(&format!("{}_BASE_URL", prefix))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| default_base_url(environment).to_string());

    let timeout_ms = lookup(&format!("{}_TIMEOUT", prefix))
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(ApiConfig::DEFAULT_TIMEOUT_MS);

    ApiConfig::new(environment, base_url, timeout_ms)
}

/// Resolve from the process environment. Computed on first call, fixed afterwards.
pub fn resolve() -> &'static ApiConfig {
    RESOLVED.get_or_init(|| {
        let config = resolve_with(|name| std::env::var(name).ok());
        tracing::debug!(
            environment = %config.environment,
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "Resolved API config"
        );
        config
    })
}
