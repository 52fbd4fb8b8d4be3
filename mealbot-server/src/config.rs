//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for mealbot-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8080"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://mealbot.db"`).
    /// `"sqlite::memory:"` gives a throwaway database.
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Base URL of the LLM gateway, including any API prefix.
    pub gateway_url: String,

    /// Path under `gateway_url` that receives chat turns.
    pub gateway_chat_path: String,

    /// Upper bound on one gateway call, in seconds.  `0` disables the bound.
    pub gateway_timeout_secs: u64,

    /// Base URL of a recipe service exposing `POST /recipes/save`.
    /// When unset, extracted recipes go straight into the local store.
    pub recipe_store_url: Option<String>,

    /// Maximum recipe saves in flight for one chat reply.
    pub recipe_concurrency: usize,

    /// Comma-separated CORS origins; unset means any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("MEALBOT_BIND", "0.0.0.0:8080"),
            database_url: env_or("MEALBOT_DATABASE_URL", "sqlite://mealbot.db"),
            log_level: env_or("MEALBOT_LOG", "info"),
            log_json: env_flag("MEALBOT_LOG_JSON", false),
            gateway_url: env_or("MEALBOT_GATEWAY_URL", "http://127.0.0.1:8000/api/v1"),
            gateway_chat_path: env_or(
                "MEALBOT_GATEWAY_CHAT_PATH",
                mealbot_gateway::DEFAULT_CHAT_PATH,
            ),
            gateway_timeout_secs: parse_env(
                "MEALBOT_GATEWAY_TIMEOUT_SECS",
                mealbot_gateway::DEFAULT_TIMEOUT_SECS,
            ),
            recipe_store_url: env_opt("MEALBOT_RECIPE_STORE_URL"),
            recipe_concurrency: parse_env("MEALBOT_RECIPE_CONCURRENCY", 4usize).max(1),
            cors_allowed_origins: env_opt("MEALBOT_CORS_ORIGINS"),
            enable_swagger: env_flag("MEALBOT_ENABLE_SWAGGER", true),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: in-memory database, local recipe store.
    pub fn for_tests(gateway_url: impl Into<String>) -> Self {
        Self {
            bind_address: "127.0.0.1:0".into(),
            database_url: "sqlite::memory:".into(),
            log_level: "debug".into(),
            log_json: false,
            gateway_url: gateway_url.into(),
            gateway_chat_path: mealbot_gateway::DEFAULT_CHAT_PATH.into(),
            gateway_timeout_secs: 5,
            recipe_store_url: None,
            recipe_concurrency: 4,
            cors_allowed_origins: None,
            enable_swagger: false,
        }
    }
}
