/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    ///
    /// Video uploads are excluded from this; they get a size-scaled
    /// budget computed per request.
    pub request_timeout_secs: u64,
    /// Public base URL under which stored objects are served.
    pub public_storage_url: String,
    /// Base URL of the OpenAI-compatible generation provider.
    pub generation_api_base: String,
    /// API key for the generation provider, if configured.
    pub generation_api_key: Option<String>,
    /// Base URL of the Context7 MCP service.
    pub context7_base_url: String,
    /// API key for Context7. When absent, searches answer from the
    /// static best-practices table and say so.
    pub context7_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `3000`                         |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `PUBLIC_STORAGE_URL`   | `http://localhost:9000`        |
    /// | `GENERATION_API_BASE`  | `https://api.openai.com/v1`    |
    /// | `GENERATION_API_KEY`   | unset                          |
    /// | `CONTEXT7_BASE_URL`    | `http://localhost:8700`        |
    /// | `CONTEXT7_API_KEY`     | unset                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_storage_url = std::env::var("PUBLIC_STORAGE_URL")
            .unwrap_or_else(|_| "http://localhost:9000".into());

        let generation_api_base = std::env::var("GENERATION_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let generation_api_key = std::env::var("GENERATION_API_KEY").ok();

        let context7_base_url =
            std::env::var("CONTEXT7_BASE_URL").unwrap_or_else(|_| "http://localhost:8700".into());
        let context7_api_key = std::env::var("CONTEXT7_API_KEY").ok();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_storage_url,
            generation_api_base,
            generation_api_key,
            context7_base_url,
            context7_api_key,
        }
    }
}
