//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (env: DATABASE_URL)
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Session lifetime (minutes)
    pub jwt_expiration_minutes: i64,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
    /// Put the cause of internal errors into response bodies
    pub expose_error_details: bool,
    /// Directory for daily rolling log files (stdout only when unset)
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn env_flag(name: &str, default: bool) -> bool {
        std::env::var(name)
            .ok()
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_dev = environment == "development";

        let jwt_secret = Self::require_secret("JWT_SECRET", &environment)?;
        if !is_dev && jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:blog.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt_secret,
            jwt_expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "blog-server".into()),
            jwt_audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "blog-clients".into()),
            cookie_secure: Self::env_flag("COOKIE_SECURE", !is_dev),
            expose_error_details: Self::env_flag("EXPOSE_ERROR_DETAILS", is_dev),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Development settings against the given database, ignoring the environment
    pub fn local(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            http_port: 3000,
            environment: "development".into(),
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            jwt_expiration_minutes: 60,
            jwt_issuer: "blog-server".into(),
            jwt_audience: "blog-clients".into(),
            cookie_secure: false,
            expose_error_details: false,
            log_dir: None,
        }
    }
}
