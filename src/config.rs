use std::path::PathBuf;

/// Process-wide configuration, loaded once at startup and shared with
/// handlers through `web::Data`. Rotating `token_secret` invalidates every
/// outstanding token.
#[derive(Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub token_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./data/survey.db".to_string())
            .into();

        let token_secret =
            std::env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in .env");

        let token_ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24);

        Self {
            database_path,
            token_secret,
            token_ttl_hours,
        }
    }
}
