use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string for the record store. When unset the service
    /// falls back to an in-process store that does not survive restarts.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Root directory for uploaded files; created on first write.
    pub upload_dir: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_bytes = upload_limit_bytes(parse_env("MAX_UPLOAD_MB", 20)?)?;

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            upload_dir: optional_env("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string()),
            port: parse_env("PORT", 8000)?,
            max_upload_bytes,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn upload_limit_bytes(max_upload_mb: usize) -> Result<usize> {
    max_upload_mb
        .checked_mul(1024 * 1024)
        .with_context(|| format!("MAX_UPLOAD_MB={max_upload_mb} is too large"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("RESUME_API_TEST_UNSET_PORT", 8000).unwrap();
        assert_eq!(port, 8000);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_API_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("RESUME_API_TEST_BAD_PORT", 8000);
        assert!(result.is_err());
        std::env::remove_var("RESUME_API_TEST_BAD_PORT");
    }

    #[test]
    fn test_upload_limit_converts_megabytes() {
        assert_eq!(upload_limit_bytes(20).unwrap(), 20 * 1024 * 1024);
    }

    #[test]
    fn test_upload_limit_overflow_is_an_error() {
        assert!(upload_limit_bytes(usize::MAX).is_err());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        std::env::set_var("RESUME_API_TEST_BLANK", "   ");
        assert!(optional_env("RESUME_API_TEST_BLANK").is_none());
        std::env::remove_var("RESUME_API_TEST_BLANK");
    }
}
