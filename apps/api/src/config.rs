use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use resume_merge::{MergeLimits, PageSize};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Headless-browser PDF service that accepts `{ "html": ... }`.
    pub pdf_renderer_url: String,
    pub port: u16,
    pub rust_log: String,
    pub merge_limits: MergeLimits,
    pub page_size: PageSize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MergeLimits::default();

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            pdf_renderer_url: require_env("PDF_RENDERER_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            merge_limits: MergeLimits {
                max_template_bytes: parse_env("MAX_TEMPLATE_BYTES", defaults.max_template_bytes)?,
                max_items_per_region: parse_env(
                    "MAX_ITEMS_PER_REGION",
                    defaults.max_items_per_region,
                )?,
                max_brace_depth: parse_env("MAX_BRACE_DEPTH", defaults.max_brace_depth)?,
            },
            page_size: parse_env("PAGE_SIZE", PageSize::A4)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        let port: u16 = parse_env("RESUME_API_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_API_TEST_BAD_PAGE", "tabloid");
        let err = parse_env("RESUME_API_TEST_BAD_PAGE", PageSize::A4).unwrap_err();
        assert!(err.to_string().contains("RESUME_API_TEST_BAD_PAGE"));
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("RESUME_API_TEST_LIMIT", "512");
        let limit: usize = parse_env("RESUME_API_TEST_LIMIT", 1).unwrap();
        assert_eq!(limit, 512);
    }
}
