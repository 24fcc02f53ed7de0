use std::time::Duration;

use anyhow::{Context, Result};

use crate::render::compose::DEFAULT_URL_TRUNCATE_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// PostgreSQL storage when set; in-memory storage otherwise.
    pub database_url: Option<String>,
    pub pdf_converter_bin: String,
    /// May contain `{input}` / `{output}` placeholders.
    pub pdf_converter_args: Vec<String>,
    pub pdf_timeout: Duration,
    pub pdf_max_concurrency: usize,
    pub url_truncate_threshold: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            pdf_converter_bin: std::env::var("PDF_CONVERTER_BIN")
                .unwrap_or_else(|_| "weasyprint".to_string()),
            pdf_converter_args: split_args(
                &std::env::var("PDF_CONVERTER_ARGS")
                    .unwrap_or_else(|_| "{input} {output}".to_string()),
            ),
            pdf_timeout: Duration::from_secs(parse_env("PDF_TIMEOUT_SECS", 30)?),
            pdf_max_concurrency: parse_env("PDF_MAX_CONCURRENCY", 4)?,
            url_truncate_threshold: parse_env(
                "URL_TRUNCATE_THRESHOLD",
                DEFAULT_URL_TRUNCATE_THRESHOLD,
            )?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
