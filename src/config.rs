// src/config.rs

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

/// Number of questions in a quiz when `QUIZ_SIZE` is not set.
pub const DEFAULT_QUIZ_SIZE: usize = 15;

/// Session lifetime when `SESSION_TIMEOUT_MINUTES` is not set.
pub const DEFAULT_SESSION_TIMEOUT_MINUTES: i64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub vocab_dir: PathBuf,
    pub static_dir: PathBuf,
    pub quiz_size: usize,
    pub session_timeout_minutes: i64,
    pub session_sweep_interval_secs: u64,
    pub session_cookie_name: String,
    pub log_dir: String,
    pub log_file: String,
    pub db_dir: PathBuf,
    pub db_file: String,
    /// Path prefix the router is mounted under (empty for `/`).
    pub root_path: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("APP_PORT", 8000),
            vocab_dir: env::var("VOCAB_DIR")
                .unwrap_or_else(|_| "vocabulary".to_string())
                .into(),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string())
                .into(),
            quiz_size: parse_var("QUIZ_SIZE", DEFAULT_QUIZ_SIZE),
            session_timeout_minutes: parse_var(
                "SESSION_TIMEOUT_MINUTES",
                DEFAULT_SESSION_TIMEOUT_MINUTES,
            ),
            session_sweep_interval_secs: parse_var("SESSION_SWEEP_INTERVAL_SECS", 300),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "quiz_session_id".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "log".to_string()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "wlingo.log".to_string()),
            db_dir: env::var("DB_DIR").unwrap_or_else(|_| "db".to_string()).into(),
            db_file: env::var("DB_FILE").unwrap_or_else(|_| "wlingo.db".to_string()),
            root_path: env::var("ROOT_PATH").unwrap_or_default(),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn session_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_timeout_minutes)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            vocab_dir: "vocabulary".into(),
            static_dir: "static".into(),
            quiz_size: DEFAULT_QUIZ_SIZE,
            session_timeout_minutes: DEFAULT_SESSION_TIMEOUT_MINUTES,
            session_sweep_interval_secs: 300,
            session_cookie_name: "quiz_session_id".to_string(),
            log_dir: "log".to_string(),
            log_file: "wlingo.log".to_string(),
            db_dir: "db".into(),
            db_file: "wlingo.db".to_string(),
            root_path: String::new(),
            rust_log: "info".to_string(),
        }
    }
}

// Tracing is not initialized yet when config loads, hence eprintln.
fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            eprintln!("WARNING: {} has invalid value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
