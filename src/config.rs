//! Server configuration from environment variables.
//!
//! `HOST`, `PORT`, `DATA_DIR`, `SESSION_TIMEOUT_HOURS`, `CLEANUP_INTERVAL_MINUTES`, `SESSION_KEY`.
//! Missing or unparseable values fall back to the defaults below.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory for per-session snapshot files.
    pub data_dir: PathBuf,
    /// Sessions not touched for this long are dropped from memory.
    pub session_timeout: Duration,
    pub cleanup_interval: Duration,
    /// Cookie signing key (`SESSION_KEY`, at least 64 bytes). Without it a random key is used and
    /// sessions do not survive a restart.
    pub session_key: Option<Vec<u8>>,
}

/// Shortest accepted cookie signing key.
pub const MIN_SESSION_KEY_LEN: usize = 64;

/// Longest accepted session timeout (one year). Also bounds the session cookie lifetime.
pub const MAX_SESSION_TIMEOUT_HOURS: u64 = 24 * 365;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            session_timeout: default_session_timeout(),
            cleanup_interval: default_cleanup_interval(),
            session_key: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let data_dir = lookup("DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let session_timeout = lookup("SESSION_TIMEOUT_HOURS")
            .and_then(|h| h.parse::<u64>().ok())
            .filter(|h| (1..=MAX_SESSION_TIMEOUT_HOURS).contains(h))
            .and_then(|h| h.checked_mul(3600))
            .map(Duration::from_secs)
            .unwrap_or_else(default_session_timeout);
        let cleanup_interval = lookup("CLEANUP_INTERVAL_MINUTES")
            .and_then(|m| m.parse::<u64>().ok())
            .filter(|m| *m > 0)
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
            .unwrap_or_else(default_cleanup_interval);
        let session_key = lookup("SESSION_KEY")
            .map(String::into_bytes)
            .filter(|k| k.len() >= MIN_SESSION_KEY_LEN);
        Self {
            host,
            port,
            data_dir,
            session_timeout,
            cleanup_interval,
            session_key,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_session_timeout() -> Duration {
    Duration::from_secs(12 * 3600)
}

fn default_cleanup_interval() -> Duration {
    Duration::from_secs(30 * 60)
}
