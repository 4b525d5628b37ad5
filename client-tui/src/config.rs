//! Runtime configuration for the board client.
//!
//! Every value has a compile-time default and can be overridden at runtime
//! via a dedicated environment variable. Command-line flags take precedence
//! over both.

use std::path::PathBuf;
use std::time::Duration;

/// Default game server address (host:port).
const DEFAULT_SERVER_ADDR: &str = "localhost:8080";

/// Log directory used when no cache directory can be determined.
const DEFAULT_LOG_DIR: &str = "logs";

/// Default UI refresh interval in milliseconds (~30fps).
const DEFAULT_TICK_MS: u64 = 33;

/// Get the game server address.
///
/// Priority:
/// 1. `CHESSBOARD_SERVER` env variable if set
/// 2. `localhost:8080` as fallback
pub fn get_server_addr() -> String {
    std::env::var("CHESSBOARD_SERVER").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string())
}

/// Get the directory for rolling log files.
///
/// Priority:
/// 1. `CHESSBOARD_LOG_DIR` env variable if set
/// 2. `<cache dir>/chessboard/logs`
/// 3. `./logs` when the platform has no cache directory
pub fn get_log_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CHESSBOARD_LOG_DIR") {
        return PathBuf::from(path);
    }

    dirs::cache_dir()
        .map(|dir| dir.join("chessboard").join("logs"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Get the UI refresh interval.
///
/// Priority:
/// 1. `CHESSBOARD_TICK_MS` env variable if set (falls back to default if the
///    value is not a positive integer)
/// 2. `33` ms as fallback
pub fn get_tick_interval() -> Duration {
    let ms = std::env::var("CHESSBOARD_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    Duration::from_millis(ms)
}

/// Resolved settings for one run of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: String,
    /// Join this game instead of requesting a new one.
    pub game_id: Option<String>,
    pub log_dir: PathBuf,
    pub tick: Duration,
}

impl Config {
    /// Merge command-line overrides over the environment defaults.
    pub fn resolve(server: Option<String>, game_id: Option<String>, log_dir: Option<PathBuf>) -> Self {
        Self {
            server: server.unwrap_or_else(get_server_addr),
            game_id,
            log_dir: log_dir.unwrap_or_else(get_log_dir),
            tick: get_tick_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_server_addr() {
        let addr = get_server_addr();
        match std::env::var("CHESSBOARD_SERVER") {
            Ok(val) => assert_eq!(addr, val),
            Err(_) => assert_eq!(addr, DEFAULT_SERVER_ADDR),
        }
    }

    #[test]
    fn test_get_log_dir() {
        let dir = get_log_dir();
        match std::env::var("CHESSBOARD_LOG_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert!(dir.ends_with("logs")),
        }
    }

    #[test]
    fn test_get_tick_interval_default() {
        if std::env::var("CHESSBOARD_TICK_MS").is_err() {
            assert_eq!(get_tick_interval(), Duration::from_millis(DEFAULT_TICK_MS));
        }
    }

    #[test]
    fn test_flags_override_environment() {
        let config = Config::resolve(
            Some("example.com:9000".to_string()),
            Some("abc".to_string()),
            Some(PathBuf::from("/tmp/board-logs")),
        );
        assert_eq!(config.server, "example.com:9000");
        assert_eq!(config.game_id.as_deref(), Some("abc"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/board-logs"));
    }
}
