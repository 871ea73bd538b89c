//! Environment-driven configuration, resolved once at startup.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_EVENTS_FILE: &str = "events.jsonl";

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port (`PORT`, default 3000).
    pub port: u16,
    /// Path of the JSONL store (`EVENTS_FILE`, default `events.jsonl`).
    pub events_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Lookup is injected so tests do not touch process-global env vars.
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let events_file = lookup("EVENTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EVENTS_FILE));
        Self { port, events_file }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.events_file, PathBuf::from(DEFAULT_EVENTS_FILE));
    }

    #[test]
    fn reads_port_and_path_from_env() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("8088".to_string()),
            "EVENTS_FILE" => Some("/var/log/quiz/events.jsonl".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8088);
        assert_eq!(config.events_file, PathBuf::from("/var/log/quiz/events.jsonl"));
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        let config = Config::from_lookup(|key| {
            (key == "PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
