use std::env;
use std::time::Duration;

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mining_timeout: Duration,
    pub seed_demo_blocks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            mining_timeout: Duration::from_secs(30),
            seed_demo_blocks: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unparsable values keep their default.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            mining_timeout: lookup("MINING_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.mining_timeout),
            seed_demo_blocks: lookup("SEED_DEMO_BLOCKS")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_demo_blocks),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
