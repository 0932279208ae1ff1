use std::env;
use tracing::warn;

/// Number of comments requested when the user doesn't pick one.
pub const DEFAULT_COMMENT_LIMIT: u32 = 100;

/// Largest comment limit the backend accepts.
pub const MAX_COMMENT_LIMIT: u32 = 500;

const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

/// Settings for talking to the analysis backend.
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) api_base: String,
    pub(crate) requests_per_minute: u32,
    pub(crate) user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `POSTMOOD_API_BASE`, `POSTMOOD_REQUESTS_PER_MINUTE` and
    /// `POSTMOOD_USER_AGENT`, keeping defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_base) = var("POSTMOOD_API_BASE") {
            config = config.api_base(api_base);
        }

        if let Some(raw) = var("POSTMOOD_REQUESTS_PER_MINUTE") {
            match raw.trim().parse::<u32>() {
                Ok(rpm) if rpm > 0 => config = config.requests_per_minute(rpm),
                _ => warn!(value = %raw, "ignoring invalid POSTMOOD_REQUESTS_PER_MINUTE"),
            }
        }

        if let Some(user_agent) = var("POSTMOOD_USER_AGENT") {
            config = config.user_agent(user_agent);
        }

        config
    }

    /// Base URL of the analysis backend, e.g. `http://localhost:8000`.
    #[must_use]
    pub fn api_base<S: Into<String>>(mut self, api_base: S) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Client side cap on outbound requests. Zero is treated as one.
    #[must_use]
    pub fn requests_per_minute(mut self, requests_per_minute: u32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    #[must_use]
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]);
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.requests_per_minute, 60);
        assert!(config.user_agent.starts_with("postmood/"));
    }

    #[test]
    fn test_reads_variables() {
        let config = from_map(&[
            ("POSTMOOD_API_BASE", "https://sentiment.example"),
            ("POSTMOOD_REQUESTS_PER_MINUTE", " 10 "),
            ("POSTMOOD_USER_AGENT", "tests"),
        ]);
        assert_eq!(config.api_base, "https://sentiment.example");
        assert_eq!(config.requests_per_minute, 10);
        assert_eq!(config.user_agent, "tests");
    }

    #[test]
    fn test_invalid_rate_keeps_default() {
        assert_eq!(from_map(&[("POSTMOOD_REQUESTS_PER_MINUTE", "lots")]).requests_per_minute, 60);
        assert_eq!(from_map(&[("POSTMOOD_REQUESTS_PER_MINUTE", "0")]).requests_per_minute, 60);
    }
}
