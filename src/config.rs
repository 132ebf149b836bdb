//! Configuration: optional config file, environment overrides, and
//! request timeout resolution.
//!
//! Nothing here is required for a query to work; a missing or malformed
//! config file falls back to defaults with a log line. Environment
//! variables always override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, anyhow};
use dirs::home_dir;
use serde::Deserialize;
use tracing::{info, warn};

use crate::system::{EnvSource, SystemEnv};

/// Default timeout for provider requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "HOWTO_TIMEOUT";

/// Environment variable forcing a specific provider.
pub const PROVIDER_ENV_VAR: &str = "HOWTO_PROVIDER";

/// Environment variable overriding the provider's default model.
pub const MODEL_ENV_VAR: &str = "HOWTO_MODEL";

/// User configuration, read from `~/.howto/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Provider used when no `--provider` flag is given.
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Model used when no `--model` flag is given.
    #[serde(default)]
    pub default_model: Option<String>,
}

impl Config {
    /// Loads configuration from file and environment, or defaults.
    pub fn load() -> Self {
        Self::load_with(&SystemEnv)
    }

    /// Loads configuration with an injected environment (for testing).
    pub fn load_with(env: &impl EnvSource) -> Self {
        let mut config = match Self::config_path().map(|p| Self::read_file(&p)) {
            Ok(Ok(config)) => config,
            Ok(Err(err)) => {
                info!("no usable config file, using defaults: {err}");
                Self::default()
            }
            Err(err) => {
                warn!("could not resolve config path: {err}");
                Self::default()
            }
        };

        config.apply_env(env);
        config
    }

    /// Reads and parses a config file at `path`.
    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        info!("loaded config from: {}", path.display());
        Ok(config)
    }

    /// Environment variables override config file values.
    fn apply_env(&mut self, env: &impl EnvSource) {
        if let Some(provider) = env.var(PROVIDER_ENV_VAR) {
            self.default_provider = Some(provider);
        }

        if let Some(model) = env.var(MODEL_ENV_VAR) {
            self.default_model = Some(model);
        }
    }

    fn config_path() -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow!("could not find home directory"))?;
        Ok(home.join(".howto").join("config.toml"))
    }
}

/// Returns the timeout for provider requests.
///
/// An explicit flag value takes precedence over the `HOWTO_TIMEOUT`
/// environment variable, which falls back to [`DEFAULT_TIMEOUT`] when
/// absent or unparseable.
pub fn get_timeout(flag: Option<Duration>) -> Duration {
    get_timeout_with(flag, &SystemEnv)
}

/// Returns the timeout with an injected environment (for testing).
pub fn get_timeout_with(flag: Option<Duration>, env: &impl EnvSource) -> Duration {
    if let Some(timeout) = flag {
        if !timeout.is_zero() {
            return timeout;
        }
    }

    if let Some(value) = env.var(TIMEOUT_ENV_VAR) {
        if let Some(timeout) = parse_duration(&value) {
            return timeout;
        }
    }

    DEFAULT_TIMEOUT
}

/// Parses a duration string like `"45s"`, `"2m"`, `"1m30s"` or `"500ms"`.
///
/// Accepts a sequence of integer/unit pairs with units `ms`, `s`, `m`
/// and `h`. Returns `None` for anything else, including a zero total.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let bytes = s.as_bytes();
    let mut total = Duration::ZERO;
    let mut i = 0;

    while i < bytes.len() {
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let value: u64 = s[digits_start..i].parse().ok()?;

        let unit_start = i;
        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }

        let part = match &s[unit_start..i] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.checked_mul(60)?),
            "h" => Duration::from_secs(value.checked_mul(3600)?),
            _ => return None,
        };

        total = total.checked_add(part)?;
    }

    if total.is_zero() { None } else { Some(total) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for FakeEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0
                .get(key)
                .map(|v| (*v).to_string())
                .filter(|v| !v.is_empty())
        }
    }

    fn env_with(vars: &[(&'static str, &'static str)]) -> FakeEnv {
        FakeEnv(vars.iter().copied().collect())
    }

    #[test]
    fn test_parse_duration_accepts_common_forms() {
        let cases = [
            ("45s", Duration::from_secs(45)),
            ("2m", Duration::from_secs(120)),
            ("1h", Duration::from_secs(3600)),
            ("500ms", Duration::from_millis(500)),
            ("1m30s", Duration::from_secs(90)),
            (" 30s ", Duration::from_secs(30)),
        ];

        for (input, want) in cases {
            assert_eq!(parse_duration(input), Some(want), "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for input in ["", "invalid", "30", "s", "-5s", "10x", "1s extra", "0s"] {
            assert_eq!(parse_duration(input), None, "input: {input:?}");
        }
    }

    #[test]
    fn test_get_timeout_default() {
        let timeout = get_timeout_with(None, &env_with(&[]));
        assert_eq!(timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_get_timeout_flag_takes_precedence() {
        let env = env_with(&[(TIMEOUT_ENV_VAR, "45s")]);

        let timeout = get_timeout_with(Some(Duration::from_secs(60)), &env);
        assert_eq!(timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_get_timeout_from_environment() {
        let env = env_with(&[(TIMEOUT_ENV_VAR, "2m")]);

        let timeout = get_timeout_with(None, &env);
        assert_eq!(timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_get_timeout_invalid_environment_falls_back() {
        let env = env_with(&[(TIMEOUT_ENV_VAR, "invalid")]);

        let timeout = get_timeout_with(None, &env);
        assert_eq!(timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_read_file_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_provider = \"Anthropic\"").unwrap();
        writeln!(file, "default_model = \"claude-sonnet-4-20250514\"").unwrap();

        let config = Config::read_file(file.path()).unwrap();
        assert_eq!(config.default_provider.as_deref(), Some("Anthropic"));
        assert_eq!(
            config.default_model.as_deref(),
            Some("claude-sonnet-4-20250514")
        );
    }

    #[test]
    fn test_read_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::read_file(&dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_env_overrides_file_values() {
        let mut config = Config {
            default_provider: Some("OpenAI".to_string()),
            default_model: None,
        };

        let env = env_with(&[(PROVIDER_ENV_VAR, "Gemini"), (MODEL_ENV_VAR, "gemini-2.0-flash")]);
        config.apply_env(&env);

        assert_eq!(config.default_provider.as_deref(), Some("Gemini"));
        assert_eq!(config.default_model.as_deref(), Some("gemini-2.0-flash"));
    }
}
