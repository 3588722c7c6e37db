use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_FILE: &str = ".booking-session.json";
pub const DEFAULT_CONFIG_FILE: &str = "booking.toml";
const ENV_PREFIX: &str = "BOOKING";

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    pub base_url: String,
    pub session_file: PathBuf,
}

impl CliConfig {
    /// Defaults, then the config file if it exists, then `BOOKING_*` variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let path = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: &Path, env_prefix: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("session_file", DEFAULT_SESSION_FILE)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(env_prefix))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const UNUSED_PREFIX: &str = "BOOKING_CLI_TEST_UNSET";

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_with_prefix(&dir.path().join("missing.toml"), UNUSED_PREFIX).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"https://lessons.example.org\"").unwrap();

        let config = CliConfig::load_with_prefix(file.path(), UNUSED_PREFIX).unwrap();

        assert_eq!(config.base_url, "https://lessons.example.org");
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn test_command_line_base_url_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_with_prefix(&dir.path().join("missing.toml"), UNUSED_PREFIX)
            .unwrap()
            .with_base_url(Some("http://127.0.0.1:9000".to_string()));

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }
}
