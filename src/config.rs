use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the recorder service ("start", "stop" and "status"
    /// are resolved relative to it)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Delay between the end of one status poll and the start of the next
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// File extension the recorder writes; drives the idle placeholder
    /// filename shown on the panel ("*.mp3")
    #[serde(default = "default_recording_extension")]
    pub recording_extension: String,

    /// Ask for confirmation before dispatching a stop command
    #[serde(default = "default_confirm_stop")]
    pub confirm_stop: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_recording_extension() -> String {
    "mp3".to_string()
}

fn default_confirm_stop() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            recording_extension: default_recording_extension(),
            confirm_stop: default_confirm_stop(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.config/recpanel/config.json)
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!(
                "Config file not found at {:?}, creating default config",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        tracing::info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        tracing::info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(dir)
        } else {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            PathBuf::from(home).join(".config")
        };

        Ok(config_dir.join("recpanel").join("config.json"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "base_url must start with http:// or https://"
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(anyhow::anyhow!("poll_interval_ms must be greater than 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("request_timeout_secs must be greater than 0"));
        }

        if self.recording_extension.is_empty() {
            return Err(anyhow::anyhow!("recording_extension cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.recording_extension, "mp3");
        assert!(config.confirm_stop);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"base_url": "http://pi.local:8080", "confirm_stop": false}"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://pi.local:8080");
        assert!(!config.confirm_stop);
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.base_url = "pi.local".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.recording_extension = String::new();
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }
}
