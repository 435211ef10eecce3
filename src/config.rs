use crate::error::{CropWiseError, Result};
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Prediction service root, e.g. http://localhost:8000
    pub url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_enabled() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".into(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
            enabled: default_enabled(),
        }
    }
}

impl ServiceConfig {
    /// Full URL for an endpoint such as `recommend`.
    pub fn endpoint(&self, name: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}/{}", base, name)
        } else {
            format!("{}/{}/{}", base, prefix, name)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(CropWiseError::Config(format!(
                "service.url must start with http:// or https:// (got '{}')",
                self.url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CropWiseError::Config(
                "service.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load from an explicit path, or the first config found in the standard
    /// locations. With no file anywhere the built-in defaults are used.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(CropWiseError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.clone()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {:?}", config_path);
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| CropWiseError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str)?;

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| CropWiseError::Config(format!("Failed to parse config: {}", e)))?;

        config.service.validate()?;
        Ok(config)
    }

    /// Search config/config.yaml, then the XDG config directory.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|d| d.join("cropwise").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/cropwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropWiseError::Config("Cannot determine config directory".into()))?
            .join("cropwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Prediction service");

        let defaults = ServiceConfig::default();

        let url: String = Input::new()
            .with_prompt("  URL")
            .default(defaults.url.clone())
            .interact_text()
            .map_err(|e| CropWiseError::Config(format!("Input error: {}", e)))?;

        let api_prefix: String = Input::new()
            .with_prompt("  API prefix")
            .default(defaults.api_prefix.clone())
            .interact_text()
            .map_err(|e| CropWiseError::Config(format!("Input error: {}", e)))?;

        let timeout_secs: u64 = Input::new()
            .with_prompt("  Timeout (seconds)")
            .default(defaults.timeout_secs)
            .interact_text()
            .map_err(|e| CropWiseError::Config(format!("Input error: {}", e)))?;

        let enabled = Confirm::new()
            .with_prompt("  Use the remote service (no = offline mode)")
            .default(true)
            .interact()
            .map_err(|e| CropWiseError::Config(format!("Input error: {}", e)))?;

        let config = Config {
            service: ServiceConfig {
                url,
                api_prefix,
                timeout_secs,
                enabled,
            },
        };
        config.service.validate()?;

        let config_path = Self::default_config_path()?;
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CropWiseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# CropWise Configuration\n# Generated by `cropwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CropWiseError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
