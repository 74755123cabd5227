//! Application configuration.
//!
//! Configuration is stored in TOML format at `~/.config/gits-qr/config.toml`
//! (or XDG equivalent). Every key is optional; a missing file yields the
//! defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! brand_prefix = "GITS-"
//! placeholder_name = "Contact"
//! fallback_url = "https://example.com"
//! text_message_scheme = "sms:"
//! default_mode = "phoneContact"
//! profile = "repeatable"
//!
//! [render]
//! size = 300
//! error_correction = "H"
//! quiet_zone = true
//! footer_height = 40
//! brand_mark = "GITS"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::display::{DEFAULT_BRAND_PREFIX, NamingOptions};
use crate::encode::{DEFAULT_FALLBACK_URL, DEFAULT_PLACEHOLDER_NAME, EncodeOptions, ProfileKind};
use crate::model::Mode;
use crate::render::{MAX_FOOTER_HEIGHT, MAX_RENDER_SIZE, MIN_RENDER_SIZE, RenderOptions};

/// Errors that can occur when loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Brand tag prepended to every export filename.
    pub brand_prefix: String,

    /// Formatted name used when a contact card would otherwise be empty.
    pub placeholder_name: String,

    /// Social payload when no link is present.
    pub fallback_url: String,

    /// Scheme prepended to text-message payloads (e.g. `sms:`).
    /// Unset keeps the bare phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_message_scheme: Option<String>,

    /// Mode used when neither the record nor the command line picks one.
    pub default_mode: Mode,

    /// Field profile for encoding.
    pub profile: ProfileKind,

    /// Barcode rendering and export settings.
    pub render: RenderOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            brand_prefix: DEFAULT_BRAND_PREFIX.to_string(),
            placeholder_name: DEFAULT_PLACEHOLDER_NAME.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            text_message_scheme: None,
            default_mode: Mode::default(),
            profile: ProfileKind::default(),
            render: RenderOptions::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    ///
    /// Returns the default config if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the default configuration file path.
    ///
    /// Uses XDG conventions:
    /// - Primary: `$XDG_CONFIG_HOME/gits-qr/config.toml`
    /// - Fallback: platform-specific config dir (e.g., `~/.config/gits-qr/config.toml` on Linux)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join("gits-qr").join("config.toml"));
        }

        dirs::config_dir()
            .map(|p| p.join("gits-qr").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brand_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "brand_prefix cannot be empty".into(),
            ));
        }

        if !self
            .brand_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(ConfigError::Validation(format!(
                "brand_prefix '{}' may only contain ASCII letters, digits, '-', '_' and '.'",
                self.brand_prefix
            )));
        }

        if self.placeholder_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "placeholder_name cannot be blank".into(),
            ));
        }

        match Url::parse(&self.fallback_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Validation(format!(
                    "fallback_url must use http or https, got '{}'",
                    url.scheme()
                )));
            }
            Err(e) => {
                return Err(ConfigError::Validation(format!(
                    "fallback_url '{}' is not a valid URL: {e}",
                    self.fallback_url
                )));
            }
        }

        if !(MIN_RENDER_SIZE..=MAX_RENDER_SIZE).contains(&self.render.size) {
            return Err(ConfigError::Validation(format!(
                "render.size must be between {MIN_RENDER_SIZE} and {MAX_RENDER_SIZE}, got {}",
                self.render.size
            )));
        }

        if self.render.footer_height > MAX_FOOTER_HEIGHT {
            return Err(ConfigError::Validation(format!(
                "render.footer_height must be at most {MAX_FOOTER_HEIGHT}, got {}",
                self.render.footer_height
            )));
        }

        Ok(())
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            profile: self.profile,
            placeholder_name: self.placeholder_name.clone(),
            fallback_url: self.fallback_url.clone(),
            text_message_scheme: self.text_message_scheme.clone(),
        }
    }

    pub fn naming_options(&self) -> NamingOptions {
        NamingOptions {
            prefix: self.brand_prefix.clone(),
            profile: self.profile,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        self.render.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ErrorCorrection;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brand_prefix, "GITS-");
        assert_eq!(config.render.size, 300);
        assert_eq!(config.render.error_correction, ErrorCorrection::H);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "text_message_scheme = \"sms:\"\nprofile = \"fixed-label\"\n\n[render]\nsize = 512\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.text_message_scheme.as_deref(), Some("sms:"));
        assert_eq!(config.profile, ProfileKind::FixedLabel);
        assert_eq!(config.render.size, 512);
        assert_eq!(config.render.footer_height, 40);
        assert_eq!(config.fallback_url, "https://example.com");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = AppConfig {
            brand_prefix: "GITS/".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            fallback_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            fallback_url: "not a url".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.render.size = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_caps_render_dimensions() {
        let mut config = AppConfig::default();
        config.render.size = u32::MAX;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("render.size must be between"), "{err}");

        let mut config = AppConfig::default();
        config.render.footer_height = u32::MAX;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("render.footer_height"), "{err}");

        let mut config = AppConfig::default();
        config.render.size = MAX_RENDER_SIZE;
        config.render.footer_height = MAX_FOOTER_HEIGHT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            text_message_scheme: Some("sms:".into()),
            default_mode: Mode::SocialMedia,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_options_follow_config() {
        let config = AppConfig {
            brand_prefix: "ACME-".into(),
            profile: ProfileKind::FixedLabel,
            ..Default::default()
        };
        assert_eq!(config.naming_options().prefix, "ACME-");
        assert_eq!(config.encode_options().profile, ProfileKind::FixedLabel);
    }
}
