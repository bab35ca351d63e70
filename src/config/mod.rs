//! Configuration management for Scene Touch
//!
//! Handles loading, parsing, and validation of the YAML configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::touch::ImageSize;
use crate::translator::TouchCapability;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub touch: TouchConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub output: OutputFormat,
}

/// Touch input configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TouchConfig {
    #[serde(default)]
    pub capability: CapabilitySetting,
    /// Platform API level, consulted when `capability` is `auto`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_level: Option<u32>,
}

/// Capability selection as written in the config file
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CapabilitySetting {
    /// Derive from `api_level` (multi-touch when absent)
    #[default]
    Auto,
    Multi,
    Single,
}

/// Size of the displayed scene image
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_extent")]
    pub width: u32,
    #[serde(default = "default_image_extent")]
    pub height: u32,
}

/// Where translated messages are written
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable log lines
    #[default]
    Log,
    /// One JSON object per message on stdout
    Json,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            capability: CapabilitySetting::Auto,
            api_level: None,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: default_image_extent(),
            height: default_image_extent(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file with validation
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Parse and validate YAML configuration
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        if self.image.width == 0 || self.image.height == 0 {
            anyhow::bail!(
                "Image size {}x{} is invalid (both extents must be > 0)",
                self.image.width,
                self.image.height
            );
        }

        if self.touch.capability != CapabilitySetting::Auto && self.touch.api_level.is_some() {
            anyhow::bail!(
                "touch.api_level is only used with capability 'auto' (got '{:?}')",
                self.touch.capability
            );
        }

        Ok(())
    }

    /// Resolve the capability the translator is built with
    pub fn resolve_capability(&self) -> TouchCapability {
        match self.touch.capability {
            CapabilitySetting::Multi => TouchCapability::Multi,
            CapabilitySetting::Single => TouchCapability::Single,
            CapabilitySetting::Auto => self
                .touch
                .api_level
                .map(TouchCapability::from_api_level)
                .unwrap_or(TouchCapability::Multi),
        }
    }

    /// Configured image size
    pub fn image_size(&self) -> Result<ImageSize> {
        ImageSize::new(self.image.width, self.image.height).ok_or_else(|| {
            anyhow::anyhow!(
                "Image size {}x{} is invalid",
                self.image.width,
                self.image.height
            )
        })
    }
}

// Default value functions
fn default_image_extent() -> u32 { 320 }
