//! Configuration module for Woolly

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::Timeline;
use crate::render::RenderOptions;

/// Environment variable overriding `instance`
pub const ENV_INSTANCE: &str = "WOOLLY_INSTANCE";
/// Environment variable overriding `access_token`
pub const ENV_TOKEN: &str = "WOOLLY_TOKEN";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Instance to talk to (e.g. mastodon.social)
    #[serde(default = "default_instance")]
    pub instance: String,

    /// OAuth access token, needed for home, bookmarks and notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Timeline shown when none is given (home, local, public)
    #[serde(default = "default_timeline")]
    pub default_timeline: String,

    /// Number of items to fetch per request
    #[serde(default = "default_post_limit")]
    pub post_limit: usize,

    /// Wrap width for rendered posts (0 = no wrapping)
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    /// Print link targets after link text
    #[serde(default = "default_show_link_targets")]
    pub show_link_targets: bool,
}

fn default_instance() -> String {
    "mastodon.social".to_string()
}

fn default_timeline() -> String {
    "public".to_string()
}

fn default_post_limit() -> usize {
    20
}

fn default_wrap_width() -> usize {
    80
}

fn default_show_link_targets() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance: default_instance(),
            access_token: None,
            default_timeline: default_timeline(),
            post_limit: default_post_limit(),
            wrap_width: default_wrap_width(),
            show_link_targets: default_show_link_targets(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.config/woolly/config.toml)
    ///
    /// The directory is created by [`Config::save_to`], not here.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("woolly").join("config.toml"))
    }

    /// Load config from the default path or create default, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(
            std::env::var(ENV_INSTANCE).ok(),
            std::env::var(ENV_TOKEN).ok(),
        );
        Ok(config)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Override instance and token; empty values are ignored
    pub fn apply_overrides(&mut self, instance: Option<String>, token: Option<String>) {
        if let Some(instance) = instance.filter(|s| !s.trim().is_empty()) {
            self.instance = instance;
        }
        if let Some(token) = token.filter(|s| !s.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    /// The configured default timeline, falling back to public when invalid
    pub fn timeline(&self) -> Timeline {
        self.default_timeline.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}; using the public timeline");
            Timeline::Public
        })
    }

    /// Rendering options derived from this config
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.wrap_width,
            show_link_targets: self.show_link_targets,
        }
    }
}
