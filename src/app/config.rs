//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::window::RenderOptions;

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Inner width in logical pixels
    pub width: u32,
    /// Inner height in logical pixels
    pub height: u32,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Gold Engine".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            decorated: true,
        }
    }
}

/// Input callback configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Upper bound on callbacks running at the same time
    pub callback_threads: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            callback_threads: 4,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    pub window: WindowConfig,
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default)]
    pub input: InputConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix GOLD_ (e.g., GOLD_RENDER__FRAME_QUEUE_DEPTH=2)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dir) = Self::find_config_dir() {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., GOLD_WINDOW__WIDTH)
        builder = builder.add_source(
            Environment::with_prefix("GOLD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory, next to the executable first
    fn find_config_dir() -> Option<std::path::PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = std::path::PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }

    /// Loads configuration using the GOLD_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("GOLD_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self {
            profile: "release".to_string(),
            window: WindowConfig::default(),
            render: RenderOptions::default(),
            input: InputConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_and_input_sections_default() {
        let config = Config::builder()
            .set_override("profile", "test")
            .and_then(|b| b.set_override("window.title", "t"))
            .and_then(|b| b.set_override("window.width", 10))
            .and_then(|b| b.set_override("window.height", 20))
            .and_then(|b| b.set_override("window.resizable", false))
            .and_then(|b| b.set_override("window.decorated", true))
            .and_then(|b| b.build())
            .expect("config should build");

        let app: AppConfig = config.try_deserialize().expect("config should deserialize");
        assert_eq!(app.window.width, 10);
        assert_eq!(app.render, RenderOptions::default());
        assert_eq!(app.input, InputConfig::default());
    }
}
