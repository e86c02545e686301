//! Configuration health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that every profile loads and has usable values
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Checks the debug and release profiles
    pub fn new() -> Self {
        Self::with_profiles(vec!["debug", "release"])
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Profile files and GOLD_* environment overrides")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = 0;
        let mut warned = 0;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) if config.window.width == 0 || config.window.height == 0 => {
                    details.push(format!("⚠ Profile '{profile}': zero-sized window"));
                    warned += 1;
                }
                Ok(config) => details.push(format!(
                    "✓ Profile '{profile}': {}x{}, frame queue {}, {} callback threads",
                    config.window.width,
                    config.window.height,
                    config.render.frame_queue_depth,
                    config.input.callback_threads
                )),
                Err(e) => {
                    details.push(format!("✗ Profile '{profile}': {e}"));
                    failed += 1;
                }
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => details.push(format!("✓ Environment: profile '{}'", config.profile)),
            Err(e) => {
                details.push(format!("⚠ Environment: {e}"));
                warned += 1;
            }
        }

        if failed > 0 {
            CheckResult::fail(format!("{failed} profile(s) failed to load")).with_details(details)
        } else if warned > 0 {
            CheckResult::warn("Config loaded with warnings").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
