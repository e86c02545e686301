//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build metadata was captured
#[derive(Debug, Default)]
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Build metadata (rustc, target, timestamp)")
    }

    fn check(&self) -> CheckResult {
        let fields = build_info::fields();
        let missing: Vec<_> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| *label)
            .collect();

        let details = fields.iter().map(|(label, value)| format!("{label}: {value}"));

        if missing.is_empty() {
            CheckResult::pass(build_info::version_string()).with_details(details)
        } else {
            CheckResult::warn(format!("Missing build fields: {}", missing.join(", ")))
                .with_details(details)
        }
    }
}
