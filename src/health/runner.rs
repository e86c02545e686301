//! Runs health checks and collects their results

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// One check's outcome
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub result: CheckResult,
}

/// Results from running a health check suite
#[derive(Debug, Default)]
pub struct HealthCheckReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl HealthCheckReport {
    fn count(&self, status: CheckStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.status == status)
            .count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Pass)
    }

    pub fn warned(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    /// Worst status in the report, `Pass` when empty
    pub fn status(&self) -> CheckStatus {
        self.outcomes
            .iter()
            .map(|o| o.result.status)
            .max()
            .unwrap_or(CheckStatus::Pass)
    }

    /// Returns true if no check failed
    pub fn is_healthy(&self) -> bool {
        self.status().is_ok()
    }

    pub fn has_warnings(&self) -> bool {
        self.warned() > 0
    }

    /// 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
            CheckStatus::Warn => 2,
        }
    }
}

/// Orchestrates running health checks and collecting results
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs checks in the order they were added
    pub fn run(self) -> HealthCheckReport {
        let outcomes = self
            .checks
            .into_iter()
            .map(|check| {
                let start = Instant::now();
                let result = check.check().with_duration(start.elapsed());

                match result.status {
                    CheckStatus::Pass => {
                        debug!(check = check.name(), message = %result.message, "Health check passed")
                    }
                    status => {
                        warn!(check = check.name(), %status, message = %result.message, "Health check not passing")
                    }
                }

                CheckOutcome {
                    name: check.name(),
                    description: check.description(),
                    result,
                }
            })
            .collect();

        HealthCheckReport { outcomes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn check(&self) -> CheckResult {
            CheckResult::new(self.0, "fixed")
        }
    }

    #[test]
    fn test_exit_code_follows_worst_status() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed(CheckStatus::Pass))
            .add_check(Fixed(CheckStatus::Warn))
            .run();
        assert_eq!(report.exit_code(), 2);
        assert!(report.is_healthy());

        let report = HealthCheckRunner::new()
            .add_check(Fixed(CheckStatus::Warn))
            .add_check(Fixed(CheckStatus::Fail))
            .run();
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.failed(), 1);

        assert_eq!(HealthCheckRunner::new().run().exit_code(), 0);
    }
}
