//! Startup self-checks
//!
//! Used by `game --check` and in CI to confirm that configuration loads, build
//! metadata is present, and the input and render cores behave before a window
//! is ever opened.
//!
//! # Example
//!
//! ```no_run
//! use goldcore::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(RenderLoopCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{CheckOutcome, HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::InputDispatchCheck::new())
        .add_check(checks::RenderLoopCheck::new())
        .run()
}
