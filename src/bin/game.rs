use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use goldcore::app::{self, AppConfig};
use goldcore::{build_info, health};

#[derive(Parser)]
#[command(name = "game", about = "Gold engine window shell", version)]
struct Cli {
    /// Configuration profile to load (config/<profile>.toml)
    #[arg(long, env = "GOLD_PROFILE", default_value = "release")]
    profile: String,

    /// Run the startup self-checks, print a report and exit
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    info!(build = %build_info::version_string(), "Gold engine");

    if cli.check {
        let report = health::run_all_checks();
        health::print_report(&report);
        // Exit codes are 0, 1 or 2
        return Ok(ExitCode::from(report.exit_code() as u8));
    }

    let config = AppConfig::load(&cli.profile)
        .with_context(|| format!("failed to load profile '{}'", cli.profile))?;
    app::run(config).context("game exited with an error")?;

    Ok(ExitCode::SUCCESS)
}
