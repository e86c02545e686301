//! Build-time information captured by `vergen` in `build.rs`

/// Crate name and version from the manifest
pub const PACKAGE: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// When the binary was compiled
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g., x86_64-unknown-linux-gnu)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// stable, beta or nightly
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

/// `goldcore 0.1.0 (x86_64-unknown-linux-gnu-opt3)`
pub fn version_string() -> String {
    format!("{PACKAGE} {VERSION} ({CARGO_TARGET_TRIPLE}-opt{CARGO_OPT_LEVEL})")
}

/// Label/value pairs for reports and `--version`-style output
pub fn fields() -> [(&'static str, &'static str); 6] {
    [
        ("Version", VERSION),
        ("Built", BUILD_TIMESTAMP),
        ("Target", CARGO_TARGET_TRIPLE),
        ("Optimization", CARGO_OPT_LEVEL),
        ("Rustc", RUSTC_SEMVER),
        ("Channel", RUSTC_CHANNEL),
    ]
}
