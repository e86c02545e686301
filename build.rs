use std::env;
use std::fs;
use std::path::Path;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};

const PROFILES: [&str; 2] = ["debug", "release"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_timestamp(true).build()?;

    let cargo = CargoBuilder::default()
        .opt_level(true)
        .target_triple(true)
        .build()?;

    let rustc = RustcBuilder::default()
        .semver(true)
        .channel(true)
        .build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    copy_configs()?;

    Ok(())
}

/// Copies the profile files next to the binary so `AppConfig::load` finds
/// them when the game is launched from outside the source tree.
fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let profile = env::var("PROFILE")?;

    // OUT_DIR is target/<profile>/build/goldcore-xxx/out
    let target_dir = Path::new(&out_dir)
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .ok_or("Could not determine target directory")?;

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    // Release builds only ship the release profile
    let wanted: &[&str] = if profile == "release" {
        &PROFILES[1..]
    } else {
        &PROFILES
    };

    for name in wanted {
        let source = Path::new("config").join(format!("{name}.toml"));
        if source.exists() {
            fs::copy(&source, config_out_dir.join(format!("{name}.toml")))?;
            println!("cargo:rerun-if-changed={}", source.display());
        }
    }

    Ok(())
}
