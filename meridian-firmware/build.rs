//! Build script for meridian-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watch.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate watch.toml at compile time
///
/// The firmware's own parser handles only a TOML subset, so catching
/// syntax errors here (with a full parser, on the host) keeps a typo in
/// the config from silently falling back to defaults on the watch.
fn validate_config() {
    println!("cargo:rerun-if-changed=watch.toml");

    let config_path = Path::new("watch.toml");

    if !config_path.exists() {
        panic!("watch.toml not found: the firmware embeds it at build time");
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("Failed to read watch.toml: {}", e),
    };

    let parsed: toml::Value = match config_content.parse() {
        Ok(value) => value,
        Err(e) => panic!("watch.toml is not valid TOML: {}", e),
    };

    // Require the sections the firmware reads
    for section in ["face", "weather", "link"] {
        if parsed.get(section).is_none() {
            panic!("watch.toml is missing the [{}] section", section);
        }
    }
}
