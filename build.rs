//! Build script for reddit-get.
//!
//! Copies the `.env.example` template into the user's local data directory so
//! that an example credentials file sits next to where `config::load_env`
//! looks for `.env` after installation.
//!
//! ## Destination Location
//! - Linux: `~/.local/share/reddit-get/.env.example`
//! - macOS: `~/Library/Application Support/reddit-get/.env.example`
//! - Windows: `%LOCALAPPDATA%/reddit-get/.env.example`
//!
//! A missing template only produces a cargo warning; directory creation and
//! copy failures fail the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("reddit-get");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
