mod config;
pub mod database;

pub use config::Config;
pub use database::{Database, SessionRecord, Stats};

use std::path::PathBuf;

/// Returns `~/.config/focustick[-dev]/` based on FOCUSTICK_ENV.
///
/// Set FOCUSTICK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSTICK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focustick-dev")
    } else {
        base_dir.join("focustick")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
