//! Character config loading
//!
//! Reads `character.ron` from the asset folder. A missing or broken file is
//! not fatal: the built-in defaults are used instead.

use bevy::prelude::*;
use shared::CharacterConfig;
use std::path::{Path, PathBuf};

/// Config file name inside the asset folder
pub const CONFIG_FILE: &str = "character.ron";

/// Character config in effect for this run
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveConfig(pub CharacterConfig);

/// Get the asset path - for bundled apps, use path relative to executable
pub fn get_asset_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                info!("Using bundled assets at: {:?}", bundled_assets);
                return bundled_assets;
            }
        }
    }
    // Fall back to the crate's assets folder (for development under cargo)
    std::env::var("CARGO_MANIFEST_DIR")
        .map(|dir| PathBuf::from(dir).join("assets"))
        .unwrap_or_else(|_| PathBuf::from("assets"))
}

/// Parse and validate a config from RON text.
pub fn parse_config(text: &str) -> Result<CharacterConfig, String> {
    let config: CharacterConfig =
        ron::from_str(text).map_err(|e| format!("ron parse failed: {e}"))?;
    config.validate()?;
    Ok(config)
}

/// Load a config from a file path.
pub fn load_config_from_file(path: impl AsRef<Path>) -> Result<CharacterConfig, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| format!("failed to read {path:?}: {e}"))?;
    parse_config(&text).map_err(|e| format!("{path:?}: {e}"))
}

/// Load the config from `asset_dir`, falling back to defaults.
pub fn load_or_default(asset_dir: &Path) -> CharacterConfig {
    let path = asset_dir.join(CONFIG_FILE);
    match load_config_from_file(&path) {
        Ok(config) => {
            info!("Loaded character config from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Using default character config: {}", e);
            CharacterConfig::default()
        }
    }
}
