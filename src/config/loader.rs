use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$MEDIA_ISSUES_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/media-issues/config.toml`
/// 4. `~/.config/media-issues/config.toml`
///
/// Falls back to defaults when no file is found. An explicit path that does
/// not exist is an error.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match find_global_config() {
            Some(path) => path,
            None => {
                tracing::debug!("config: no file found, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    tracing::debug!("config: loaded {}", path.display());
    Ok(config)
}

fn find_global_config() -> Option<PathBuf> {
    // $MEDIA_ISSUES_CONFIG
    if let Ok(path) = std::env::var("MEDIA_ISSUES_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/media-issues/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("media-issues/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/media-issues/config.toml
    if let Some(home) = dirs_fallback() {
        let p = home.join(".config/media-issues/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn dirs_fallback() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
