use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const KGDASH_DIR: &str = ".kgdash";
const CONFIG_FILE: &str = "config.toml";

/// Default backend origin when no flag or config is present.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Debug, Default, Deserialize)]
struct ConfigToml {
    server: Option<String>,
}

/// Walk up from `start` looking for a `.kgdash/` directory.
fn find_kgdash_dir_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(KGDASH_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Find `.kgdash/` by walking up from cwd. Returns `None` if not found.
pub fn find_kgdash_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_kgdash_dir_from(&cwd)
}

fn read_config(kgdash_dir: &Path) -> ConfigToml {
    let path = kgdash_dir.join(CONFIG_FILE);
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .unwrap_or_default()
}

/// Resolve the backend base URL.
///
/// Precedence: `--server` flag, then the `server` key of
/// `.kgdash/config.toml`, then [`DEFAULT_SERVER`].
pub fn resolve_server(flag: Option<&str>) -> String {
    if let Some(url) = flag {
        return url.to_string();
    }
    if let Some(dir) = find_kgdash_dir() {
        if let Some(url) = read_config(&dir).server {
            return url;
        }
    }
    DEFAULT_SERVER.to_string()
}

/// Create `.kgdash/` in the current directory with a config skeleton.
pub fn init_kgdash_dir() -> CliResult<PathBuf> {
    let kgdash_dir = std::env::current_dir()?.join(KGDASH_DIR);
    fs::create_dir_all(&kgdash_dir)
        .map_err(|e| CliError::Config(format!("failed to create {}: {e}", kgdash_dir.display())))?;

    let config_path = kgdash_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        let skeleton = format!("# kgdash configuration\n# server = \"{DEFAULT_SERVER}\"\n");
        fs::write(&config_path, skeleton).map_err(|e| {
            CliError::Config(format!("failed to create {}: {e}", config_path.display()))
        })?;
    }

    Ok(kgdash_dir)
}
