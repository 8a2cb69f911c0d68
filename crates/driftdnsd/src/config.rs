//! Configuration file loading for the daemon.
//!
//! The file format itself lives in [`driftdns_core::Config`]; this module
//! only knows where the file lives and how to read it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use driftdns_core::Config;

/// Default configuration file path under the platform config directory,
/// e.g. `~/.config/driftdnsd/config.toml` on Linux.
pub fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("io", "driftdns", "driftdnsd")
        .context("could not determine a configuration directory for this platform")?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Read, parse and validate the configuration file at `path`.
pub fn load(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading configuration file {}", path.display()))?;
    let config: Config =
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
