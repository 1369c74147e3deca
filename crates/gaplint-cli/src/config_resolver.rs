//! Configuration file discovery.
//!
//! The first match wins:
//!
//! 1. `--config` flag (explicit path)
//! 2. `gaplint.toml` or `.gaplint.toml` in the working directory
//! 3. `$GAPLINT_CONFIG_DIR/config.toml`, else `~/.gaplint/config.toml`
//! 4. Nothing found, defaults apply

use anyhow::{Context, Result};
use gaplint_core::PartialConfig;
use std::path::{Path, PathBuf};

/// Where the configuration document was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Found in the user-wide config directory.
    Global(PathBuf),
    /// No document; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the document path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the document as the file layer. `Default` yields an empty layer.
    pub fn load(&self) -> Result<PartialConfig> {
        let Some(path) = self.path() else {
            return Ok(PartialConfig::new());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        PartialConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Document written by `gaplint init`.
pub const DEFAULT_CONFIG_NAME: &str = "gaplint.toml";

const PROJECT_CONFIG_NAMES: &[&str] = &[DEFAULT_CONFIG_NAME, ".gaplint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Finds the configuration document for a run in `working_dir`.
#[must_use]
pub fn resolve(working_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(working_dir, explicit, global_config_dir())
}

fn resolve_inner(
    working_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| working_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Returns the user-wide config directory: `$GAPLINT_CONFIG_DIR`, else
/// `~/.gaplint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("GAPLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".gaplint"))
}
