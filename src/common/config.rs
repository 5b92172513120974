use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global strayfiles configuration, loaded from a TOML file.
/// Every field has a sensible empty default; CLI flags win over
/// anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target roots to audit instead of the built-in standard set
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Standing exemption paths/patterns, merged with -e/--exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Package database root override
    #[serde(default)]
    pub vdb: Option<PathBuf>,
}

impl Config {
    /// Candidate config file locations, in precedence order:
    /// the system-wide file, then the per-user file.
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/strayfiles.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("strayfiles/config.toml"));
        }
        paths
    }

    /// Load config from an explicit file, or the first default
    /// location that exists. No file at all is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        for path in Self::default_paths() {
            if path.exists() {
                return Self::read(&path);
            }
        }
        Ok(Config::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}
