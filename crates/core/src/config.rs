use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::{query::ViewMode, session::Credentials};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// JSON file with the initial detections. The built-in sample when unset.
    pub dataset: Option<PathBuf>,
    pub default_view: ViewMode,
    pub auth: Credentials,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
        Ok(config)
    }

    pub fn discover() -> Option<Self> {
        Self::discover_in(Path::new("."))
    }

    /// Looks for `litterwatch.toml` in `dir`. A file that fails to load is
    /// reported and treated as absent.
    pub fn discover_in(dir: &Path) -> Option<Self> {
        let path = dir.join("litterwatch.toml");
        if !path.exists() {
            return None;
        }
        match Config::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{:#}", e),
                    "ignoring unreadable config, using defaults"
                );
                None
            }
        }
    }
}
