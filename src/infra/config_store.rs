// ============================================================
// Layer 6 — Config Store
// ============================================================
// Saves the resolved run configuration next to the outputs it
// produced, and reads it back. A saved config carries the
// concrete RNG seed, so `sample --config <file>` replays the
// exact same pair batches.
//
// File: {dir}/sample_config.json (pretty-printed JSON)
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default file name for a saved sampling config.
pub const CONFIG_FILE: &str = "sample_config.json";

/// Reads and writes JSON configs inside one directory.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Create a store rooted at `dir`, creating the directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Write `cfg` as pretty JSON. Returns the file written.
    pub fn save<T: Serialize>(&self, cfg: &T) -> Result<PathBuf> {
        let path = self.path();
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved config to '{}'", path.display());
        Ok(path)
    }

    /// Read a config from an explicit file path.
    pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))
    }

    /// Read the config saved in this store's directory.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        Self::load_file(self.path())
    }
}
