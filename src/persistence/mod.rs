//! Save/load persistence
//!
//! Features:
//! - JSON files, read in full and replaced in full
//! - Writes go to a sibling temp file first, then rename over the target
//! - A missing file is not an error (first launch)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Parse the file as untyped JSON. `Ok(None)` when it doesn't exist.
    pub fn read_value(&self) -> Result<Option<serde_json::Value>> {
        if !self.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let value = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(value))
    }

    /// Parse the file into `T`. `Ok(None)` when it doesn't exist.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match self.read_value()? {
            Some(value) => {
                let parsed = serde_json::from_value(value)
                    .with_context(|| format!("decoding {}", self.path.display()))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Replace the file with `value`
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(value).context("serializing")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
