use crate::domain::ports::LocationStore;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredConfig {
    location: String,
}

/// The selected location tag, kept in a small JSON file next to the user's data.
#[derive(Debug, Clone)]
pub struct JsonLocationStore {
    path: PathBuf,
}

impl JsonLocationStore {
    /// Opens the store, writing `{"location": ""}` when the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, serde_json::to_string(&StoredConfig::default())?)?;
            tracing::info!("Created {}", path.display());
        }
        Ok(Self { path })
    }

    /// `%LOCALAPPDATA%\rfidusb\config.json` on Windows, `./config.json` elsewhere.
    pub fn default_path() -> PathBuf {
        if cfg!(windows) {
            if let Some(app_data) = std::env::var_os("LOCALAPPDATA") {
                return PathBuf::from(app_data).join("rfidusb").join("config.json");
            }
        }
        PathBuf::from("config.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationStore for JsonLocationStore {
    fn load(&self) -> Result<String> {
        let content = fs::read_to_string(&self.path)?;
        let stored: StoredConfig = serde_json::from_str(&content)?;
        Ok(stored.location)
    }

    fn save(&mut self, tag: &str) -> Result<()> {
        let stored = StoredConfig {
            location: tag.to_string(),
        };
        fs::write(&self.path, serde_json::to_string(&stored)?)?;
        tracing::debug!("Saved location '{}' to {}", tag, self.path.display());
        Ok(())
    }
}
