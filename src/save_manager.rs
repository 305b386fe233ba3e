use crate::core::constants::{SAVE_FILE_NAME, SAVE_VERSION};
use crate::core::game_state::GameState;
use crate::error::{Result, StoreError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk wrapper around the state document.
#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    /// SHA-256 hex digest of the compact `state` JSON.
    checksum: String,
    state: serde_json::Value,
}

fn checksum_of(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Manages saving and loading game state as a checksummed JSON document
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager instance
    ///
    /// Sets up the save directory at the appropriate location for the platform
    /// using the `directories` crate.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("", "", "idlegacha").ok_or(StoreError::NoSaveDirectory)?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Uses an explicit save file instead of the platform default.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Writes `state` wrapped in a versioned envelope with a checksum.
    pub fn save(&self, state: &GameState) -> Result<()> {
        // Hash the Value form so load can recompute it with the same key order.
        let value = serde_json::to_value(state)?;
        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            checksum: checksum_of(&serde_json::to_vec(&value)?),
            state: value,
        };

        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        write_replacing(&self.save_path, &serde_json::to_vec_pretty(&envelope)?)?;

        tracing::info!(
            path = %self.save_path.display(),
            items = state.inventory.len(),
            "game saved"
        );
        Ok(())
    }

    /// Loads the saved state. `Ok(None)` when there is no save yet.
    ///
    /// Returns an error if:
    /// - The envelope version is unknown
    /// - The checksum verification fails
    /// - The state cannot be deserialized or is invalid
    pub fn load(&self) -> Result<Option<GameState>> {
        if !self.save_exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.save_path)?;
        let envelope: SaveEnvelope = serde_json::from_slice(&bytes)?;

        if envelope.version != SAVE_VERSION {
            return Err(StoreError::UnsupportedVersion(envelope.version));
        }

        let compact = serde_json::to_vec(&envelope.state)?;
        if checksum_of(&compact) != envelope.checksum {
            tracing::warn!(path = %self.save_path.display(), "save checksum mismatch");
            return Err(StoreError::Checksum);
        }

        let state: GameState = serde_json::from_value(envelope.state)?;
        state.validate().map_err(StoreError::Invalid)?;

        tracing::info!(
            path = %self.save_path.display(),
            items = state.inventory.len(),
            "game loaded"
        );
        Ok(Some(state))
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn delete(&self) -> Result<()> {
        if self.save_exists() {
            fs::remove_file(&self.save_path)?;
        }
        Ok(())
    }
}

/// Writes to a sibling temp file, then renames it over `path`, so `path`
/// holds either the old contents or the new ones.
fn write_replacing(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Writes the bare, pretty-printed state document to `path`.
pub fn export_to(path: &Path, state: &GameState) -> Result<()> {
    write_replacing(path, serde_json::to_string_pretty(state)?.as_bytes())?;
    tracing::info!(path = %path.display(), "exported game state");
    Ok(())
}

/// Reads a bare state document from `path`.
pub fn read_export(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}
