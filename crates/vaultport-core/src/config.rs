//! Import run settings.
//!
//! [`ImportSettings`] captures everything the operator chooses before a run:
//! where the vault lives, how folders map to host folders, how duplicates are
//! handled, and where non-markdown assets are uploaded. Settings are
//! serializable so the last-used values can be persisted between runs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a single vault import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Path to the vault directory on disk
    pub vault_path: PathBuf,
    /// Name of the host folder every imported document is placed under
    pub root_folder_name: Option<String>,
    /// Mirror the vault's top-level directory as a host folder
    pub create_root_folder: bool,
    /// Replace existing notes with the same name and folder
    pub overwrite: bool,
    /// When not overwriting, leave existing notes alone instead of creating duplicates
    pub ignore_duplicate: bool,
    /// Split documents into one page per level-1 heading
    pub header_to_page: bool,
    /// Grant observer-level access to created notes
    pub player_observe: bool,
    /// Upload non-markdown files and rewrite references to them
    pub import_non_markdown: bool,
    /// Destination directory for uploaded assets
    pub media_folder: String,
    /// Upload assets to S3 instead of local host storage
    pub use_s3: bool,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Build an Index journal listing every imported note
    pub create_index_file: bool,
    /// Append a references section to notes that are linked from elsewhere
    pub create_backlinks: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            vault_path: PathBuf::new(),
            root_folder_name: None,
            create_root_folder: false,
            overwrite: true,
            ignore_duplicate: false,
            header_to_page: false,
            player_observe: false,
            import_non_markdown: false,
            media_folder: "uploaded-media".to_string(),
            use_s3: false,
            s3_bucket: None,
            s3_region: None,
            create_index_file: false,
            create_backlinks: false,
        }
    }
}

impl ImportSettings {
    /// Create settings for a vault path with defaults for everything else.
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
            ..Default::default()
        }
    }

    /// Validate the settings.
    ///
    /// Configuration errors fail the entire run before any host call is made.
    pub fn validate(&self) -> Result<()> {
        if self.vault_path.as_os_str().is_empty() {
            return Err(Error::config_error("Vault path cannot be empty"));
        }

        if !self.vault_path.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.vault_path.display()
            )));
        }

        if self.import_non_markdown {
            if self.media_folder.is_empty() {
                return Err(Error::config_error("Media folder cannot be empty"));
            }
            if self.use_s3 && (self.s3_bucket.is_none() || self.s3_region.is_none()) {
                return Err(Error::config_error("S3 settings are invalid"));
            }
        }

        Ok(())
    }

    /// The base URL assets resolve against, for S3-backed uploads.
    ///
    /// Returns `None` when uploads go to local host storage.
    pub fn s3_base_url(&self) -> Option<String> {
        if !self.use_s3 {
            return None;
        }
        match (&self.s3_bucket, &self.s3_region) {
            (Some(bucket), Some(region)) => {
                Some(format!("https://{bucket}.s3.{region}.amazonaws.com"))
            }
            _ => None,
        }
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::config_error(format!("Invalid settings file: {e}")))
    }

    /// Persist settings to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_missing_vault() {
        let settings = ImportSettings::default();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_s3_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ImportSettings {
            import_non_markdown: true,
            use_s3: true,
            s3_bucket: Some("bucket".to_string()),
            s3_region: None,
            ..ImportSettings::new(dir.path())
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("S3"));
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ImportSettings::new(dir.path());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_s3_base_url() {
        let settings = ImportSettings {
            use_s3: true,
            s3_bucket: Some("media".to_string()),
            s3_region: Some("us-east-1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            settings.s3_base_url().unwrap(),
            "https://media.s3.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = ImportSettings {
            header_to_page: true,
            create_index_file: true,
            ..ImportSettings::new("/tmp/vault")
        };
        settings.save(&path).unwrap();
        let loaded = ImportSettings::load(&path).unwrap();
        assert!(loaded.header_to_page);
        assert!(loaded.create_index_file);
        assert_eq!(loaded.vault_path, PathBuf::from("/tmp/vault"));
    }
}
