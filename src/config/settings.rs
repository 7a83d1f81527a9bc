//! User settings for the bookstore
//!
//! Holds the bootstrap account created on first start and whether the
//! operation log is written.

use serde::{Deserialize, Serialize};

use super::paths::BookstorePaths;
use crate::error::BookstoreError;
use crate::models::{Account, Privilege};

/// Credentials of the account created when no account store exists yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapAccount {
    pub user_id: String,
    pub password: String,
    pub display_name: String,
}

impl Default for BootstrapAccount {
    fn default() -> Self {
        Self {
            user_id: "root".to_string(),
            password: "sjtu".to_string(),
            display_name: "root".to_string(),
        }
    }
}

impl BootstrapAccount {
    /// The owner account described by these settings
    pub fn to_account(&self) -> Account {
        Account::new(
            self.user_id.clone(),
            self.password.clone(),
            self.display_name.clone(),
            Privilege::Owner,
        )
    }
}

/// User settings for the bookstore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Account created on first run
    #[serde(default)]
    pub bootstrap: BootstrapAccount,

    /// Whether successful mutations are appended to the operation log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            bootstrap: BootstrapAccount::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BookstorePaths) -> Result<Self, BookstoreError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BookstoreError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BookstoreError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BookstorePaths) -> Result<(), BookstoreError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BookstoreError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            BookstoreError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
