use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::ConfigError;

/// Login state persisted between runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub username: Option<String>,
    pub saved_at: String,
}

impl Session {
    pub fn new(token: impl Into<String>, username: Option<String>) -> Self {
        Session {
            token: token.into(),
            username,
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::debug!("session saved to {}", path.display());
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Missing file means "not logged in"; anything else unreadable is an error.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        match Self::from_file(path) {
            Ok(session) if session.token.trim().is_empty() => Ok(None),
            Ok(session) => Ok(Some(session)),
            Err(ConfigError::Session(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn clear<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
