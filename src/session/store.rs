//! On-disk token persistence.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::token::SecureString;

/// Errors raised while reading or writing the token file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode session file: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Token file at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.local/share/foodhub/session.toml` or the platform equivalent.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("foodhub").join("session.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token, if any.
    pub fn load(&self) -> Result<Option<SecureString>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        let stored: StoredSession =
            toml::from_str(&content).map_err(|source| SessionError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if stored.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(SecureString::new(stored.token)))
    }

    /// Write the token under an exclusive lock, replacing previous contents.
    pub fn save(&self, token: &SecureString) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let content = toml::to_string(&StoredSession {
            token: token.expose().to_string(),
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.lock_exclusive().map_err(|source| self.io_error(source))?;

        let written = file
            .set_len(0)
            .and_then(|_| file.write_all(content.as_bytes()))
            .and_then(|_| file.flush());
        let unlocked = FileExt::unlock(&file);

        written.map_err(|source| self.io_error(source))?;
        unlocked.map_err(|source| self.io_error(source))?;
        Ok(())
    }

    /// Remove the token file. Missing file is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
