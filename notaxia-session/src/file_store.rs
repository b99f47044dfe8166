//! Durable, file-backed session store.
//!
//! The file is a flat JSON object acting as a small key-value store. The
//! admin token sits under [`TOKEN_KEY`]; any other keys are left untouched.

use crate::error::{SessionError, SessionResult};
use crate::store::{SessionStore, TOKEN_KEY};
use crate::token::SessionToken;
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SESSION_FILE_NAME: &str = "admin-session.json";

/// Returns `<config dir>/notaxia/admin-session.json`.
pub fn default_session_path() -> SessionResult<PathBuf> {
    let base = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
    Ok(base.join("notaxia").join(SESSION_FILE_NAME))
}

/// Session store persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by `path`. The file is created lazily.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at [`default_session_path`].
    pub fn open_default() -> SessionResult<Self> {
        Ok(Self::new(default_session_path()?))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> SessionResult<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like `read_map`, but an unparseable file counts as empty so a write
    /// can replace it. I/O errors still propagate.
    fn read_map_for_write(&self) -> SessionResult<Option<Map<String, Value>>> {
        match self.read_map() {
            Ok(map) => Ok(Some(map)),
            Err(SessionError::Serialization(e)) => {
                warn!(path = %self.path.display(), "session file unreadable, replacing it: {e}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_vec_pretty(map)?;
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = open_private(&tmp_path)?;
            file.write_all(&contents)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> SessionResult<Option<SessionToken>> {
        let map = self.read_map()?;
        match map.get(TOKEN_KEY) {
            Some(Value::String(raw)) => Ok(SessionToken::new(raw.as_str()).ok()),
            _ => Ok(None),
        }
    }

    fn set(&self, token: SessionToken) -> SessionResult<()> {
        let mut map = self.read_map_for_write()?.unwrap_or_default();
        map.insert(TOKEN_KEY.to_string(), Value::String(token.into_inner()));
        self.write_map(&map)?;
        debug!(path = %self.path.display(), "stored admin token");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let map = match self.read_map_for_write()? {
            Some(mut map) => {
                if map.remove(TOKEN_KEY).is_none() {
                    return Ok(());
                }
                map
            }
            None => Map::new(),
        };
        self.write_map(&map)?;
        debug!(path = %self.path.display(), "cleared admin token");
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
