//! Persistence of the single bearer token.
//!
//! Storage problems never surface as errors: they are logged and the store
//! behaves as if no token were present, which sends the user back to login.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

const DATA_DIR: &str = ".shiftdesk";

/// Holds at most one bearer token.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Replace any existing token. An empty token clears the store.
    fn save(&self, token: &str);

    /// Current token. Never touches the network.
    fn load(&self) -> Option<String>;

    /// Remove the token. Succeeds when there is nothing to remove.
    fn clear(&self);

    fn has_token(&self) -> bool {
        self.load().is_some_and(|token| !token.is_empty())
    }
}

/// Get the data directory path (`$SHIFTDESK_DATA_DIR` or `~/.shiftdesk`), creating it.
pub fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = if let Ok(custom_dir) = std::env::var("SHIFTDESK_DATA_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Cannot get home directory"))?;
        home.join(DATA_DIR)
    };

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

/// Token kept in a single file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub const FILE_NAME: &'static str = "auth_token";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store `auth_token` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    /// Store inside the default data directory.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::in_dir(&get_data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("tmp");

        if let Err(e) = fs::write(&temp_path, token) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&temp_path);
        })
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) {
        if token.trim().is_empty() {
            self.clear();
            return;
        }
        if let Err(e) = self.write_atomic(token.trim()) {
            tracing::warn!(path = %self.path.display(), "Failed to persist auth token: {}", e);
            // Do not leave an older identity behind.
            self.clear();
        }
    }

    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read auth token: {}", e);
                None
            }
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to remove auth token: {}", e);
            }
        }
    }
}

/// In-process store for tests and embedders without durable storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.save(&token.into());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        let token = token.trim();
        *self.token.write() = (!token.is_empty()).then(|| token.to_string());
    }

    fn load(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}
