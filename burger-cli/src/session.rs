//! Saved session between invocations.
//!
//! The refresh token goes to `storage.json` through [`FileStorage`]; the
//! cookie jar holding the access token is written to `cookies.json` when a
//! command finishes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use burger_api::SessionStore;
use burger_api::session::{CookieJar, FileStorage};
use tracing::debug;

const STORAGE_FILE: &str = "storage.json";
const COOKIES_FILE: &str = "cookies.json";

pub struct SessionFiles {
    dir: PathBuf,
}

impl SessionFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/burger`, or the working directory when there is none.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("burger"))
            .unwrap_or_else(|| PathBuf::from(".burger"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load(&self) -> Result<Arc<SessionStore>> {
        let storage = FileStorage::open(self.dir.join(STORAGE_FILE))
            .context("Failed to open session storage")?;
        let jar = self.load_cookies()?;
        debug!(dir = %self.dir.display(), "Loaded session");
        Ok(Arc::new(SessionStore::with_cookie_jar(
            Arc::new(storage),
            jar,
        )))
    }

    fn load_cookies(&self) -> Result<CookieJar> {
        let path = self.dir.join(COOKIES_FILE);
        match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Ok(CookieJar::new()),
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Corrupt cookie jar at {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CookieJar::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn save(&self, session: &SessionStore) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(COOKIES_FILE);
        let content = serde_json::to_string_pretty(&session.cookie_jar())?;
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
