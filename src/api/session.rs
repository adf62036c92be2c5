//! Session cookie persistence.
//!
//! The service authenticates with an HTTP-only `session_token` cookie set by
//! the login and registration endpoints. The CLI keeps it in a small file so
//! that `focuswatch login` and `focuswatch watch` can run as separate
//! processes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::header::{HeaderMap, SET_COOKIE};
use tracing::{debug, warn};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_token";

/// Extract the session token from `Set-Cookie` response headers.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?.trim();
            let (name, value) = pair.split_once('=')?;
            (name.trim() == SESSION_COOKIE && !value.is_empty())
                .then(|| value.trim_matches('"').to_string())
        })
}

/// File-backed session token store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. A missing file means no session.
    pub fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        debug!(path = %self.path.display(), "Stored session");
        Ok(())
    }

    /// Remove the stored token. Clearing an absent session is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Clear the stored token where a failure cannot be reported further.
    ///
    /// Returns false, after logging, when the file could not be removed.
    pub fn forget(&self) -> bool {
        match self.clear() {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not clear the stored session");
                false
            }
        }
    }
}
