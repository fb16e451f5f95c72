// PlantCare - app/session.rs
//
// Session persistence: remember where the user last picked an image and
// which theme they chose. The image, preview and article are never persisted.
//
// - Saved atomically (write temp, rename) so a crash never corrupts the
//   previous session.
// - A missing, unreadable or outdated file loads as `None`.

use crate::util::constants::SESSION_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Version stamp. Mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Persistent session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version, must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Directory of the last image picked, used as the dialog start dir.
    #[serde(default)]
    pub last_image_dir: Option<PathBuf>,

    /// Theme chosen via the View menu; `None` defers to config.toml.
    #[serde(default)]
    pub dark_mode: Option<bool>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            version: SESSION_VERSION,
            last_image_dir: None,
            dark_mode: None,
        }
    }
}

/// `session.json` inside the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Write `data` to `path` via a sibling temp file and a rename, so a crash
/// mid-write leaves the previous session intact.
pub fn save(data: &SessionData, path: &Path) -> io::Result<()> {
    let with_path = |action: &str, target: &Path, e: io::Error| {
        io::Error::new(e.kind(), format!("{action} '{}': {e}", target.display()))
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| with_path("create", dir, e))?;
    }

    let json = serde_json::to_vec_pretty(data).map_err(io::Error::other)?;
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, json).map_err(|e| with_path("write", &staging, e))?;

    if let Err(e) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(with_path("replace", path, e));
    }

    tracing::debug!(
        path = %path.display(),
        last_dir = ?data.last_image_dir,
        "Session written"
    );
    Ok(())
}

/// Read the session at `path`. Returns `None` for a first run, a corrupt
/// file, or a file written by another schema version.
pub fn load(path: &Path) -> Option<SessionData> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Session unreadable");
            return None;
        }
    };

    match serde_json::from_str::<SessionData>(&content) {
        Ok(data) if data.version == SESSION_VERSION => {
            tracing::info!(path = %path.display(), "Restored previous session");
            Some(data)
        }
        Ok(data) => {
            tracing::warn!(
                found = data.version,
                wanted = SESSION_VERSION,
                "Ignoring session from another version"
            );
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt session");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = session_path(&dir.path().join("nested"));
        let data = SessionData {
            last_image_dir: Some(PathBuf::from("/home/me/Pictures")),
            dark_mode: Some(true),
            ..SessionData::default()
        };

        save(&data, &path).unwrap();
        assert_eq!(load(&path), Some(data));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_and_malformed_sessions_start_fresh() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        assert_eq!(load(&path), None);

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load(&path), None);
    }

    #[test]
    fn test_version_mismatch_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        std::fs::write(&path, r#"{"version": 99, "dark_mode": true}"#).unwrap();
        assert_eq!(load(&path), None);
    }
}
