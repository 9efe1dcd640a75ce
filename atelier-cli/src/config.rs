//! Configuration and session persistence.
//!
//! The API base URL comes from the environment (a `.env` file is honored
//! for local work). The login session is persisted as TOML under the
//! user's config directory so it survives between invocations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use crate::api::Session;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

pub struct AppConfig {
    pub base_url: String,
}

impl AppConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("ATELIER_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

fn session_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("could not determine the user config directory")?
        .join("atelier-cli");
    Ok(dir.join("session.toml"))
}

/// Load the persisted session, falling back to anonymous on any problem.
/// A corrupt session file is not fatal; the user just logs in again.
pub fn load_session() -> Session {
    match session_path().and_then(|path| read_session(&path)) {
        Ok(Some(session)) => session,
        Ok(None) => Session::anonymous(),
        Err(err) => {
            debug!("ignoring unreadable session file: {err}");
            Session::anonymous()
        }
    }
}

pub fn store_session(session: &Session) -> Result<()> {
    let path = session_path()?;
    write_session(&path, session)
}

pub fn clear_session() -> Result<()> {
    let path = session_path()?;
    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}

fn read_session(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let session = toml::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(session))
}

fn write_session(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(session).context("failed to serialize session")?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");

        let mut session = Session::anonymous();
        session.login("tok-123", "Priya");
        write_session(&path, &session).unwrap();

        let loaded = read_session(&path).unwrap().unwrap();
        assert_eq!(loaded, session);
        assert!(loaded.is_authenticated());
    }

    #[test]
    fn missing_session_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        assert!(read_session(&path).unwrap().is_none());
    }

    #[test]
    fn corrupt_session_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        assert!(read_session(&path).is_err());
    }
}
