//! File I/O operations for Claude Code settings.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{Level, instrument};

use crate::error::{Result, SettingsError};
use crate::types::Settings;

/// Reads settings from a specific file path.
#[instrument(level = Level::TRACE)]
pub fn read_settings_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SettingsError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => SettingsError::PermissionDenied {
            path: path.to_path_buf(),
            source: e,
        },
        _ => SettingsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_str(&content).map_err(|e| SettingsError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads settings from a specific file path, returning None if not found.
#[instrument(level = Level::TRACE)]
pub fn read_settings_from_path_optional(path: &Path) -> Result<Option<Settings>> {
    match read_settings_from_path(path) {
        Ok(settings) => Ok(Some(settings)),
        Err(SettingsError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_settings_lists() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "settings.json",
            r#"{
              "permissions": {
                "allow": ["Bash(git status:*)", "Bash(go test:*)", "Read(CLAUDE.md)", "Write(src/**)"],
                "deny": ["Bash(curl:*)", "Read(~/.ssh/**)"],
                "ask": ["Bash(git commit:*)", "Bash(git push:*)"]
              }
            }"#,
        );

        let settings = read_settings_from_path(&path).unwrap();
        assert_eq!(settings.permissions.allow.len(), 4);
        assert_eq!(settings.permissions.deny.len(), 2);
        assert_eq!(settings.permissions.ask.len(), 2);
    }

    #[test]
    fn test_read_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "settings.json", "not json");

        let err = read_settings_from_path(&path).unwrap_err();
        assert!(matches!(err, SettingsError::ParseError { .. }), "got {err:?}");
    }

    #[test]
    fn test_read_missing_file() {
        let path = Path::new("/nonexistent/settings.json");
        assert!(matches!(
            read_settings_from_path(path),
            Err(SettingsError::NotFound(_))
        ));
        assert!(read_settings_from_path_optional(path).unwrap().is_none());
    }
}
