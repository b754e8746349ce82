//! Error types for the Claude settings library.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::SettingsLevel;

/// Errors that can occur when loading Claude Code settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file.
    #[error("failed to read settings from {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse settings JSON.
    #[error("failed to parse settings from {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// Failed to determine project directory.
    #[error("could not determine project directory: {0}")]
    NoProjectDirectory(String),

    /// Settings file not found.
    #[error("settings file not found at {0}")]
    NotFound(PathBuf),

    /// Permission denied when accessing settings.
    #[error("permission denied accessing settings at {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No settings file exists at the requested level.
    #[error("no {} settings found", .0.name())]
    MissingLevel(SettingsLevel),

    /// Figment configuration error.
    #[error("configuration error: {0}")]
    FigmentError(#[source] Box<figment::Error>),
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

impl From<figment::Error> for SettingsError {
    fn from(err: figment::Error) -> Self {
        SettingsError::FigmentError(Box::new(err))
    }
}

impl SettingsError {
    /// Return a help message suggesting how to fix this error, if applicable.
    pub fn help(&self) -> Option<String> {
        match self {
            SettingsError::NotFound(_) => {
                Some("pass --settings with the path of an existing settings file".into())
            }
            SettingsError::MissingLevel(level) => Some(format!(
                "create {} settings or use --level effective to merge every level",
                level.name()
            )),
            SettingsError::ParseError { path, .. } => {
                Some(format!("{} must contain a JSON object", path.display()))
            }
            SettingsError::NoHomeDirectory => {
                Some("set $HOME or pass --settings and --projects-dir explicitly".into())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_hints() {
        assert!(SettingsError::NotFound("/x".into()).help().is_some());
        assert!(
            SettingsError::MissingLevel(SettingsLevel::Project)
                .help()
                .unwrap()
                .contains("project")
        );
        assert!(SettingsError::NoProjectDirectory("x".into()).help().is_none());
    }
}
