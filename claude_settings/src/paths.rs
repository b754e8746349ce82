//! Where settings files and session logs live.
//!
//! User settings sit in `~/.claude/`, project settings in `<project>/.claude/`
//! and managed settings in `/etc/claude-code/`. Session logs are written to a
//! `projects/` directory beside the user settings file.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, SettingsError};
use crate::types::SettingsLevel;

const CLAUDE_DIR: &str = ".claude";
const SETTINGS_FILE: &str = "settings.json";
const SETTINGS_LOCAL_FILE: &str = "settings.local.json";
const MANAGED_SETTINGS: &str = "/etc/claude-code/managed-settings.json";
const PROJECTS_DIR: &str = "projects";

/// Marker directories of a project root, nearest `.claude` first.
const PROJECT_MARKERS: [&str; 2] = [CLAUDE_DIR, ".git"];

/// Merge order of the settings levels: each level overrides the ones before.
const LAYER_ORDER: [SettingsLevel; 4] = [
    SettingsLevel::User,
    SettingsLevel::Project,
    SettingsLevel::ProjectLocal,
    SettingsLevel::System,
];

/// Resolves settings and session log locations. Home and project root default
/// to the current user and the project enclosing the working directory.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    home: Option<PathBuf>,
    project: Option<PathBuf>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<PathBuf>) -> Self {
        self.project = Some(project.into());
        self
    }

    fn user_dir(&self) -> Result<PathBuf> {
        let home = match &self.home {
            Some(home) => home.clone(),
            None => dirs::home_dir().ok_or(SettingsError::NoHomeDirectory)?,
        };
        Ok(home.join(CLAUDE_DIR))
    }

    fn project_dir(&self) -> Result<PathBuf> {
        let root = match &self.project {
            Some(project) => project.clone(),
            None => {
                let cwd = env::current_dir()
                    .map_err(|e| SettingsError::NoProjectDirectory(e.to_string()))?;
                project_root(&cwd)
            }
        };
        Ok(root.join(CLAUDE_DIR))
    }

    /// The settings file of one level.
    pub fn settings_path(&self, level: SettingsLevel) -> Result<PathBuf> {
        Ok(match level {
            SettingsLevel::User => self.user_dir()?.join(SETTINGS_FILE),
            SettingsLevel::Project => self.project_dir()?.join(SETTINGS_FILE),
            SettingsLevel::ProjectLocal => self.project_dir()?.join(SETTINGS_LOCAL_FILE),
            SettingsLevel::System => PathBuf::from(MANAGED_SETTINGS),
        })
    }

    /// Settings files in merge order, lowest precedence first. Without a home
    /// directory the user level is left out rather than failing the merge.
    pub fn layered_paths(&self) -> Result<Vec<(SettingsLevel, PathBuf)>> {
        let mut paths = Vec::with_capacity(LAYER_ORDER.len());
        for level in LAYER_ORDER {
            match self.settings_path(level) {
                Ok(path) => paths.push((level, path)),
                Err(SettingsError::NoHomeDirectory) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(paths)
    }

    /// The session log root, `~/.claude/projects`.
    pub fn projects_dir(&self) -> Result<PathBuf> {
        Ok(self.user_dir()?.join(PROJECTS_DIR))
    }
}

/// The session log root beside a settings file: `~/.claude/settings.json`
/// maps to `~/.claude/projects`.
pub fn projects_dir_for(settings_path: &Path) -> PathBuf {
    settings_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(PROJECTS_DIR)
}

/// The project enclosing `start`: the nearest ancestor holding `.claude`,
/// else the nearest holding `.git`, else `start` itself.
fn project_root(start: &Path) -> PathBuf {
    PROJECT_MARKERS
        .iter()
        .find_map(|marker| start.ancestors().find(|dir| dir.join(marker).exists()))
        .unwrap_or(start)
        .to_path_buf()
}
