use std::fmt::Display;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use claude_settings::paths::projects_dir_for;
use claude_settings::{PathResolver, SettingsLevel, SettingsSource};

#[derive(Parser, Debug)]
#[command(name = "permaudit")]
#[command(version = permaudit::version::version_long())]
#[command(about = "Audit Claude Code permission lists against recorded session logs")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit Bash, Read, Write and Edit usage against the allow/deny/ask lists
    Tools(AuditArgs),

    /// Audit WebFetch and Fetch domains against the allowlist and the sandbox
    Fetch(AuditArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Lookback window in days
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Settings file to audit (default: ~/.claude/settings.json)
    #[arg(long, conflicts_with = "level")]
    pub settings: Option<PathBuf>,

    /// Settings level to audit instead of a file
    #[arg(long, value_enum)]
    pub level: Option<LevelArg>,

    /// Session log directory (default: `projects/` next to the user settings)
    #[arg(long)]
    pub projects_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl AuditArgs {
    pub fn settings_source(&self) -> SettingsSource {
        match (&self.settings, self.level) {
            (Some(path), _) => SettingsSource::File(path.clone()),
            (None, Some(level)) => level.into(),
            (None, None) => SettingsSource::Level(SettingsLevel::User),
        }
    }

    /// An explicit `--projects-dir`, else `projects/` beside an explicit
    /// settings file, else `~/.claude/projects`.
    pub fn resolve_projects_dir(&self, resolver: &PathResolver) -> claude_settings::Result<PathBuf> {
        if let Some(dir) = &self.projects_dir {
            return Ok(dir.clone());
        }
        match self.settings.as_deref() {
            Some(path) => Ok(projects_dir_for(path)),
            None => resolver.projects_dir(),
        }
    }

    pub fn settings_label(&self) -> String {
        match (&self.settings, self.level) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(level)) => level.to_string(),
            (None, None) => LevelArg::User.to_string(),
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    User,
    ProjectLocal,
    Project,
    /// All levels merged
    Effective,
}

impl Display for LevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LevelArg::User => "user",
            LevelArg::ProjectLocal => "project-local",
            LevelArg::Project => "project",
            LevelArg::Effective => "effective",
        };
        write!(f, "{}", s)
    }
}

impl From<LevelArg> for SettingsSource {
    fn from(val: LevelArg) -> Self {
        match val {
            LevelArg::User => SettingsSource::Level(SettingsLevel::User),
            LevelArg::ProjectLocal => SettingsSource::Level(SettingsLevel::ProjectLocal),
            LevelArg::Project => SettingsSource::Level(SettingsLevel::Project),
            LevelArg::Effective => SettingsSource::Effective,
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
