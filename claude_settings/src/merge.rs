//! Settings loading and merging across levels.
//!
//! A single settings file is read directly with [`crate::io`]. The effective
//! settings of a project are built with [figment](https://docs.rs/figment/):
//! every existing level is layered from lowest to highest precedence with
//! `admerge`, so scalar values are overridden while permission lists and
//! sandbox domains from all levels are concatenated. Duplicates are removed
//! afterwards, keeping the first occurrence.
//!
//! ```rust,no_run
//! use claude_settings::{PathResolver, SettingsLoader};
//!
//! let loader = SettingsLoader::new(PathResolver::new());
//! let settings = loader.effective().unwrap();
//! println!("{} allow entries", settings.permissions.allow.len());
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Json, Serialized};
use tracing::{Level, debug, instrument};

use crate::error::{Result, SettingsError};
use crate::io::{read_settings_from_path, read_settings_from_path_optional};
use crate::paths::PathResolver;
use crate::types::{Settings, SettingsLevel};

/// Which settings a caller wants to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// One explicit file.
    File(PathBuf),
    /// One settings level, resolved through the [`PathResolver`].
    Level(SettingsLevel),
    /// All levels merged.
    Effective,
}

/// Loads settings for a [`SettingsSource`].
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    resolver: PathResolver,
}

impl SettingsLoader {
    /// Creates a loader with the given path resolver.
    #[instrument(level = Level::TRACE)]
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Returns a reference to the path resolver.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Loads settings from the given source.
    ///
    /// An explicit file must exist. A single level that has no file is an
    /// error too, since auditing nothing is almost certainly a mistake.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn load(&self, source: &SettingsSource) -> Result<Settings> {
        match source {
            SettingsSource::File(path) => self.load_path(path),
            SettingsSource::Level(level) => {
                let path = self.resolver.settings_path(*level)?;
                read_settings_from_path_optional(&path)?
                    .ok_or(SettingsError::MissingLevel(*level))
            }
            SettingsSource::Effective => self.effective(),
        }
    }

    /// Loads a single settings file.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn load_path(&self, path: &Path) -> Result<Settings> {
        read_settings_from_path(path)
    }

    /// Returns the figment with every existing level layered on top of the
    /// defaults, lowest precedence first.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        for (level, path) in self.resolver.layered_paths()? {
            if path.exists() {
                // Parse errors carry the file path; figment's do not.
                read_settings_from_path(&path)?;
                debug!(level = level.name(), path = %path.display(), "Layering settings");
                figment = figment.admerge(Json::file(&path));
            }
        }

        Ok(figment)
    }

    /// Loads and merges all settings levels.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn effective(&self) -> Result<Settings> {
        let mut settings: Settings = self.figment()?.extract()?;
        dedup_lists(&mut settings);
        Ok(settings)
    }
}

/// Removes duplicate list entries, keeping the first occurrence.
fn dedup_lists(settings: &mut Settings) {
    dedup_in_place(&mut settings.permissions.allow);
    dedup_in_place(&mut settings.permissions.ask);
    dedup_in_place(&mut settings.permissions.deny);
    if let Some(domains) = settings
        .sandbox
        .as_mut()
        .and_then(|s| s.network.as_mut())
        .and_then(|n| n.allowed_domains.as_mut())
    {
        dedup_in_place(domains);
    }
}

fn dedup_in_place(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
