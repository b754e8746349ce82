//! permaudit: audit Claude Code permission lists against session logs.
//!
//! Recorded tool invocations are reduced to canonical patterns, compared
//! against the `permissions.allow|deny|ask` lists of a settings file, and
//! classified by an advisory rule engine. The result is a report of entries
//! to add, patterns to review, and list entries nothing used.
//!
//! # Modules
//!
//! - [`scanner`]: walks `~/.claude/projects` and yields [`scanner::Observation`]s.
//! - [`extract`]: command-prefix, path and domain normalizers.
//! - [`categorize`]: ordered rule tables for commands, paths and domains.
//! - [`report`]: the tool report and the fetch report.
//! - [`render`]: console text output.
//! - [`errors`]: user-facing error display.
//!
//! Entry parsing and list matching live in [`claude_settings`].
//!
//! # Example
//!
//! ```no_run
//! use chrono::{Local, Utc};
//! use claude_settings::{PathResolver, SettingsLoader, SettingsSource};
//! use permaudit::extract::PatternExtractor;
//! use permaudit::report::{ReportOptions, generate_report};
//! use permaudit::scanner::scan_sessions;
//!
//! let loader = SettingsLoader::new(PathResolver::new());
//! let settings = loader.load(&SettingsSource::Effective).unwrap();
//! let projects = loader.resolver().projects_dir().unwrap();
//! let scan = scan_sessions(&projects, 30, Utc::now()).unwrap();
//!
//! let options = ReportOptions::new(30, Local::now().date_naive());
//! let report = generate_report(
//!     &scan.observations,
//!     &settings.permissions,
//!     &PatternExtractor::from_env(),
//!     &options,
//! );
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod categorize;
pub mod errors;
pub mod extract;
pub mod render;
pub mod report;
pub mod scanner;
pub mod style;
pub mod version;
