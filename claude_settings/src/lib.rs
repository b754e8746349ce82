//! # Claude Settings
//!
//! Reading Claude Code settings and parsing their permission lists.
//!
//! ## Overview
//!
//! Claude Code uses a hierarchical settings system with multiple levels:
//!
//! 1. **System** (`/etc/claude-code/managed-settings.json`) - Read-only, highest priority
//! 2. **Project Local** (`.claude/settings.local.json`) - Project-specific, not version controlled
//! 3. **Project** (`.claude/settings.json`) - Project-specific, version controlled
//! 4. **User** (`~/.claude/settings.json`) - User defaults, lowest priority
//!
//! This library provides:
//! - The settings fields permission auditing needs (`permissions.allow|ask|deny`,
//!   `sandbox.network.allowedDomains`), with every other field preserved
//! - Path resolution for each level and for the session log root
//! - Loading a single file, a single level, or the merged effective settings
//! - Parsing and matching of permission-list entries, in two dialects:
//!   path-style tool entries ([`permission`]) and fetch domains ([`domain`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use claude_settings::{PathResolver, SettingsLoader, SettingsSource};
//! use claude_settings::permission::matches;
//!
//! let loader = SettingsLoader::new(PathResolver::new());
//! let settings = loader.load(&SettingsSource::Effective)?;
//!
//! if matches("Bash", "git status", &settings.permissions.allow) {
//!     println!("git status is allowlisted");
//! }
//! # Ok::<(), claude_settings::SettingsError>(())
//! ```

pub mod domain;
pub mod error;
pub mod io;
pub mod merge;
pub mod paths;
pub mod permission;
pub mod types;

pub use domain::{DomainEntry, FetchTool};
pub use error::{Result, SettingsError};
pub use merge::{SettingsLoader, SettingsSource};
pub use paths::PathResolver;
pub use permission::{PermissionEntry, Tool};
pub use types::{Permissions, Sandbox, SandboxNetwork, Settings, SettingsLevel};
