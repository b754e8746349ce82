//! Type definitions for Claude Code settings.
//!
//! Only the parts of the settings schema that permission auditing reads are
//! modelled explicitly. Everything else is preserved in [`Settings::extra`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The settings structure of a Claude Code settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Tool permission lists.
    #[serde(default, skip_serializing_if = "Permissions::is_empty")]
    pub permissions: Permissions,

    /// Sandbox configuration for command execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<Sandbox>,

    /// Any additional fields not explicitly defined.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Tool permission configuration.
///
/// Entries are kept as the raw strings found in the file. Parsing happens
/// later (see [`crate::permission`] and [`crate::domain`]) so that one
/// malformed entry never prevents the rest of the file from loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Permissions {
    /// Tools that are always allowed without confirmation.
    /// Format: "ToolName(pattern:*)" or just "ToolName"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,

    /// Tools that require user confirmation before use.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ask: Vec<String>,

    /// Tools that are explicitly denied.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<String>,
}

impl Permissions {
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.ask.is_empty() && self.deny.is_empty()
    }
}

/// Sandbox configuration for command execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sandbox {
    /// Whether sandboxing is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Network restrictions applied inside the sandbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<SandboxNetwork>,
}

/// Network section of the sandbox configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SandboxNetwork {
    /// Hosts reachable from sandboxed commands. `None` means the key is absent,
    /// which is different from an explicitly empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
}

/// Represents the scope/level at which settings are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsLevel {
    /// System-wide managed settings (highest priority, typically read-only).
    /// Location: /etc/claude-code/managed-settings.json
    System,

    /// Project-level local settings (not committed to version control).
    /// Location: .claude/settings.local.json
    ProjectLocal,

    /// Project-level shared settings (committed to version control).
    /// Location: .claude/settings.json
    Project,

    /// User-level settings (personal defaults).
    /// Location: ~/.claude/settings.json
    User,
}

impl SettingsLevel {
    /// Returns the display name for this level.
    pub fn name(&self) -> &'static str {
        match self {
            SettingsLevel::System => "system",
            SettingsLevel::ProjectLocal => "project-local",
            SettingsLevel::Project => "project",
            SettingsLevel::User => "user",
        }
    }
}

impl Settings {
    /// Returns `sandbox.network.allowedDomains`, if the key is present.
    pub fn sandbox_allowed_domains(&self) -> Option<&[String]> {
        self.sandbox
            .as_ref()
            .and_then(|s| s.network.as_ref())
            .and_then(|n| n.allowed_domains.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_permissions_and_sandbox() {
        let json = r#"{
            "permissions": {
                "allow": ["Bash(git status:*)", "WebFetch(domain:github.com)"],
                "deny": ["Read(~/.ssh/**)"]
            },
            "sandbox": {
                "network": { "allowedDomains": ["github.com", "*.npmjs.org"] }
            },
            "model": "claude-sonnet-4-20250514"
        }"#;

        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.permissions.allow.len(), 2);
        assert_eq!(settings.permissions.deny, vec!["Read(~/.ssh/**)"]);
        assert!(settings.permissions.ask.is_empty());
        assert_eq!(
            settings.sandbox_allowed_domains(),
            Some(&["github.com".to_string(), "*.npmjs.org".to_string()][..])
        );
        assert!(settings.extra.contains_key("model"));
    }

    #[test]
    fn test_missing_sandbox_is_distinct_from_empty() {
        let absent: Settings = serde_json::from_str(r#"{"permissions": {}}"#).unwrap();
        assert_eq!(absent.sandbox_allowed_domains(), None);

        let empty: Settings =
            serde_json::from_str(r#"{"sandbox": {"network": {"allowedDomains": []}}}"#).unwrap();
        assert_eq!(empty.sandbox_allowed_domains(), Some(&[][..]));
    }

    #[test]
    fn test_missing_permissions_key() {
        let settings: Settings = serde_json::from_str(r#"{"model": "opus"}"#).unwrap();
        assert!(settings.permissions.is_empty());
    }
}
