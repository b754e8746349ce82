//! Permission-list entry parsing and path-style matching.
//!
//! ## Entry Format
//!
//! Claude Code permission lists contain strings such as:
//! - `Bash` - a bare entry, matches every use of the tool
//! - `Bash(git status)` - matches the command prefix `git status`
//! - `Bash(git status:*)` - the same; the `:*` suffix is dropped
//! - `Read(~/.claude/**)` - matches `~/.claude` and everything below it
//!
//! Only the command and file tools ([`Tool`]) are parsed here. Anything else
//! (`WebFetch(...)`, `mcp__server__tool`, `Skill(...)`) fails to parse and is
//! ignored by callers. Fetch domains have their own grammar in
//! [`crate::domain`].
//!
//! ## Examples
//!
//! ```rust
//! use claude_settings::permission::{PermissionEntry, Tool, matches};
//!
//! let entry = PermissionEntry::parse("Bash(git status:*)").unwrap();
//! assert_eq!(entry.tool(), Tool::Bash);
//! assert_eq!(entry.pattern(), "git status");
//! assert!(entry.matches("Bash", "git status"));
//!
//! let allow = ["Read(~/.claude/**)", "Write(src/**)"];
//! assert!(matches("Read", "~/.claude/skills/foo", &allow));
//! assert!(!matches("Write", "docs/README.md", &allow));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{Level, instrument};

/// The tools whose permission entries are audited.
///
/// This is a closed set: a permission string naming any other tool does not
/// parse, so there is no default or placeholder tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tool {
    Bash,
    Read,
    Write,
    Edit,
}

impl Tool {
    /// All recognized tools.
    pub const ALL: [Tool; 4] = [Tool::Bash, Tool::Read, Tool::Write, Tool::Edit];

    /// Looks up a tool by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Bash" => Some(Tool::Bash),
            "Read" => Some(Tool::Read),
            "Write" => Some(Tool::Write),
            "Edit" => Some(Tool::Edit),
            _ => None,
        }
    }

    /// The tool name as written in settings and session logs.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Bash => "Bash",
            Tool::Read => "Read",
            Tool::Write => "Write",
            Tool::Edit => "Edit",
        }
    }

    /// True for tools whose argument is a filesystem path.
    pub fn is_file_tool(&self) -> bool {
        matches!(self, Tool::Read | Tool::Write | Tool::Edit)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed permission-list entry.
///
/// An empty pattern denotes a bare entry (e.g. `Bash`), which matches every
/// invocation of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionEntry {
    tool: Tool,
    pattern: String,
}

impl PermissionEntry {
    /// Creates an entry for a tool and pattern.
    pub fn new(tool: Tool, pattern: impl Into<String>) -> Self {
        Self {
            tool,
            pattern: pattern.into(),
        }
    }

    /// Creates a bare entry for a tool.
    pub fn bare(tool: Tool) -> Self {
        Self::new(tool, "")
    }

    /// Parses a raw permission string.
    ///
    /// Returns `None` for entries naming an unrecognized tool or with an
    /// unbalanced parenthesis.
    #[instrument(level = Level::TRACE)]
    pub fn parse(raw: &str) -> Option<Self> {
        let Some(paren_start) = raw.find('(') else {
            return Tool::from_name(raw).map(Self::bare);
        };

        if !raw.ends_with(')') {
            return None;
        }

        let tool = Tool::from_name(&raw[..paren_start])?;
        let inner = &raw[paren_start + 1..raw.len() - 1];
        let pattern = inner.strip_suffix(":*").unwrap_or(inner);

        Some(Self::new(tool, pattern))
    }

    /// Returns the tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Returns the pattern (empty for a bare entry).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// True if this entry has no pattern.
    pub fn is_bare(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Returns true if this entry covers `pattern` for the tool named `tool`.
    ///
    /// Checks run in a fixed order: bare entry, exact equality, `/**`
    /// directory wildcard, then the generic trailing `**`. The `/**` check
    /// must come first: for `src/**` it requires a path boundary, which the
    /// generic check does not.
    pub fn matches(&self, tool: &str, pattern: &str) -> bool {
        if self.tool.name() != tool {
            return false;
        }

        if self.is_bare() || self.pattern == pattern {
            return true;
        }

        if let Some(prefix) = self.pattern.strip_suffix("/**")
            && (pattern == prefix
                || pattern
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/')))
        {
            return true;
        }

        if let Some(prefix) = self.pattern.strip_suffix("**")
            && pattern.starts_with(prefix)
        {
            return true;
        }

        false
    }
}

impl fmt::Display for PermissionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            write!(f, "{}", self.tool)
        } else {
            write!(f, "{}({})", self.tool, self.pattern)
        }
    }
}

/// Returns true if any well-formed entry in `entries` covers `pattern` for
/// `tool`. Entries that fail to parse are skipped.
#[instrument(level = Level::TRACE, skip(entries))]
pub fn matches<S: AsRef<str>>(tool: &str, pattern: &str, entries: &[S]) -> bool {
    entries
        .iter()
        .filter_map(|raw| PermissionEntry::parse(raw.as_ref()))
        .any(|entry| entry.matches(tool, pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let cases = [
            ("Bash(git status:*)", Some((Tool::Bash, "git status"))),
            ("Bash(git status)", Some((Tool::Bash, "git status"))),
            ("Read(~/.ssh/**)", Some((Tool::Read, "~/.ssh/**"))),
            ("Write(src/**)", Some((Tool::Write, "src/**"))),
            ("Edit(~/.claude/**)", Some((Tool::Edit, "~/.claude/**"))),
            ("Bash", Some((Tool::Bash, ""))),
            ("WebFetch(domain:github.com)", None),
            ("WebSearch", None),
            ("mcp__obsidian__*", None),
            ("Skill(commit-commands:commit-push-pr)", None),
            ("Bash(git status", None),
            ("bash(ls)", None),
            ("", None),
        ];

        for (raw, expected) in cases {
            let parsed = PermissionEntry::parse(raw);
            let got = parsed.as_ref().map(|e| (e.tool(), e.pattern()));
            assert_eq!(got, expected, "parsing {raw:?}");
        }
    }

    #[test]
    fn test_bare_entry_matches_everything_for_its_tool() {
        let bare = ["Bash"];
        for pattern in ["", "ls", "git status", "rm -rf", "anything at all"] {
            assert!(matches("Bash", pattern, &bare), "pattern {pattern:?}");
        }
        assert!(!matches("Read", "CLAUDE.md", &bare));
    }

    #[test]
    fn test_matches_permission_list() {
        let permissions = [
            "Bash(git status:*)",
            "Bash(go test:*)",
            "Read(CLAUDE.md)",
            "Read(~/.claude/**)",
            "Write(src/**)",
        ];

        let cases = [
            ("Bash", "git status", true),
            ("Bash", "curl", false),
            ("Read", "CLAUDE.md", true),
            ("Read", "~/.claude/skills/foo", true),
            ("Read", "~/.claude", true),
            ("Write", "src/main.go", true),
            ("Write", "docs/README.md", false),
            ("Write", "git status", false),
        ];

        for (tool, pattern, want) in cases {
            assert_eq!(
                matches(tool, pattern, &permissions),
                want,
                "matches({tool:?}, {pattern:?})"
            );
        }
    }

    #[test]
    fn test_directory_wildcard_requires_path_boundary_before_generic_check() {
        let dir = PermissionEntry::parse("Read(~/.claude/**)").unwrap();
        assert!(dir.matches("Read", "~/.claude/skills/**"));
        // The generic `**` fallback strips only `**`, leaving `~/.claude/`,
        // which still demands the slash.
        assert!(!dir.matches("Read", "~/.claudex/**"));

        let generic = PermissionEntry::parse("Read(~/.cla**)").unwrap();
        assert!(generic.matches("Read", "~/.claude/skills/**"));
        assert!(generic.matches("Read", "~/.clang-format"));
        assert!(!generic.matches("Read", "~/.cache/**"));
    }

    #[test]
    fn test_command_prefix_entries_match_exactly() {
        // `:*` collapses to the prefix; no further prefix matching happens.
        let entry = PermissionEntry::parse("Bash(git:*)").unwrap();
        assert!(entry.matches("Bash", "git"));
        assert!(!entry.matches("Bash", "git status"));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let entries = ["Bash(git status", "WebFetch(domain:github.com)", "Bash(ls)"];
        assert!(matches("Bash", "ls", &entries));
        assert!(!matches("Bash", "git status", &entries));
    }

    #[test]
    fn test_entry_matches_its_own_pattern() {
        let raws = [
            "Bash(git status:*)",
            "Bash(rm -rf)",
            "Read(~/.ssh/**)",
            "Write(src/**)",
            "Edit(CLAUDE.md)",
            "Read(**)",
            "Bash",
        ];
        for raw in raws {
            let entry = PermissionEntry::parse(raw).unwrap();
            assert!(
                entry.matches(entry.tool().name(), entry.pattern()),
                "{raw} should match its own pattern"
            );
        }
    }

    #[test]
    fn test_display_and_tool_names() {
        assert_eq!(PermissionEntry::bare(Tool::Edit).to_string(), "Edit");
        assert_eq!(
            PermissionEntry::new(Tool::Bash, "git status").to_string(),
            "Bash(git status)"
        );
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("WebFetch"), None);
        assert_eq!(Tool::from_name("bash"), None);
    }
}
