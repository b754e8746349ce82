//! Fetch-domain permission entries and hostname matching.
//!
//! Web fetch permissions use their own grammar, `WebFetch(domain:<host>)` or
//! `Fetch(domain:<host>)`, where `<host>` is either an exact hostname or a
//! `*.`-prefixed suffix wildcard. Hostname matching is deliberately separate
//! from the path-style matching in [`crate::permission`]: `*.` only ever
//! stands for one or more leading labels.
//!
//! ```rust
//! use claude_settings::domain::{DomainEntry, FetchTool, domain_matches};
//!
//! let entry = DomainEntry::parse("WebFetch(domain:*.anthropic.com)").unwrap();
//! assert_eq!(entry.tool(), FetchTool::WebFetch);
//! assert!(domain_matches(entry.domain(), "docs.anthropic.com"));
//! assert!(!domain_matches(entry.domain(), "anthropic.com"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{Level, instrument};

/// Fixed prefix of the inner text of a domain entry.
const DOMAIN_PREFIX: &str = "domain:";

/// Tools that fetch URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FetchTool {
    WebFetch,
    Fetch,
}

impl FetchTool {
    pub const ALL: [FetchTool; 2] = [FetchTool::WebFetch, FetchTool::Fetch];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "WebFetch" => Some(FetchTool::WebFetch),
            "Fetch" => Some(FetchTool::Fetch),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FetchTool::WebFetch => "WebFetch",
            FetchTool::Fetch => "Fetch",
        }
    }
}

impl fmt::Display for FetchTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed `Tool(domain:<host>)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainEntry {
    tool: FetchTool,
    domain: String,
}

impl DomainEntry {
    pub fn new(tool: FetchTool, domain: impl Into<String>) -> Self {
        Self {
            tool,
            domain: domain.into(),
        }
    }

    /// Parses a raw permission string.
    ///
    /// Returns `None` unless the string is exactly `WebFetch(domain:...)` or
    /// `Fetch(domain:...)`.
    #[instrument(level = Level::TRACE)]
    pub fn parse(raw: &str) -> Option<Self> {
        FetchTool::ALL.into_iter().find_map(|tool| {
            let domain = raw
                .strip_prefix(tool.name())?
                .strip_prefix('(')?
                .strip_prefix(DOMAIN_PREFIX)?
                .strip_suffix(')')?;
            Some(Self::new(tool, domain))
        })
    }

    pub fn tool(&self) -> FetchTool {
        self.tool
    }

    /// The host pattern, possibly starting with `*.`.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for DomainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}{})", self.tool, DOMAIN_PREFIX, self.domain)
    }
}

/// Returns true if the host pattern `entry` covers `candidate`.
///
/// `entry` matches when it equals `candidate`, or when it equals `*.` followed
/// by `candidate` with one or more leading labels removed. A wildcard never
/// covers the bare suffix itself: `*.example.com` does not match
/// `example.com`.
pub fn domain_matches(entry: &str, candidate: &str) -> bool {
    if entry == candidate {
        return true;
    }

    let Some(suffix) = entry.strip_prefix("*.") else {
        return false;
    };

    candidate
        .match_indices('.')
        .any(|(idx, _)| &candidate[idx + 1..] == suffix)
}

/// Returns true if any host pattern in `entries` covers `candidate`.
pub fn domain_matches_any<S: AsRef<str>>(candidate: &str, entries: &[S]) -> bool {
    entries
        .iter()
        .any(|entry| domain_matches(entry.as_ref(), candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain_entries() {
        let cases = [
            (
                "WebFetch(domain:github.com)",
                Some((FetchTool::WebFetch, "github.com")),
            ),
            (
                "Fetch(domain:api.example.com)",
                Some((FetchTool::Fetch, "api.example.com")),
            ),
            (
                "WebFetch(domain:*.databricks.com)",
                Some((FetchTool::WebFetch, "*.databricks.com")),
            ),
            ("WebFetch", None),
            ("WebFetch(github.com)", None),
            ("WebFetch(domain:github.com", None),
            ("Bash(git status)", None),
            ("WebSearch(domain:github.com)", None),
        ];

        for (raw, expected) in cases {
            let parsed = DomainEntry::parse(raw);
            let got = parsed.as_ref().map(|e| (e.tool(), e.domain()));
            assert_eq!(got, expected, "parsing {raw:?}");
        }
    }

    #[test]
    fn test_exact_domain_match() {
        assert!(domain_matches("github.com", "github.com"));
        assert!(!domain_matches("github.com", "api.github.com"));
        assert!(!domain_matches("github.com", "gitlab.com"));
    }

    #[test]
    fn test_wildcard_domain_match() {
        assert!(domain_matches("*.databricks.com", "docs.databricks.com"));
        assert!(domain_matches("*.databricks.com", "a.b.databricks.com"));
        assert!(!domain_matches("*.databricks.com", "databricks.com"));
        assert!(!domain_matches("*.databricks.com", "notdatabricks.com"));
        assert!(!domain_matches("*.com", "com"));
        assert!(domain_matches("*.com", "example.com"));
    }

    #[test]
    fn test_wildcard_entry_matches_itself() {
        assert!(domain_matches("*.example.com", "*.example.com"));
    }

    #[test]
    fn test_domain_matches_any() {
        let entries = ["github.com", "*.anthropic.com"];
        assert!(domain_matches_any("docs.anthropic.com", &entries));
        assert!(domain_matches_any("github.com", &entries));
        assert!(!domain_matches_any("example.org", &entries));
        assert!(!domain_matches_any::<&str>("github.com", &[]));
    }

    #[test]
    fn test_display_round_trip() {
        let raw = "Fetch(domain:*.example.com)";
        assert_eq!(DomainEntry::parse(raw).unwrap().to_string(), raw);
    }
}
