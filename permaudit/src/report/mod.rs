//! Aggregation of observations into audit reports.
//!
//! [`tools::generate_report`] audits Bash/Read/Write/Edit usage against the
//! allow/deny/ask lists; [`fetch::generate_fetch_report`] audits fetched
//! domains against `WebFetch(domain:...)` entries and the sandbox network
//! allowlist. Both are pure: the analysis date and lookback window come in
//! through [`ReportOptions`].

pub mod fetch;
pub mod tools;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

pub use fetch::{FetchReport, generate_fetch_report};
pub use tools::{Report, generate_report};

/// Inputs shared by both report kinds.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub lookback_days: u32,
    pub analysis_date: NaiveDate,
}

impl ReportOptions {
    pub fn new(lookback_days: u32, analysis_date: NaiveDate) -> Self {
        Self {
            lookback_days,
            analysis_date,
        }
    }

    /// Note attached to every unused entry.
    pub(crate) fn unused_note(&self) -> String {
        format!("unused in the last {} days", self.lookback_days)
    }
}

/// The permission list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Allow,
    Deny,
    Ask,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Allow, ListKind::Deny, ListKind::Ask];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Allow => "allow",
            ListKind::Deny => "deny",
            ListKind::Ask => "ask",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Number of distinct source files among `sources`.
pub fn count_unique_sources<'a>(sources: impl IntoIterator<Item = &'a Path>) -> usize {
    sources.into_iter().collect::<HashSet<_>>().len()
}

/// Count descending, then key ascending.
pub(crate) fn by_count_desc<K: Ord>(a: (usize, K), b: (usize, K)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_count_unique_sources() {
        let paths = [
            PathBuf::from("/p/a.jsonl"),
            PathBuf::from("/p/b.jsonl"),
            PathBuf::from("/p/a.jsonl"),
        ];
        assert_eq!(count_unique_sources(paths.iter().map(PathBuf::as_path)), 2);
        assert_eq!(count_unique_sources(std::iter::empty()), 0);
    }

    #[test]
    fn test_by_count_desc() {
        let mut items = vec![(1, "b"), (3, "z"), (1, "a"), (3, "c")];
        items.sort_by(|a, b| by_count_desc(*a, *b));
        assert_eq!(items, vec![(3, "c"), (3, "z"), (1, "a"), (1, "b")]);
    }

    #[test]
    fn test_unused_note() {
        let options = ReportOptions::new(14, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(options.unused_note(), "unused in the last 14 days");
    }
}
