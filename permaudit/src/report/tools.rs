//! Tool report: Bash, Read, Write and Edit usage against the permission lists.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use claude_settings::{PermissionEntry, Permissions, Tool};
use serde::Serialize;
use tracing::{Level, debug, instrument};

use super::{ListKind, ReportOptions, by_count_desc, count_unique_sources};
use crate::categorize::{Category, categorize_tool};
use crate::extract::PatternExtractor;
use crate::scanner::Observation;

const DENY_SUFFIX: &str = " (consider adding to deny list)";

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub current_allow: Vec<String>,
    pub current_deny: Vec<String>,
    pub current_ask: Vec<String>,
    pub recommendations: Recommendations,
    pub all_patterns: Vec<PatternSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub analysis_date: NaiveDate,
    pub days_analyzed: u32,
    pub files_scanned: usize,
    pub total_tool_calls: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Recommendations {
    pub add: Vec<Recommendation>,
    pub review: Vec<Recommendation>,
    pub unused: Vec<UnusedEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bare_entry_warnings: Vec<String>,
}

/// An observed pattern that no list covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub tool_name: Tool,
    pub pattern: String,
    pub count: usize,
    pub category: Category,
    pub reason: String,
}

/// A list entry that matched nothing in the lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedEntry {
    pub entry: String,
    pub list: ListKind,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternSummary {
    pub tool_name: Tool,
    pub pattern: String,
    pub count: usize,
    pub category: Category,
    pub in_allowlist: bool,
    pub in_denylist: bool,
    pub in_asklist: bool,
}

impl Recommendation {
    fn sort_key(&self) -> (usize, (&'static str, &str)) {
        (self.count, (self.tool_name.name(), &self.pattern))
    }
}

impl PatternSummary {
    fn sort_key(&self) -> (usize, (&'static str, &str)) {
        (self.count, (self.tool_name.name(), &self.pattern))
    }
}

fn list<'a>(permissions: &'a Permissions, kind: ListKind) -> &'a [String] {
    match kind {
        ListKind::Allow => &permissions.allow,
        ListKind::Deny => &permissions.deny,
        ListKind::Ask => &permissions.ask,
    }
}

/// Builds the tool report.
///
/// Observations for tools outside {Bash, Read, Write, Edit}, and those whose
/// payload normalizes to an empty pattern, are not counted.
#[instrument(level = Level::TRACE, skip(observations, permissions, extractor))]
pub fn generate_report(
    observations: &[Observation],
    permissions: &Permissions,
    extractor: &PatternExtractor,
    options: &ReportOptions,
) -> Report {
    let mut counts: HashMap<(Tool, String), usize> = HashMap::new();
    let mut sources: Vec<&Path> = Vec::new();

    for observation in observations {
        let Some(tool) = Tool::from_name(&observation.tool) else {
            continue;
        };
        let pattern = extractor.pattern_for(tool, &observation.raw_payload);
        if pattern.is_empty() {
            debug!(tool = %tool, payload = %observation.raw_payload, "Dropping empty pattern");
            continue;
        }
        *counts.entry((tool, pattern)).or_default() += 1;
        sources.push(&observation.source);
    }

    let mut all_patterns = Vec::with_capacity(counts.len());
    let mut recommendations = Recommendations::default();

    for ((tool, pattern), &count) in &counts {
        let result = categorize_tool(*tool, pattern);
        let [in_allow, in_deny, in_ask] = ListKind::ALL.map(|kind| {
            claude_settings::permission::matches(tool.name(), pattern, list(permissions, kind))
        });

        all_patterns.push(PatternSummary {
            tool_name: *tool,
            pattern: pattern.clone(),
            count,
            category: result.category,
            in_allowlist: in_allow,
            in_denylist: in_deny,
            in_asklist: in_ask,
        });

        if in_allow || in_deny || in_ask {
            continue;
        }

        let mut recommendation = Recommendation {
            tool_name: *tool,
            pattern: pattern.clone(),
            count,
            category: result.category,
            reason: result.reason.to_string(),
        };
        match result.category {
            Category::Safe => recommendations.add.push(recommendation),
            Category::Deny => {
                recommendation.reason.push_str(DENY_SUFFIX);
                recommendations.review.push(recommendation);
            }
            Category::Ask | Category::Medium | Category::Review => {
                recommendations.review.push(recommendation)
            }
        }
    }

    for kind in ListKind::ALL {
        for raw in list(permissions, kind) {
            let Some(entry) = PermissionEntry::parse(raw) else {
                continue;
            };
            if entry.is_bare() {
                recommendations.bare_entry_warnings.push(entry.tool().to_string());
                continue;
            }
            let used = counts
                .keys()
                .any(|(tool, pattern)| entry.matches(tool.name(), pattern));
            if !used {
                recommendations.unused.push(UnusedEntry {
                    entry: raw.clone(),
                    list: kind,
                    note: options.unused_note(),
                });
            }
        }
    }

    all_patterns.sort_by(|a, b| by_count_desc(a.sort_key(), b.sort_key()));
    for bucket in [&mut recommendations.add, &mut recommendations.review] {
        bucket.sort_by(|a, b| by_count_desc(a.sort_key(), b.sort_key()));
    }

    Report {
        metadata: ReportMetadata {
            analysis_date: options.analysis_date,
            days_analyzed: options.lookback_days,
            files_scanned: count_unique_sources(sources),
            total_tool_calls: counts.values().sum(),
        },
        current_allow: permissions.allow.clone(),
        current_deny: permissions.deny.clone(),
        current_ask: permissions.ask.clone(),
        recommendations,
        all_patterns,
    }
}
