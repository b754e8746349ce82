//! Fetch report: WebFetch and Fetch domains against `WebFetch(domain:...)`
//! entries and the sandbox network allowlist.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::NaiveDate;
use claude_settings::domain::{domain_matches, domain_matches_any};
use claude_settings::{DomainEntry, FetchTool};
use serde::Serialize;
use tracing::{Level, debug, instrument};

use super::{ReportOptions, by_count_desc, count_unique_sources};
use crate::categorize::{Category, categorize_domain};
use crate::extract::extract_domain;
use crate::scanner::Observation;

const MISSING_FROM_SANDBOX: &str = "in permissions but missing from sandbox";

#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    pub metadata: FetchMetadata,
    pub current_allowlist: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub current_sandbox: Vec<String>,
    pub recommendations: FetchRecommendations,
    pub all_domains: Vec<DomainSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchMetadata {
    pub analysis_date: NaiveDate,
    pub days_analyzed: u32,
    pub files_scanned: usize,
    pub webfetch_calls: usize,
    pub fetch_calls: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchRecommendations {
    pub add: Vec<DomainRecommendation>,
    pub review: Vec<DomainRecommendation>,
    pub unused: Vec<UnusedDomain>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_to_sandbox: Vec<DomainRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRecommendation {
    pub domain: String,
    pub count: usize,
    pub category: Category,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedDomain {
    pub domain: String,
    pub in_allowlist: bool,
    pub count: usize,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainSummary {
    pub domain: String,
    pub count: usize,
    pub category: Category,
    pub in_allowlist: bool,
}

/// Builds the fetch report.
///
/// `allow` is the raw permission allow list; only `WebFetch(domain:...)` and
/// `Fetch(domain:...)` entries are considered. `sandbox` is the sandbox
/// network allowlist when one is configured. Observations whose URL has no
/// extractable host are skipped.
#[instrument(level = Level::TRACE, skip(observations, allow, sandbox))]
pub fn generate_fetch_report(
    observations: &[Observation],
    allow: &[String],
    sandbox: Option<&[String]>,
    options: &ReportOptions,
) -> FetchReport {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut calls: HashMap<FetchTool, usize> = HashMap::new();
    let mut sources: Vec<&Path> = Vec::new();

    for observation in observations {
        let Some(tool) = FetchTool::from_name(&observation.tool) else {
            continue;
        };
        let domain = match extract_domain(&observation.raw_payload) {
            Ok(domain) => domain,
            Err(e) => {
                debug!(url = %observation.raw_payload, error = %e, "Skipping fetch without a host");
                continue;
            }
        };
        *counts.entry(domain).or_default() += 1;
        *calls.entry(tool).or_default() += 1;
        sources.push(&observation.source);
    }

    let allowlist: Vec<String> = allow
        .iter()
        .filter_map(|raw| DomainEntry::parse(raw))
        .map(|entry| entry.domain().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut all_domains = Vec::with_capacity(counts.len());
    let mut recommendations = FetchRecommendations::default();

    for (domain, &count) in &counts {
        let result = categorize_domain(domain);
        let in_allowlist = domain_matches_any(domain, &allowlist);

        all_domains.push(DomainSummary {
            domain: domain.clone(),
            count,
            category: result.category,
            in_allowlist,
        });

        if in_allowlist {
            continue;
        }

        let recommendation = DomainRecommendation {
            domain: domain.clone(),
            count,
            category: result.category,
            reason: result.reason.to_string(),
        };
        match result.category {
            Category::Safe => recommendations.add.push(recommendation),
            _ => recommendations.review.push(recommendation),
        }
    }

    // Count of observed calls an allowlist entry covers.
    let covered = |entry: &str| -> usize {
        counts
            .iter()
            .filter(|(domain, _)| domain_matches(entry, domain))
            .map(|(_, count)| count)
            .sum()
    };

    for domain in &allowlist {
        if covered(domain) == 0 {
            recommendations.unused.push(UnusedDomain {
                domain: domain.clone(),
                in_allowlist: true,
                count: 0,
                note: options.unused_note(),
            });
        }
    }

    if let Some(sandbox) = sandbox {
        for domain in &allowlist {
            if !domain_matches_any(domain, sandbox) {
                recommendations.add_to_sandbox.push(DomainRecommendation {
                    domain: domain.clone(),
                    count: covered(domain),
                    category: categorize_domain(domain).category,
                    reason: MISSING_FROM_SANDBOX.to_string(),
                });
            }
        }
    }

    all_domains.sort_by(|a, b| by_count_desc((a.count, &a.domain), (b.count, &b.domain)));
    for bucket in [&mut recommendations.add, &mut recommendations.review] {
        bucket.sort_by(|a, b| by_count_desc((a.count, &a.domain), (b.count, &b.domain)));
    }

    FetchReport {
        metadata: FetchMetadata {
            analysis_date: options.analysis_date,
            days_analyzed: options.lookback_days,
            files_scanned: count_unique_sources(sources),
            webfetch_calls: calls.get(&FetchTool::WebFetch).copied().unwrap_or(0),
            fetch_calls: calls.get(&FetchTool::Fetch).copied().unwrap_or(0),
        },
        current_allowlist: allowlist,
        current_sandbox: sandbox.map(<[String]>::to_vec).unwrap_or_default(),
        recommendations,
        all_domains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ReportOptions {
        ReportOptions::new(7, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn fetch(tool: &str, url: &str) -> Observation {
        Observation::new(tool, url, "session.jsonl")
    }

    #[test]
    fn test_counts_domains_across_tools() {
        let observations = vec![
            fetch("WebFetch", "https://github.com/a"),
            fetch("WebFetch", "https://github.com/b"),
            fetch("Fetch", "https://github.com/c"),
            fetch("WebFetch", "https://docs.python.org/3/"),
            fetch("WebFetch", "not a url"),
            fetch("Bash", "curl https://github.com"),
        ];
        let report = generate_fetch_report(&observations, &[], None, &options());

        assert_eq!(report.metadata.webfetch_calls, 3);
        assert_eq!(report.metadata.fetch_calls, 1);
        assert_eq!(report.metadata.files_scanned, 1);
        let domains: Vec<_> = report
            .all_domains
            .iter()
            .map(|d| (d.domain.as_str(), d.count))
            .collect();
        assert_eq!(domains, vec![("github.com", 3), ("docs.python.org", 1)]);
    }

    #[test]
    fn test_allowlist_membership_and_routing() {
        let observations = vec![
            fetch("WebFetch", "https://docs.anthropic.com/x"),
            fetch("WebFetch", "https://pkg.go.dev/net/http"),
            fetch("WebFetch", "https://stackoverflow.com/q/1"),
            fetch("WebFetch", "https://example.org/"),
        ];
        let allow = strings(&[
            "WebFetch(domain:*.anthropic.com)",
            "Bash(git status:*)",
            "WebFetch(domain:unused.dev)",
        ]);
        let report = generate_fetch_report(&observations, &allow, None, &options());

        assert_eq!(report.current_allowlist, vec!["*.anthropic.com", "unused.dev"]);
        let anthropic = report
            .all_domains
            .iter()
            .find(|d| d.domain == "docs.anthropic.com")
            .unwrap();
        assert!(anthropic.in_allowlist);

        let add: Vec<_> = report.recommendations.add.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(add, vec!["pkg.go.dev"]);

        let review: Vec<_> = report
            .recommendations
            .review
            .iter()
            .map(|r| (r.domain.as_str(), r.category))
            .collect();
        assert_eq!(
            review,
            vec![
                ("example.org", Category::Review),
                ("stackoverflow.com", Category::Medium),
            ]
        );

        let unused: Vec<_> = report
            .recommendations
            .unused
            .iter()
            .map(|u| u.domain.as_str())
            .collect();
        assert_eq!(unused, vec!["unused.dev"]);
        assert_eq!(report.recommendations.unused[0].note, "unused in the last 7 days");
    }

    #[test]
    fn test_wildcard_entry_is_used_by_subdomain() {
        let observations = vec![fetch("Fetch", "https://api.databricks.com/")];
        let allow = strings(&["Fetch(domain:*.databricks.com)"]);
        let report = generate_fetch_report(&observations, &allow, None, &options());
        assert!(report.recommendations.unused.is_empty());
    }

    #[test]
    fn test_duplicate_domains_across_tools_collapse() {
        let allow = strings(&["WebFetch(domain:github.com)", "Fetch(domain:github.com)"]);
        let report = generate_fetch_report(&[], &allow, None, &options());
        assert_eq!(report.current_allowlist, vec!["github.com"]);
        assert_eq!(report.recommendations.unused.len(), 1);
    }

    #[test]
    fn test_add_to_sandbox() {
        let observations = vec![fetch("WebFetch", "https://github.com/x")];
        let allow = strings(&[
            "WebFetch(domain:github.com)",
            "WebFetch(domain:docs.rs)",
            "WebFetch(domain:api.example.com)",
        ]);
        let sandbox = strings(&["github.com", "*.example.com"]);
        let report = generate_fetch_report(&observations, &allow, Some(&sandbox), &options());

        assert_eq!(report.current_sandbox, sandbox);
        let missing: Vec<_> = report
            .recommendations
            .add_to_sandbox
            .iter()
            .map(|r| (r.domain.as_str(), r.reason.as_str()))
            .collect();
        assert_eq!(missing, vec![("docs.rs", "in permissions but missing from sandbox")]);
    }

    #[test]
    fn test_no_sandbox_omits_fields() {
        let allow = strings(&["WebFetch(domain:github.com)"]);
        let report = generate_fetch_report(&[], &allow, None, &options());
        assert!(report.recommendations.add_to_sandbox.is_empty());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("current_sandbox").is_none());
        assert!(json["recommendations"].get("add_to_sandbox").is_none());
        assert_eq!(json["metadata"]["webfetch_calls"], 0);
        assert_eq!(json["recommendations"]["unused"][0]["in_allowlist"], true);
    }
}
