//! Advisory safety classification of observed patterns.
//!
//! Each pipeline is an ordered list of rule tables, one table per category.
//! Tables are evaluated in order and the first matching rule wins, so the
//! pipeline order encodes precedence: deny before ask before safe for
//! commands, deny before safe for paths, safe before medium for domains.
//! Anything unmatched is [`Category::Review`].
//!
//! Classification is a pure function of its inputs.

mod rule;
mod tables;

use std::fmt;

use claude_settings::Tool;
use serde::Serialize;
use tracing::{Level, instrument};

pub use rule::{Predicate, Rule, Table};

pub(crate) const MANUAL_REVIEW: &str = "manual review required";
const UNKNOWN_TOOL: &str = "unknown tool";

/// Safety category of a pattern or domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Safe,
    Ask,
    Medium,
    Deny,
    Review,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Safe => "safe",
            Category::Ask => "ask",
            Category::Medium => "medium",
            Category::Deny => "deny",
            Category::Review => "review",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A category and the reason it was assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub category: Category,
    pub reason: &'static str,
}

impl CategoryResult {
    pub fn new(category: Category, reason: &'static str) -> Self {
        Self { category, reason }
    }

    fn review() -> Self {
        Self::new(Category::Review, MANUAL_REVIEW)
    }
}

/// Classifies a tool pattern. `tool` is the raw tool name; names outside the
/// recognized set classify as review.
#[instrument(level = Level::TRACE)]
pub fn categorize(tool: &str, pattern: &str) -> CategoryResult {
    match Tool::from_name(tool) {
        Some(tool) => categorize_tool(tool, pattern),
        None => CategoryResult::new(Category::Review, UNKNOWN_TOOL),
    }
}

/// Classifies a pattern for a recognized tool.
pub fn categorize_tool(tool: Tool, pattern: &str) -> CategoryResult {
    let pipeline = if tool.is_file_tool() {
        tables::PATH_PIPELINE
    } else {
        tables::COMMAND_PIPELINE
    };
    rule::first_match(pipeline, pattern).unwrap_or_else(CategoryResult::review)
}

/// Classifies a fetched hostname.
#[instrument(level = Level::TRACE)]
pub fn categorize_domain(domain: &str) -> CategoryResult {
    rule::first_match(tables::DOMAIN_PIPELINE, domain).unwrap_or_else(CategoryResult::review)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(tool: &str, pattern: &str, category: Category) {
        let got = categorize(tool, pattern);
        assert_eq!(
            got.category, category,
            "categorize({tool:?}, {pattern:?}) gave {got:?}"
        );
    }

    #[test]
    fn test_bash_categories() {
        let cases = [
            ("git status", Category::Safe),
            ("git log", Category::Safe),
            ("git show", Category::Safe),
            ("git add", Category::Safe),
            ("go test", Category::Safe),
            ("make build", Category::Safe),
            ("gh pr", Category::Safe),
            ("gh issue", Category::Safe),
            ("brew install", Category::Safe),
            ("ls", Category::Safe),
            ("golangci-lint", Category::Safe),
            ("cargo test", Category::Safe),
            ("npm test", Category::Safe),
            ("git commit", Category::Ask),
            ("git push", Category::Ask),
            ("git reset", Category::Ask),
            ("rm -rf", Category::Ask),
            ("rm -r", Category::Ask),
            ("curl", Category::Deny),
            ("wget", Category::Deny),
            ("sudo", Category::Deny),
            ("ssh", Category::Deny),
            ("eval", Category::Deny),
            ("gh auth", Category::Deny),
            ("python3", Category::Review),
            ("rm", Category::Review),
            ("npm install", Category::Review),
            ("go", Category::Review),
            ("ls -la", Category::Review),
            ("curlie", Category::Review),
        ];

        for (pattern, category) in cases {
            check("Bash", pattern, category);
        }
    }

    #[test]
    fn test_file_categories() {
        let cases = [
            ("~/.ssh/**", Category::Deny),
            ("~/.aws/**", Category::Deny),
            ("~/.gnupg/**", Category::Deny),
            ("~/.kube/**", Category::Deny),
            (".env", Category::Deny),
            (".env.production", Category::Deny),
            ("credentials.json", Category::Deny),
            ("~/.docker/config.json", Category::Deny),
            ("~/.zsh_history", Category::Deny),
            ("~/.netrc", Category::Deny),
            ("id_ed25519", Category::Deny),
            ("CLAUDE.md", Category::Safe),
            (".claude/skills/**", Category::Safe),
            ("~/.claude/**", Category::Safe),
            ("src/**", Category::Safe),
            ("docs/**", Category::Safe),
            ("tests/**", Category::Safe),
            (".env.sample", Category::Safe),
            ("/etc/**", Category::Review),
            ("README.md", Category::Review),
        ];

        for tool in ["Read", "Write", "Edit"] {
            for (pattern, category) in cases {
                check(tool, pattern, category);
            }
        }
    }

    #[test]
    fn test_deny_takes_precedence() {
        // Matches both a deny and a safe rule; deny is evaluated first.
        assert_eq!(categorize("Read", "src/credentials").category, Category::Deny);
        assert_eq!(categorize("Read", "src/.ssh/id_rsa").category, Category::Deny);
        assert_eq!(categorize("Read", "~/.claude/credentials.json").category, Category::Deny);
    }

    #[test]
    fn test_pipeline_order() {
        // No shipped command rule overlaps across tables, so command precedence
        // rests on this order; first_match itself is covered in rule.rs.
        let order = |pipeline: &[Table]| pipeline.iter().map(|t| t.category).collect::<Vec<_>>();
        assert_eq!(
            order(tables::COMMAND_PIPELINE),
            [Category::Deny, Category::Ask, Category::Safe]
        );
        assert_eq!(order(tables::PATH_PIPELINE), [Category::Deny, Category::Safe]);
        assert_eq!(order(tables::DOMAIN_PIPELINE), [Category::Safe, Category::Medium]);
    }

    #[test]
    fn test_commands_outside_the_safe_set_stay_out() {
        // Safe prefixes never swallow a deny or ask command with arguments.
        assert_eq!(categorize("Bash", "gh auth login").category, Category::Deny);
        assert_eq!(categorize("Bash", "sudo make install").category, Category::Deny);
        assert_eq!(categorize("Bash", "git push origin").category, Category::Ask);
        assert_eq!(categorize("Bash", "rm -rf").reason, "recursive deletion");
    }

    #[test]
    fn test_reasons() {
        assert_eq!(categorize("Bash", "curl").reason, "network access");
        assert_eq!(categorize("Bash", "git status").reason, "git read-only");
        assert_eq!(categorize("Read", "~/.ssh/**").reason, "SSH keys");
        assert_eq!(categorize("Bash", "python3").reason, MANUAL_REVIEW);
    }

    #[test]
    fn test_unknown_tool_is_review() {
        let got = categorize("WebSearch", "anything");
        assert_eq!(got, CategoryResult::new(Category::Review, "unknown tool"));
        assert_eq!(categorize("", "").category, Category::Review);
    }

    #[test]
    fn test_categorize_is_deterministic() {
        for (tool, pattern) in [("Bash", "git push"), ("Read", "~/.aws/**"), ("Edit", "x")] {
            assert_eq!(categorize(tool, pattern), categorize(tool, pattern));
        }
    }

    #[test]
    fn test_domain_categories() {
        let cases = [
            ("docs.python.org", Category::Safe),
            ("developer.mozilla.org", Category::Safe),
            ("tokio.readthedocs.io", Category::Safe),
            ("github.com", Category::Safe),
            ("raw.githubusercontent.com", Category::Safe),
            ("pkg.go.dev", Category::Safe),
            ("www.npmjs.com", Category::Safe),
            ("crates.io", Category::Safe),
            ("docs.rs", Category::Safe),
            ("registry.terraform.io", Category::Safe),
            ("docs.databricks.com", Category::Safe),
            ("api.anthropic.com", Category::Safe),
            ("stackoverflow.com", Category::Medium),
            ("www.stackoverflow.com", Category::Medium),
            ("medium.com", Category::Medium),
            ("dev.to", Category::Medium),
            ("learning.oreilly.com", Category::Medium),
            ("anthropic.com", Category::Review),
            ("example.com", Category::Review),
            ("api.github.com", Category::Review),
        ];

        for (domain, category) in cases {
            let got = categorize_domain(domain);
            assert_eq!(got.category, category, "domain {domain:?} gave {got:?}");
        }
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&CategoryResult::new(Category::Medium, "blog platform"))
            .unwrap();
        assert_eq!(json, r#"{"category":"medium","reason":"blog platform"}"#);
    }
}
