//! Reduce raw tool invocations to canonical pattern strings.
//!
//! Three normalizers, one per invocation kind:
//!
//! - [`extract_command_prefix`]: a shell command line to its leading command
//!   (`git add . && git commit` becomes `git add`).
//! - [`normalize_path`]: a file path to a directory wildcard
//!   (`/Users/alice/.ssh/id_rsa` becomes `~/.ssh/**`).
//! - [`extract_domain`]: a URL to its hostname.
//!
//! All three are pure. The home directory used by [`normalize_path`] is an
//! explicit argument; [`PatternExtractor`] carries it for callers that
//! normalize many observations.

use std::path::Path;

use claude_settings::Tool;
use url::{Host, Url};

/// Shell operators that end the command whose prefix is extracted.
const SEPARATORS: [&str; 5] = ["|", ">>", ">", "&&", ";"];

/// Commands whose second word is a subcommand worth keeping.
const SUBCOMMAND_TOOLS: &[&str] = &[
    "git", "go", "gh", "docker", "task", "brew", "make", "cargo", "npm",
];

/// Errors from [`extract_domain`].
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("empty URL")]
    Empty,

    #[error("invalid URL {url:?}: {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no host in URL: {0}")]
    NoHost(String),
}

/// Extracts the command prefix of a shell command line.
///
/// Only the text before the first pipe, redirect, `&&` or `;` is considered.
/// The prefix is the first word, or the first two words for commands with
/// subcommands (`git status`) and for recursive `rm` flags (`rm -rf`).
pub fn extract_command_prefix(command: &str) -> String {
    let end = SEPARATORS
        .iter()
        .filter_map(|sep| command.find(sep))
        .min()
        .unwrap_or(command.len());

    let mut fields = command[..end].split_whitespace();
    let Some(first) = fields.next() else {
        return String::new();
    };

    match fields.next() {
        Some(flag) if first == "rm" && flag.starts_with('-') && flag.contains('r') => {
            format!("rm {flag}")
        }
        Some(sub) if SUBCOMMAND_TOOLS.contains(&first) => format!("{first} {sub}"),
        _ => first.to_string(),
    }
}

/// Normalizes a file path to a permission-style pattern.
///
/// - the home directory (or any `/Users/<name>`) becomes `~`
/// - files directly in `/` or the working directory keep their bare name
/// - files directly in `~` are kept as-is
/// - everything else becomes `<first directories>/**`, keeping three
///   segments under `~` (`~/.config/git/**`) and two otherwise (`src/**`)
pub fn normalize_path(path: &str, home: Option<&str>) -> String {
    if path.is_empty() {
        return String::new();
    }

    let path = collapse_home(path, home);
    let dir = parent_dir(&path);

    if dir == "." || dir == "/" {
        return Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(path);
    }

    if dir == "~" {
        return path;
    }

    let depth = if dir.starts_with('~') { 3 } else { 2 };
    let segments: Vec<&str> = dir.split('/').collect();
    if segments.len() > depth {
        format!("{}/**", segments[..depth].join("/"))
    } else {
        format!("{dir}/**")
    }
}

/// Extracts the hostname of a URL.
pub fn extract_domain(raw: &str) -> Result<String, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::Empty);
    }

    let url = Url::parse(raw).map_err(|source| DomainError::Invalid {
        url: raw.to_string(),
        source,
    })?;

    match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => Ok(domain.to_string()),
        Some(Host::Ipv4(addr)) => Ok(addr.to_string()),
        Some(Host::Ipv6(addr)) => Ok(addr.to_string()),
        _ => Err(DomainError::NoHost(raw.to_string())),
    }
}

fn collapse_home(path: &str, home: Option<&str>) -> String {
    if let Some(home) = home.map(|h| h.trim_end_matches('/')).filter(|h| !h.is_empty())
        && let Some(rest) = path.strip_prefix(home)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        return format!("~{rest}");
    }

    if let Some(rest) = path.strip_prefix("/Users/")
        && let Some((_user, tail)) = rest.split_once('/')
    {
        return format!("~/{tail}");
    }

    path.to_string()
}

/// Lexical parent directory: everything before the last `/`, cleaned.
/// `.` for a bare name, `/` for a root-level file.
fn parent_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(index) => clean(&path[..=index]),
        None => ".".to_string(),
    }
}

/// Lexical cleanup of a slash-separated path: empty and `.` segments are
/// dropped, and `..` removes the segment before it. A `..` that climbs above
/// the root is dropped; above a relative start it is kept.
fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Normalizes observations for the tool report.
#[derive(Debug, Clone, Default)]
pub struct PatternExtractor {
    home: Option<String>,
}

impl PatternExtractor {
    /// Creates an extractor that collapses `home` to `~`.
    pub fn new(home: Option<String>) -> Self {
        Self { home }
    }

    /// Creates an extractor using the current user's home directory.
    pub fn from_env() -> Self {
        Self::new(dirs::home_dir().map(|h| h.to_string_lossy().into_owned()))
    }

    /// Returns the pattern for a tool's raw payload. Empty when the payload
    /// reduces to nothing.
    pub fn pattern_for(&self, tool: Tool, raw: &str) -> String {
        if tool.is_file_tool() {
            normalize_path(raw, self.home.as_deref())
        } else {
            extract_command_prefix(raw)
        }
    }
}
