//! Session log scanning.
//!
//! Claude Code writes one JSONL file per session under
//! `~/.claude/projects/<project>/`. Each line is a JSON object; assistant
//! turns carry `message.content`, an array of blocks, some of which are
//! `tool_use` blocks naming a tool and its input. The scanner walks the
//! projects directory, keeps files modified within the lookback window, and
//! emits one [`Observation`] per audited tool invocation.
//!
//! Unreadable files and undecodable lines are logged and skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use claude_settings::{FetchTool, Tool};
use serde::Deserialize;
use tracing::{Level, debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::report::count_unique_sources;

const LOG_EXTENSION: &str = "jsonl";

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("session log root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to access session log root {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Return a help message suggesting how to fix this error, if applicable.
    pub fn help(&self) -> Option<String> {
        match self {
            ScanError::NotADirectory(_) => {
                Some("pass --projects-dir with the directory holding session logs".into())
            }
            ScanError::Root { .. } => None,
        }
    }
}

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Tool name as written in the log.
    pub tool: String,
    /// The command line, file path or URL passed to the tool.
    pub raw_payload: String,
    /// The log file the invocation was found in.
    pub source: PathBuf,
}

impl Observation {
    pub fn new(tool: impl Into<String>, raw_payload: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            raw_payload: raw_payload.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub observations: Vec<Observation>,
    /// Log files inside the window that were read.
    pub files_read: usize,
}

impl ScanOutcome {
    /// Distinct log files that produced at least one observation.
    pub fn source_count(&self) -> usize {
        count_unique_sources(self.observations.iter().map(|o| o.source.as_path()))
    }
}

#[derive(Debug, Deserialize)]
struct LogLine {
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Content {
    Blocks(Vec<ContentBlock>),
    #[allow(dead_code)]
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    input: serde_json::Value,
}

/// The `input` field holding the audited payload for a tool, if audited.
fn payload_field(tool: &str) -> Option<&'static str> {
    if let Some(tool) = Tool::from_name(tool) {
        return Some(if tool.is_file_tool() { "file_path" } else { "command" });
    }
    FetchTool::from_name(tool).map(|_| "url")
}

/// Scans `projects_dir` for session logs modified within `lookback_days` of
/// `now`. A missing directory yields an empty outcome.
#[instrument(level = Level::TRACE)]
pub fn scan_sessions(
    projects_dir: &Path,
    lookback_days: u32,
    now: DateTime<Utc>,
) -> Result<ScanOutcome, ScanError> {
    let metadata = match std::fs::metadata(projects_dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %projects_dir.display(), "No session logs directory");
            return Ok(ScanOutcome::default());
        }
        Err(source) => {
            return Err(ScanError::Root {
                path: projects_dir.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(projects_dir.to_path_buf()));
    }

    let cutoff = lookback_cutoff(now, lookback_days);
    let mut outcome = ScanOutcome::default();

    for entry in WalkDir::new(projects_dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(LOG_EXTENSION)
        {
            continue;
        }

        let modified = match entry.metadata().map(|m| m.modified()) {
            Ok(Ok(modified)) => DateTime::<Utc>::from(modified),
            Ok(Err(e)) => {
                warn!(path = %path.display(), error = %e, "No modification time");
                continue;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to stat log file");
                continue;
            }
        };
        if modified < cutoff {
            continue;
        }

        match scan_file(path) {
            Ok(observations) => {
                debug!(path = %path.display(), count = observations.len(), "Scanned log file");
                outcome.files_read += 1;
                outcome.observations.extend(observations);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to open log file"),
        }
    }

    info!(
        files = outcome.files_read,
        observations = outcome.observations.len(),
        "Scanned session logs"
    );
    Ok(outcome)
}

/// Oldest modification time inside the window. A window reaching past the
/// representable range has no cutoff.
fn lookback_cutoff(now: DateTime<Utc>, lookback_days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(lookback_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Extracts observations from one log file.
///
/// Lines are split on raw bytes, so a line that is not valid UTF-8 is skipped
/// like any other undecodable line. An I/O error part way through keeps what
/// was read so far.
fn scan_file(path: &Path) -> std::io::Result<Vec<Observation>> {
    let reader = BufReader::new(File::open(path)?);
    let mut observations = Vec::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(path = %path.display(), line = index + 1, error = %e, "Stopped reading log file");
                break;
            }
        };
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<LogLine>(&line) {
            Ok(parsed) => observations.extend(observations_from_line(parsed, path)),
            Err(e) => debug!(path = %path.display(), line = index + 1, error = %e, "Skipping undecodable line"),
        }
    }

    Ok(observations)
}

fn observations_from_line<'a>(line: LogLine, source: &'a Path) -> impl Iterator<Item = Observation> + 'a {
    let blocks = match line.message.and_then(|m| m.content) {
        Some(Content::Blocks(blocks)) => blocks,
        _ => Vec::new(),
    };

    blocks.into_iter().filter_map(move |block| {
        if block.kind != "tool_use" {
            return None;
        }
        let field = payload_field(&block.name)?;
        let payload = block.input.get(field)?.as_str()?;
        if payload.is_empty() {
            return None;
        }
        Some(Observation::new(block.name.as_str(), payload, source))
    })
}
