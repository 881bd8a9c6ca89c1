//! Dated snapshots of the handoff document
//!
//! A run copies `<root>/HANDOFF.md` into `<root>/logs/HANDOFF_<stamp>.md` and
//! refreshes the document's `# HANDOFF (...)` header with today's date. Both
//! steps are skipped when the document does not exist.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::config::Config;
use crate::error::SnapshotError;

/// Minute precision stamp embedded in snapshot file names
const STAMP_FORMAT: &str = "%Y-%m-%d_%H%M";

/// Day precision date shown in the header line
const HEADER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of a run that found the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReport {
    /// Archive file that received the copy
    pub snapshot_path: PathBuf,
    /// Whether the document's header line was rewritten
    pub header_rewritten: bool,
}

/// Copies the handoff document into the archive directory and refreshes its header
#[derive(Debug, Clone, Default)]
pub struct Snapshotter {
    config: Config,
}

impl Snapshotter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Snapshot the document under `root` using the current local time.
    ///
    /// Returns `Ok(None)` when the document does not exist.
    pub fn run(&self, root: &Path) -> Result<Option<SnapshotReport>, SnapshotError> {
        self.run_at(root, Local::now().naive_local())
    }

    /// Snapshot the document under `root` as of `now`.
    ///
    /// `now` is the only clock reading used: it names the archive file and
    /// dates the header.
    pub fn run_at(
        &self,
        root: &Path,
        now: NaiveDateTime,
    ) -> Result<Option<SnapshotReport>, SnapshotError> {
        let archive_dir = self.config.archive_path(root);
        fs::create_dir_all(&archive_dir).map_err(|source| SnapshotError::CreateArchiveDir {
            path: archive_dir.clone(),
            source,
        })?;

        let document = self.config.document_path(root);
        let exists = document
            .try_exists()
            .map_err(|source| SnapshotError::ReadDocument {
                path: document.clone(),
                source,
            })?;
        if !exists {
            tracing::info!(
                document = %document.display(),
                "Document not found, nothing to snapshot"
            );
            return Ok(None);
        }

        let content =
            fs::read_to_string(&document).map_err(|source| SnapshotError::ReadDocument {
                path: document.clone(),
                source,
            })?;

        let snapshot_path = archive_dir.join(self.snapshot_file_name(now));
        if snapshot_path.exists() {
            tracing::warn!(
                snapshot = %snapshot_path.display(),
                "Snapshot for this minute already exists, overwriting"
            );
        }
        fs::write(&snapshot_path, &content).map_err(|source| SnapshotError::WriteSnapshot {
            path: snapshot_path.clone(),
            source,
        })?;
        tracing::debug!(
            snapshot = %snapshot_path.display(),
            bytes = content.len(),
            "Wrote snapshot"
        );

        let header = self.header_line(now);
        let header_rewritten = match rewrite_header(&content, &self.config.header_prefix, &header)
        {
            Some(updated) => {
                fs::write(&document, updated).map_err(|source| SnapshotError::WriteDocument {
                    path: document.clone(),
                    source,
                })?;
                tracing::debug!(header = %header, "Refreshed document header");
                true
            }
            None => {
                tracing::debug!(
                    prefix = %self.config.header_prefix,
                    "First line has no header marker, leaving document untouched"
                );
                false
            }
        };

        Ok(Some(SnapshotReport {
            snapshot_path,
            header_rewritten,
        }))
    }

    /// Archive file name for `now`, e.g. `HANDOFF_2026-03-05_0907.md`
    pub fn snapshot_file_name(&self, now: NaiveDateTime) -> String {
        let stamp = now.format(STAMP_FORMAT);
        match self.config.snapshot_extension() {
            Some(ext) => format!("{}_{}.{}", self.config.snapshot_stem(), stamp, ext),
            None => format!("{}_{}", self.config.snapshot_stem(), stamp),
        }
    }

    /// Header line for `now`, e.g. `# HANDOFF (2026-03-05 — Africa/Johannesburg)`
    ///
    /// The zone label is not applied to `now`; it is shown as configured.
    pub fn header_line(&self, now: NaiveDateTime) -> String {
        format!(
            "{} ({} — {})",
            self.config.header_prefix,
            now.format(HEADER_DATE_FORMAT),
            self.config.time_zone_label
        )
    }
}

/// Replace the first line of `content` with `new_header` if it starts with `prefix`.
///
/// Returns `None` when the document is empty or its first line lacks the
/// prefix. Otherwise all lines are re-joined with `\n` and terminated by a
/// single trailing newline; lines after the first are kept verbatim.
pub fn rewrite_header(content: &str, prefix: &str, new_header: &str) -> Option<String> {
    let mut lines = split_lines(content);
    let first = lines.first_mut()?;
    if !first.starts_with(prefix) {
        return None;
    }
    *first = new_header;

    let mut updated = lines.join("\n");
    updated.push('\n');
    Some(updated)
}

/// Split `content` into lines without their terminators.
///
/// Breaks on `\r\n`, `\r`, `\n` and the other Unicode line boundaries
/// (`\x0b`, `\x0c`, `\x1c`-`\x1e`, `\u{85}`, `\u{2028}`, `\u{2029}`). A
/// terminator at the very end does not produce an empty last line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&content[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                start = next_idx + 1;
            }
        }
    }

    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
