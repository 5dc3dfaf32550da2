//! Archived run directories and how they are named.
//!
//! Every archived report lives in a directory named `run-<timestamp>`
//! where the timestamp is the 14-digit `YYYYMMDDHHMMSS` produced at
//! report time. The fixed width and zero padding make lexicographic
//! order equal chronological order, which is what the ordering here
//! relies on.

use serde::Serialize;

/// Directory-name prefix that marks an archived run.
pub const RUN_PREFIX: &str = "run-";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ArchiveEntry {
    name: String,
}

impl ArchiveEntry {
    /// Accept an href or directory name if it is a `run-*` entry.
    /// Trailing slashes (directory listings emit them) are stripped.
    pub fn from_href(href: &str) -> Option<Self> {
        let name = href.trim_end_matches('/');
        if !name.starts_with(RUN_PREFIX) {
            return None;
        }
        Some(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw timestamp portion after the `run-` prefix.
    pub fn timestamp(&self) -> &str {
        &self.name[RUN_PREFIX.len()..]
    }

    /// Human-readable timestamp for prompts and notices.
    pub fn display_timestamp(&self) -> String {
        format_timestamp(self.timestamp())
    }

    /// Where this run's report lives, relative to the current page.
    pub fn index_url(&self, archives_path: &str) -> String {
        format!(
            "{}/{}/index.html",
            archives_path.trim_end_matches('/'),
            self.name
        )
    }
}

/// Build the archive list from raw href/directory names: keep `run-*`
/// entries, sort ascending lexicographically, then reverse so index 0
/// is the most recent run.
pub fn collect_runs<I, S>(names: I) -> Vec<ArchiveEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut runs: Vec<ArchiveEntry> = names
        .into_iter()
        .filter_map(|n| ArchiveEntry::from_href(n.as_ref()))
        .collect();
    runs.sort_unstable();
    runs.reverse();
    runs
}

/// `YYYYMMDDHHMMSS` -> `YYYY-MM-DD HH:MM:SS`. Anything that is not
/// exactly 14 digits is displayed verbatim.
pub fn format_timestamp(ts: &str) -> String {
    if ts.len() != 14 || !ts.bytes().all(|b| b.is_ascii_digit()) {
        return ts.to_string();
    }
    format!(
        "{}-{}-{} {}:{}:{}",
        &ts[0..4],
        &ts[4..6],
        &ts[6..8],
        &ts[8..10],
        &ts[10..12],
        &ts[12..14]
    )
}
