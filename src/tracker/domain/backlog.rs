//! Parsing of bulk backlog imports.
//!
//! Each line holds a title followed by a story-point estimate, separated by
//! whitespace:
//!
//! ```
//! use sprintdesk::tracker::domain::{BacklogEntry, parse_backlog};
//!
//! let entries = parse_backlog("Fix login bug 3\nbad line");
//! assert_eq!(entries, vec![BacklogEntry::new("Fix login bug", 3)]);
//! ```

use super::MAX_NAME_CHARS;

/// One well-formed backlog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogEntry {
    /// Task title.
    pub title: String,
    /// Story-point estimate.
    pub story_points: u32,
}

impl BacklogEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(title: impl Into<String>, story_points: u32) -> Self {
        Self {
            title: title.into(),
            story_points,
        }
    }
}

/// Parses a single line, returning `None` when it is malformed.
///
/// The estimate is the last whitespace-separated token and must be a
/// non-negative integer. Titles longer than [`MAX_NAME_CHARS`] are rejected.
#[must_use]
pub fn parse_backlog_line(line: &str) -> Option<BacklogEntry> {
    let (raw_title, points) = line.trim().rsplit_once(char::is_whitespace)?;
    let story_points = points.parse::<u32>().ok()?;
    let title = raw_title.trim();
    if title.is_empty() || title.chars().count() > MAX_NAME_CHARS {
        return None;
    }
    Some(BacklogEntry::new(title, story_points))
}

/// Parses every line of `text`, silently skipping malformed lines.
#[must_use]
pub fn parse_backlog(text: &str) -> Vec<BacklogEntry> {
    text.lines().filter_map(parse_backlog_line).collect()
}
