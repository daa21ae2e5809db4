//! Changelog document parsing
//!
//! The vendor changelog is a human-readable page, not a machine format, so
//! everything here is heuristic: a dotted-version scan for the latest version
//! and a structural split on date headings for the recent entries. The parser
//! never fails a run; a document it cannot make sense of yields the `unknown`
//! sentinel and an empty entry list.

use crate::config::VersionPick;
use crate::models::{ParsedChangelog, UNKNOWN_VERSION};
use crate::{Context, Result};
use regex::Regex;

/// Segments shorter than this after trimming are discarded as noise
/// (navigation fragments, stray headings).
const MIN_ENTRY_LEN: usize = 50;

/// Only the most recent entries are kept.
const MAX_ENTRIES: usize = 3;

pub struct ChangelogParser {
    version_re: Regex,
    boundary_re: Regex,
    version_pick: VersionPick,
}

impl ChangelogParser {
    pub fn new(version_pick: VersionPick) -> Result<Self> {
        let version_re = Regex::new(r"\d+\.\d+\.\d+")
            .context("Failed to compile version regex")?;
        // Entries are delimited by the date headings the vendor puts above
        // each one ("January 22, 2025"). Matching the date shape rather than
        // a fixed list of literal dates means new entries are discovered
        // without a source edit.
        let boundary_re = Regex::new(
            r"(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}",
        )
        .context("Failed to compile date boundary regex")?;

        Ok(Self {
            version_re,
            boundary_re,
            version_pick,
        })
    }

    /// Extract the latest version and recent entries from the raw document.
    pub fn parse(&self, text: &str) -> ParsedChangelog {
        ParsedChangelog {
            latest_version: self.extract_version(text),
            changelog_entries: self.extract_entries(text),
            raw_text: text.to_string(),
        }
    }

    fn extract_version(&self, text: &str) -> String {
        let mut matches = self.version_re.find_iter(text).map(|m| m.as_str());

        let picked = match self.version_pick {
            VersionPick::First => matches.next(),
            VersionPick::Max => matches.max_by_key(|v| version_key(v)),
        };

        picked.map(str::to_string).unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }

    /// Split the document at each date heading and keep the substantial
    /// segments, newest first. The segment runs from one heading to the next
    /// (or end of document) and includes the heading itself.
    fn extract_entries(&self, text: &str) -> Vec<String> {
        let starts: Vec<usize> = self.boundary_re.find_iter(text).map(|m| m.start()).collect();

        let mut entries = Vec::new();
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let segment = text[start..end].trim();
            if segment.chars().count() >= MIN_ENTRY_LEN {
                entries.push(segment.to_string());
            }
            if entries.len() == MAX_ENTRIES {
                break;
            }
        }

        entries
    }
}

/// Numeric sort key for a `major.minor.patch` token.
fn version_key(version: &str) -> (u64, u64, u64) {
    let mut parts = version.split('.').map(|p| p.parse::<u64>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(pick: VersionPick) -> ChangelogParser {
        ChangelogParser::new(pick).unwrap()
    }

    #[test]
    fn first_version_in_document_order_wins() {
        let text = "Release 2.1.0 notes. Previously 3.0.0-beta shipped as 1.9.5.";
        let parsed = parser(VersionPick::First).parse(text);
        assert_eq!(parsed.latest_version, "2.1.0");
    }

    #[test]
    fn max_pick_ignores_document_position() {
        let text = "Old 1.9.5 then 3.0.0 then 2.1.0.";
        let parsed = parser(VersionPick::Max).parse(text);
        assert_eq!(parsed.latest_version, "3.0.0");

        // Shuffled positions, same answer.
        let text = "3.0.0 came after 2.1.0 and 1.9.5.";
        let parsed = parser(VersionPick::Max).parse(text);
        assert_eq!(parsed.latest_version, "3.0.0");
    }

    #[test]
    fn max_pick_compares_numerically_not_lexically() {
        let text = "versions 1.2.3 and 1.2.30 and 1.10.0";
        let parsed = parser(VersionPick::Max).parse(text);
        assert_eq!(parsed.latest_version, "1.10.0");
    }

    #[test]
    fn missing_version_yields_sentinel() {
        let parsed = parser(VersionPick::First).parse("no versions mentioned here");
        assert_eq!(parsed.latest_version, UNKNOWN_VERSION);
        assert!(parsed.changelog_entries.is_empty());
    }

    #[test]
    fn entries_split_on_date_headings_newest_first() {
        let text = "\
January 22, 2025\nAdded scheduled message delivery and template support to the messaging API.\n\
December 6, 2024\nWebhook signatures are now included on every delivery attempt for verification.\n";
        let parsed = parser(VersionPick::First).parse(text);
        assert_eq!(parsed.changelog_entries.len(), 2);
        assert!(parsed.changelog_entries[0].starts_with("January 22, 2025"));
        assert!(parsed.changelog_entries[1].starts_with("December 6, 2024"));
    }

    #[test]
    fn short_segments_are_discarded() {
        // 49 characters total: dropped. The date heading itself is counted.
        let short = "January 22, 2025\nTiny note about nothing much.abc";
        assert_eq!(short.chars().count(), 49);
        let parsed = parser(VersionPick::First).parse(short);
        assert!(parsed.changelog_entries.is_empty());

        // One more character makes exactly 50: retained.
        let exact = format!("{}d", short);
        assert_eq!(exact.chars().count(), 50);
        let parsed = parser(VersionPick::First).parse(&exact);
        assert_eq!(parsed.changelog_entries.len(), 1);
    }

    #[test]
    fn at_most_three_entries_survive() {
        let mut text = String::new();
        for day in 1..=5 {
            text.push_str(&format!(
                "March {day}, 2025\nEntry body long enough to clear the substantiality threshold easily.\n"
            ));
        }
        let parsed = parser(VersionPick::First).parse(&text);
        assert_eq!(parsed.changelog_entries.len(), 3);
        assert!(parsed.changelog_entries[0].starts_with("March 1, 2025"));
        assert!(parsed.changelog_entries[2].starts_with("March 3, 2025"));
    }

    #[test]
    fn raw_text_is_preserved_verbatim() {
        let text = "December 6, 2024 something happened that was reasonably substantial here.";
        let parsed = parser(VersionPick::First).parse(text);
        assert_eq!(parsed.raw_text, text);
    }
}
