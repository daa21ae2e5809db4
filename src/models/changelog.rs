//! Parsed changelog model

use serde::{Deserialize, Serialize};

/// Sentinel used wherever a version string is genuinely unknown
/// (no match in the changelog, missing `info.version`, unreadable spec file).
pub const UNKNOWN_VERSION: &str = "unknown";

/// Structured view of the vendor changelog, extracted from the raw document.
///
/// Serialized with camelCase field names so the on-disk cache stays
/// interoperable with previously written cache files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedChangelog {
    /// First (or numerically greatest, depending on configuration) dotted
    /// three-part version found in the document, or [`UNKNOWN_VERSION`].
    pub latest_version: String,
    /// Most-recent-first entries, at most three, each at least 50 characters.
    pub changelog_entries: Vec<String>,
    /// The full document text as fetched, kept for downstream inspection.
    /// Not part of change detection.
    pub raw_text: String,
}
