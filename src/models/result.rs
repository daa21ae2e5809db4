//! Monitor run result

use crate::models::changelog::ParsedChangelog;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one monitor run.
///
/// Returned once per successful run and written verbatim (camelCase JSON) as
/// the report file consumed by downstream automation. The core never persists
/// this itself; that is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorResult {
    /// The spec's declared version differs from the stored baseline
    /// (plain case-sensitive string inequality, not semver ordering).
    pub version_changed: bool,
    /// The parsed changelog entries differ from the cached ones
    /// (always true on a first run with no cache).
    pub changelog_changed: bool,
    pub current_version: String,
    pub stored_version: String,
    pub changelog_data: ParsedChangelog,
    /// The specification document as fetched, passed through for the caller.
    pub current_spec: Value,
}
