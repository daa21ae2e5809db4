//! StateStore - persisted baseline for change detection
//!
//! Two independent files: the stored API specification (read-only here,
//! maintained by the packaging workflow, supplies the last-known version) and
//! the changelog cache (read-write, overwritten every successful run).
//!
//! Reads never fail the run. Absence is a legitimate first-run state, and
//! corruption is worth a warning but not an abort; both are reported as a
//! tagged [`LoadOutcome`] so the caller can tell them apart.

use crate::config::MonitorConfig;
use crate::models::{ParsedChangelog, UNKNOWN_VERSION};
use crate::{Context, Result};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Result of loading a piece of local state.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// The file does not exist. Normal on a first run.
    Absent,
    /// The file exists but could not be read or parsed.
    Corrupt(String),
    Present(T),
}

/// Last-known version plus cached changelog, collapsed to the sentinel forms
/// the comparison step works with.
#[derive(Debug)]
pub struct StoredState {
    pub stored_version: String,
    pub cached_changelog: Option<ParsedChangelog>,
}

pub struct StateStore {
    spec_path: PathBuf,
    cache_path: PathBuf,
}

impl StateStore {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            spec_path: config.stored_spec_path.clone(),
            cache_path: config.changelog_cache_path.clone(),
        }
    }

    /// Load the stored specification document.
    pub fn load_spec(&self) -> LoadOutcome<Value> {
        load_json(&self.spec_path)
    }

    /// Load the changelog cache written by a previous run.
    pub fn load_changelog_cache(&self) -> LoadOutcome<ParsedChangelog> {
        match load_json(&self.cache_path) {
            LoadOutcome::Present(value) => match serde_json::from_value(value) {
                Ok(parsed) => LoadOutcome::Present(parsed),
                Err(e) => LoadOutcome::Corrupt(format!(
                    "{}: unexpected cache shape: {}",
                    self.cache_path.display(),
                    e
                )),
            },
            LoadOutcome::Absent => LoadOutcome::Absent,
            LoadOutcome::Corrupt(details) => LoadOutcome::Corrupt(details),
        }
    }

    /// Overwrite the changelog cache with this run's parsed changelog.
    ///
    /// Written to a temp file and renamed into place so a concurrent reader
    /// or a crashed writer never sees a torn cache.
    pub fn save_changelog_cache(&self, parsed: &ParsedChangelog) -> Result<()> {
        let content = serde_json::to_string_pretty(parsed)
            .context("Failed to serialize changelog cache")?;

        let tmp_path = self.cache_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content).with_context(|| {
            format!("Failed to write changelog cache to {}", tmp_path.display())
        })?;
        std::fs::rename(&tmp_path, &self.cache_path).with_context(|| {
            format!("Failed to move changelog cache into {}", self.cache_path.display())
        })?;

        Ok(())
    }
}

/// Pull `info.version` out of a specification document, or the sentinel.
pub fn spec_version(spec: &Value) -> String {
    spec.get("info")
        .and_then(|info| info.get("version"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_VERSION)
        .to_string()
}

fn load_json(path: &PathBuf) -> LoadOutcome<Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return LoadOutcome::Absent,
        Err(e) => return LoadOutcome::Corrupt(format!("{}: {}", path.display(), e)),
    };

    match serde_json::from_str(&content) {
        Ok(value) => LoadOutcome::Present(value),
        Err(e) => LoadOutcome::Corrupt(format!("{}: {}", path.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> StateStore {
        StateStore::new(&MonitorConfig::with_root(dir.path()))
    }

    fn sample_changelog() -> ParsedChangelog {
        ParsedChangelog {
            latest_version: "2.0.0".to_string(),
            changelog_entries: vec!["March 1, 2025 something shipped".to_string()],
            raw_text: "raw".to_string(),
        }
    }

    #[test]
    fn missing_files_are_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.load_spec(), LoadOutcome::Absent));
        assert!(matches!(store.load_changelog_cache(), LoadOutcome::Absent));
    }

    #[test]
    fn malformed_spec_is_corrupt_not_fatal() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("openapi.json"), "{not json").unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.load_spec(), LoadOutcome::Corrupt(_)));
    }

    #[test]
    fn cache_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let parsed = sample_changelog();

        store.save_changelog_cache(&parsed).unwrap();
        match store.load_changelog_cache() {
            LoadOutcome::Present(loaded) => assert_eq!(loaded, parsed),
            other => panic!("expected Present, got {:?}", other),
        }
    }

    #[test]
    fn cache_uses_camel_case_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save_changelog_cache(&sample_changelog()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(".changelog-cache.json")).unwrap();
        assert!(raw.contains("\"latestVersion\""));
        assert!(raw.contains("\"changelogEntries\""));
        assert!(raw.contains("\"rawText\""));
    }

    #[test]
    fn spec_version_reads_info_version() {
        let spec = serde_json::json!({"info": {"version": "1.2.3"}});
        assert_eq!(spec_version(&spec), "1.2.3");

        let no_info = serde_json::json!({"paths": {}});
        assert_eq!(spec_version(&no_info), UNKNOWN_VERSION);
    }
}
