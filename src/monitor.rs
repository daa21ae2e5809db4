//! MonitorOrchestrator - one full change-detection pass
//!
//! Sequence: load stored state, fetch the changelog and the specification,
//! parse, compare against the baseline, refresh the cache, report. The two
//! fetches have no data dependency but are issued sequentially; a failure in
//! either aborts the run with no partial result. Local-state reads never
//! abort: absence and corruption both degrade to sentinels (corruption with a
//! warning). The cache write happens on every successful run, changed or not,
//! and a write failure is logged rather than thrown because it only affects
//! the next run's baseline.

use crate::config::MonitorConfig;
use crate::digest;
use crate::fetcher::DocumentFetcher;
use crate::models::{MonitorResult, ParsedChangelog, UNKNOWN_VERSION};
use crate::parser::ChangelogParser;
use crate::state::{spec_version, LoadOutcome, StateStore, StoredState};
use crate::{Context, Result};
use colored::Colorize;

pub struct Monitor<F: DocumentFetcher> {
    config: MonitorConfig,
    fetcher: F,
    store: StateStore,
    parser: ChangelogParser,
}

impl<F: DocumentFetcher> Monitor<F> {
    pub fn new(config: MonitorConfig, fetcher: F) -> Result<Self> {
        let store = StateStore::new(&config);
        let parser = ChangelogParser::new(config.version_pick)?;
        Ok(Self {
            config,
            fetcher,
            store,
            parser,
        })
    }

    /// Run one monitoring pass and return the change report.
    pub async fn run(&self) -> Result<MonitorResult> {
        println!("{}", "🔍 Starting API changelog monitoring...".cyan());

        let StoredState {
            stored_version,
            cached_changelog,
        } = self.load_stored_state();
        println!("📋 Stored API version: {}", stored_version.yellow());

        println!("📥 Fetching current changelog...");
        let changelog_text = self
            .fetcher
            .fetch_text(&self.config.changelog_url)
            .await
            .context("Failed to fetch changelog document")?;

        println!("📥 Fetching current API spec...");
        let current_spec = self
            .fetcher
            .fetch_json(&self.config.spec_url)
            .await
            .context("Failed to fetch specification document")?;
        let current_version = spec_version(&current_spec);
        println!("📋 Current API version: {}", current_version.yellow());

        let parsed = self.parser.parse(&changelog_text);
        println!(
            "📋 Latest changelog version: {} ({} recent entries)",
            parsed.latest_version.yellow(),
            parsed.changelog_entries.len()
        );

        let version_changed = current_version != stored_version;
        let changelog_changed = match &cached_changelog {
            Some(cached) => !digest::equal(&parsed, cached),
            None => true,
        };
        println!("🔄 Version changed: {}", version_changed);
        println!("🔄 Changelog changed: {}", changelog_changed);

        self.refresh_cache(&parsed);

        Ok(MonitorResult {
            version_changed,
            changelog_changed,
            current_version,
            stored_version,
            changelog_data: parsed,
            current_spec,
        })
    }

    /// Collapse the two state slots into the sentinel forms comparison uses.
    /// Absent state is a normal first run; corrupt state gets a warning.
    fn load_stored_state(&self) -> StoredState {
        let stored_version = match self.store.load_spec() {
            LoadOutcome::Present(spec) => spec_version(&spec),
            LoadOutcome::Absent => UNKNOWN_VERSION.to_string(),
            LoadOutcome::Corrupt(details) => {
                eprintln!("{}", format!("⚠ Stored spec unreadable: {}", details).yellow());
                UNKNOWN_VERSION.to_string()
            }
        };

        let cached_changelog = match self.store.load_changelog_cache() {
            LoadOutcome::Present(cached) => Some(cached),
            LoadOutcome::Absent => None,
            LoadOutcome::Corrupt(details) => {
                eprintln!(
                    "{}",
                    format!("⚠ Changelog cache unreadable, treating as first run: {}", details)
                        .yellow()
                );
                None
            }
        };

        StoredState {
            stored_version,
            cached_changelog,
        }
    }

    /// Unconditional overwrite, even when nothing changed. Losing this write
    /// only delays detection on the next run, so it never fails the current
    /// one.
    fn refresh_cache(&self, parsed: &ParsedChangelog) {
        if let Err(e) = self.store.save_changelog_cache(parsed) {
            eprintln!("{}", format!("⚠ Failed to save changelog cache: {:#}", e).yellow());
        }
    }
}
