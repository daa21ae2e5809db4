//! `specwatch check` - run one monitor pass and present the outcome

use crate::config::{MonitorConfig, VersionPick};
use crate::fetcher::HttpFetcher;
use crate::models::MonitorResult;
use crate::monitor::Monitor;
use crate::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default report file consumed by CI automation.
const RESULTS_FILE: &str = "monitor-results.json";

/// Characters of each changelog entry shown in the summary.
const PREVIEW_LEN: usize = 200;

pub struct CheckArgs {
    /// Installation root holding `openapi.json` and the changelog cache.
    pub root: PathBuf,
    /// Where to write the JSON report; `None` means `monitor-results.json`
    /// in the current directory.
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub version_pick: VersionPick,
    /// Print the raw result JSON instead of the human summary.
    pub json: bool,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let mut config = MonitorConfig::with_root(&args.root);
    config.version_pick = args.version_pick;
    if let Some(secs) = args.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }

    let fetcher = HttpFetcher::new(&config.user_agent, config.request_timeout)
        .context("Failed to build HTTP client")?;
    let monitor = Monitor::new(config, fetcher)?;

    let result = monitor.run().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    let report_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(RESULTS_FILE));
    write_report(&result, &report_path)?;
    println!();
    println!("💾 Results saved to: {}", report_path.display());

    Ok(())
}

fn print_summary(result: &MonitorResult) {
    println!();
    println!("{}", "📊 Monitoring Results".bold());
    println!("{}", "-".repeat(30));
    println!("Checked at:        {}", Utc::now().to_rfc3339());
    println!("Current version:   {}", result.current_version);
    println!("Stored version:    {}", result.stored_version);
    println!("Version changed:   {}", result.version_changed);
    println!("Changelog changed: {}", result.changelog_changed);

    if result.version_changed {
        println!();
        println!("{}", "🔄 API VERSION UPDATE DETECTED".cyan().bold());
        println!(
            "Version changed from {} to {}",
            result.stored_version.yellow(),
            result.current_version.green()
        );
        print_entries(result);
        println!();
        println!("{}", "Recommended actions:".bold());
        println!("  1. Review the changelog for breaking changes");
        println!("  2. Update the stored API specification");
        println!("  3. Regenerate and test the SDK client");
    } else if result.changelog_changed {
        println!();
        println!("{}", "📝 CHANGELOG UPDATE DETECTED".cyan().bold());
        println!("The changelog has new content without a version bump.");
        print_entries(result);
        println!();
        println!("{}", "Recommended actions:".bold());
        println!("  1. Review the updated changelog");
        println!("  2. Check whether any change affects the SDK");
    } else {
        println!();
        println!("{}", "✅ No updates detected".green());
    }
}

fn print_entries(result: &MonitorResult) {
    if result.changelog_data.changelog_entries.is_empty() {
        return;
    }
    println!();
    println!("Recent changelog entries:");
    for (i, entry) in result.changelog_data.changelog_entries.iter().enumerate() {
        println!("  {}. {}", i + 1, preview(entry));
    }
}

/// First [`PREVIEW_LEN`] characters of an entry, Unicode-safe.
fn preview(entry: &str) -> String {
    if entry.chars().count() <= PREVIEW_LEN {
        return entry.to_string();
    }
    let end = entry
        .char_indices()
        .nth(PREVIEW_LEN)
        .map(|(i, _)| i)
        .unwrap_or(entry.len());
    format!("{}...", &entry[..end])
}

/// The report is the `MonitorResult` verbatim, pretty-printed for humans who
/// open it from CI artifacts.
fn write_report(result: &MonitorResult, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(result)
        .context("Failed to serialize monitor results")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_passes_short_entries_through() {
        assert_eq!(preview("short entry"), "short entry");
    }

    #[test]
    fn preview_truncates_long_entries() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_LEN + 3);
        assert!(p.ends_with("..."));
    }
}
