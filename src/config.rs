//! Monitor configuration

use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default remote endpoints for the OpenPhone public API.
pub const DEFAULT_CHANGELOG_URL: &str =
    "https://www.openphone.com/docs/mdx/api-reference/changelog";
pub const DEFAULT_SPEC_URL: &str =
    "https://openphone-public-api-prod.s3.us-west-2.amazonaws.com/public/openphone-public-api-v1-prod.json";

/// Local state files, relative to the installation root. The stored spec is
/// maintained by the packaging workflow; only the cache is written here.
pub const STORED_SPEC_FILE: &str = "openapi.json";
pub const CHANGELOG_CACHE_FILE: &str = ".changelog-cache.json";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How to choose `latest_version` among all version tokens in the changelog.
///
/// The vendor document has historically listed the newest entry first, so
/// `First` matches prior behavior; `Max` drops that positional assumption and
/// takes the numerically greatest triple instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VersionPick {
    /// First match in document order (assumes newest-first layout).
    #[default]
    First,
    /// Numerically greatest `major.minor.patch` triple anywhere in the text.
    Max,
}

/// Everything one monitor run needs to know: where the remote documents live,
/// how to identify ourselves, and where local state is kept.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub changelog_url: String,
    pub spec_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub version_pick: VersionPick,
    pub stored_spec_path: PathBuf,
    pub changelog_cache_path: PathBuf,
}

impl MonitorConfig {
    /// Config with default endpoints and state files under `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            changelog_url: DEFAULT_CHANGELOG_URL.to_string(),
            spec_url: DEFAULT_SPEC_URL.to_string(),
            user_agent: format!("specwatch/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            version_pick: VersionPick::default(),
            stored_spec_path: root.join(STORED_SPEC_FILE),
            changelog_cache_path: root.join(CHANGELOG_CACHE_FILE),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::with_root(".")
    }
}
