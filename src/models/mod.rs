pub mod changelog;
pub mod result;

pub use changelog::{ParsedChangelog, UNKNOWN_VERSION};
pub use result::MonitorResult;
