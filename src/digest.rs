//! Content fingerprinting for cheap changelog equality checks.
//!
//! The fingerprint must stay bit-for-bit compatible with caches written by the
//! previous generation of this tool: serialize `changelog_entries` to compact
//! JSON, then fold the string through the classic `h = h * 31 + c` rolling
//! hash over UTF-16 code units, wrapping in a signed 32-bit accumulator, and
//! render the result as a decimal string.
//!
//! Only `changelog_entries` participates. A changed `raw_text` or
//! `latest_version` with identical entries does not count as a change.

use crate::models::ParsedChangelog;

/// Deterministic fingerprint of a parsed changelog's entries.
pub fn fingerprint(changelog: &ParsedChangelog) -> String {
    let canonical =
        serde_json::to_string(&changelog.changelog_entries).unwrap_or_default();
    rolling_hash(&canonical).to_string()
}

/// True iff both changelogs have identical entries (content, order, count).
pub fn equal(a: &ParsedChangelog, b: &ParsedChangelog) -> bool {
    fingerprint(a) == fingerprint(b)
}

/// `h = (h << 5) - h + code`, truncated to 32 signed bits at every step.
fn rolling_hash(s: &str) -> i32 {
    let mut hash: i32 = 0;
    for code in s.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(code as i32);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changelog(entries: &[&str]) -> ParsedChangelog {
        ParsedChangelog {
            latest_version: "1.0.0".to_string(),
            changelog_entries: entries.iter().map(|s| s.to_string()).collect(),
            raw_text: String::new(),
        }
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = changelog(&["added messages endpoint", "fixed webhooks"]);
        let b = changelog(&["added messages endpoint", "fixed webhooks"]);
        assert_eq!(fingerprint(&a), fingerprint(&a));
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert!(equal(&a, &b));
    }

    #[test]
    fn fingerprint_known_answer_empty_entries() {
        // "[]" folds to 91 * 31 + 93 = 2914; pins compatibility with caches
        // written by the JavaScript predecessor.
        assert_eq!(fingerprint(&changelog(&[])), "2914");
    }

    #[test]
    fn differing_content_changes_fingerprint() {
        assert!(!equal(&changelog(&["entry one"]), &changelog(&["entry two"])));
    }

    #[test]
    fn differing_order_changes_fingerprint() {
        assert!(!equal(
            &changelog(&["first", "second"]),
            &changelog(&["second", "first"])
        ));
    }

    #[test]
    fn differing_count_changes_fingerprint() {
        assert!(!equal(
            &changelog(&["first", "second"]),
            &changelog(&["first"])
        ));
    }

    #[test]
    fn version_and_raw_text_are_ignored() {
        let mut a = changelog(&["same entry"]);
        let mut b = changelog(&["same entry"]);
        a.latest_version = "1.0.0".to_string();
        b.latest_version = "9.9.9".to_string();
        a.raw_text = "<html>old</html>".to_string();
        b.raw_text = "<html>new</html>".to_string();
        assert!(equal(&a, &b));
    }
}
