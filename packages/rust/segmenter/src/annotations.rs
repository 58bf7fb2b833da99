//! Removal of inline citation annotations such as `[source: 12, 14]`.

use std::sync::LazyLock;

use regex::Regex;

/// A `[source: N...]` tag plus any whitespace run directly before it.
///
/// The tag ends at the first `]` on the same line.
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[source:\s*\d+.*?\]").expect("valid regex"));

/// Strip every annotation tag from `text`.
///
/// Removal repeats until no tag remains, so a tag that only forms once an
/// inner one is removed (`[sou[source: 1]rce: 2]`) is stripped too and the
/// function is idempotent.
pub fn strip_annotations(text: &str) -> String {
    let mut current = text.to_string();
    while ANNOTATION_RE.is_match(&current) {
        current = ANNOTATION_RE.replace_all(&current, "").into_owned();
    }
    current
}
