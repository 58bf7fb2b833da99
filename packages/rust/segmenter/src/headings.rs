//! Heading line detection and title normalization.

use std::sync::LazyLock;

use regex::Regex;

/// A whole line starting with `#`: markers, optional ordinal, optional emphasis.
///
/// Horizontal whitespace only, so a bare `#` line never swallows the next line.
/// Lines end at `\n`; a `\r` before it is left out of the captured heading,
/// while a lone `\r` does not start a new line.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#+[ \t]*\d*\.?[ \t]*\*?.*?\*?)\r?$").expect("valid regex")
});

/// Leading `"3. "` style ordinal.
static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("valid regex"));

/// A heading line found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeadingMatch {
    /// Byte offset of the first `#`.
    pub start: usize,
    /// Byte offset just past the line content (before the line break).
    pub end: usize,
    /// Cleaned title used as the section key.
    pub title: String,
}

/// All heading lines of `text`, in document order.
pub(crate) fn find_headings(text: &str) -> Vec<HeadingMatch> {
    HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| HeadingMatch {
            start: m.start(),
            end: m.end(),
            title: clean_title(m.as_str()),
        })
        .collect()
}

/// Turn a raw heading line into a section key.
///
/// Removes every `#` and `*`, trims, then drops a leading `"N. "` ordinal.
pub fn clean_title(line: &str) -> String {
    let raw = line.trim().replace(['#', '*'], "");
    ORDINAL_RE.replace(raw.trim(), "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(text: &str) -> Vec<String> {
        find_headings(text).into_iter().map(|h| h.title).collect()
    }

    #[test]
    fn clean_title_strips_markup_and_ordinal() {
        assert_eq!(clean_title("## 2. **Dividendi storici**"), "Dividendi storici");
        assert_eq!(clean_title("# Beta"), "Beta");
        assert_eq!(clean_title("###"), "");
    }

    #[test]
    fn clean_title_requires_space_after_ordinal() {
        assert_eq!(clean_title("# 1.Alpha"), "1.Alpha");
        assert_eq!(clean_title("# 2024 outlook"), "2024 outlook");
    }

    #[test]
    fn clean_title_removes_inner_markers() {
        assert_eq!(clean_title("# Rischi *chiave* #2"), "Rischi chiave 2");
    }

    #[test]
    fn finds_headings_in_order() {
        let text = "Intro\n# 1. Alpha\nBody\n## Beta\n### **3. Gamma**\nend";
        assert_eq!(titles(text), vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn indented_hash_is_not_a_heading() {
        assert!(find_headings("  # not a heading\ntext").is_empty());
    }

    #[test]
    fn bare_marker_line_is_an_empty_heading() {
        let found = find_headings("text\n#\nmore");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "");
        assert_eq!(&"text\n#\nmore"[found[0].start..found[0].end], "#");
    }

    #[test]
    fn match_offsets_exclude_line_break() {
        let text = "# Title\r\nBody";
        let found = find_headings(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "# Title");
        assert_eq!(found[0].title, "Title");
    }

    #[test]
    fn lone_carriage_return_does_not_start_a_line() {
        assert!(find_headings("Body\r# X").is_empty());

        let text = "Body\r\n# X\r\nMore";
        let found = find_headings(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "# X");
    }
}
