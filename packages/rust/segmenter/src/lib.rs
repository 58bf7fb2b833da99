//! Splits a loosely structured analysis document into titled sections.
//!
//! The document is Markdown-like text with ATX headings (`# 1. **Title**`)
//! and inline citation tags (`[source: 4, 5]`). Segmentation:
//! 1. strips citation tags across the whole document
//! 2. finds heading lines
//! 3. assigns the text between headings to the preceding heading's title,
//!    and text before the first heading to an introduction section
//!
//! Segmentation is total: any input, including an empty one, yields a map
//! with at least the introduction entry.

mod annotations;
mod headings;

use tracing::{debug, instrument};

use dividendlens_shared::{AnalysisConfig, DEFAULT_INTRO_LABEL, DuplicatePolicy, SectionMap};

pub use annotations::strip_annotations;
pub use headings::clean_title;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options for [`segment_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Key of the implicit section before the first heading.
    pub intro_label: String,
    /// Handling of headings that clean to an already-seen title.
    pub duplicates: DuplicatePolicy,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            intro_label: DEFAULT_INTRO_LABEL.to_string(),
            duplicates: DuplicatePolicy::Overwrite,
        }
    }
}

impl From<&AnalysisConfig> for SegmentOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            intro_label: config.intro_label.clone(),
            duplicates: config.duplicates,
        }
    }
}

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

/// Segment `document` with the default options.
pub fn segment(document: &str) -> SectionMap {
    segment_with(document, &SegmentOptions::default())
}

/// Segment `document` into an ordered `title -> body` map.
#[instrument(skip(document, opts), fields(len = document.len(), policy = %opts.duplicates))]
pub fn segment_with(document: &str, opts: &SegmentOptions) -> SectionMap {
    let text = strip_annotations(document);
    let headings = headings::find_headings(&text);

    let mut sections = SectionMap::new();
    let mut active = opts.intro_label.clone();
    sections.insert(active.clone(), String::new());

    let mut last_end = 0;
    for heading in headings {
        append_body(&mut sections, &active, text[last_end..heading.start].trim());
        active = activate(&mut sections, heading.title, opts.duplicates);
        last_end = heading.end;
    }
    append_body(&mut sections, &active, text[last_end..].trim());

    debug!(sections = sections.len(), "document segmented");
    sections
}

/// Make `title` the active section and return the key it was stored under.
fn activate(sections: &mut SectionMap, title: String, policy: DuplicatePolicy) -> String {
    if sections.contains(&title) {
        debug!(%title, %policy, "duplicate section title");
    }

    match policy {
        DuplicatePolicy::Overwrite => {
            sections.insert(title.clone(), String::new());
            title
        }
        DuplicatePolicy::Append => {
            if !sections.contains(&title) {
                sections.insert(title.clone(), String::new());
            }
            title
        }
        DuplicatePolicy::Disambiguate => {
            let key = unique_key(sections, title);
            sections.insert(key.clone(), String::new());
            key
        }
    }
}

/// `title`, or `"title (N)"` with the smallest N >= 2 not already used.
fn unique_key(sections: &SectionMap, title: String) -> String {
    if !sections.contains(&title) {
        return title;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{title} ({n})");
        if !sections.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn append_body(sections: &mut SectionMap, key: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(body) = sections.get_mut(key) {
        if !body.is_empty() {
            body.push_str("\n\n");
        }
        body.push_str(text);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
