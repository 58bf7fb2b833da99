//! Loading and presenting the free-text analysis document.
//!
//! Reading the document never fails: a missing or unreadable file is replaced
//! by a placeholder body so the dashboard always has something to render.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use dividendlens_segmenter::{SegmentOptions, segment_with};

/// Body shown when the analysis file does not exist.
pub const MISSING_PLACEHOLDER: &str = "Analysis content unavailable (file not found).";

/// Body shown when the analysis file exists but cannot be read or decoded.
pub const UNREADABLE_PLACEHOLDER: &str = "Error loading the analysis content.";

// ---------------------------------------------------------------------------
// Document loading
// ---------------------------------------------------------------------------

/// Outcome of reading the analysis file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum DocumentStatus {
    Loaded,
    Missing,
    /// The file exists but reading or UTF-8 decoding failed.
    Unreadable(String),
}

/// Raw analysis text plus where it came from.
#[derive(Debug, Clone)]
pub struct AnalysisDocument {
    pub path: PathBuf,
    /// File content, or a placeholder when `status` is not `Loaded`.
    pub text: String,
    pub status: DocumentStatus,
}

impl AnalysisDocument {
    /// A document built from in-memory text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: PathBuf::new(),
            text: text.into(),
            status: DocumentStatus::Loaded,
        }
    }

    /// User-facing warning for a placeholder document.
    pub fn warning(&self) -> Option<String> {
        match &self.status {
            DocumentStatus::Loaded => None,
            DocumentStatus::Missing => Some(format!(
                "Analysis file '{}' not found; the text analysis cannot be displayed.",
                self.path.display()
            )),
            DocumentStatus::Unreadable(reason) => Some(format!(
                "Error reading analysis file '{}': {reason}",
                self.path.display()
            )),
        }
    }
}

/// Read the analysis document at `path`, substituting a placeholder on failure.
#[instrument]
pub fn load_analysis(path: &Path) -> AnalysisDocument {
    let (text, status) = match std::fs::read_to_string(path) {
        Ok(text) => {
            info!(bytes = text.len(), "analysis document loaded");
            (text, DocumentStatus::Loaded)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("analysis document not found, using placeholder");
            (MISSING_PLACEHOLDER.to_string(), DocumentStatus::Missing)
        }
        Err(e) => {
            warn!(error = %e, "analysis document unreadable, using placeholder");
            (
                UNREADABLE_PLACEHOLDER.to_string(),
                DocumentStatus::Unreadable(e.to_string()),
            )
        }
    };

    AnalysisDocument {
        path: path.to_path_buf(),
        text,
        status,
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// One displayable section of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub body: String,
    /// Whether the section starts out expanded.
    pub expanded: bool,
}

/// Segmented analysis ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub sections: Vec<SectionView>,
    pub status: DocumentStatus,
    /// Warning to show above the sections, if the document is a placeholder.
    pub warning: Option<String>,
}

impl AnalysisView {
    /// Segment `document`, drop blank sections and apply the expansion policy.
    pub fn build(
        document: &AnalysisDocument,
        opts: &SegmentOptions,
        expand_markers: &[String],
    ) -> Self {
        let sections = segment_with(&document.text, opts)
            .into_sections()
            .into_iter()
            .filter(|s| s.has_content())
            .map(|s| SectionView {
                expanded: is_expanded_by_default(&s.title, &opts.intro_label, expand_markers),
                title: s.title,
                body: s.body,
            })
            .collect();

        Self {
            sections,
            status: document.status.clone(),
            warning: document.warning(),
        }
    }
}

/// The introduction and any section mentioning an expand marker start open.
pub fn is_expanded_by_default(title: &str, intro_label: &str, expand_markers: &[String]) -> bool {
    title == intro_label || expand_markers.iter().any(|m| title.contains(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    fn markers() -> Vec<String> {
        vec!["Dividendi storici".to_string()]
    }

    #[test]
    fn loads_fixture_document() {
        let doc = load_analysis(&fixture_path("analysis/Analisi_FDJ.txt"));
        assert_eq!(doc.status, DocumentStatus::Loaded);
        assert!(doc.text.contains("Dividendi storici"));
        assert!(doc.warning().is_none());
    }

    #[test]
    fn missing_file_yields_placeholder() {
        let doc = load_analysis(Path::new("/nonexistent/Analisi_FDJ.txt"));
        assert_eq!(doc.status, DocumentStatus::Missing);
        assert_eq!(doc.text, MISSING_PLACEHOLDER);
        assert!(doc.warning().expect("warning").contains("not found"));
    }

    #[test]
    fn non_utf8_file_yields_unreadable_placeholder() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).expect("write");

        let doc = load_analysis(&path);
        assert!(matches!(doc.status, DocumentStatus::Unreadable(_)));
        assert_eq!(doc.text, UNREADABLE_PLACEHOLDER);
    }

    #[test]
    fn placeholder_segments_into_intro() {
        let doc = load_analysis(Path::new("/nonexistent/Analisi_FDJ.txt"));
        let view = AnalysisView::build(&doc, &SegmentOptions::default(), &markers());
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].title, "Introduzione");
        assert_eq!(view.sections[0].body, MISSING_PLACEHOLDER);
        assert!(view.sections[0].expanded);
        assert!(view.warning.is_some());
    }

    #[test]
    fn fixture_view_drops_blank_sections_and_expands_markers() {
        let doc = load_analysis(&fixture_path("analysis/Analisi_FDJ.txt"));
        let view = AnalysisView::build(&doc, &SegmentOptions::default(), &markers());

        let titles: Vec<&str> = view.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Introduzione",
                "Politica di distribuzione",
                "Dividendi storici",
                "Rendimento e valutazione",
                "Prospettive",
                "Nuove tasse 2025",
                "Integrazione di Kindred",
                "Conclusioni",
            ]
        );

        let expanded: Vec<&str> = view
            .sections
            .iter()
            .filter(|s| s.expanded)
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(expanded, vec!["Introduzione", "Dividendi storici"]);

        assert!(view.sections.iter().all(|s| !s.body.contains("[source:")));
    }

    #[test]
    fn empty_intro_is_not_displayed() {
        let doc = AnalysisDocument::from_text("# Only\nBody");
        let view = AnalysisView::build(&doc, &SegmentOptions::default(), &[]);
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].title, "Only");
        assert!(!view.sections[0].expanded);
    }

    #[test]
    fn expansion_policy() {
        let m = markers();
        assert!(is_expanded_by_default("Introduzione", "Introduzione", &m));
        assert!(is_expanded_by_default("Analisi Dividendi storici FDJ", "Introduzione", &m));
        assert!(!is_expanded_by_default("Rischi", "Introduzione", &m));
    }
}
