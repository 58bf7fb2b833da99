//! Core domain logic for DividendLens.
//!
//! This crate ties together the company dataset, derived dividend metrics,
//! the segmented analysis document and the Markdown report renderer.

pub mod analysis;
pub mod dashboard;
pub mod dataset;
pub mod metrics;
pub mod report;

pub use analysis::{AnalysisDocument, AnalysisView, DocumentStatus, SectionView, load_analysis};
pub use dashboard::Dashboard;
pub use dataset::Dataset;
