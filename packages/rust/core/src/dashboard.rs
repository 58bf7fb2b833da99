//! Assembles everything a renderer needs from config, dataset and document.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use dividendlens_segmenter::SegmentOptions;
use dividendlens_shared::{AppConfig, Result};

use crate::analysis::{AnalysisView, load_analysis};
use crate::dataset::Dataset;
use crate::metrics::{CagrRow, KeyIndicators, cagr_table, peer_yield_average};

/// Fully computed dashboard state, rebuilt on every load.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub dataset: Dataset,
    pub indicators: KeyIndicators,
    pub growth: Vec<CagrRow>,
    pub peer_yield_average: Option<f64>,
    pub analysis: AnalysisView,
}

impl Dashboard {
    /// Load the configured dataset and analysis document.
    ///
    /// Only dataset problems are errors; the analysis document degrades to a
    /// placeholder.
    #[instrument(skip_all, fields(analysis = %config.analysis.path))]
    pub fn load(config: &AppConfig) -> Result<Self> {
        let dataset = Dataset::load(config.dashboard.dataset_path.as_deref().map(Path::new))?;

        let document = load_analysis(Path::new(&config.analysis.path));
        let analysis = AnalysisView::build(
            &document,
            &SegmentOptions::from(&config.analysis),
            &config.analysis.expand_markers,
        );

        Ok(Self::from_parts(dataset, analysis))
    }

    /// Compute derived metrics for an already loaded dataset and analysis.
    pub fn from_parts(dataset: Dataset, analysis: AnalysisView) -> Self {
        let indicators = KeyIndicators::from_dataset(&dataset);
        let growth = cagr_table(&dataset);
        let peer_yield_average = peer_yield_average(&dataset);

        debug!(
            sections = analysis.sections.len(),
            growth_rows = growth.len(),
            "dashboard assembled"
        );

        Self {
            dataset,
            indicators,
            growth,
            peer_yield_average,
            analysis,
        }
    }
}
