//! TUI screen definitions.
//!
//! Each screen corresponds to a tab. Most screens are read-only views over the
//! dashboard; the analysis screen keeps its own selection and expansion state.

mod analysis;
mod dividends;
mod outlook;
mod overview;
mod peers;
mod risks;

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use dividendlens_core::Dashboard;
use ratatui::prelude::*;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Overview,
    Dividends,
    Outlook,
    Peers,
    Risks,
    Analysis,
}

impl ScreenId {
    /// Tab order.
    pub(crate) const ALL: [ScreenId; 6] = [
        Self::Overview,
        Self::Dividends,
        Self::Outlook,
        Self::Peers,
        Self::Risks,
        Self::Analysis,
    ];
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Dividends => write!(f, "Dividends"),
            Self::Outlook => write!(f, "Outlook"),
            Self::Peers => write!(f, "Peers"),
            Self::Risks => write!(f, "Risks"),
            Self::Analysis => write!(f, "Analysis"),
        }
    }
}

/// Per-screen state and behaviour.
pub(crate) struct Screen {
    pub id: ScreenId,
    /// Present only for [`ScreenId::Analysis`].
    analysis: Option<analysis::AnalysisScreen>,
}

impl Screen {
    pub(crate) fn new(id: ScreenId, dashboard: &Dashboard) -> Self {
        let analysis =
            (id == ScreenId::Analysis).then(|| analysis::AnalysisScreen::new(&dashboard.analysis));
        Self { id, analysis }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, dashboard: &Dashboard) {
        match self.id {
            ScreenId::Overview => overview::draw(f, area, dashboard),
            ScreenId::Dividends => dividends::draw(f, area, dashboard),
            ScreenId::Outlook => outlook::draw(f, area, dashboard),
            ScreenId::Peers => peers::draw(f, area, dashboard),
            ScreenId::Risks => risks::draw(f, area, dashboard),
            ScreenId::Analysis => {
                if let Some(screen) = &self.analysis {
                    screen.draw(f, area);
                }
            }
        }
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(screen) = &mut self.analysis {
            screen.handle_key(code, modifiers);
        }
    }
}
