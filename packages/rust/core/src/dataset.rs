//! The company dataset behind the dashboard.
//!
//! The built-in dataset is compiled in from `data/fdj.toml` and parsed once at
//! startup; an external TOML file with the same schema can replace it.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use dividendlens_shared::{DividendLensError, Result};

/// TOML source of the built-in dataset.
const BUILTIN_DATASET: &str = include_str!("../data/fdj.toml");

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Every table the dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub company: CompanyProfile,
    pub dps_history: Vec<DpsPoint>,
    pub financials: FinancialTable,
    pub payout: Vec<PayoutPoint>,
    pub peer_yields: Vec<PeerYield>,
    pub forecast: Vec<ForecastPoint>,
    pub business_mix: Vec<BusinessSegment>,
    pub timeline: Vec<TimelineEvent>,
    pub valuation: Vec<ValuationMultiple>,
    pub competitive: CompetitiveMatrix,
    pub risks: Vec<RiskEntry>,
    pub debt: Vec<DebtPoint>,
    pub sustainability: Vec<SustainabilityPoint>,
    pub conclusions: Conclusions,
}

/// Headline facts about the company and its dividend policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub ticker: String,
    pub name: String,
    /// Date the analysis refers to, as displayed.
    pub as_of: String,
    /// Approximate share price used for the trailing yield.
    pub reference_price: f64,
    pub payout_policy: String,
    /// Last dividend per share paid, in euro.
    pub last_dps: f64,
    /// Fiscal year the last dividend relates to.
    pub last_dps_year: u16,
    pub expected_dps: f64,
    pub expected_dps_year: u16,
    /// Display label for the expected growth, e.g. `"+15%"`.
    pub expected_growth: String,
    pub kindred_impact: String,
    pub tax_risk: String,
    pub tax_mitigation: String,
}

/// Dividend per share for one fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpsPoint {
    pub year: u16,
    pub dps: f64,
}

/// Summary financial statement: metrics by period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTable {
    pub periods: Vec<String>,
    pub rows: Vec<FinancialRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRow {
    pub metric: String,
    /// One value per period.
    pub values: Vec<Figure>,
}

/// A table cell: either a number or a qualitative note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Amount(f64),
    Note(String),
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(v) => write!(f, "{v:.2}"),
            Self::Note(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutPoint {
    pub year: u16,
    /// Share of net income distributed, in percent.
    pub ratio: f64,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerYield {
    pub company: String,
    pub yield_pct: f64,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: u16,
    pub dps: f64,
    pub kind: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSegment {
    pub segment: String,
    /// Share of revenue, in percent.
    pub revenue_share: f64,
    /// Estimated operating margin, in percent.
    pub operating_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub period: String,
    pub event: String,
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationMultiple {
    pub company: String,
    pub ev_ebitda: f64,
    pub pe: f64,
    pub kind: String,
}

/// Qualitative 1-10 scores per company across shared dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveMatrix {
    pub dimensions: Vec<String>,
    pub companies: Vec<CompetitiveScores>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveScores {
    pub company: String,
    /// One score per dimension, in dimension order.
    pub scores: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    pub category: String,
    /// Likelihood on a 1-10 scale.
    pub level: u8,
    pub impact: RiskImpact,
    pub horizon: String,
}

/// Expected effect of a risk on the dividend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskImpact {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Net debt, EBITDA (€M) and leverage for one year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebtPoint {
    pub year: u16,
    /// Negative values are net cash.
    pub net_debt: f64,
    pub ebitda: f64,
    /// Net debt / EBITDA; zero while in net cash.
    pub leverage: f64,
}

/// Dividend affordability for one year (€M unless noted).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SustainabilityPoint {
    pub year: u16,
    pub net_income: f64,
    /// Dividend per share, in euro.
    pub dps: f64,
    /// Payout ratio, in percent.
    pub payout: f64,
    pub total_dividend: f64,
    pub fcf: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conclusions {
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Dataset {
    /// Parse and validate the compiled-in dataset.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_DATASET)
    }

    /// Parse and validate a dataset from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let dataset: Self = toml::from_str(content)
            .map_err(|e| DividendLensError::parse(format!("invalid dataset: {e}")))?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load a dataset file, or the built-in dataset when `path` is `None`.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("using built-in dataset");
            return Self::builtin();
        };

        let content =
            std::fs::read_to_string(path).map_err(|e| DividendLensError::io(path, e))?;
        let dataset = Self::from_toml_str(&content)?;
        debug!(company = %dataset.company.name, "loaded external dataset");
        Ok(dataset)
    }

    /// Check structural consistency of the tables.
    pub fn validate(&self) -> Result<()> {
        if self.company.reference_price <= 0.0 {
            return Err(DividendLensError::validation(
                "reference price must be positive",
            ));
        }
        if self.dps_history.is_empty() {
            return Err(DividendLensError::Dataset("DPS history is empty".into()));
        }
        if self.forecast.is_empty() {
            return Err(DividendLensError::Dataset("dividend forecast is empty".into()));
        }
        if !self.dps_history.windows(2).all(|w| w[0].year < w[1].year) {
            return Err(DividendLensError::Dataset(
                "DPS history years must be strictly increasing".into(),
            ));
        }

        let periods = self.financials.periods.len();
        if let Some(row) = self
            .financials
            .rows
            .iter()
            .find(|row| row.values.len() != periods)
        {
            return Err(DividendLensError::Dataset(format!(
                "financial metric '{}' has {} values for {periods} periods",
                row.metric,
                row.values.len()
            )));
        }

        let dimensions = self.competitive.dimensions.len();
        if let Some(entry) = self
            .competitive
            .companies
            .iter()
            .find(|c| c.scores.len() != dimensions)
        {
            return Err(DividendLensError::Dataset(format!(
                "competitive scores for '{}' do not match {dimensions} dimensions",
                entry.company
            )));
        }

        if let Some(risk) = self.risks.iter().find(|r| !(1..=10).contains(&r.level)) {
            return Err(DividendLensError::validation(format!(
                "risk level {} for '{}' is outside 1-10",
                risk.level, risk.category
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dataset_parses() {
        let ds = Dataset::builtin().expect("builtin dataset");
        assert_eq!(ds.company.ticker, "FDJ.PA");
        assert_eq!(ds.dps_history.len(), 5);
        assert_eq!(ds.dps_history[0], DpsPoint { year: 2019, dps: 0.45 });
        assert_eq!(ds.financials.periods.len(), 4);
        assert_eq!(ds.competitive.companies.len(), 4);
        assert_eq!(ds.conclusions.strengths.len(), 6);
    }

    #[test]
    fn mixed_financial_cells() {
        let ds = Dataset::builtin().expect("builtin dataset");
        let leverage = ds
            .financials
            .rows
            .iter()
            .find(|r| r.metric.starts_with("Net debt"))
            .expect("leverage row");
        assert_eq!(leverage.values[0], Figure::Note("Net cash".into()));

        let revenue = &ds.financials.rows[0];
        assert_eq!(revenue.values[0], Figure::Amount(2255.7));
        assert_eq!(revenue.values[0].to_string(), "2255.70");
    }

    #[test]
    fn risk_impact_parses_lowercase() {
        let ds = Dataset::builtin().expect("builtin dataset");
        assert_eq!(ds.risks[0].impact, RiskImpact::High);
        assert_eq!(ds.risks[0].impact.to_string(), "High");
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Dataset::from_toml_str("[company\nticker = 1").unwrap_err();
        assert!(matches!(err, DividendLensError::Parse { .. }));
    }

    #[test]
    fn validate_rejects_empty_history() {
        let mut ds = Dataset::builtin().expect("builtin dataset");
        ds.dps_history.clear();
        assert!(matches!(ds.validate(), Err(DividendLensError::Dataset(_))));
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let mut ds = Dataset::builtin().expect("builtin dataset");
        ds.company.reference_price = 0.0;
        let err = ds.validate().unwrap_err();
        assert!(err.to_string().contains("reference price"));
    }

    #[test]
    fn validate_rejects_ragged_competitive_scores() {
        let mut ds = Dataset::builtin().expect("builtin dataset");
        ds.competitive.companies[1].scores.pop();
        let err = ds.validate().unwrap_err();
        assert!(err.to_string().contains("OPAP"));
    }

    #[test]
    fn validate_rejects_unordered_history() {
        let mut ds = Dataset::builtin().expect("builtin dataset");
        ds.dps_history.swap(0, 1);
        assert!(ds.validate().is_err());
    }

    #[test]
    fn load_none_uses_builtin() {
        let ds = Dataset::load(None).expect("load");
        assert_eq!(ds.company.name, "Française des Jeux");
    }

    #[test]
    fn load_external_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dataset.toml");
        let patched = BUILTIN_DATASET.replace("reference_price = 30.0", "reference_price = 32.5");
        std::fs::write(&path, patched).expect("write");

        let ds = Dataset::load(Some(&path)).expect("load");
        assert_eq!(ds.company.reference_price, 32.5);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Dataset::load(Some(Path::new("/nonexistent/dataset.toml"))).unwrap_err();
        assert!(matches!(err, DividendLensError::Io { .. }));
    }
}
