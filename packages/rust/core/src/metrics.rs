//! Descriptive statistics derived from the dataset.

use serde::Serialize;

use crate::dataset::{Dataset, DebtPoint, RiskImpact, SustainabilityPoint};

/// Compound annual growth rate, in percent.
///
/// `None` when either endpoint is non-positive or `years` is zero.
pub fn cagr(start: f64, end: f64, years: u32) -> Option<f64> {
    if start <= 0.0 || end <= 0.0 || years == 0 {
        return None;
    }
    Some(((end / start).powf(1.0 / f64::from(years)) - 1.0) * 100.0)
}

/// Dividend yield on a reference price, in percent.
pub fn trailing_yield(dps: f64, price: f64) -> Option<f64> {
    (price > 0.0).then(|| dps / price * 100.0)
}

/// Arithmetic mean; `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

// ---------------------------------------------------------------------------
// Key indicators
// ---------------------------------------------------------------------------

/// The four headline cards of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct KeyIndicators {
    pub last_dps: f64,
    pub last_dps_year: u16,
    pub trailing_yield: Option<f64>,
    pub reference_price: f64,
    pub payout_policy: String,
    pub expected_dps: f64,
    pub expected_dps_year: u16,
    pub expected_growth: String,
}

impl KeyIndicators {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let company = &dataset.company;
        Self {
            last_dps: company.last_dps,
            last_dps_year: company.last_dps_year,
            trailing_yield: trailing_yield(company.last_dps, company.reference_price),
            reference_price: company.reference_price,
            payout_policy: company.payout_policy.clone(),
            expected_dps: company.expected_dps,
            expected_dps_year: company.expected_dps_year,
            expected_growth: company.expected_growth.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Growth table
// ---------------------------------------------------------------------------

/// Dividend CAGR over one period.
#[derive(Debug, Clone, Serialize)]
pub struct CagrRow {
    /// Period label, e.g. `"2019-2023"` or `"2023-2026E"`.
    pub period: String,
    pub description: String,
    pub cagr: Option<f64>,
}

fn growth_row(from: (u16, f64), to: (u16, f64), estimate: bool, description: &str) -> CagrRow {
    let years = u32::from(to.0.saturating_sub(from.0));
    let suffix = if estimate { "E" } else { "" };
    CagrRow {
        period: format!("{}-{}{suffix}", from.0, to.0),
        description: description.to_string(),
        cagr: cagr(from.1, to.1, years),
    }
}

/// Dividend growth since the IPO, over the last two years, and projected.
///
/// Rows whose endpoints are missing from the dataset are omitted.
pub fn cagr_table(dataset: &Dataset) -> Vec<CagrRow> {
    let history: Vec<(u16, f64)> = dataset.dps_history.iter().map(|p| (p.year, p.dps)).collect();
    let forecast: Vec<(u16, f64)> = dataset.forecast.iter().map(|p| (p.year, p.dps)).collect();
    let mut rows = Vec::new();

    if let (Some(&first), Some(&last)) = (history.first(), history.last()) {
        if last.0 > first.0 {
            rows.push(growth_row(first, last, false, "CAGR since IPO"));
        }
        let two_back = last.0.saturating_sub(2);
        if let Some(&start) = history.iter().find(|p| p.0 == two_back) {
            if start.0 > first.0 {
                rows.push(growth_row(start, last, false, "CAGR last 2 years"));
            }
        }
    }

    if let (Some(&first), Some(&last)) = (forecast.first(), forecast.last()) {
        if last.0 > first.0 {
            rows.push(growth_row(first, last, true, "Projected CAGR"));
        }
    }

    rows
}

// ---------------------------------------------------------------------------
// Derived row values
// ---------------------------------------------------------------------------

impl SustainabilityPoint {
    /// Free cash flow left after paying the dividend (€M).
    pub fn fcf_after_dividend(&self) -> f64 {
        self.fcf - self.total_dividend
    }

    /// How many times free cash flow covers the dividend.
    pub fn coverage(&self) -> Option<f64> {
        (self.total_dividend != 0.0).then(|| self.fcf / self.total_dividend)
    }
}

impl DebtPoint {
    /// Whether the company holds more cash than debt.
    pub fn is_net_cash(&self) -> bool {
        self.net_debt < 0.0
    }

    /// Bar label: `"Cash: 450M"` or `"Debt: 300M"`.
    pub fn position_label(&self) -> String {
        if self.is_net_cash() {
            format!("Cash: {:.0}M", -self.net_debt)
        } else {
            format!("Debt: {:.0}M", self.net_debt)
        }
    }
}

impl RiskImpact {
    /// Numeric intensity for heat maps: Low=1, Medium=2, High=3.
    pub fn score(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Average dividend yield across the peer table.
pub fn peer_yield_average(dataset: &Dataset) -> Option<f64> {
    mean(dataset.peer_yields.iter().map(|p| p.yield_pct))
}
