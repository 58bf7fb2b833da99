//! Markdown rendering of the whole dashboard.
//!
//! Produces one self-contained document: headline indicators, one section
//! per dashboard tab, the segmented analysis as collapsible `<details>`
//! blocks, the investor conclusions and the disclaimer.

use tracing::instrument;

use crate::dashboard::Dashboard;
use crate::dataset::Dataset;

const DISCLAIMER: &str = "The information in this report is provided for general information \
and educational purposes only. It is not financial, legal, tax or investment advice. \
Investing involves significant risk, including the loss of all invested capital; past \
performance is no guarantee of future results. Do your own due diligence and consult an \
independent, qualified financial adviser before making any investment decision.";

/// Render `dashboard` as a Markdown document.
#[instrument(skip_all, fields(company = %dashboard.dataset.company.name))]
pub fn render_markdown(dashboard: &Dashboard) -> String {
    let ds = &dashboard.dataset;
    let mut md = String::new();

    md.push_str(&format!(
        "# Dividend analysis: {} ({})\n\n",
        ds.company.name, ds.company.ticker
    ));
    md.push_str(&format!("_Analysis as of {}._\n\n", ds.company.as_of));

    render_indicators(&mut md, dashboard);
    render_history(&mut md, ds);
    render_projections(&mut md, dashboard);
    render_business(&mut md, ds);
    render_comparison(&mut md, dashboard);
    render_risks(&mut md, ds);
    render_analysis(&mut md, dashboard);
    render_conclusions(&mut md, ds);

    md.push_str("---\n\n## Disclaimer\n\n");
    md.push_str(DISCLAIMER);
    md.push('\n');
    md
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn render_indicators(md: &mut String, dashboard: &Dashboard) {
    let ind = &dashboard.indicators;
    md.push_str("## Key dividend indicators\n\n");
    md.push_str(&table(
        &["Indicator", "Value"],
        vec![
            vec![
                format!("Last DPS paid (FY{})", ind.last_dps_year),
                euro(ind.last_dps),
            ],
            vec![
                "Trailing dividend yield".into(),
                opt_pct(ind.trailing_yield),
            ],
            vec!["Payout policy".into(), ind.payout_policy.clone()],
            vec![
                format!("Expected DPS (FY{})", ind.expected_dps_year),
                format!("{} ({})", euro(ind.expected_dps), ind.expected_growth),
            ],
        ],
    ));
    md.push_str(&format!(
        "Yield based on the last DPS and a reference price of {}.\n\n",
        euro(ind.reference_price)
    ));
}

fn render_history(md: &mut String, ds: &Dataset) {
    md.push_str("## Historical dividends\n\n");
    md.push_str(&table(
        &["Fiscal year", "DPS"],
        ds.dps_history
            .iter()
            .map(|p| vec![p.year.to_string(), euro(p.dps)])
            .collect(),
    ));

    md.push_str("### Payout ratio\n\n");
    md.push_str(&table(
        &["Year", "Payout ratio", "Note"],
        ds.payout
            .iter()
            .map(|p| vec![p.year.to_string(), pct(p.ratio), p.note.clone()])
            .collect(),
    ));

    md.push_str("### Financial summary\n\n");
    let mut headers = vec!["Metric"];
    headers.extend(ds.financials.periods.iter().map(String::as_str));
    md.push_str(&table(
        &headers,
        ds.financials
            .rows
            .iter()
            .map(|row| {
                std::iter::once(row.metric.clone())
                    .chain(row.values.iter().map(ToString::to_string))
                    .collect::<Vec<String>>()
            })
            .collect(),
    ));
}

fn render_projections(md: &mut String, dashboard: &Dashboard) {
    let ds = &dashboard.dataset;
    md.push_str("## Future projections\n\n");
    md.push_str(&table(
        &["Year", "DPS", "Type", "Note"],
        ds.forecast
            .iter()
            .map(|p| vec![p.year.to_string(), euro(p.dps), p.kind.clone(), p.note.clone()])
            .collect(),
    ));

    md.push_str("### Compound annual growth\n\n");
    md.push_str(&table(
        &["Period", "CAGR", "Description"],
        dashboard
            .growth
            .iter()
            .map(|r| vec![r.period.clone(), opt_pct(r.cagr), r.description.clone()])
            .collect(),
    ));

    md.push_str("### Taxes and the Kindred acquisition\n\n");
    md.push_str(&format!("- **2025 tax risk:** {}\n", ds.company.tax_risk));
    md.push_str(&format!("- **Tax mitigation:** {}\n", ds.company.tax_mitigation));
    md.push_str(&format!(
        "- **Kindred effect on the dividend:** {}\n\n",
        ds.company.kindred_impact
    ));
}

fn render_business(md: &mut String, ds: &Dataset) {
    md.push_str("## Business mix\n\n");
    md.push_str(&table(
        &["Segment", "Revenue share", "Operating margin"],
        ds.business_mix
            .iter()
            .map(|s| vec![s.segment.clone(), pct(s.revenue_share), pct(s.operating_margin)])
            .collect(),
    ));

    md.push_str("### Strategic timeline\n\n");
    md.push_str(&table(
        &["Period", "Event", "Type", "Description"],
        ds.timeline
            .iter()
            .map(|e| {
                vec![
                    e.period.clone(),
                    e.event.clone(),
                    e.kind.clone(),
                    e.description.clone(),
                ]
            })
            .collect(),
    ));
}

fn render_comparison(md: &mut String, dashboard: &Dashboard) {
    let ds = &dashboard.dataset;
    md.push_str("## Peer comparison\n\n");
    md.push_str(&table(
        &["Company", "Dividend yield", "Type"],
        ds.peer_yields
            .iter()
            .map(|p| vec![p.company.clone(), pct(p.yield_pct), p.kind.clone()])
            .collect(),
    ));
    md.push_str(&format!(
        "Average yield across the table: {}.\n\n",
        opt_pct(dashboard.peer_yield_average)
    ));

    md.push_str("### Valuation multiples\n\n");
    md.push_str(&table(
        &["Company", "EV/EBITDA", "P/E", "Type"],
        ds.valuation
            .iter()
            .map(|v| {
                vec![
                    v.company.clone(),
                    format!("{:.1}x", v.ev_ebitda),
                    format!("{:.1}x", v.pe),
                    v.kind.clone(),
                ]
            })
            .collect(),
    ));

    md.push_str("### Competitive positioning (1-10)\n\n");
    let mut headers = vec!["Dimension"];
    headers.extend(ds.competitive.companies.iter().map(|c| c.company.as_str()));
    md.push_str(&table(
        &headers,
        ds.competitive
            .dimensions
            .iter()
            .enumerate()
            .map(|(i, dim)| {
                std::iter::once(dim.clone())
                    .chain(ds.competitive.companies.iter().map(|c| {
                        c.scores.get(i).map_or_else(String::new, ToString::to_string)
                    }))
                    .collect::<Vec<String>>()
            })
            .collect(),
    ));
}

fn render_risks(md: &mut String, ds: &Dataset) {
    md.push_str("## Risks and debt\n\n");
    md.push_str(&table(
        &["Risk", "Level (1-10)", "Dividend impact", "Horizon"],
        ds.risks
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    r.level.to_string(),
                    format!("{} ({})", r.impact, r.impact.score()),
                    r.horizon.clone(),
                ]
            })
            .collect(),
    ));

    md.push_str("### Net debt and leverage (€M)\n\n");
    md.push_str(&table(
        &["Year", "Position", "EBITDA", "Net debt / EBITDA"],
        ds.debt
            .iter()
            .map(|d| {
                vec![
                    d.year.to_string(),
                    d.position_label(),
                    format!("{:.0}", d.ebitda),
                    format!("{:.1}x", d.leverage),
                ]
            })
            .collect(),
    ));

    md.push_str("### Dividend sustainability (€M)\n\n");
    md.push_str(&table(
        &[
            "Year",
            "Net income",
            "DPS",
            "Payout",
            "Total dividend",
            "FCF",
            "FCF after dividend",
            "FCF / dividend",
        ],
        ds.sustainability
            .iter()
            .map(|s| {
                vec![
                    s.year.to_string(),
                    format!("{:.0}", s.net_income),
                    euro(s.dps),
                    pct(s.payout),
                    format!("{:.0}", s.total_dividend),
                    format!("{:.0}", s.fcf),
                    format!("{:.0}", s.fcf_after_dividend()),
                    s.coverage()
                        .map_or_else(|| "n/a".to_string(), |c| format!("{c:.2}x")),
                ]
            })
            .collect(),
    ));
}

fn render_analysis(md: &mut String, dashboard: &Dashboard) {
    let analysis = &dashboard.analysis;
    md.push_str("## Detailed analysis\n\n");

    if let Some(warning) = &analysis.warning {
        md.push_str(&format!("> **Warning:** {warning}\n\n"));
    }

    for section in &analysis.sections {
        let open = if section.expanded { " open" } else { "" };
        md.push_str(&format!(
            "<details{open}>\n<summary><strong>{}</strong></summary>\n\n{}\n\n</details>\n\n",
            section.title, section.body
        ));
    }
}

fn render_conclusions(md: &mut String, ds: &Dataset) {
    md.push_str("## Conclusions for the dividend investor\n\n**Strengths:**\n\n");
    for item in &ds.conclusions.strengths {
        md.push_str(&format!("- {item}\n"));
    }
    md.push_str("\n**Risks and considerations:**\n\n");
    for item in &ds.conclusions.risks {
        md.push_str(&format!("- {item}\n"));
    }
    md.push_str(&format!("\n**In short:** {}\n\n", ds.conclusions.summary));
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a Markdown table followed by a blank line.
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&headers.join(" | "));
    out.push_str(" |\n|");
    out.push_str(&" --- |".repeat(headers.len()));
    out.push('\n');
    for row in rows {
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }
    out.push('\n');
    out
}

fn euro(v: f64) -> String {
    format!("€ {v:.2}")
}

fn pct(v: f64) -> String {
    format!("{v:.1}%")
}

fn opt_pct(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisDocument, AnalysisView};
    use dividendlens_segmenter::SegmentOptions;

    fn dashboard_for(text: &str) -> Dashboard {
        let dataset = Dataset::builtin().expect("dataset");
        let doc = AnalysisDocument::from_text(text);
        let view = AnalysisView::build(
            &doc,
            &SegmentOptions::default(),
            &["Dividendi storici".to_string()],
        );
        Dashboard::from_parts(dataset, view)
    }

    #[test]
    fn table_layout() {
        let t = table(&["A", "B"], vec![vec!["1".into(), "2".into()]]);
        assert_eq!(t, "| A | B |\n| --- | --- |\n| 1 | 2 |\n\n");
    }

    #[test]
    fn report_contains_headline_and_indicators() {
        let md = render_markdown(&dashboard_for("Intro"));
        assert!(md.starts_with("# Dividend analysis: Française des Jeux (FDJ.PA)\n"));
        assert!(md.contains("| Last DPS paid (FY2023) | € 1.78 |"));
        assert!(md.contains("| Trailing dividend yield | 5.9% |"));
        assert!(md.contains("| 2019-2023 | 41.0% | CAGR since IPO |"));
        assert!(md.contains("Cash: 450M"));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn report_renders_sections_with_expansion() {
        let md = render_markdown(&dashboard_for(
            "Premessa\n## 1. Dividendi storici\nDPS\n## 2. Rischi\nTasse",
        ));
        assert!(md.contains("<details open>\n<summary><strong>Introduzione</strong></summary>\n\nPremessa"));
        assert!(md.contains("<details open>\n<summary><strong>Dividendi storici</strong></summary>"));
        assert!(md.contains("<details>\n<summary><strong>Rischi</strong></summary>\n\nTasse"));
    }

    #[test]
    fn report_shows_placeholder_warning() {
        let dataset = Dataset::builtin().expect("dataset");
        let doc = crate::analysis::load_analysis(std::path::Path::new("/nonexistent/a.txt"));
        let view = AnalysisView::build(&doc, &SegmentOptions::default(), &[]);
        let md = render_markdown(&Dashboard::from_parts(dataset, view));
        assert!(md.contains("> **Warning:** Analysis file"));
        assert!(md.contains(crate::analysis::MISSING_PLACEHOLDER));
    }

    #[test]
    fn competitive_table_is_transposed() {
        let md = render_markdown(&dashboard_for(""));
        assert!(md.contains("| Dimension | FDJ | OPAP | Entain | Flutter |"));
        assert!(md.contains("| Cash flow stability | 9 | 8 | 6 | 5 |"));
    }
}
