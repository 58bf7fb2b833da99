//! "Peers" screen: dividend yields, valuation multiples and competitive scores.

use dividendlens_core::Dashboard;
use ratatui::prelude::*;

use crate::widgets::{data_table, pct};

pub(crate) fn draw(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let ds = &dashboard.dataset;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let mut yield_rows: Vec<Vec<String>> = ds
        .peer_yields
        .iter()
        .map(|p| vec![p.company.clone(), pct(Some(p.yield_pct)), p.kind.clone()])
        .collect();
    yield_rows.push(vec![
        "Average".into(),
        pct(dashboard.peer_yield_average),
        String::new(),
    ]);
    f.render_widget(
        data_table("Dividend yield", &["Company", "Yield", "Type"], yield_rows, None),
        top[0],
    );

    let valuation_rows = ds
        .valuation
        .iter()
        .map(|v| {
            vec![
                v.company.clone(),
                format!("{:.1}x", v.ev_ebitda),
                format!("{:.1}x", v.pe),
                v.kind.clone(),
            ]
        })
        .collect();
    f.render_widget(
        data_table(
            "Valuation",
            &["Company", "EV/EBITDA", "P/E", "Type"],
            valuation_rows,
            None,
        ),
        top[1],
    );

    // One row per dimension, one column per company.
    let matrix = &ds.competitive;
    let mut headers = vec!["Dimension"];
    headers.extend(matrix.companies.iter().map(|c| c.company.as_str()));
    let score_rows = matrix
        .dimensions
        .iter()
        .enumerate()
        .map(|(i, dim)| {
            let mut row = vec![dim.clone()];
            row.extend(
                matrix
                    .companies
                    .iter()
                    .map(|c| c.scores.get(i).map_or_else(String::new, u8::to_string)),
            );
            row
        })
        .collect();
    f.render_widget(
        data_table("Competitive position (1-10)", &headers, score_rows, None),
        rows[1],
    );
}
