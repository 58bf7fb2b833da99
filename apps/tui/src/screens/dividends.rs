//! "Dividends" screen: DPS history, payout ratios and key financials.

use dividendlens_core::Dashboard;
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};

use crate::widgets::{data_table, euro};

pub(crate) fn draw(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let ds = &dashboard.dataset;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    // DPS in cents so the bars keep two decimals of resolution.
    let bars: Vec<Bar> = ds
        .dps_history
        .iter()
        .map(|p| {
            Bar::default()
                .label(Line::from(p.year.to_string()))
                .value((p.dps * 100.0).round() as u64)
                .text_value(euro(p.dps))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Dividend per share "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, top[0]);

    let payout_rows = ds
        .payout
        .iter()
        .map(|p| vec![p.year.to_string(), format!("{:.0}%", p.ratio), p.note.clone()])
        .collect();
    let payout = data_table(
        "Payout ratio",
        &["Year", "Payout", "Note"],
        payout_rows,
        Some(vec![
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Min(10),
        ]),
    );
    f.render_widget(payout, top[1]);

    let mut headers = vec!["Metric"];
    headers.extend(ds.financials.periods.iter().map(String::as_str));
    let financial_rows = ds
        .financials
        .rows
        .iter()
        .map(|r| {
            let mut row = vec![r.metric.clone()];
            row.extend(r.values.iter().map(ToString::to_string));
            row
        })
        .collect();
    let financials = data_table("Key financials", &headers, financial_rows, None);
    f.render_widget(financials, rows[1]);
}
