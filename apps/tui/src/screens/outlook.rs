//! "Outlook" screen: DPS projections, growth rates, business mix and timeline.

use dividendlens_core::Dashboard;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::widgets::{data_table, euro, pct};

pub(crate) fn draw(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let ds = &dashboard.dataset;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(40),
            Constraint::Min(5),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let forecast_rows = ds
        .forecast
        .iter()
        .map(|p| vec![p.year.to_string(), euro(p.dps), p.kind.clone(), p.note.clone()])
        .collect();
    f.render_widget(
        data_table(
            "DPS projection",
            &["Year", "DPS", "Type", "Note"],
            forecast_rows,
            Some(vec![
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Min(10),
            ]),
        ),
        top[0],
    );

    let growth_rows = dashboard
        .growth
        .iter()
        .map(|r| vec![r.period.clone(), pct(r.cagr), r.description.clone()])
        .collect();
    f.render_widget(
        data_table(
            "DPS CAGR",
            &["Period", "CAGR", "Basis"],
            growth_rows,
            Some(vec![
                Constraint::Length(11),
                Constraint::Length(7),
                Constraint::Min(10),
            ]),
        ),
        top[1],
    );

    let mix_rows = ds
        .business_mix
        .iter()
        .map(|s| {
            vec![
                s.segment.clone(),
                format!("{:.0}%", s.revenue_share),
                format!("{:.0}%", s.operating_margin),
            ]
        })
        .collect();
    f.render_widget(
        data_table("Business mix", &["Segment", "Revenue", "Margin"], mix_rows, None),
        middle[0],
    );

    let timeline_rows = ds
        .timeline
        .iter()
        .map(|e| vec![e.period.clone(), e.event.clone(), e.kind.clone()])
        .collect();
    f.render_widget(
        data_table(
            "Timeline",
            &["When", "Event", "Type"],
            timeline_rows,
            Some(vec![
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Length(12),
            ]),
        ),
        middle[1],
    );

    let company = &ds.company;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let notes = vec![
        Line::from(vec![
            Span::styled("Kindred: ", bold),
            Span::raw(company.kindred_impact.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Tax risk: ", bold),
            Span::raw(company.tax_risk.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Mitigation: ", bold),
            Span::raw(company.tax_mitigation.as_str()),
        ]),
    ];
    let panel = Paragraph::new(notes)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Drivers "));
    f.render_widget(panel, rows[2]);
}
