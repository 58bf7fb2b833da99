//! "Risks" screen: risk register, net debt and dividend sustainability.

use dividendlens_core::Dashboard;
use dividendlens_core::dataset::RiskEntry;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::widgets::data_table;

pub(crate) fn draw(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let ds = &dashboard.dataset;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    f.render_widget(risk_table(&ds.risks), rows[0]);

    let debt_rows = ds
        .debt
        .iter()
        .map(|d| {
            vec![
                d.year.to_string(),
                d.position_label(),
                format!("{:.0}M", d.ebitda),
                format!("{:.1}x", d.leverage),
            ]
        })
        .collect();
    f.render_widget(
        data_table(
            "Net debt",
            &["Year", "Position", "EBITDA", "Leverage"],
            debt_rows,
            None,
        ),
        bottom[0],
    );

    let sustainability_rows = ds
        .sustainability
        .iter()
        .map(|s| {
            vec![
                s.year.to_string(),
                format!("{:.0}M", s.net_income),
                format!("{:.0}%", s.payout),
                format!("{:.0}M", s.fcf),
                format!("{:.0}M", s.fcf_after_dividend()),
                s.coverage().map_or_else(|| "N/A".to_string(), |c| format!("{c:.2}x")),
            ]
        })
        .collect();
    f.render_widget(
        data_table(
            "Dividend sustainability",
            &["Year", "Net income", "Payout", "FCF", "FCF - div.", "Coverage"],
            sustainability_rows,
            None,
        ),
        bottom[1],
    );
}

/// Risk register, colored by level.
fn risk_table(risks: &[RiskEntry]) -> Table<'_> {
    let header = Row::new(["Category", "Level", "Impact", "Horizon"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = risks.iter().map(|r| {
        Row::new(vec![
            r.category.clone(),
            format!("{}/10", r.level),
            r.impact.to_string(),
            r.horizon.clone(),
        ])
        .style(Style::default().fg(level_color(r.level)))
    });

    Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Risk register "))
}

fn level_color(level: u8) -> Color {
    match level {
        0..=3 => Color::Green,
        4..=6 => Color::Yellow,
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_map_to_traffic_light() {
        assert_eq!(level_color(2), Color::Green);
        assert_eq!(level_color(5), Color::Yellow);
        assert_eq!(level_color(8), Color::Red);
    }
}
