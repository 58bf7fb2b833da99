//! "Overview" screen: headline indicators and the investor conclusions.

use dividendlens_core::Dashboard;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::widgets::{data_table, euro, pct};

pub(crate) fn draw(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let ind = &dashboard.indicators;
    let company = &dashboard.dataset.company;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(8), // Indicators
            Constraint::Min(1),    // Conclusions
        ])
        .split(area);

    let rows = vec![
        vec![format!("Last DPS paid (FY{})", ind.last_dps_year), euro(ind.last_dps)],
        vec![
            format!("Trailing yield (price {})", euro(ind.reference_price)),
            pct(ind.trailing_yield),
        ],
        vec!["Payout policy".into(), ind.payout_policy.clone()],
        vec![
            format!("Expected DPS (FY{})", ind.expected_dps_year),
            format!("{} ({})", euro(ind.expected_dps), ind.expected_growth),
        ],
        vec!["Peer yield average".into(), pct(dashboard.peer_yield_average)],
    ];
    let table = data_table(
        "Key dividend indicators",
        &["Indicator", "Value"],
        rows,
        Some(vec![Constraint::Percentage(40), Constraint::Percentage(60)]),
    );
    f.render_widget(table, chunks[0]);

    let conclusions = &dashboard.dataset.conclusions;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from("Strengths").style(bold.fg(Color::Green))];
    lines.extend(conclusions.strengths.iter().map(|s| Line::from(format!("  + {s}"))));
    lines.push(Line::from(""));
    lines.push(Line::from("Risks").style(bold.fg(Color::Red)));
    lines.extend(conclusions.risks.iter().map(|s| Line::from(format!("  - {s}"))));
    lines.push(Line::from(""));
    lines.push(Line::from(conclusions.summary.as_str()));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Conclusions (as of {}) ", company.as_of)),
        );
    f.render_widget(panel, chunks[1]);
}
