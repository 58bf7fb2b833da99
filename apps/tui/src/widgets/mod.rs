//! Reusable TUI widgets.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}"))
        .style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White),
        )
}

/// Bordered table with a bold cyan header row.
///
/// Column widths are shared equally unless `widths` is given.
pub(crate) fn data_table<'a>(
    title: &'a str,
    headers: &[&'a str],
    rows: Vec<Vec<String>>,
    widths: Option<Vec<Constraint>>,
) -> Table<'a> {
    let header = Row::new(headers.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let widths = widths.unwrap_or_else(|| {
        let n = headers.len().max(1) as u32;
        vec![Constraint::Ratio(1, n); headers.len()]
    });

    Table::new(rows.into_iter().map(Row::new), widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} ")),
        )
}

/// "€ 1.78"
pub(crate) fn euro(v: f64) -> String {
    format!("€ {v:.2}")
}

/// "5.9%", or "N/A" when undefined.
pub(crate) fn pct(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(euro(1.78), "€ 1.78");
        assert_eq!(pct(Some(41.04)), "41.0%");
        assert_eq!(pct(None), "N/A");
    }
}
