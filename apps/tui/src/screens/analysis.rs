//! "Analysis" screen: the segmented analysis document as collapsible sections.

use crossterm::event::{KeyCode, KeyModifiers};
use dividendlens_core::{AnalysisView, SectionView};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Lines kept visible above the selected heading when scrolling.
const SCROLL_CONTEXT: usize = 2;

pub(crate) struct AnalysisScreen {
    sections: Vec<SectionView>,
    /// Current expansion state, seeded from each section's default.
    expanded: Vec<bool>,
    selected: usize,
    warning: Option<String>,
}

impl AnalysisScreen {
    pub(crate) fn new(view: &AnalysisView) -> Self {
        Self {
            expanded: view.sections.iter().map(|s| s.expanded).collect(),
            sections: view.sections.clone(),
            selected: 0,
            warning: view.warning.clone(),
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let warning_height = if self.warning.is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(warning_height), // Warning banner
                Constraint::Min(1),                 // Sections
            ])
            .split(area);

        if let Some(warning) = &self.warning {
            let banner = Paragraph::new(warning.as_str())
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Warning "));
            f.render_widget(banner, chunks[0]);
        }

        // Borders take one column on each side.
        let inner_width = chunks[1].width.saturating_sub(2);
        let body = Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset(inner_width), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Text analysis ({} sections) ", self.sections.len())),
            );
        f.render_widget(body, chunks[1]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.sections.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(open) = self.expanded.get_mut(self.selected) {
                    *open = !*open;
                }
            }
            KeyCode::Char('e') => self.expanded.fill(true),
            KeyCode::Char('c') => self.expanded.fill(false),
            _ => {}
        }
    }

    /// Heading and body lines for every section, bodies only when expanded.
    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        for (i, section) in self.sections.iter().enumerate() {
            let open = self.expanded[i];
            let marker = if open { "▾" } else { "▸" };
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(format!("{marker} {}", section.title)).style(style));

            if open {
                lines.extend(section.body.lines().map(|l| Line::from(format!("  {l}"))));
                lines.push(Line::from(""));
            }
        }
        lines
    }

    /// Unwrapped line index of the selected section's heading.
    fn selected_line(&self) -> usize {
        self.sections[..self.selected]
            .iter()
            .zip(&self.expanded)
            .map(|(s, open)| if *open { s.body.lines().count() + 2 } else { 1 })
            .sum()
    }

    /// Row of the selected heading once everything above it is wrapped to
    /// `width` columns.
    fn selected_row(&self, width: u16) -> usize {
        let mut above = self.lines();
        above.truncate(self.selected_line());
        if above.is_empty() {
            return 0;
        }
        Paragraph::new(above)
            .wrap(Wrap { trim: false })
            .line_count(width)
    }

    fn scroll_offset(&self, width: u16) -> u16 {
        let row = self.selected_row(width).saturating_sub(SCROLL_CONTEXT);
        u16::try_from(row).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dividendlens_core::DocumentStatus;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn section(title: &str, body: &str, expanded: bool) -> SectionView {
        SectionView {
            title: title.into(),
            body: body.into(),
            expanded,
        }
    }

    fn screen() -> AnalysisScreen {
        AnalysisScreen::new(&AnalysisView {
            sections: vec![
                section("Introduzione", "uno\ndue", true),
                section("Politica", "tre", false),
                section("Dividendi storici", "quattro\ncinque\nsei", true),
            ],
            status: DocumentStatus::Loaded,
            warning: None,
        })
    }

    fn press(screen: &mut AnalysisScreen, code: KeyCode) {
        screen.handle_key(code, KeyModifiers::NONE);
    }

    #[test]
    fn starts_with_default_expansion() {
        let s = screen();
        assert_eq!(s.expanded, vec![true, false, true]);
        assert_eq!(s.selected, 0);
    }

    #[test]
    fn selection_is_clamped() {
        let mut s = screen();
        press(&mut s, KeyCode::Up);
        assert_eq!(s.selected, 0);
        for _ in 0..5 {
            press(&mut s, KeyCode::Down);
        }
        assert_eq!(s.selected, 2);
    }

    #[test]
    fn enter_and_space_toggle_selected_section() {
        let mut s = screen();
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.expanded, vec![true, true, true]);
        press(&mut s, KeyCode::Char(' '));
        assert_eq!(s.expanded, vec![true, false, true]);
    }

    #[test]
    fn expand_and_collapse_all() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('c'));
        assert!(s.expanded.iter().all(|open| !open));
        press(&mut s, KeyCode::Char('e'));
        assert!(s.expanded.iter().all(|open| *open));
    }

    #[test]
    fn collapsed_sections_render_heading_only() {
        let s = screen();
        let text: Vec<String> = s.lines().iter().map(|l| l.to_string()).collect();
        assert_eq!(
            text,
            vec![
                "▾ Introduzione",
                "  uno",
                "  due",
                "",
                "▸ Politica",
                "▾ Dividendi storici",
                "  quattro",
                "  cinque",
                "  sei",
                "",
            ]
        );
    }

    #[test]
    fn selected_line_tracks_expansion() {
        let mut s = screen();
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        assert_eq!(s.selected_line(), 5);
        assert_eq!(s.selected_row(80), 5);
        assert_eq!(s.scroll_offset(80), 3);

        press(&mut s, KeyCode::Char('c'));
        assert_eq!(s.selected_line(), 2);
        assert_eq!(s.scroll_offset(80), 0);
    }

    #[test]
    fn selected_heading_stays_visible_with_wrapped_bodies() {
        let body = vec!["parola"; 60].join(" ");
        let sections = (1..=4)
            .map(|i| section(&format!("Sezione{i}"), &body, true))
            .collect();
        let mut s = AnalysisScreen::new(&AnalysisView {
            sections,
            status: DocumentStatus::Loaded,
            warning: None,
        });
        for _ in 0..3 {
            press(&mut s, KeyCode::Down);
        }
        assert!(s.selected_row(56) > s.selected_line());

        let mut terminal = Terminal::new(TestBackend::new(60, 14)).expect("terminal");
        terminal.draw(|f| s.draw(f, f.area())).expect("draw");
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Sezione4"));
    }

    #[test]
    fn empty_view_ignores_keys() {
        let mut s = AnalysisScreen::new(&AnalysisView {
            sections: Vec::new(),
            status: DocumentStatus::Loaded,
            warning: None,
        });
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.selected, 0);
        assert!(s.lines().is_empty());
        assert_eq!(s.selected_line(), 0);
    }
}
