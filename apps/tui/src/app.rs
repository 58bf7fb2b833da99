//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dividendlens_core::Dashboard;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};
use tracing::info;

use crate::screens::{Screen, ScreenId};
use crate::widgets::status_bar;

/// Application state.
pub(crate) struct App {
    /// Data every screen renders from.
    pub dashboard: Dashboard,
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Per-tab screen state, in tab order.
    pub screens: Vec<Screen>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

impl App {
    pub(crate) fn new(dashboard: Dashboard) -> Self {
        let screens = ScreenId::ALL
            .iter()
            .map(|id| Screen::new(*id, &dashboard))
            .collect();

        let status = dashboard
            .analysis
            .warning
            .clone()
            .unwrap_or_else(|| "Ready: press ? for help".to_string());

        Self {
            dashboard,
            active_tab: 0,
            screens,
            should_quit: false,
            status,
            show_help: false,
        }
    }

    fn current_screen(&self) -> &Screen {
        &self.screens[self.active_tab]
    }

    fn current_screen_mut(&mut self) -> &mut Screen {
        &mut self.screens[self.active_tab]
    }

    fn select_tab(&mut self, idx: usize) {
        self.active_tab = idx;
        self.status = self.screens[idx].id.to_string();
    }
}

/// Entry point: sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(dashboard: Dashboard) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(dashboard));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    info!(tabs = app.screens.len(), "tui started");

    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("tui stopped");
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.screens.len() {
                app.select_tab(idx);
            }
            return;
        }
        KeyCode::Tab => {
            let next = (app.active_tab + 1) % app.screens.len();
            app.select_tab(next);
            return;
        }
        KeyCode::BackTab => {
            let prev = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            app.select_tab(prev);
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    app.current_screen_mut().handle_key(code, modifiers);
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let tab_titles: Vec<Line> = app
        .screens
        .iter()
        .map(|s| Line::from(s.id.to_string()))
        .collect();

    let company = &app.dashboard.dataset.company;
    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" DividendLens: {} ({}) ", company.name, company.ticker)),
        )
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    app.current_screen().draw(f, chunks[1], &app.dashboard);

    f.render_widget(status_bar(&app.status), chunks[2]);

    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-6          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Analysis:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓          Select section"),
        Line::from("  Enter/Space  Expand or collapse section"),
        Line::from("  e / c        Expand all / collapse all"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help: press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dividendlens_core::{AnalysisDocument, AnalysisView, Dataset};
    use dividendlens_core::analysis::SectionView;

    fn app() -> App {
        let dataset = Dataset::builtin().expect("builtin dataset");
        let analysis = AnalysisView {
            sections: vec![SectionView {
                title: "Introduzione".into(),
                body: "Testo".into(),
                expanded: true,
            }],
            status: AnalysisDocument::from_text("Testo").status,
            warning: None,
        };
        App::new(Dashboard::from_parts(dataset, analysis))
    }

    #[test]
    fn tab_navigation_wraps() {
        let mut app = app();
        handle_key(&mut app, KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(app.active_tab, app.screens.len() - 1);
        handle_key(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.active_tab, 0);
    }

    #[test]
    fn number_keys_select_tabs() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('6'), KeyModifiers::NONE);
        assert_eq!(app.current_screen().id, ScreenId::Analysis);
        assert_eq!(app.status, "Analysis");

        handle_key(&mut app, KeyCode::Char('9'), KeyModifiers::NONE);
        assert_eq!(app.current_screen().id, ScreenId::Analysis);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.show_help);
        handle_key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn missing_document_warning_starts_in_status_bar() {
        let dataset = Dataset::builtin().expect("builtin dataset");
        let doc = dividendlens_core::load_analysis(std::path::Path::new("/nonexistent/a.txt"));
        let view = AnalysisView::build(&doc, &Default::default(), &[]);
        let app = App::new(Dashboard::from_parts(dataset, view));
        assert!(app.status.contains("not found"));
    }
}
