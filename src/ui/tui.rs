//! Interactive terminal UI.
//!
//! The event loop owns the [`Orchestrator`]: key presses mutate the search
//! state, completions are drained before every frame, and rendering reads the
//! state through the presenter.

use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListState, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame, Terminal};

use super::components::theme::{ThemePalette, chip_style, kbd_style};
use super::presenter::{
    ENTER_QUERY_TEXT, LOADING_TEXT, NO_MATCHES_TEXT, ResultsView, article_lines, article_view,
    result_items, results_view,
};
use crate::api::SearchApi;
use crate::search::Orchestrator;

const TICK: Duration = Duration::from_millis(50);

const QUERY_PLACEHOLDER: &str = "Enter your search query";

/// Footer entries: (key, action). Entries after `SHORT_LEGEND` only show in
/// the long legend.
const LEGEND: &[(&str, &str)] = &[
    ("F1", "help"),
    ("Enter", "search/open"),
    ("Tab", "focus"),
    ("F2", "group"),
    ("F3", "embedding"),
    ("F4", "AI validation"),
    ("F11", "clear"),
    ("Esc/F10", "quit"),
    ("↑/↓", "move"),
    ("Home/End", "first/last"),
];
const SHORT_LEGEND: usize = 7;

/// Footer hotkey legend as plain text.
pub fn footer_legend(long: bool) -> String {
    legend_entries(long)
        .iter()
        .map(|(key, action)| format!("{key} {action}"))
        .collect::<Vec<_>>()
        .join(" · ")
}

fn legend_entries(long: bool) -> &'static [(&'static str, &'static str)] {
    if long { LEGEND } else { &LEGEND[..SHORT_LEGEND] }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Results,
}

pub struct App<A: SearchApi> {
    orchestrator: Orchestrator<A>,
    palette: ThemePalette,
    focus: Focus,
    cursor: usize,
    long_legend: bool,
    should_quit: bool,
}

impl<A: SearchApi> App<A> {
    pub fn new(orchestrator: Orchestrator<A>, palette: ThemePalette) -> Self {
        Self {
            orchestrator,
            palette,
            focus: Focus::Query,
            cursor: 0,
            long_legend: false,
            should_quit: false,
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<A> {
        &self.orchestrator
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Load categories and, if given, run an initial search.
    pub fn start(&mut self, initial_query: Option<&str>) {
        self.orchestrator.load_categories();
        if let Some(query) = initial_query {
            self.orchestrator.state_mut().set_query(query);
            self.submit();
        }
    }

    /// Apply completions that have arrived; keeps the cursor in range.
    pub fn tick(&mut self) {
        if self.orchestrator.drain() > 0 {
            self.clamp_cursor();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.should_quit = true,
            KeyCode::F(1) => self.long_legend = !self.long_legend,
            KeyCode::F(2) => self.orchestrator.state_mut().cycle_category(),
            KeyCode::F(3) => self.orchestrator.state_mut().cycle_embedding_type(),
            KeyCode::F(4) => self.orchestrator.state_mut().toggle_validation(),
            KeyCode::F(11) => {
                self.orchestrator.state_mut().set_query("");
                self.focus = Focus::Query;
            }
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Enter => match self.focus {
                Focus::Query => self.submit(),
                Focus::Results => self.open_at_cursor(),
            },
            code => match self.focus {
                Focus::Query => self.edit_query(code),
                Focus::Results => self.move_cursor(code),
            },
        }
    }

    fn submit(&mut self) {
        if self.orchestrator.submit_search().is_some() {
            self.cursor = 0;
        }
    }

    fn open_at_cursor(&mut self) {
        let Some(id) = self
            .orchestrator
            .state()
            .results()
            .get(self.cursor)
            .map(|r| r.id.clone())
        else {
            return;
        };
        self.orchestrator.select_article(id);
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Query if !self.orchestrator.state().results().is_empty() => Focus::Results,
            _ => Focus::Query,
        };
    }

    fn edit_query(&mut self, code: KeyCode) {
        let state = self.orchestrator.state_mut();
        match code {
            KeyCode::Char(c) => state.push_query_char(c),
            KeyCode::Backspace => state.pop_query_char(),
            KeyCode::Down if !state.results().is_empty() => self.focus = Focus::Results,
            _ => {}
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let len = self.orchestrator.state().results().len();
        if len == 0 {
            return;
        }
        self.cursor = match code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (self.cursor + 1).min(len - 1),
            KeyCode::Home => 0,
            KeyCode::End => len - 1,
            _ => self.cursor,
        };
    }

    fn clamp_cursor(&mut self) {
        let len = self.orchestrator.state().results().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        if len == 0 {
            self.focus = Focus::Query;
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let p = self.palette;
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(p.bg).fg(p.fg)),
            area,
        );

        let [filters_area, query_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);
        let [results_area, article_area] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
                .areas(body_area);

        self.render_filters(frame, filters_area);
        self.render_query(frame, query_area);
        self.render_results(frame, results_area);
        self.render_article(frame, article_area);
        self.render_footer(frame, footer_area);
    }

    fn render_filters(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let state = self.orchestrator.state();
        let filters = state.filters();
        let group = filters.category.as_deref().unwrap_or("All groups");
        let validation = if filters.use_validation { "on" } else { "off" };

        let line = Line::from(vec![
            Span::styled("Group: ", p.hint_style()),
            Span::styled(group.to_string(), chip_style(p)),
            Span::styled(format!("  ({} available)", state.categories().len()), p.hint_style()),
            Span::styled("   Embedding: ", p.hint_style()),
            Span::styled(filters.embedding_type.to_string(), chip_style(p)),
            Span::styled("   AI validation: ", p.hint_style()),
            Span::styled(validation, chip_style(p)),
        ]);
        let block = Block::bordered()
            .title(Span::styled(" nova ", p.title()))
            .border_style(p.border_style());
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_query(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let focused = self.focus == Focus::Query;
        let query = self.orchestrator.state().query();

        let mut spans = if query.is_empty() {
            vec![Span::styled(QUERY_PLACEHOLDER, p.hint_style())]
        } else {
            vec![Span::raw(query.to_string())]
        };
        if focused {
            spans.insert(usize::from(!query.is_empty()), Span::styled("█", p.cursor_style()));
        }

        let border = if focused {
            p.border_focus_style()
        } else {
            p.border_style()
        };
        let block = Block::bordered().title(" Search ").border_style(border);
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let state = self.orchestrator.state();
        let border = if self.focus == Focus::Results {
            p.border_focus_style()
        } else {
            p.border_style()
        };
        let block = Block::bordered()
            .title(Span::styled(
                format!(" Results ({}) ", state.results().len()),
                p.title(),
            ))
            .border_style(border);

        let message = match results_view(state) {
            ResultsView::List(rows) => {
                let cursor = (self.focus == Focus::Results).then_some(self.cursor);
                let list = List::new(result_items(&rows, cursor, p)).block(block);
                let mut list_state = ListState::default().with_selected(Some(self.cursor));
                frame.render_stateful_widget(list, area, &mut list_state);
                return;
            }
            ResultsView::Loading => LOADING_TEXT,
            ResultsView::EnterQuery => ENTER_QUERY_TEXT,
            ResultsView::NoMatches => NO_MATCHES_TEXT,
        };
        frame.render_widget(
            Paragraph::new(Line::styled(message, p.hint_style())).block(block),
            area,
        );
    }

    fn render_article(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let block = Block::bordered()
            .border_style(p.border_style())
            .style(p.surface_style());
        let lines = match self.orchestrator.state().selected_article() {
            Some(article) => article_lines(&article_view(article), p),
            None => Vec::new(),
        };
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let mut spans = Vec::new();
        for (idx, (key, action)) in legend_entries(self.long_legend).iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" · ", p.hint_style()));
            }
            spans.push(Span::styled(*key, kbd_style(p)));
            spans.push(Span::styled(format!(" {action}"), p.hint_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Run the interactive UI until the user quits.
pub fn run_interactive<A: SearchApi>(mut app: App<A>) -> Result<()> {
    let mut terminal = ratatui::init();
    let outcome = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    outcome
}

fn event_loop<A: SearchApi>(terminal: &mut DefaultTerminal, app: &mut App<A>) -> Result<()> {
    while !app.should_quit() {
        app.tick();
        terminal
            .draw(|frame| app.render(frame))
            .context("failed to draw frame")?;
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

/// Wait for every pending request, render a single frame off-screen and
/// return it as text.
pub async fn render_once<A: SearchApi>(app: &mut App<A>, width: u16, height: u16) -> Result<String> {
    app.orchestrator.settle().await;
    app.clamp_cursor();

    let mut terminal = Terminal::new(TestBackend::new(width, height))
        .context("failed to create headless terminal")?;
    terminal.draw(|frame| app.render(frame))?;

    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width.max(1));
    let text = buffer
        .content
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(text)
}
