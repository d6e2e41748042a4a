//! mq_tui - Terminal UI for Marquee
//!
//! This crate provides:
//! - The ratatui-based console shell (header, screen body, footer)
//! - Three screens (billboards, movies, rooms) with list/editor states
//! - Keyboard navigation and the event loop

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use thiserror::Error;

use mq_store::ReservationStore;

pub mod screens;
pub mod theme;
pub mod widgets;

use screens::{BillboardsScreen, MoviesScreen, RoomsScreen, ViewState};
use theme::Theme;

/// TUI errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Available screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Billboards,
    Movies,
    Rooms,
}

impl Screen {
    /// Get screen title
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Billboards => "Billboards",
            Screen::Movies => "Movies",
            Screen::Rooms => "Rooms",
        }
    }

    /// Get keyboard shortcut
    pub fn shortcut(&self) -> char {
        match self {
            Screen::Billboards => 'b',
            Screen::Movies => 'm',
            Screen::Rooms => 'r',
        }
    }

    /// All screens in order
    pub fn all() -> &'static [Screen] {
        &[Screen::Billboards, Screen::Movies, Screen::Rooms]
    }
}

/// Application state
pub struct App {
    pub current_screen: Screen,
    pub should_quit: bool,
    pub last_error: Option<String>,
    pub billboards: BillboardsScreen,
    pub movies: MoviesScreen,
    pub rooms: RoomsScreen,
    store: Arc<ReservationStore>,
    theme: Theme,
}

impl App {
    /// Create a new app instance around the shared store
    pub fn new(store: Arc<ReservationStore>) -> Self {
        Self {
            current_screen: Screen::Billboards,
            should_quit: false,
            last_error: None,
            billboards: BillboardsScreen::new(),
            movies: MoviesScreen::new(),
            rooms: RoomsScreen::new(),
            store,
            theme: Theme::default(),
        }
    }

    /// Mount: fetch all three collections, then show the lists.
    pub async fn init(&mut self) {
        self.store.refresh_all().await;
        self.billboards.state = ViewState::List;
        self.movies.state = ViewState::List;
        self.rooms.state = ViewState::List;
    }

    fn is_editing(&self) -> bool {
        match self.current_screen {
            Screen::Billboards => self.billboards.state.is_editing(),
            Screen::Movies => self.movies.state.is_editing(),
            Screen::Rooms => self.rooms.state.is_editing(),
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) {
        // Global shortcuts only apply outside the editor, where every key
        // belongs to the form.
        if !self.is_editing() {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                self.should_quit = true;
                return;
            }

            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Tab => {
                    let all = Screen::all();
                    let idx = all
                        .iter()
                        .position(|s| *s == self.current_screen)
                        .unwrap_or(0);
                    self.current_screen = all[(idx + 1) % all.len()];
                    return;
                }
                KeyCode::Char(c) => {
                    if let Some(screen) = Screen::all().iter().find(|s| s.shortcut() == c) {
                        self.current_screen = *screen;
                        return;
                    }
                }
                _ => {}
            }
        }

        self.last_error = match self.current_screen {
            Screen::Billboards => self.billboards.handle_key(key, &self.store).await,
            Screen::Movies => self.movies.handle_key(key, &self.store).await,
            Screen::Rooms => self.rooms.handle_key(key, &self.store).await,
        };
    }

    /// Render the full console frame
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Screen body
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        match self.current_screen {
            Screen::Billboards => screens::render_billboards(
                f,
                chunks[1],
                &self.billboards,
                &self.store,
                &self.theme,
            ),
            Screen::Movies => {
                screens::render_movies(f, chunks[1], &self.movies, &self.store, &self.theme);
            }
            Screen::Rooms => {
                screens::render_rooms(f, chunks[1], &self.rooms, &self.store, &self.theme);
            }
        }

        self.render_footer(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut spans = vec![Span::styled(
            "  M A R Q U E E  ",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )];

        for screen in Screen::all() {
            let style = if *screen == self.current_screen {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("[{}] {}", screen.shortcut(), screen.title()),
                style,
            ));
        }

        let header = Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.muted)),
            )
            .style(Style::default().bg(theme.bg_secondary));

        f.render_widget(header, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut line = if self.is_editing() {
            widgets::key_hints(
                &[
                    ("[Enter]", "Save"),
                    ("[Esc]", "Cancel"),
                    ("[Tab]", "Next field"),
                    ("[←/→]", "Choose"),
                ],
                theme,
            )
        } else {
            widgets::key_hints(
                &[
                    ("[a]", "Add"),
                    ("[e]", "Edit"),
                    ("[d]", "Delete"),
                    ("[R]", "Refresh"),
                    ("[Tab]", "Screen"),
                    ("[q]", "Quit"),
                ],
                theme,
            )
        };

        if let Some(ref message) = self.last_error {
            line.spans.push(Span::styled(
                format!("  ✗ {message}"),
                Style::default().fg(theme.error),
            ));
        }

        let footer = Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.muted)),
            )
            .style(Style::default().bg(theme.bg_secondary));

        f.render_widget(footer, area);
    }
}

/// Run the console until the user quits.
pub async fn run(store: Arc<ReservationStore>, tick_ms: u64) -> Result<(), TuiError> {
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, store, tick_ms).await;
    ratatui::restore();
    result
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    store: Arc<ReservationStore>,
    tick_ms: u64,
) -> Result<(), TuiError> {
    let mut app = App::new(store);

    // First frame shows the loading states while the mount fetches run.
    terminal.draw(|f| app.render(f))?;
    app.init().await;

    while !app.should_quit {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(tick_ms))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key).await;
        }
    }

    Ok(())
}
