//! Movies screen: the catalogue behind the billboard
//!
//! Runtime edits made here feed the showtime end-time derivation, which is
//! why the store re-fetches movies before every billboard create.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::error;

use mq_api::{Genre, Movie, NewMovie};
use mq_store::ReservationStore;

use crate::theme::Theme;
use crate::widgets;

use super::{EditMode, ViewState, move_selection};

/// Editor form for a movie. Numeric fields are edited as digit strings and
/// parsed on submit.
#[derive(Debug, Clone)]
pub struct MovieForm {
    pub name: String,
    pub genre: Genre,
    pub allowed_age: String,
    pub length_minutes: String,
    pub field: MovieField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieField {
    Name,
    Genre,
    AllowedAge,
    Length,
}

impl MovieField {
    fn next(self) -> Self {
        match self {
            MovieField::Name => MovieField::Genre,
            MovieField::Genre => MovieField::AllowedAge,
            MovieField::AllowedAge => MovieField::Length,
            MovieField::Length => MovieField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            MovieField::Name => MovieField::Length,
            MovieField::Genre => MovieField::Name,
            MovieField::AllowedAge => MovieField::Genre,
            MovieField::Length => MovieField::AllowedAge,
        }
    }
}

impl MovieForm {
    pub fn seed_add() -> Self {
        Self {
            name: String::new(),
            genre: Genre::Action,
            allowed_age: "0".to_string(),
            length_minutes: "0".to_string(),
            field: MovieField::Name,
        }
    }

    pub fn seed_edit(movie: &Movie) -> Self {
        Self {
            name: movie.name.clone(),
            genre: movie.genre,
            allowed_age: movie.allowed_age.to_string(),
            length_minutes: movie.length_minutes.to_string(),
            field: MovieField::Name,
        }
    }

    fn cycle_genre(&mut self, delta: i64) {
        let all = Genre::all();
        let pos = all.iter().position(|g| *g == self.genre).unwrap_or(0) as i64;
        let next = (pos + delta).rem_euclid(all.len() as i64);
        self.genre = all[next as usize];
    }

    fn parse(&self) -> Result<NewMovie, String> {
        let allowed_age = self
            .allowed_age
            .parse::<u32>()
            .map_err(|_| format!("Invalid allowed age: {}", self.allowed_age))?;
        let length_minutes = self
            .length_minutes
            .parse::<u32>()
            .map_err(|_| format!("Invalid runtime: {}", self.length_minutes))?;
        Ok(NewMovie {
            name: self.name.clone(),
            genre: self.genre,
            allowed_age,
            length_minutes,
        })
    }
}

/// Movies screen controller
pub struct MoviesScreen {
    pub state: ViewState,
    pub selected: usize,
    pub form: MovieForm,
}

impl MoviesScreen {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            selected: 0,
            form: MovieForm::seed_add(),
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent, store: &ReservationStore) -> Option<String> {
        match self.state {
            ViewState::Loading => None,
            ViewState::List => self.handle_list_key(key, store).await,
            ViewState::Editing(mode) => self.handle_editor_key(key, mode, store).await,
        }
    }

    async fn handle_list_key(
        &mut self,
        key: KeyEvent,
        store: &ReservationStore,
    ) -> Option<String> {
        let count = store.movies().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = move_selection(self.selected, -1, count);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = move_selection(self.selected, 1, count);
                None
            }
            KeyCode::Char('a') => {
                self.form = MovieForm::seed_add();
                self.state = ViewState::Editing(EditMode::Add);
                None
            }
            KeyCode::Char('e') => {
                match store.movies().get(self.selected) {
                    Some(movie) => {
                        self.form = MovieForm::seed_edit(movie);
                        self.state = ViewState::Editing(EditMode::Edit(movie.id));
                        None
                    }
                    None => None,
                }
            }
            KeyCode::Char('d') => self.delete_selected(store).await,
            KeyCode::Char('R') => {
                store.fetch_movies().await;
                self.selected = move_selection(self.selected, 0, store.movies().len());
                None
            }
            _ => None,
        }
    }

    async fn delete_selected(&mut self, store: &ReservationStore) -> Option<String> {
        let movie = store.movies().get(self.selected).cloned()?;
        match store.api().delete_movie(movie.id).await {
            Ok(()) => {
                store.fetch_movies().await;
                self.selected = move_selection(self.selected, 0, store.movies().len());
                None
            }
            Err(err) => {
                error!(error = %err, id = movie.id, "Error deleting movie");
                Some(format!("Error deleting movie: {err}"))
            }
        }
    }

    async fn handle_editor_key(
        &mut self,
        key: KeyEvent,
        mode: EditMode,
        store: &ReservationStore,
    ) -> Option<String> {
        match key.code {
            KeyCode::Esc => {
                self.state = ViewState::List;
                None
            }
            KeyCode::Enter => self.submit(mode, store).await,
            KeyCode::Tab | KeyCode::Down => {
                self.form.field = self.form.field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.field = self.form.field.prev();
                None
            }
            KeyCode::Left | KeyCode::Right => {
                if self.form.field == MovieField::Genre {
                    let delta = if key.code == KeyCode::Left { -1 } else { 1 };
                    self.form.cycle_genre(delta);
                }
                None
            }
            KeyCode::Backspace => {
                match self.form.field {
                    MovieField::Name => {
                        self.form.name.pop();
                    }
                    MovieField::AllowedAge => {
                        self.form.allowed_age.pop();
                    }
                    MovieField::Length => {
                        self.form.length_minutes.pop();
                    }
                    MovieField::Genre => {}
                }
                None
            }
            KeyCode::Char(c) => {
                match self.form.field {
                    MovieField::Name if !c.is_control() => self.form.name.push(c),
                    MovieField::AllowedAge if c.is_ascii_digit() => {
                        self.form.allowed_age.push(c);
                    }
                    MovieField::Length if c.is_ascii_digit() => {
                        self.form.length_minutes.push(c);
                    }
                    _ => {}
                }
                None
            }
            _ => None,
        }
    }

    async fn submit(&mut self, mode: EditMode, store: &ReservationStore) -> Option<String> {
        let body = match self.form.parse() {
            Ok(body) => body,
            Err(msg) => return Some(msg),
        };

        let result = match mode {
            EditMode::Add => store
                .api()
                .create_movie(&body)
                .await
                .map(|_| ())
                .map_err(|err| err.to_string()),
            EditMode::Edit(id) => store
                .api()
                .update_movie(id, &body)
                .await
                .map(|_| ())
                .map_err(|err| err.to_string()),
        };

        match result {
            Ok(()) => {
                store.fetch_movies().await;
                self.state = ViewState::List;
                None
            }
            Err(msg) => {
                error!(error = %msg, "Movie submit failed");
                Some(msg)
            }
        }
    }
}

impl Default for MoviesScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the movies screen
pub fn render_movies(
    f: &mut Frame,
    area: Rect,
    screen: &MoviesScreen,
    store: &ReservationStore,
    theme: &Theme,
) {
    if screen.state == ViewState::Loading {
        widgets::loading_message(f, area, "Loading movies...", theme);
        return;
    }

    render_list(f, area, screen, store, theme);

    if let ViewState::Editing(mode) = screen.state {
        render_editor(f, area, screen, mode, theme);
    }
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    screen: &MoviesScreen,
    store: &ReservationStore,
    theme: &Theme,
) {
    let movies = store.movies();

    let items: Vec<ListItem> = if movies.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No movies in the catalogue",
            Style::default().fg(theme.muted),
        ))]
    } else {
        movies
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let row_style = if i == screen.selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };

                ListItem::new(
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(format!("{:<28}", m.name), Style::default().fg(theme.text)),
                        Span::styled(
                            format!("{:<18}", m.genre.to_string()),
                            Style::default().fg(theme.genre_color(m.genre)),
                        ),
                        Span::styled(
                            format!("{:>8}  ", widgets::format_runtime(m.length_minutes)),
                            Style::default().fg(theme.info),
                        ),
                        Span::styled(format!("{}+", m.allowed_age), Style::default().fg(theme.muted)),
                    ])
                    .style(row_style),
                )
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(
                " MOVIES ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );

    f.render_widget(list, area);
}

fn render_editor(f: &mut Frame, area: Rect, screen: &MoviesScreen, mode: EditMode, theme: &Theme) {
    let overlay = widgets::centered_rect(area, 60, 60);
    f.render_widget(Clear, overlay);

    let form = &screen.form;
    let title = match mode {
        EditMode::Add => " ADD MOVIE ",
        EditMode::Edit(_) => " EDIT MOVIE ",
    };

    let lines = vec![
        widgets::input_line("Name", form.name.clone(), form.field == MovieField::Name, theme),
        widgets::input_line(
            "Genre",
            format!("{} (←/→)", form.genre),
            form.field == MovieField::Genre,
            theme,
        ),
        widgets::input_line(
            "Min. age",
            form.allowed_age.clone(),
            form.field == MovieField::AllowedAge,
            theme,
        ),
        widgets::input_line(
            "Runtime min",
            form.length_minutes.clone(),
            form.field == MovieField::Length,
            theme,
        ),
        Line::from(""),
        widgets::key_hints(&[("[Enter]", "Save"), ("[Esc]", "Cancel")], theme),
    ];

    let editor = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.bg_secondary));

    f.render_widget(editor, overlay);
}
