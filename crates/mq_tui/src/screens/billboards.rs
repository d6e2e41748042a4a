//! Billboards screen: the showtime schedule
//!
//! The editor never accepts an end time. It is derived live from the
//! selected movie's runtime whenever the movie or the start time changes,
//! and derived again by the store when the showtime is submitted.

use chrono::{Local, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::{error, warn};

use mq_api::NewBillboard;
use mq_store::{NewShowtime, ReservationStore, schedule};

use crate::theme::Theme;
use crate::widgets;

use super::{EditMode, ViewState, cycle_id, move_selection};

/// Editor form for a showtime. Date and start time are edited as text in
/// wire format; movie and room are cycled through the cached collections.
#[derive(Debug, Clone)]
pub struct ShowtimeForm {
    pub date: String,
    pub start_time: String,
    /// Derived, display-only. None until a movie is selected and the start
    /// time parses.
    pub end_time: Option<NaiveTime>,
    /// 0 means no movie selected yet
    pub movie_id: i64,
    /// 0 means no room selected yet
    pub room_id: i64,
    pub field: ShowtimeField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowtimeField {
    Date,
    Start,
    Movie,
    Room,
}

impl ShowtimeField {
    fn next(self) -> Self {
        match self {
            ShowtimeField::Date => ShowtimeField::Start,
            ShowtimeField::Start => ShowtimeField::Movie,
            ShowtimeField::Movie => ShowtimeField::Room,
            ShowtimeField::Room => ShowtimeField::Date,
        }
    }

    fn prev(self) -> Self {
        match self {
            ShowtimeField::Date => ShowtimeField::Room,
            ShowtimeField::Start => ShowtimeField::Date,
            ShowtimeField::Movie => ShowtimeField::Start,
            ShowtimeField::Room => ShowtimeField::Movie,
        }
    }
}

impl ShowtimeForm {
    /// Defaults for a new showtime: today, now, no movie or room selected.
    pub fn seed_add() -> Self {
        let now = Local::now();
        Self {
            date: schedule::format_date(now.date_naive()),
            start_time: schedule::format_time(now.time()),
            end_time: None,
            movie_id: 0,
            room_id: 0,
            field: ShowtimeField::Date,
        }
    }

    /// Reconstruct editor state from a stored billboard: the calendar date
    /// (which may arrive with a datetime suffix) recombined with the
    /// separately stored start/end time-of-day strings.
    pub fn seed_edit(billboard: &mq_api::Billboard) -> Self {
        let date = schedule::parse_wire_date(&billboard.date)
            .map(schedule::format_date)
            .unwrap_or_else(|| billboard.date.clone());
        let start_time = schedule::parse_wire_time(&billboard.start_time)
            .map(schedule::format_time)
            .unwrap_or_else(|| billboard.start_time.clone());
        Self {
            date,
            start_time,
            end_time: schedule::parse_wire_time(&billboard.end_time),
            movie_id: billboard.movie_id,
            room_id: billboard.room_id,
            field: ShowtimeField::Date,
        }
    }

    /// Re-derive the end time from the current movie and start time.
    pub fn recompute_end(&mut self, store: &ReservationStore) {
        let runtime = store
            .movies()
            .iter()
            .find(|m| m.id == self.movie_id)
            .map(|m| m.length_minutes);
        self.end_time = match (schedule::parse_wire_time(&self.start_time), runtime) {
            (Some(start), Some(minutes)) => Some(schedule::derive_end_time(start, minutes)),
            _ => None,
        };
    }
}

/// Billboards screen controller
pub struct BillboardsScreen {
    pub state: ViewState,
    pub selected: usize,
    pub form: ShowtimeForm,
}

impl BillboardsScreen {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            selected: 0,
            form: ShowtimeForm::seed_add(),
        }
    }

    /// Handle a key event. Returns a status message to surface when an
    /// action fails; the view state is left unchanged on failure.
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
        let count = store.billboards().len();
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
                self.form = ShowtimeForm::seed_add();
                self.form.recompute_end(store);
                self.state = ViewState::Editing(EditMode::Add);
                None
            }
            KeyCode::Char('e') => {
                match store.billboards().get(self.selected) {
                    Some(billboard) => {
                        self.form = ShowtimeForm::seed_edit(billboard);
                        self.state = ViewState::Editing(EditMode::Edit(billboard.id));
                        None
                    }
                    None => None,
                }
            }
            KeyCode::Char('d') => self.delete_selected(store).await,
            KeyCode::Char('R') => {
                store.fetch_billboards().await;
                self.selected = move_selection(self.selected, 0, store.billboards().len());
                None
            }
            _ => None,
        }
    }

    async fn delete_selected(&mut self, store: &ReservationStore) -> Option<String> {
        let billboard = store.billboards().get(self.selected).cloned()?;
        match store.api().delete_billboard(billboard.id).await {
            Ok(()) => {
                store.fetch_billboards().await;
                self.selected = move_selection(self.selected, 0, store.billboards().len());
                None
            }
            Err(err) => {
                error!(error = %err, id = billboard.id, "Error deleting billboard");
                Some(format!("Error deleting billboard: {err}"))
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
                let delta = if key.code == KeyCode::Left { -1 } else { 1 };
                match self.form.field {
                    ShowtimeField::Movie => {
                        let ids: Vec<i64> = store.movies().iter().map(|m| m.id).collect();
                        self.form.movie_id = cycle_id(self.form.movie_id, delta, &ids);
                        self.form.recompute_end(store);
                    }
                    ShowtimeField::Room => {
                        let ids: Vec<i64> = store.rooms().iter().map(|r| r.id).collect();
                        self.form.room_id = cycle_id(self.form.room_id, delta, &ids);
                    }
                    _ => {}
                }
                None
            }
            KeyCode::Backspace => {
                match self.form.field {
                    ShowtimeField::Date => {
                        self.form.date.pop();
                    }
                    ShowtimeField::Start => {
                        self.form.start_time.pop();
                        self.form.recompute_end(store);
                    }
                    _ => {}
                }
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == ':' => {
                match self.form.field {
                    ShowtimeField::Date => self.form.date.push(c),
                    ShowtimeField::Start => {
                        self.form.start_time.push(c);
                        self.form.recompute_end(store);
                    }
                    _ => {}
                }
                None
            }
            _ => None,
        }
    }

    async fn submit(&mut self, mode: EditMode, store: &ReservationStore) -> Option<String> {
        if self.form.movie_id == 0 || self.form.room_id == 0 {
            let msg = "A movie and a room must be selected".to_string();
            warn!("{msg}");
            return Some(msg);
        }
        let Some(date) = schedule::parse_wire_date(&self.form.date) else {
            return Some(format!("Invalid date: {}", self.form.date));
        };
        let Some(start_time) = schedule::parse_wire_time(&self.form.start_time) else {
            return Some(format!("Invalid start time: {}", self.form.start_time));
        };

        let result = match mode {
            EditMode::Add => {
                let input = NewShowtime {
                    date,
                    start_time,
                    movie_id: self.form.movie_id,
                    room_id: self.form.room_id,
                };
                store
                    .create_billboard(&input)
                    .await
                    .map_err(|err| err.to_string())
            }
            EditMode::Edit(id) => self.update_existing(id, date, start_time, store).await,
        };

        match result {
            Ok(()) => {
                self.state = ViewState::List;
                None
            }
            Err(msg) => {
                error!(error = %msg, "Billboard submit failed");
                Some(msg)
            }
        }
    }

    async fn update_existing(
        &self,
        id: i64,
        date: chrono::NaiveDate,
        start_time: NaiveTime,
        store: &ReservationStore,
    ) -> Result<(), String> {
        let movie = store
            .movies()
            .iter()
            .find(|m| m.id == self.form.movie_id)
            .cloned()
            .ok_or_else(|| format!("Movie with id {} not found", self.form.movie_id))?;

        let end_time = schedule::derive_end_time(start_time, movie.length_minutes);
        let body = NewBillboard {
            date: schedule::format_date(date),
            start_time: schedule::format_time(start_time),
            end_time: schedule::format_time(end_time),
            movie_id: self.form.movie_id,
            room_id: self.form.room_id,
            status: true,
        };

        store
            .api()
            .update_billboard(id, &body)
            .await
            .map_err(|err| err.to_string())?;
        store.fetch_billboards().await;
        Ok(())
    }
}

impl Default for BillboardsScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the billboards screen
pub fn render_billboards(
    f: &mut Frame,
    area: Rect,
    screen: &BillboardsScreen,
    store: &ReservationStore,
    theme: &Theme,
) {
    if screen.state == ViewState::Loading || store.is_loading() {
        widgets::loading_message(f, area, "Loading billboards...", theme);
        return;
    }

    render_list(f, area, screen, store, theme);

    if let ViewState::Editing(mode) = screen.state {
        render_editor(f, area, screen, mode, store, theme);
    }
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    screen: &BillboardsScreen,
    store: &ReservationStore,
    theme: &Theme,
) {
    let billboards = store.billboards();

    let items: Vec<ListItem> = if billboards.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No billboards scheduled",
            Style::default().fg(theme.muted),
        ))]
    } else {
        billboards
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let movie_name = store
                    .movie_name(b.movie_id)
                    .unwrap_or_else(|| format!("movie #{}", b.movie_id));
                let room_name = store
                    .room_name(b.room_id)
                    .unwrap_or_else(|| format!("room #{}", b.room_id));
                let day = b.date.split('T').next().unwrap_or(&b.date);

                let row_style = if i == screen.selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };

                ListItem::new(
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(
                            theme.status_indicator(b.status),
                            Style::default().fg(theme.status_color(b.status)),
                        ),
                        Span::raw(" "),
                        Span::styled(format!("{day:<12}"), Style::default().fg(theme.muted)),
                        Span::styled(
                            format!("{} - {}  ", b.start_time, b.end_time),
                            Style::default().fg(theme.info),
                        ),
                        Span::styled(format!("{movie_name:<24}"), Style::default().fg(theme.text)),
                        Span::styled(room_name, Style::default().fg(theme.muted)),
                    ])
                    .style(row_style),
                )
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(
                " BILLBOARDS ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );

    f.render_widget(list, area);
}

fn render_editor(
    f: &mut Frame,
    area: Rect,
    screen: &BillboardsScreen,
    mode: EditMode,
    store: &ReservationStore,
    theme: &Theme,
) {
    let overlay = widgets::centered_rect(area, 60, 60);
    f.render_widget(Clear, overlay);

    let form = &screen.form;
    let movie_label = store
        .movie_name(form.movie_id)
        .unwrap_or_else(|| "(select with ←/→)".to_string());
    let room_label = store
        .room_name(form.room_id)
        .unwrap_or_else(|| "(select with ←/→)".to_string());
    let end_label = form
        .end_time
        .map(schedule::format_time)
        .unwrap_or_else(|| "—".to_string());

    let title = match mode {
        EditMode::Add => " ADD BILLBOARD ",
        EditMode::Edit(_) => " EDIT BILLBOARD ",
    };

    let lines = vec![
        widgets::input_line(
            "Date",
            form.date.clone(),
            form.field == ShowtimeField::Date,
            theme,
        ),
        widgets::input_line(
            "Start time",
            form.start_time.clone(),
            form.field == ShowtimeField::Start,
            theme,
        ),
        widgets::input_line(
            "Movie",
            movie_label,
            form.field == ShowtimeField::Movie,
            theme,
        ),
        widgets::input_line("Room", room_label, form.field == ShowtimeField::Room, theme),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("End time    ", Style::default().fg(theme.muted)),
            Span::styled(end_label, Style::default().fg(theme.info)),
            Span::styled("  (derived)", Style::default().fg(theme.muted)),
        ]),
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
