//! Rooms screen
//!
//! Deleting a room drops it from the cached list directly instead of
//! re-fetching; creates and updates re-fetch like the other screens.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::error;

use mq_api::{NewRoom, Room};
use mq_store::ReservationStore;

use crate::theme::Theme;
use crate::widgets;

use super::{EditMode, ViewState, move_selection};

/// Editor form for a room
#[derive(Debug, Clone)]
pub struct RoomForm {
    pub name: String,
    pub number: String,
    pub field: RoomField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    Name,
    Number,
}

impl RoomField {
    fn toggle(self) -> Self {
        match self {
            RoomField::Name => RoomField::Number,
            RoomField::Number => RoomField::Name,
        }
    }
}

impl RoomForm {
    pub fn seed_add() -> Self {
        Self {
            name: String::new(),
            number: "1".to_string(),
            field: RoomField::Name,
        }
    }

    pub fn seed_edit(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            number: room.number.to_string(),
            field: RoomField::Name,
        }
    }

    fn parse(&self) -> Result<NewRoom, String> {
        let number = self
            .number
            .parse::<u32>()
            .map_err(|_| format!("Invalid room number: {}", self.number))?;
        if number < 1 {
            return Err("Room number must be at least 1".to_string());
        }
        Ok(NewRoom {
            name: self.name.clone(),
            number,
        })
    }
}

/// Rooms screen controller
pub struct RoomsScreen {
    pub state: ViewState,
    pub selected: usize,
    pub form: RoomForm,
}

impl RoomsScreen {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            selected: 0,
            form: RoomForm::seed_add(),
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
        let count = store.rooms().len();
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
                self.form = RoomForm::seed_add();
                self.state = ViewState::Editing(EditMode::Add);
                None
            }
            KeyCode::Char('e') => {
                match store.rooms().get(self.selected) {
                    Some(room) => {
                        self.form = RoomForm::seed_edit(room);
                        self.state = ViewState::Editing(EditMode::Edit(room.id));
                        None
                    }
                    None => None,
                }
            }
            KeyCode::Char('d') => self.delete_selected(store).await,
            KeyCode::Char('R') => {
                store.fetch_rooms().await;
                self.selected = move_selection(self.selected, 0, store.rooms().len());
                None
            }
            _ => None,
        }
    }

    /// Delete the selected room. On success the cached list is filtered
    /// locally; no re-fetch is issued.
    async fn delete_selected(&mut self, store: &ReservationStore) -> Option<String> {
        let room = store.rooms().get(self.selected).cloned()?;
        match store.api().delete_room(room.id).await {
            Ok(()) => {
                store.remove_room(room.id);
                self.selected = move_selection(self.selected, 0, store.rooms().len());
                None
            }
            Err(err) => {
                error!(error = %err, id = room.id, "Error deleting room");
                Some(format!("Error deleting room: {err}"))
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
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.form.field = self.form.field.toggle();
                None
            }
            KeyCode::Backspace => {
                match self.form.field {
                    RoomField::Name => {
                        self.form.name.pop();
                    }
                    RoomField::Number => {
                        self.form.number.pop();
                    }
                }
                None
            }
            KeyCode::Char(c) => {
                match self.form.field {
                    RoomField::Name if !c.is_control() => self.form.name.push(c),
                    RoomField::Number if c.is_ascii_digit() => self.form.number.push(c),
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
                .create_room(&body)
                .await
                .map(|_| ())
                .map_err(|err| err.to_string()),
            EditMode::Edit(id) => store
                .api()
                .update_room(id, &body)
                .await
                .map_err(|err| err.to_string()),
        };

        match result {
            Ok(()) => {
                store.fetch_rooms().await;
                self.state = ViewState::List;
                None
            }
            Err(msg) => {
                error!(error = %msg, "Room submit failed");
                Some(msg)
            }
        }
    }
}

impl Default for RoomsScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the rooms screen
pub fn render_rooms(
    f: &mut Frame,
    area: Rect,
    screen: &RoomsScreen,
    store: &ReservationStore,
    theme: &Theme,
) {
    if screen.state == ViewState::Loading {
        widgets::loading_message(f, area, "Loading rooms...", theme);
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
    screen: &RoomsScreen,
    store: &ReservationStore,
    theme: &Theme,
) {
    let rooms = store.rooms();

    let items: Vec<ListItem> = if rooms.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No rooms configured",
            Style::default().fg(theme.muted),
        ))]
    } else {
        rooms
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let row_style = if i == screen.selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };

                ListItem::new(
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(format!("{:<28}", r.name), Style::default().fg(theme.text)),
                        Span::styled(format!("#{}", r.number), Style::default().fg(theme.info)),
                    ])
                    .style(row_style),
                )
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(
                " ROOMS ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );

    f.render_widget(list, area);
}

fn render_editor(f: &mut Frame, area: Rect, screen: &RoomsScreen, mode: EditMode, theme: &Theme) {
    let overlay = widgets::centered_rect(area, 50, 40);
    f.render_widget(Clear, overlay);

    let form = &screen.form;
    let title = match mode {
        EditMode::Add => " ADD ROOM ",
        EditMode::Edit(_) => " EDIT ROOM ",
    };

    let lines = vec![
        widgets::input_line("Name", form.name.clone(), form.field == RoomField::Name, theme),
        widgets::input_line(
            "Number",
            form.number.clone(),
            form.field == RoomField::Number,
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
