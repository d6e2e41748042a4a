//! Screen implementations for the TUI
//!
//! Each screen module provides:
//! - A controller struct owning the screen's view state and editor form
//! - Key handling for list and editor states
//! - A render function that draws the screen

pub mod billboards;
pub mod movies;
pub mod rooms;

pub use billboards::{BillboardsScreen, ShowtimeForm, render_billboards};
pub use movies::{MovieForm, MoviesScreen, render_movies};
pub use rooms::{RoomForm, RoomsScreen, render_rooms};

/// Editor mode: adding a new entity or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Add,
    Edit(i64),
}

/// Per-screen view state machine.
///
/// Every screen is either loading its initial data, showing its list, or
/// editing one entity in the overlay editor. Submit failures do not
/// transition state; the editor stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    List,
    Editing(EditMode),
}

impl ViewState {
    pub fn is_editing(&self) -> bool {
        matches!(self, ViewState::Editing(_))
    }
}

/// Move a list selection up or down, clamped to the list bounds.
pub(crate) fn move_selection(selected: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len - 1;
    if delta < 0 {
        selected.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (selected + delta as usize).min(max)
    }
}

/// Step a foreign-key selection through the available ids, wrapping at the
/// ends. An unset selection lands on the first (or last) entry.
pub(crate) fn cycle_id(current: i64, delta: i64, ids: &[i64]) -> i64 {
    if ids.is_empty() {
        return current;
    }
    match ids.iter().position(|&id| id == current) {
        Some(pos) => {
            let len = ids.len() as i64;
            let next = (pos as i64 + delta).rem_euclid(len);
            ids[next as usize]
        }
        None if delta >= 0 => ids[0],
        None => ids[ids.len() - 1],
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use async_trait::async_trait;
    use mockall::mock;
    use mq_api::{
        ApiError, Billboard, CinemaApi, Genre, Movie, NewBillboard, NewMovie, NewRoom, Room,
    };

    mock! {
        pub Api {}

        #[async_trait]
        impl CinemaApi for Api {
            async fn list_billboards(&self) -> Result<Vec<Billboard>, ApiError>;
            async fn create_billboard(&self, body: &NewBillboard) -> Result<Billboard, ApiError>;
            async fn update_billboard(&self, id: i64, body: &NewBillboard) -> Result<Billboard, ApiError>;
            async fn delete_billboard(&self, id: i64) -> Result<(), ApiError>;
            async fn list_movies(&self) -> Result<Vec<Movie>, ApiError>;
            async fn create_movie(&self, body: &NewMovie) -> Result<Movie, ApiError>;
            async fn update_movie(&self, id: i64, body: &NewMovie) -> Result<Movie, ApiError>;
            async fn delete_movie(&self, id: i64) -> Result<(), ApiError>;
            async fn list_rooms(&self) -> Result<Vec<Room>, ApiError>;
            async fn get_room(&self, id: i64) -> Result<Room, ApiError>;
            async fn create_room(&self, body: &NewRoom) -> Result<Room, ApiError>;
            async fn update_room(&self, id: i64, body: &NewRoom) -> Result<(), ApiError>;
            async fn delete_room(&self, id: i64) -> Result<(), ApiError>;
        }
    }

    pub fn movie(id: i64, length_minutes: u32) -> Movie {
        Movie {
            id,
            name: format!("Movie {id}"),
            genre: Genre::Drama,
            allowed_age: 12,
            length_minutes,
        }
    }

    pub fn room(id: i64) -> Room {
        Room {
            id,
            name: format!("Room {id}"),
            number: id as u32,
        }
    }

    pub fn billboard(id: i64) -> Billboard {
        Billboard {
            id,
            date: "2024-01-05T00:00:00".to_string(),
            start_time: "10:00:00".to_string(),
            end_time: "12:00:00".to_string(),
            movie_id: 1,
            room_id: 1,
            status: true,
        }
    }

    pub fn key(code: crossterm::event::KeyCode) -> crossterm::event::KeyEvent {
        crossterm::event::KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
    }

    pub fn char_key(c: char) -> crossterm::event::KeyEvent {
        key(crossterm::event::KeyCode::Char(c))
    }
}
