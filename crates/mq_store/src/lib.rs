//! mq_store - Shared reservation store for Marquee
//!
//! This crate provides:
//! - The in-memory cache of billboards, movies, and rooms shared by all
//!   screens
//! - Refresh operations that replace each collection wholesale
//! - The derived billboard create operation (end time from movie runtime)
//!
//! The store is a read-mostly projection of the backend, never the source
//! of truth. It is constructed once and passed by `Arc` to its consumers;
//! there are no ambient singletons.

use chrono::{NaiveDate, NaiveTime};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use mq_api::{ApiError, Billboard, CinemaApi, Movie, NewBillboard, Room};

pub mod schedule;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Movie with id {0} not found")]
    MovieNotFound(i64),

    #[error("Error creating billboard: {0}")]
    Create(#[source] ApiError),
}

/// Input for the derived billboard create operation. The end time is not
/// part of the input; it is computed from the movie runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShowtime {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub movie_id: i64,
    pub room_id: i64,
}

/// Client-side cache of the three backend collections.
pub struct ReservationStore {
    api: Arc<dyn CinemaApi>,
    billboards: RwLock<Vec<Billboard>>,
    movies: RwLock<Vec<Movie>>,
    rooms: RwLock<Vec<Room>>,
    loading: AtomicBool,
}

impl ReservationStore {
    pub fn new(api: Arc<dyn CinemaApi>) -> Self {
        Self {
            api,
            billboards: RwLock::new(Vec::new()),
            movies: RwLock::new(Vec::new()),
            rooms: RwLock::new(Vec::new()),
            loading: AtomicBool::new(true),
        }
    }

    /// The backend client the store delegates to.
    pub fn api(&self) -> &dyn CinemaApi {
        self.api.as_ref()
    }

    /// True until the first billboards fetch settles.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn billboards(&self) -> Vec<Billboard> {
        self.billboards.read().unwrap().clone()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.movies.read().unwrap().clone()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.read().unwrap().clone()
    }

    /// Look up a cached movie's name for display.
    pub fn movie_name(&self, movie_id: i64) -> Option<String> {
        self.movies
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == movie_id)
            .map(|m| m.name.clone())
    }

    /// Look up a cached room's name for display.
    pub fn room_name(&self, room_id: i64) -> Option<String> {
        self.rooms
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == room_id)
            .map(|r| r.name.clone())
    }

    /// Fetch the billboard list, replacing the cached collection wholesale.
    ///
    /// Fetch failures are logged, not propagated. The loading flag clears
    /// once this settles, success or failure.
    pub async fn fetch_billboards(&self) {
        match self.api.list_billboards().await {
            Ok(list) => *self.billboards.write().unwrap() = list,
            Err(err) => error!(error = %err, "Error fetching billboards"),
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    /// Fetch the movie list, replacing the cached collection wholesale.
    pub async fn fetch_movies(&self) {
        match self.api.list_movies().await {
            Ok(list) => *self.movies.write().unwrap() = list,
            Err(err) => error!(error = %err, "Error fetching movies"),
        }
    }

    /// Fetch the room list, replacing the cached collection wholesale.
    pub async fn fetch_rooms(&self) {
        match self.api.list_rooms().await {
            Ok(list) => *self.rooms.write().unwrap() = list,
            Err(err) => error!(error = %err, "Error fetching rooms"),
        }
    }

    /// Fetch all three collections (screen mount).
    pub async fn refresh_all(&self) {
        self.fetch_billboards().await;
        self.fetch_movies().await;
        self.fetch_rooms().await;
    }

    /// Create a billboard, deriving its end time from the movie runtime.
    ///
    /// Movies are re-fetched first so a runtime edited from another screen
    /// is never silently stale when the end time is derived. The movie
    /// lookup is a hard precondition: if it fails, no create request is
    /// issued. On success the billboard list is refreshed so consumers
    /// observe the new entry.
    pub async fn create_billboard(&self, input: &NewShowtime) -> Result<(), StoreError> {
        self.fetch_movies().await;

        let movie = self
            .movies
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == input.movie_id)
            .cloned()
            .ok_or(StoreError::MovieNotFound(input.movie_id))?;

        let end_time = schedule::derive_end_time(input.start_time, movie.length_minutes);

        let body = NewBillboard {
            date: schedule::format_date(input.date),
            start_time: schedule::format_time(input.start_time),
            end_time: schedule::format_time(end_time),
            movie_id: input.movie_id,
            room_id: input.room_id,
            status: true,
        };

        self.api
            .create_billboard(&body)
            .await
            .map_err(StoreError::Create)?;

        self.fetch_billboards().await;
        Ok(())
    }

    /// Drop a room from the cached collection without re-fetching.
    pub fn remove_room(&self, room_id: i64) {
        self.rooms.write().unwrap().retain(|r| r.id != room_id);
    }
}
