//! mq_api - HTTP client for the cinema booking backend
//!
//! This crate provides:
//! - The wire data model (billboards, movies, rooms)
//! - The `CinemaApi` trait, one method per backend operation
//! - A reqwest-backed `ApiClient` implementation
//!
//! The backend owns all real business logic; every call here is a single
//! request/response round trip with no retries.

use async_trait::async_trait;
use thiserror::Error;

pub mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{Billboard, Genre, Movie, NewBillboard, NewMovie, NewRoom, Room};
pub use reqwest::StatusCode;

/// API request errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{context} returned status {status}")]
    Status {
        context: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Validation errors occurred: {0}")]
    Validation(String),
}

/// Operations exposed by the booking backend.
///
/// The store and screens depend on this trait rather than on `ApiClient`
/// directly, so tests can substitute a mock backend.
#[async_trait]
pub trait CinemaApi: Send + Sync {
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
    /// Room updates return an empty body on success.
    async fn update_room(&self, id: i64, body: &NewRoom) -> Result<(), ApiError>;
    async fn delete_room(&self, id: i64) -> Result<(), ApiError>;
}
