//! Integration tests for the reservation store flows
//!
//! These drive the store end-to-end against a mocked backend: the showtime
//! derivation scenario, the missing-movie precondition, and the
//! refresh-after-mutation ordering.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
use mockall::predicate::eq;

use common::init_tracing;
use mq_api::{
    ApiError, Billboard, CinemaApi, Genre, Movie, NewBillboard, NewMovie, NewRoom, Room,
};
use mq_store::{NewShowtime, ReservationStore, StoreError};

mock! {
    Api {}

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

fn movie(id: i64, length_minutes: u32) -> Movie {
    Movie {
        id,
        name: format!("Movie {id}"),
        genre: Genre::Drama,
        allowed_age: 0,
        length_minutes,
    }
}

fn created(id: i64, body: &NewBillboard) -> Billboard {
    Billboard {
        id,
        date: body.date.clone(),
        start_time: body.start_time.clone(),
        end_time: body.end_time.clone(),
        movie_id: body.movie_id,
        room_id: body.room_id,
        status: body.status,
    }
}

/// Scenario: movie {id: 1, lengthMinutes: 120}, start 2024-01-01T10:00:00
/// must go out as date "2024-01-01", startTime "10:00:00",
/// endTime "12:00:00", status true.
#[tokio::test]
async fn test_showtime_derivation_scenario() {
    init_tracing();

    let mut api = MockApi::new();
    api.expect_list_movies()
        .times(1)
        .returning(|| Ok(vec![movie(1, 120)]));
    api.expect_create_billboard()
        .times(1)
        .withf(|body: &NewBillboard| {
            body.date == "2024-01-01"
                && body.start_time == "10:00:00"
                && body.end_time == "12:00:00"
                && body.movie_id == 1
                && body.room_id == 2
                && body.status
        })
        .returning(|body| Ok(created(10, body)));
    api.expect_list_billboards()
        .times(1)
        .returning(|| Ok(vec![]));

    let store = ReservationStore::new(Arc::new(api));
    store
        .create_billboard(&NewShowtime {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            movie_id: 1,
            room_id: 2,
        })
        .await
        .unwrap();
}

/// Scenario: creating a billboard for an absent movie id must be rejected
/// with a not-found error and no POST may be issued.
#[tokio::test]
async fn test_missing_movie_rejected_without_post() {
    init_tracing();

    let mut api = MockApi::new();
    api.expect_list_movies()
        .times(1)
        .returning(|| Ok(vec![movie(1, 120)]));
    api.expect_create_billboard().times(0);
    api.expect_list_billboards().times(0);

    let store = ReservationStore::new(Arc::new(api));
    let err = store
        .create_billboard(&NewShowtime {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            movie_id: 999,
            room_id: 2,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::MovieNotFound(999)));
    assert!(err.to_string().contains("999"));
}

/// After a successful create the billboard list must be fetched again so
/// consumers observe the new entry.
#[tokio::test]
async fn test_create_refreshes_billboards() {
    init_tracing();

    let mut api = MockApi::new();
    api.expect_list_movies()
        .returning(|| Ok(vec![movie(4, 95)]));
    api.expect_create_billboard()
        .times(1)
        .returning(|body| Ok(created(77, body)));
    api.expect_list_billboards().times(1).returning(|| {
        Ok(vec![Billboard {
            id: 77,
            date: "2024-06-01".to_string(),
            start_time: "18:00:00".to_string(),
            end_time: "19:35:00".to_string(),
            movie_id: 4,
            room_id: 1,
            status: true,
        }])
    });

    let store = ReservationStore::new(Arc::new(api));
    assert!(store.billboards().is_empty());

    store
        .create_billboard(&NewShowtime {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            movie_id: 4,
            room_id: 1,
        })
        .await
        .unwrap();

    let billboards = store.billboards();
    assert_eq!(billboards.len(), 1);
    assert_eq!(billboards[0].id, 77);
    assert_eq!(billboards[0].end_time, "19:35:00");
}

/// A runtime edited on the backend after the cache was filled must be used
/// for the derivation, not the stale cached value.
#[tokio::test]
async fn test_stale_runtime_not_used_for_derivation() {
    init_tracing();

    let mut api = MockApi::new();
    let mut movie_fetches = 0;
    api.expect_list_movies().times(2).returning(move || {
        movie_fetches += 1;
        if movie_fetches == 1 {
            // Cache warm-up: runtime is 90 minutes
            Ok(vec![movie(1, 90)])
        } else {
            // Edited concurrently: runtime is now 120 minutes
            Ok(vec![movie(1, 120)])
        }
    });
    api.expect_create_billboard()
        .times(1)
        .withf(|body: &NewBillboard| body.end_time == "12:00:00")
        .returning(|body| Ok(created(1, body)));
    api.expect_list_billboards().returning(|| Ok(vec![]));

    let store = ReservationStore::new(Arc::new(api));
    store.fetch_movies().await;

    store
        .create_billboard(&NewShowtime {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            movie_id: 1,
            room_id: 1,
        })
        .await
        .unwrap();
}

/// Room deletion is a local filter; no rooms re-fetch is issued.
#[tokio::test]
async fn test_room_delete_filters_locally() {
    init_tracing();

    let mut api = MockApi::new();
    api.expect_list_rooms().times(1).returning(|| {
        Ok(vec![
            Room {
                id: 5,
                name: "Sala VIP".to_string(),
                number: 5,
            },
            Room {
                id: 6,
                name: "Sala Seis".to_string(),
                number: 6,
            },
        ])
    });
    api.expect_delete_room()
        .with(eq(5))
        .times(1)
        .returning(|_| Ok(()));

    let store = ReservationStore::new(Arc::new(api));
    store.fetch_rooms().await;
    assert_eq!(store.rooms().len(), 2);

    store.api().delete_room(5).await.unwrap();
    store.remove_room(5);

    let rooms = store.rooms();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, 6);
}
