//! Wire data model for the booking backend
//!
//! Field names follow the backend's JSON (camelCase). Billboard dates and
//! times travel as strings: date `YYYY-MM-DD`, times `HH:MM:SS` 24-hour.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scheduled showtime for a movie in a room.
///
/// The `date` field is kept exactly as the server returns it; some backends
/// send a full datetime (`2024-01-01T00:00:00`), so consumers trim at `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub movie_id: i64,
    pub room_id: i64,
    pub status: bool,
}

/// Request body for billboard create/update. End time is always derived
/// from the movie runtime before this is built, never user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillboard {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub movie_id: i64,
    pub room_id: i64,
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub genre: Genre,
    pub allowed_age: u32,
    pub length_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub name: String,
    pub genre: Genre,
    pub allowed_age: u32,
    pub length_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub name: String,
    pub number: u32,
}

/// The backend's fixed movie genre enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Musicals,
    Mystery,
    Romance,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Sports,
    Thriller,
    Western,
}

impl Genre {
    /// All genres in wire order
    pub fn all() -> &'static [Genre] {
        &[
            Genre::Action,
            Genre::Adventure,
            Genre::Comedy,
            Genre::Drama,
            Genre::Fantasy,
            Genre::Horror,
            Genre::Musicals,
            Genre::Mystery,
            Genre::Romance,
            Genre::ScienceFiction,
            Genre::Sports,
            Genre::Thriller,
            Genre::Western,
        ]
    }

    /// The wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Musicals => "Musicals",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Sports => "Sports",
            Genre::Thriller => "Thriller",
            Genre::Western => "Western",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::all()
            .iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown genre: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billboard_wire_names() {
        let json = r#"{
            "id": 7,
            "date": "2024-01-01",
            "startTime": "10:00:00",
            "endTime": "12:00:00",
            "movieId": 1,
            "roomId": 2,
            "status": true
        }"#;

        let billboard: Billboard = serde_json::from_str(json).unwrap();
        assert_eq!(billboard.id, 7);
        assert_eq!(billboard.start_time, "10:00:00");
        assert_eq!(billboard.movie_id, 1);
        assert_eq!(billboard.room_id, 2);
        assert!(billboard.status);
    }

    #[test]
    fn test_new_billboard_serializes_camel_case() {
        let body = NewBillboard {
            date: "2024-01-01".to_string(),
            start_time: "10:00:00".to_string(),
            end_time: "12:00:00".to_string(),
            movie_id: 1,
            room_id: 2,
            status: true,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["startTime"], "10:00:00");
        assert_eq!(value["endTime"], "12:00:00");
        assert_eq!(value["movieId"], 1);
        assert_eq!(value["roomId"], 2);
        assert_eq!(value["status"], true);
    }

    #[test]
    fn test_movie_wire_names() {
        let json = r#"{
            "id": 1,
            "name": "Alien",
            "genre": "Science Fiction",
            "allowedAge": 16,
            "lengthMinutes": 117
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.genre, Genre::ScienceFiction);
        assert_eq!(movie.allowed_age, 16);
        assert_eq!(movie.length_minutes, 117);
    }

    #[test]
    fn test_genre_round_trip() {
        for genre in Genre::all() {
            let json = serde_json::to_string(genre).unwrap();
            let back: Genre = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *genre);
        }
    }

    #[test]
    fn test_genre_count_is_fixed() {
        assert_eq!(Genre::all().len(), 13);
    }

    #[test]
    fn test_genre_from_str() {
        assert_eq!("Western".parse::<Genre>().unwrap(), Genre::Western);
        assert_eq!("science fiction".parse::<Genre>().unwrap(), Genre::ScienceFiction);
        assert!("Documentary".parse::<Genre>().is_err());
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let json = r#"{"id": 1, "name": "X", "genre": "Noir", "allowedAge": 0, "lengthMinutes": 90}"#;
        assert!(serde_json::from_str::<Movie>(json).is_err());
    }
}
