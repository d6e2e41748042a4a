//! mq_cli - CLI commands for Marquee
//!
//! This crate provides:
//! - clap-based command definitions
//! - The `tui` command that starts the console
//! - Scripting commands for the three resources (list/add/update/rm)
//! - JSON and text output formatting

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use mq_api::{ApiClient, Billboard, CinemaApi, Genre, Movie, NewMovie, NewRoom, Room};
use mq_config::MqConfig;
use mq_store::{NewShowtime, ReservationStore, schedule};

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Config error: {0}")]
    ConfigError(#[from] mq_config::ConfigError),

    #[error("API error: {0}")]
    ApiError(#[from] mq_api::ApiError),

    #[error("Store error: {0}")]
    StoreError(#[from] mq_store::StoreError),

    #[error("Terminal error: {0}")]
    TuiError(#[from] mq_tui::TuiError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Output format for resource commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable rows
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Main CLI application
#[derive(Parser, Debug)]
#[command(name = "mq")]
#[command(
    author,
    version,
    about = "Marquee - cinema billboard administration console"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for resource commands
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the console
    Tui,

    /// Billboard (showtime) management
    Billboards {
        #[command(subcommand)]
        command: BillboardCommands,
    },

    /// Movie management
    Movies {
        #[command(subcommand)]
        command: MovieCommands,
    },

    /// Room management
    Rooms {
        #[command(subcommand)]
        command: RoomCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum BillboardCommands {
    /// List all billboards
    List,

    /// Schedule a showtime. The end time is derived from the movie runtime.
    Add {
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,

        /// Start time, HH:MM or HH:MM:SS
        #[arg(long)]
        start: String,

        /// Movie id
        #[arg(long)]
        movie: i64,

        /// Room id
        #[arg(long)]
        room: i64,
    },

    /// Delete a billboard
    Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum MovieCommands {
    /// List all movies
    List,

    /// Add a movie to the catalogue
    Add {
        #[arg(long)]
        name: String,

        /// One of the fixed genres, e.g. "Drama" or "Science Fiction"
        #[arg(long)]
        genre: Genre,

        /// Minimum allowed age
        #[arg(long, default_value_t = 0)]
        allowed_age: u32,

        /// Runtime in minutes
        #[arg(long)]
        length_minutes: u32,
    },

    /// Update a movie
    Update {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        genre: Genre,

        #[arg(long, default_value_t = 0)]
        allowed_age: u32,

        #[arg(long)]
        length_minutes: u32,
    },

    /// Delete a movie
    Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum RoomCommands {
    /// List all rooms
    List,

    /// Show a single room
    Show { id: i64 },

    /// Add a room
    Add {
        #[arg(long)]
        name: String,

        /// Room number (>= 1)
        #[arg(long)]
        number: u32,
    },

    /// Update a room
    Update {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        number: u32,
    },

    /// Delete a room
    Rm { id: i64 },
}

impl Cli {
    /// Run the CLI
    pub async fn run(self) -> Result<(), CliError> {
        let Cli {
            config,
            verbose: _,
            format,
            command,
        } = self;

        let config = match config {
            Some(path) => MqConfig::load_with_env(&path)?,
            None => MqConfig::discover_with_env()?,
        };
        debug!(base_url = %config.api.base_url, "Using backend");

        let mut builder = reqwest::Client::builder().user_agent("marquee/0.1");
        if let Some(secs) = config.api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(mq_api::ApiError::from)?;

        let api: Arc<dyn CinemaApi> = Arc::new(ApiClient::new(http, config.api.base_url.clone()));
        let store = Arc::new(ReservationStore::new(api.clone()));

        match command {
            Commands::Tui => {
                mq_tui::run(store, config.tui.tick_ms).await?;
            }
            Commands::Billboards { command } => {
                run_billboards(command, &store, api.as_ref(), format).await?;
            }
            Commands::Movies { command } => {
                run_movies(command, api.as_ref(), format).await?;
            }
            Commands::Rooms { command } => {
                run_rooms(command, api.as_ref(), format).await?;
            }
        }

        Ok(())
    }
}

async fn run_billboards(
    command: BillboardCommands,
    store: &ReservationStore,
    api: &dyn CinemaApi,
    format: OutputFormat,
) -> Result<(), CliError> {
    match command {
        BillboardCommands::List => {
            let billboards = api.list_billboards().await?;
            print_rows(&billboards, format, render_billboard);
        }
        BillboardCommands::Add {
            date,
            start,
            movie,
            room,
        } => {
            let start_time = schedule::parse_wire_time(&start)
                .ok_or_else(|| CliError::CommandFailed(format!("Invalid start time: {start}")))?;
            let input = NewShowtime {
                date,
                start_time,
                movie_id: movie,
                room_id: room,
            };
            store.create_billboard(&input).await?;
            println!(
                "Scheduled showtime on {} at {}",
                schedule::format_date(date),
                schedule::format_time(start_time)
            );
        }
        BillboardCommands::Rm { id } => {
            api.delete_billboard(id).await?;
            println!("Deleted billboard {id}");
        }
    }
    Ok(())
}

async fn run_movies(
    command: MovieCommands,
    api: &dyn CinemaApi,
    format: OutputFormat,
) -> Result<(), CliError> {
    match command {
        MovieCommands::List => {
            let movies = api.list_movies().await?;
            print_rows(&movies, format, render_movie);
        }
        MovieCommands::Add {
            name,
            genre,
            allowed_age,
            length_minutes,
        } => {
            let created = api
                .create_movie(&NewMovie {
                    name,
                    genre,
                    allowed_age,
                    length_minutes,
                })
                .await?;
            print_one(&created, format, render_movie);
        }
        MovieCommands::Update {
            id,
            name,
            genre,
            allowed_age,
            length_minutes,
        } => {
            let updated = api
                .update_movie(
                    id,
                    &NewMovie {
                        name,
                        genre,
                        allowed_age,
                        length_minutes,
                    },
                )
                .await?;
            print_one(&updated, format, render_movie);
        }
        MovieCommands::Rm { id } => {
            api.delete_movie(id).await?;
            println!("Deleted movie {id}");
        }
    }
    Ok(())
}

async fn run_rooms(
    command: RoomCommands,
    api: &dyn CinemaApi,
    format: OutputFormat,
) -> Result<(), CliError> {
    match command {
        RoomCommands::List => {
            let rooms = api.list_rooms().await?;
            print_rows(&rooms, format, render_room);
        }
        RoomCommands::Show { id } => {
            let room = api.get_room(id).await?;
            print_one(&room, format, render_room);
        }
        RoomCommands::Add { name, number } => {
            let created = api.create_room(&NewRoom { name, number }).await?;
            print_one(&created, format, render_room);
        }
        RoomCommands::Update { id, name, number } => {
            api.update_room(id, &NewRoom { name, number }).await?;
            println!("Updated room {id}");
        }
        RoomCommands::Rm { id } => {
            api.delete_room(id).await?;
            println!("Deleted room {id}");
        }
    }
    Ok(())
}

fn print_rows<T: Serialize>(rows: &[T], format: OutputFormat, render: impl Fn(&T) -> String) {
    match format {
        OutputFormat::Json => println!("{}", to_json(&rows)),
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("(none)");
            }
            for row in rows {
                println!("{}", render(row));
            }
        }
    }
}

fn print_one<T: Serialize>(row: &T, format: OutputFormat, render: impl Fn(&T) -> String) {
    match format {
        OutputFormat::Json => println!("{}", to_json(row)),
        OutputFormat::Text => println!("{}", render(row)),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "serialization failed: {e}"}}"#))
}

fn render_billboard(b: &Billboard) -> String {
    let day = b.date.split('T').next().unwrap_or(&b.date);
    let status = if b.status { "active" } else { "inactive" };
    format!(
        "#{:<4} {}  {} - {}  movie={} room={}  {}",
        b.id, day, b.start_time, b.end_time, b.movie_id, b.room_id, status
    )
}

fn render_movie(m: &Movie) -> String {
    format!(
        "#{:<4} {:<28} {:<16} {:>4} min  {}+",
        m.id, m.name, m.genre, m.length_minutes, m.allowed_age
    )
}

fn render_room(r: &Room) -> String {
    format!("#{:<4} {:<28} number {}", r.id, r.name, r.number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_billboards_add() {
        let cli = Cli::try_parse_from([
            "mq",
            "billboards",
            "add",
            "--date",
            "2024-01-01",
            "--start",
            "10:00:00",
            "--movie",
            "1",
            "--room",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Billboards {
                command:
                    BillboardCommands::Add {
                        date,
                        start,
                        movie,
                        room,
                    },
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
                assert_eq!(start, "10:00:00");
                assert_eq!(movie, 1);
                assert_eq!(room, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_movie_genre_with_space() {
        let cli = Cli::try_parse_from([
            "mq",
            "movies",
            "add",
            "--name",
            "Alien",
            "--genre",
            "Science Fiction",
            "--length-minutes",
            "117",
        ])
        .unwrap();

        match cli.command {
            Commands::Movies {
                command: MovieCommands::Add { genre, allowed_age, .. },
            } => {
                assert_eq!(genre, Genre::ScienceFiction);
                assert_eq!(allowed_age, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_invalid_genre_rejected() {
        let result = Cli::try_parse_from([
            "mq",
            "movies",
            "add",
            "--name",
            "X",
            "--genre",
            "Noir",
            "--length-minutes",
            "90",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_defaults_to_text() {
        let cli = Cli::try_parse_from(["mq", "rooms", "list"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_render_billboard_row() {
        let row = render_billboard(&Billboard {
            id: 7,
            date: "2024-01-01T00:00:00".to_string(),
            start_time: "10:00:00".to_string(),
            end_time: "12:00:00".to_string(),
            movie_id: 1,
            room_id: 2,
            status: true,
        });
        assert!(row.contains("2024-01-01"));
        assert!(!row.contains('T'));
        assert!(row.contains("10:00:00 - 12:00:00"));
        assert!(row.ends_with("active"));
    }
}
