//! Common test utilities for marquee integration tests.
//!
//! This module provides:
//! - Tracing initialization for test output
//! - JSON fixtures matching the backend's wire format

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Initialize tracing once for integration tests.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    });
}

// =============================================================================
// Wire Fixtures
// =============================================================================

/// Sample GET /api/billboards response
pub const BILLBOARDS_FIXTURE: &str = r#"[
    {
        "id": 1,
        "date": "2024-01-01T00:00:00",
        "startTime": "10:00:00",
        "endTime": "12:00:00",
        "movieId": 1,
        "roomId": 2,
        "status": true
    },
    {
        "id": 2,
        "date": "2024-01-02",
        "startTime": "21:30:00",
        "endTime": "23:27:00",
        "movieId": 3,
        "roomId": 1,
        "status": false
    }
]"#;

/// Sample GET /api/movies response
pub const MOVIES_FIXTURE: &str = r#"[
    {
        "id": 1,
        "name": "The Quiet Projectionist",
        "genre": "Drama",
        "allowedAge": 12,
        "lengthMinutes": 120
    },
    {
        "id": 3,
        "name": "Starfall",
        "genre": "Science Fiction",
        "allowedAge": 16,
        "lengthMinutes": 117
    }
]"#;

/// Sample GET /api/rooms response
pub const ROOMS_FIXTURE: &str = r#"[
    {"id": 1, "name": "Sala Grande", "number": 1},
    {"id": 2, "name": "Sala Dos", "number": 2},
    {"id": 5, "name": "Sala VIP", "number": 5}
]"#;

/// Sample billboard validation failure body
pub const VALIDATION_ERRORS_FIXTURE: &str = r#"{
    "errors": {
        "date": ["The date must not be in the past."],
        "roomId": ["The room is already occupied at that time."]
    }
}"#;
