//! League schedule import and standings library
//!
//! Parses fixed-layout schedule files into division documents, applies
//! reported scores and forfeits, and keeps each division's standings table
//! recomputed from its game results.
//!
//! # Examples
//!
//! ```rust,no_run
//! use league_standings::clock::SystemClock;
//! use league_standings::error::AppError;
//! use league_standings::service::LeagueService;
//! use league_standings::scores::ScoreSubmission;
//! use league_standings::storage::JsonFileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let service = LeagueService::new(JsonFileStore::new("data"), SystemClock::default());
//!
//!     service.create_division("Westside Softball", "u12", "Under 12").await?;
//!     let contents = tokio::fs::read_to_string("spring.csv").await?;
//!     let result = service
//!         .import_schedule("Westside Softball", "u12", &contents, false)
//!         .await?;
//!     assert!(result.success);
//!
//!     service
//!         .save_scores("Westside Softball", "u12", &[ScoreSubmission::final_score(1, 5, 3)])
//!         .await?;
//!
//!     let report = service.standings("Westside Softball", "u12", None).await?;
//!     for row in &report.rows {
//!         println!("{} {}-{}-{}", row.name, row.wins, row.losses, row.ties);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod schedule;
pub mod scores;
pub mod service;
pub mod standings;
pub mod storage;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::AppError;
pub use models::{Division, DivisionInfo, GameRecord, ScheduleEntry, StandingsRow, Team};
pub use scores::ScoreSubmission;
pub use service::{ImportResult, LeagueService, StandingsReport};
pub use storage::{DivisionStore, JsonFileStore, MemoryStore};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
