//! Application-wide constants and configuration values
//!
//! Schedule file layout, forfeit scoring and default settings live here so the
//! parser, score processor and config layer agree on the same numbers.

/// Name used for config, data and log directories
pub const APP_DIR_NAME: &str = "league_standings";

/// Default log file name inside the log directory
pub const LOG_FILE_NAME: &str = "league_standings.log";

/// Default league time zone for "last updated" stamps
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

/// Schedule file layout
pub mod schedule_file {
    /// Free-form header lines at the top of every schedule file
    pub const HEADER_LINES: usize = 4;

    /// Number of comma-separated fields on a game line
    pub const GAME_FIELD_COUNT: usize = 6;

    /// Prefix (case-insensitive) of the first field of a week boundary line
    pub const WEEK_PREFIX: &str = "week";

    /// Minutes between the two games of a doubleheader
    pub const DOUBLEHEADER_GAP_MINUTES: i64 = 90;

    /// Accepted date formats, tried in order
    pub const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

    /// Accepted time formats, tried in order
    pub const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];
}

/// Forced scores for forfeited games
pub mod forfeit {
    /// Score awarded to the team whose opponent forfeited
    pub const WINNING_SCORE: u16 = 7;

    /// Score recorded for a forfeiting team
    pub const FORFEIT_SCORE: u16 = 0;
}

/// File names used by the JSON store
pub mod storage {
    /// Per-organization file listing division metadata
    pub const DIVISION_LIST_FILE: &str = "division_list.json";

    /// Per-organization directory holding one document per division
    pub const DIVISIONS_DIR: &str = "divisions";

    /// Extension of per-division documents
    pub const DIVISION_FILE_EXTENSION: &str = "json";
}

/// Environment variable names that override config file values
pub mod env_vars {
    pub const DATA_DIR: &str = "LEAGUE_DATA_DIR";
    pub const LOG_FILE: &str = "LEAGUE_LOG_FILE";
    pub const TIME_ZONE: &str = "LEAGUE_TIME_ZONE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_time_zone_is_valid() {
        assert!(crate::clock::parse_time_zone(DEFAULT_TIME_ZONE).is_ok());
    }

    #[test]
    fn test_forfeit_scores_differ() {
        assert!(forfeit::WINNING_SCORE > forfeit::FORFEIT_SCORE);
    }
}
