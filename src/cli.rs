use crate::models::GameId;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// League schedule import and standings keeper
///
/// Imports division schedules from text files, records game results and
/// forfeits, and prints standings tables.
///
/// A division must be created before a schedule can be imported into it:
///
///   league_standings division create --org "Westside Softball" --division u12 --name "Under 12"
///
///   league_standings import schedule.csv --org "Westside Softball" --division u12
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory of the division store. Overrides the configured data directory.
    #[arg(long = "data-dir", global = true, help_heading = "Storage")]
    pub data_dir: Option<String>,

    /// Also write logs to the terminal
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

/// Organization and division a command operates on
#[derive(clap::Args, Debug, Clone)]
pub struct DivisionRef {
    /// Organization name, e.g. "Westside Softball"
    #[arg(long = "org")]
    pub organization: String,

    /// Division ID (case-insensitive)
    #[arg(long = "division")]
    pub division_id: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage division records
    #[command(subcommand)]
    Division(DivisionCommand),

    /// Import a schedule file, replacing the division's roster and schedule
    Import {
        /// Schedule file to import
        file: String,

        #[command(flatten)]
        division: DivisionRef,

        /// Every game line is a doubleheader; a return game is added 90 minutes later
        #[arg(long = "double-headers")]
        double_headers: bool,
    },

    /// Record the result of a game
    Score {
        #[command(flatten)]
        division: DivisionRef,

        /// Game ID as shown by `standings`
        #[arg(long = "game")]
        game_id: GameId,

        /// Home team score. Omit both scores to mark the game unplayed.
        #[arg(long = "home")]
        home_score: Option<u16>,

        /// Visitor team score
        #[arg(long = "visitor")]
        visitor_score: Option<u16>,

        /// Home team forfeited
        #[arg(long = "home-forfeit")]
        home_forfeit: bool,

        /// Visitor team forfeited
        #[arg(long = "visitor-forfeit")]
        visitor_forfeit: bool,
    },

    /// Show the standings table and schedule of a division
    Standings {
        #[command(flatten)]
        division: DivisionRef,

        /// Only show this team's games
        #[arg(long = "team")]
        team: Option<String>,
    },

    /// List the games played on the same day and field as a game
    Games {
        #[command(flatten)]
        division: DivisionRef,

        #[arg(long = "game")]
        game_id: GameId,
    },

    /// Show or update configuration
    Config {
        /// Set the data directory in the config file
        #[arg(long = "set-data-dir")]
        data_dir: Option<String>,

        /// Set the log file path in the config file
        #[arg(long = "set-log-file")]
        log_file_path: Option<String>,

        /// Clear the custom log file path, reverting to the default location
        #[arg(long = "clear-log-file")]
        clear_log_file_path: bool,

        /// Set the league's time zone (IANA name, e.g. America/New_York)
        #[arg(long = "set-time-zone")]
        time_zone: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DivisionCommand {
    /// Create a new division
    Create {
        #[command(flatten)]
        division: DivisionRef,

        /// Display name
        #[arg(long = "name")]
        name: String,
    },

    /// Rename a division
    Edit {
        #[command(flatten)]
        division: DivisionRef,

        #[arg(long = "name")]
        name: String,
    },

    /// Delete a division and its schedule
    Delete {
        #[command(flatten)]
        division: DivisionRef,
    },

    /// List the divisions of an organization
    List {
        #[arg(long = "org")]
        organization: String,
    },
}
