use crate::cli::{Command, DivisionCommand, DivisionRef};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{DivisionInfo, GameRecord, ScheduleEntry, StandingsRow};
use crate::scores::ScoreSubmission;
use crate::service::{ImportResult, LeagueService, StandingsReport};
use crate::storage::DivisionStore;
use std::fmt::Write;
use tracing::info;

const RULE: &str = "────────────────────────────────────────────────────────────────";

/// Runs a store-backed command and prints its output
pub async fn run_command<S: DivisionStore, C: Clock>(
    service: &LeagueService<S, C>,
    command: Command,
) -> Result<(), AppError> {
    match command {
        Command::Division(command) => handle_division_command(service, command).await,
        Command::Import {
            file,
            division,
            double_headers,
        } => handle_import_command(service, &file, &division, double_headers).await,
        Command::Score {
            division,
            game_id,
            home_score,
            visitor_score,
            home_forfeit,
            visitor_forfeit,
        } => {
            let submission = ScoreSubmission {
                game_id,
                home_score,
                visitor_score,
                home_forfeit,
                visitor_forfeit,
            };
            handle_score_command(service, &division, submission).await
        }
        Command::Standings { division, team } => {
            handle_standings_command(service, &division, team.as_deref()).await
        }
        Command::Games { division, game_id } => {
            let games = service
                .games_for_score_entry(&division.organization, &division.division_id, game_id)
                .await?;
            let (_, loaded) = service
                .division(&division.organization, &division.division_id)
                .await?;
            if games.is_empty() {
                println!("No game {game_id} in {}/{}", division.organization, loaded.id);
            } else {
                print!(
                    "{}",
                    format_games(&games, |id| loaded.team_name(id).to_string())
                );
            }
            Ok(())
        }
        Command::Config {
            data_dir,
            log_file_path,
            clear_log_file_path,
            time_zone,
        } => handle_config_command(data_dir, log_file_path, clear_log_file_path, time_zone).await,
    }
}

/// Handles `division create|edit|delete|list`
pub async fn handle_division_command<S: DivisionStore, C: Clock>(
    service: &LeagueService<S, C>,
    command: DivisionCommand,
) -> Result<(), AppError> {
    match command {
        DivisionCommand::Create { division, name } => {
            let info = service
                .create_division(&division.organization, &division.division_id, &name)
                .await?;
            println!("Created division {} ({})", info.id, info.name);
        }
        DivisionCommand::Edit { division, name } => {
            let info = service
                .edit_division(&division.organization, &division.division_id, &name)
                .await?;
            println!("Updated division {} ({})", info.id, info.name);
        }
        DivisionCommand::Delete { division } => {
            if service
                .delete_division(&division.organization, &division.division_id)
                .await?
            {
                println!("Deleted division {}", division.division_id);
            } else {
                println!("No division {} to delete", division.division_id);
            }
        }
        DivisionCommand::List { organization } => {
            let infos = service.list_divisions(&organization).await?;
            print!("{}", format_division_list(&organization, &infos));
        }
    }
    Ok(())
}

/// Imports a schedule file. An unsuccessful import is returned as an error
/// so the process exits with a failure status.
pub async fn handle_import_command<S: DivisionStore, C: Clock>(
    service: &LeagueService<S, C>,
    file: &str,
    division: &DivisionRef,
    double_headers: bool,
) -> Result<(), AppError> {
    let contents = tokio::fs::read_to_string(file).await?;
    info!("Read {} bytes from {file}", contents.len());

    let result = service
        .import_schedule(
            &division.organization,
            &division.division_id,
            &contents,
            double_headers,
        )
        .await?;

    print!("{}", format_import_result(&result));
    if result.success {
        Ok(())
    } else {
        Err(AppError::import_failed(
            result.error_message.unwrap_or_default(),
        ))
    }
}

pub async fn handle_score_command<S: DivisionStore, C: Clock>(
    service: &LeagueService<S, C>,
    division: &DivisionRef,
    submission: ScoreSubmission,
) -> Result<(), AppError> {
    let updated = service
        .save_scores(&division.organization, &division.division_id, &[submission])
        .await?;

    if updated == 0 {
        println!("No game {} in this division, nothing updated", submission.game_id);
    } else {
        let (_, loaded) = service
            .division(&division.organization, &division.division_id)
            .await?;
        if let Some(game) = loaded.game(submission.game_id) {
            print!(
                "{}",
                format_games(std::slice::from_ref(game), |id| loaded
                    .team_name(id)
                    .to_string())
            );
        }
    }
    Ok(())
}

pub async fn handle_standings_command<S: DivisionStore, C: Clock>(
    service: &LeagueService<S, C>,
    division: &DivisionRef,
    team: Option<&str>,
) -> Result<(), AppError> {
    let report = service
        .standings(&division.organization, &division.division_id, team)
        .await?;
    print!("{}", format_standings_report(&report));
    Ok(())
}

/// Handles `config`: updates the config file when any setting is given,
/// then displays the current configuration.
pub async fn handle_config_command(
    data_dir: Option<String>,
    log_file_path: Option<String>,
    clear_log_file_path: bool,
    time_zone: Option<String>,
) -> Result<(), AppError> {
    let changes_requested = data_dir.is_some()
        || log_file_path.is_some()
        || clear_log_file_path
        || time_zone.is_some();

    if changes_requested {
        let config_path = Config::get_config_path();
        let mut config = if std::path::Path::new(&config_path).exists() {
            Config::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        if let Some(data_dir) = data_dir {
            config.data_dir = Some(data_dir);
        }
        if let Some(log_file_path) = log_file_path {
            config.log_file_path = Some(log_file_path);
        } else if clear_log_file_path {
            config.log_file_path = None;
        }
        if let Some(time_zone) = time_zone {
            config.time_zone = time_zone;
        }

        config.validate()?;
        config.save().await?;
        println!("Configuration saved to {config_path}");
    }

    Config::display().await
}

/// Baseball-style winning percentage, e.g. `.750` or `1.000`
pub fn format_percentage(percentage: f64) -> String {
    let formatted = format!("{percentage:.3}");
    match formatted.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => formatted,
    }
}

/// Games behind, with the leader shown as `-`
pub fn format_games_behind(games_behind: f64) -> String {
    if games_behind == 0.0 {
        "-".to_string()
    } else {
        format!("{games_behind:.1}")
    }
}

pub fn format_standings_table(rows: &[StandingsRow], show_overtime_losses: bool) -> String {
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = String::new();
    let _ = write!(out, "{:<name_width$}  {:>3} {:>3} {:>3}", "Team", "W", "L", "T");
    if show_overtime_losses {
        let _ = write!(out, " {:>3}", "OTL");
    }
    let _ = writeln!(
        out,
        " {:>4} {:>4} {:>4} {:>5} {:>5} {:>6}",
        "Forf", "RS", "RA", "Diff", "GB", "Pct"
    );

    for row in rows {
        let _ = write!(
            out,
            "{:<name_width$}  {:>3} {:>3} {:>3}",
            row.name, row.wins, row.losses, row.ties
        );
        if show_overtime_losses {
            let _ = write!(out, " {:>3}", row.overtime_losses);
        }
        let _ = writeln!(
            out,
            " {:>4} {:>4} {:>4} {:>5} {:>5} {:>6}",
            row.forfeits,
            row.runs_scored,
            row.runs_against,
            format!("{:+}", row.run_differential()),
            format_games_behind(row.games_behind),
            format_percentage(row.percentage)
        );
    }
    out
}

fn format_game_line(game: &GameRecord, team_name: &impl Fn(u16) -> String) -> String {
    let result = match game.scores() {
        Some((home, visitor)) => {
            let mut result = format!("{home}-{visitor}");
            if game.home_forfeit && game.visitor_forfeit {
                result.push_str(" (double forfeit)");
            } else if game.home_forfeit {
                result.push_str(" (home forfeit)");
            } else if game.visitor_forfeit {
                result.push_str(" (visitor forfeit)");
            }
            result
        }
        None => "-".to_string(),
    };

    format!(
        "{:>4}  {}  {:>8}  {:<10} {} vs {}  {}",
        game.game_id,
        game.day.format("%a %m/%d/%Y"),
        game.time.format("%-I:%M %p").to_string(),
        game.field,
        team_name(game.home_id),
        team_name(game.visitor_id),
        result
    )
}

/// One line per game: ID, date, time, field, home vs visitor, result
pub fn format_games(games: &[GameRecord], team_name: impl Fn(u16) -> String) -> String {
    let mut out = String::new();
    for game in games {
        let _ = writeln!(out, "{}", format_game_line(game, &team_name));
    }
    out
}

pub fn format_schedule(schedule: &[ScheduleEntry], team_name: impl Fn(u16) -> String) -> String {
    let mut out = String::new();
    for entry in schedule {
        match entry {
            ScheduleEntry::WeekBoundary(boundary) => {
                let _ = writeln!(out, "\n{}", boundary.label.trim());
            }
            ScheduleEntry::Game(game) => {
                let _ = writeln!(out, "{}", format_game_line(game, &team_name));
            }
        }
    }
    out
}

pub fn format_standings_report(report: &StandingsReport) -> String {
    let mut out = String::new();
    let title = if report.info.name.is_empty() {
        report.info.id.as_str()
    } else {
        report.info.name.as_str()
    };
    let _ = writeln!(out, "{} - {}", report.info.organization, title);
    if let Some(updated) = report.info.updated {
        let _ = writeln!(out, "Updated {}", updated.format("%m/%d/%Y %-I:%M %p"));
    }
    let _ = writeln!(out, "{RULE}");
    out.push_str(&format_standings_table(
        &report.rows,
        report.show_overtime_losses,
    ));
    let _ = writeln!(out, "{RULE}");

    if let Some(team) = &report.team_filter {
        let _ = writeln!(out, "Schedule for {team}");
    } else {
        let _ = writeln!(out, "Schedule");
    }
    if report.schedule.is_empty() {
        let _ = writeln!(out, "No games");
    } else {
        out.push_str(&format_schedule(&report.schedule, |id| {
            report.division.team_name(id).to_string()
        }));
    }
    out
}

pub fn format_import_result(result: &ImportResult) -> String {
    if !result.success {
        return format!(
            "Import failed: {}\n",
            result.error_message.as_deref().unwrap_or("unknown error")
        );
    }

    let mut out = String::from("Import succeeded\n");
    if let Some(summary) = &result.summary {
        let _ = writeln!(
            out,
            "{} teams, {} games, {} weeks",
            summary.team_count, summary.game_count, summary.week_count
        );
    }
    if let (Some(first), Some(last)) = (result.first_game_date, result.last_game_date) {
        let _ = writeln!(
            out,
            "Games from {} to {}",
            first.format("%m/%d/%Y"),
            last.format("%m/%d/%Y")
        );
    }
    out
}

pub fn format_division_list(organization: &str, infos: &[DivisionInfo]) -> String {
    if infos.is_empty() {
        return format!("No divisions for {organization}\n");
    }

    let id_width = infos.iter().map(|info| info.id.len()).max().unwrap_or(0).max(2);
    let mut out = String::new();
    let _ = writeln!(out, "Divisions of {organization}");
    for info in infos {
        let updated = info
            .updated
            .map(|updated| updated.format("%m/%d/%Y %-I:%M %p").to_string())
            .unwrap_or_else(|| "never".to_string());
        let _ = writeln!(
            out,
            "{:<id_width$}  {}  (updated {updated})",
            info.id, info.name
        );
    }
    out
}
