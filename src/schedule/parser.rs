//! Schedule file parsing
//!
//! The file layout is:
//!
//! ```text
//! line 1-4      : free-form header, ignored
//! line 5..k     : one team name per line, ended by a blank line
//! line k+1..EOF : "Week <label>[,...]" or "Date,DayOfWeek,Time,Home,Visitor,Field"
//! ```
//!
//! Team indexes on game lines are 1-based positions in the roster.

use crate::constants::schedule_file::{
    DATE_FORMATS, DOUBLEHEADER_GAP_MINUTES, GAME_FIELD_COUNT, HEADER_LINES, TIME_FORMATS,
    WEEK_PREFIX,
};
use crate::error::AppError;
use crate::models::{GameId, GameRecord, ScheduleEntry, StandingsRow, Team, TeamId, WeekBoundary};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use tracing::{debug, instrument};

/// Everything read from a schedule file, before it is attached to a division
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchedule {
    pub teams: Vec<Team>,
    pub standings: Vec<StandingsRow>,
    pub schedule: Vec<ScheduleEntry>,
    pub first_game_date: Option<NaiveDate>,
    pub last_game_date: Option<NaiveDate>,
}

impl ParsedSchedule {
    pub fn game_count(&self) -> usize {
        self.schedule.iter().filter(|e| !e.is_week_boundary()).count()
    }

    pub fn week_count(&self) -> usize {
        self.schedule.iter().filter(|e| e.is_week_boundary()).count()
    }
}

/// Parses a schedule file into roster, zeroed standings and schedule rows.
///
/// Game IDs are handed out from a single counter starting at 0, one per
/// emitted row (week boundaries included). With `uses_double_headers` every
/// game line also emits a return game 90 minutes later with home and
/// visitor swapped.
///
/// # Errors
///
/// * `AppError::Format` - roster not terminated by a blank line, or a
///   schedule line (blank ones included) that is neither a week line nor a
///   game line with exactly 6 fields
/// * `AppError::FieldParse` - unparseable date, time or team index
/// * `AppError::Reference` - team index outside `1..=roster size`
///
/// Line numbers in errors are 0-based.
#[instrument(skip(lines), fields(line_count = lines.len()))]
pub fn parse_schedule<S: AsRef<str>>(
    lines: &[S],
    uses_double_headers: bool,
) -> Result<ParsedSchedule, AppError> {
    let (teams, roster_end) = parse_roster(lines)?;
    let standings = teams
        .iter()
        .map(|team| StandingsRow::new(team.id, team.name.clone()))
        .collect();

    let mut schedule = Vec::new();
    let mut next_game_id: GameId = 0;
    let mut first_game_date = None;
    // Date of the most recent row; cleared by a week boundary so that a
    // trailing boundary leaves no last game date.
    let mut last_row_date = None;

    for (index, raw) in lines.iter().enumerate().skip(roster_end + 1) {
        let line = raw.as_ref();
        let fields: Vec<&str> = line.split(',').collect();

        if is_week_line(fields[0]) {
            schedule.push(ScheduleEntry::WeekBoundary(WeekBoundary {
                game_id: next_game_id,
                label: fields[0].to_string(),
            }));
            next_game_id += 1;
            last_row_date = None;
            continue;
        }

        let game = parse_game_line(index, line, &fields, teams.len(), next_game_id)?;
        next_game_id += 1;

        first_game_date.get_or_insert(game.day);
        last_row_date = Some(game.day);

        if uses_double_headers {
            let second = GameRecord::new(
                next_game_id,
                game.day,
                game.time + TimeDelta::minutes(DOUBLEHEADER_GAP_MINUTES),
                game.field.clone(),
                game.visitor_id,
                game.home_id,
            );
            next_game_id += 1;
            schedule.push(ScheduleEntry::Game(game));
            schedule.push(ScheduleEntry::Game(second));
        } else {
            schedule.push(ScheduleEntry::Game(game));
        }
    }

    let parsed = ParsedSchedule {
        teams,
        standings,
        schedule,
        first_game_date,
        last_game_date: last_row_date,
    };

    debug!(
        "Parsed schedule: teams={}, games={}, weeks={}, double_headers={}",
        parsed.teams.len(),
        parsed.game_count(),
        parsed.week_count(),
        uses_double_headers
    );

    Ok(parsed)
}

/// Reads team names starting after the header. Returns the roster and the
/// index of the blank line that ends it.
fn parse_roster<S: AsRef<str>>(lines: &[S]) -> Result<(Vec<Team>, usize), AppError> {
    let mut teams = Vec::new();
    let mut line_number = HEADER_LINES;

    loop {
        let Some(line) = lines.get(line_number) else {
            return Err(AppError::format_error(
                line_number,
                "unterminated roster: expected a blank line after the team names",
            ));
        };

        let name = line.as_ref().trim();
        if name.is_empty() {
            return Ok((teams, line_number));
        }

        let id = TeamId::try_from(teams.len() + 1)
            .map_err(|_| AppError::format_error(line_number, "too many teams in roster"))?;
        teams.push(Team::new(id, name));
        line_number += 1;
    }
}

fn is_week_line(first_field: &str) -> bool {
    first_field
        .trim_start()
        .to_lowercase()
        .starts_with(WEEK_PREFIX)
}

fn parse_game_line(
    index: usize,
    line: &str,
    fields: &[&str],
    roster_size: usize,
    game_id: GameId,
) -> Result<GameRecord, AppError> {
    if fields.len() != GAME_FIELD_COUNT {
        return Err(AppError::format_error(
            index,
            format!(
                "expected {GAME_FIELD_COUNT} comma-separated fields, found {}",
                fields.len()
            ),
        ));
    }

    let day = parse_date(fields[0])
        .ok_or_else(|| AppError::field_parse_error(index, line, "invalid date"))?;
    // fields[1] is the day of the week, informational only
    let time = parse_time(fields[2])
        .ok_or_else(|| AppError::field_parse_error(index, line, "invalid time"))?;
    let home_id = parse_team_index(index, line, fields[3], roster_size)?;
    let visitor_id = parse_team_index(index, line, fields[4], roster_size)?;

    Ok(GameRecord::new(
        game_id,
        day,
        time,
        fields[5].trim(),
        home_id,
        visitor_id,
    ))
}

fn parse_team_index(
    index: usize,
    line: &str,
    text: &str,
    roster_size: usize,
) -> Result<TeamId, AppError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| AppError::field_parse_error(index, line, "invalid team index"))?;

    if value < 1 || value as u64 > roster_size as u64 {
        return Err(AppError::reference_error(index, value, roster_size));
    }

    TeamId::try_from(value).map_err(|_| AppError::reference_error(index, value, roster_size))
}

/// Parses a date in any of the accepted schedule file formats
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Parses a time of day in any of the accepted schedule file formats
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<&'static str> {
        vec![
            "Spring Softball 2024",
            "U12 Division",
            "",
            "Teams:",
        ]
    }

    fn lines_with(roster: &[&'static str], schedule: &[&'static str]) -> Vec<&'static str> {
        let mut lines = header();
        lines.extend_from_slice(roster);
        lines.push("");
        lines.extend_from_slice(schedule);
        lines
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_roster_ids_follow_file_order() {
        let lines = lines_with(&["  Comets ", "Rockets", "Meteors"], &[]);
        let parsed = parse_schedule(&lines, false).unwrap();

        let names: Vec<_> = parsed.teams.iter().map(|t| (t.id, t.name.as_str())).collect();
        assert_eq!(names, vec![(1, "Comets"), (2, "Rockets"), (3, "Meteors")]);
        assert_eq!(parsed.standings.len(), 3);
        assert_eq!(parsed.standings[0], StandingsRow::new(1, "Comets"));
        assert!(parsed.schedule.is_empty());
        assert_eq!(parsed.first_game_date, None);
        assert_eq!(parsed.last_game_date, None);
    }

    #[test]
    fn test_unterminated_roster() {
        let mut lines = header();
        lines.push("Comets");
        lines.push("Rockets");

        let err = parse_schedule(&lines, false).unwrap_err();
        assert!(matches!(err, AppError::Format { line: 6, .. }), "{err:?}");
    }

    #[test]
    fn test_file_shorter_than_header() {
        let lines = vec!["only", "two lines"];
        let err = parse_schedule(&lines, false).unwrap_err();
        assert!(matches!(err, AppError::Format { line: 4, .. }));
    }

    #[test]
    fn test_week_boundaries_and_games() {
        let lines = lines_with(
            &["Comets", "Rockets"],
            &[
                "Week 1",
                "4/6/2024,Sat,9:00 AM,1,2,North",
                "4/6/2024,Sat,10:30 AM,2,1,South",
                "WEEK 2,,,",
                "4/13/2024,Sat,6:00 PM,1,2,North",
            ],
        );
        let parsed = parse_schedule(&lines, false).unwrap();

        assert_eq!(parsed.schedule.len(), 5);
        let ids: Vec<_> = parsed.schedule.iter().map(ScheduleEntry::game_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        match &parsed.schedule[3] {
            ScheduleEntry::WeekBoundary(week) => assert_eq!(week.label, "WEEK 2"),
            other => panic!("expected week boundary, got {other:?}"),
        }

        let game = parsed.schedule[1].as_game().unwrap();
        assert_eq!(game.day, date(2024, 4, 6));
        assert_eq!(game.time, time(9, 0));
        assert_eq!(game.home_id, 1);
        assert_eq!(game.visitor_id, 2);
        assert_eq!(game.field, "North");
        assert!(!game.is_played());

        assert_eq!(parsed.game_count(), 3);
        assert_eq!(parsed.week_count(), 2);
        assert_eq!(parsed.first_game_date, Some(date(2024, 4, 6)));
        assert_eq!(parsed.last_game_date, Some(date(2024, 4, 13)));
    }

    #[test]
    fn test_last_game_date_requires_final_game_row() {
        let lines = lines_with(
            &["Comets", "Rockets"],
            &["week 1", "4/6/2024,Sat,9:00 AM,1,2,North", "week 2"],
        );
        let parsed = parse_schedule(&lines, false).unwrap();
        assert_eq!(parsed.first_game_date, Some(date(2024, 4, 6)));
        assert_eq!(parsed.last_game_date, None);
    }

    #[test]
    fn test_doubleheader_expansion() {
        let lines = lines_with(
            &["Comets", "Rockets"],
            &["Week 1", "4/6/2024,Sat,6:00 PM,1,2,North"],
        );
        let parsed = parse_schedule(&lines, true).unwrap();

        assert_eq!(parsed.schedule.len(), 3);
        let first = parsed.schedule[1].as_game().unwrap();
        let second = parsed.schedule[2].as_game().unwrap();

        assert_eq!(first.game_id, 1);
        assert_eq!(second.game_id, 2);
        assert_eq!(second.time, time(19, 30));
        assert_eq!(second.day, first.day);
        assert_eq!(second.field, first.field);
        assert_eq!(second.home_id, first.visitor_id);
        assert_eq!(second.visitor_id, first.home_id);
        assert!(!second.home_forfeit && !second.visitor_forfeit);
    }

    #[test]
    fn test_doubleheader_late_game_wraps_past_midnight() {
        let lines = lines_with(&["Comets", "Rockets"], &["4/6/2024,Sat,23:00,1,2,North"]);
        let parsed = parse_schedule(&lines, true).unwrap();
        let second = parsed.schedule[1].as_game().unwrap();
        assert_eq!(second.time, time(0, 30));
    }

    #[test]
    fn test_invalid_date_reports_line() {
        let lines = lines_with(
            &["Comets", "Rockets"],
            &["Week 1", "13/45/2024,Mon,6:00 PM,1,2,North"],
        );
        let err = parse_schedule(&lines, false).unwrap_err();
        match err {
            AppError::FieldParse { line, text, .. } => {
                assert_eq!(line, 8);
                assert_eq!(text, "13/45/2024,Mon,6:00 PM,1,2,North");
            }
            other => panic!("expected FieldParse, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_time_and_index() {
        let lines = lines_with(&["Comets", "Rockets"], &["4/6/2024,Sat,noon,1,2,North"]);
        assert!(matches!(
            parse_schedule(&lines, false),
            Err(AppError::FieldParse { line: 7, .. })
        ));

        let lines = lines_with(&["Comets", "Rockets"], &["4/6/2024,Sat,6:00 PM,one,2,North"]);
        assert!(matches!(
            parse_schedule(&lines, false),
            Err(AppError::FieldParse { line: 7, .. })
        ));
    }

    #[test]
    fn test_team_index_out_of_range() {
        let lines = lines_with(&["Comets", "Rockets"], &["4/6/2024,Sat,6:00 PM,1,3,North"]);
        match parse_schedule(&lines, false).unwrap_err() {
            AppError::Reference {
                line,
                index,
                roster_size,
            } => {
                assert_eq!((line, index, roster_size), (7, 3, 2));
            }
            other => panic!("expected Reference, got {other:?}"),
        }

        let lines = lines_with(&["Comets", "Rockets"], &["4/6/2024,Sat,6:00 PM,0,2,North"]);
        assert!(matches!(
            parse_schedule(&lines, false),
            Err(AppError::Reference { index: 0, .. })
        ));
    }

    #[test]
    fn test_wrong_field_count() {
        let lines = lines_with(&["Comets", "Rockets"], &["4/6/2024,Sat,6:00 PM,1,2"]);
        assert!(matches!(
            parse_schedule(&lines, false),
            Err(AppError::Format { line: 7, .. })
        ));
    }

    #[test]
    fn test_blank_line_in_schedule_is_format_error() {
        let lines = lines_with(
            &["Comets", "Rockets"],
            &[
                "4/6/2024,Sat,9:00 AM,1,2,North",
                "",
                "4/13/2024,Sat,9:00 AM,2,1,North",
            ],
        );
        assert!(matches!(
            parse_schedule(&lines, false),
            Err(AppError::Format { line: 8, .. })
        ));
    }

    #[test]
    fn test_trailing_whitespace_line_is_format_error() {
        let lines = lines_with(
            &["Comets", "Rockets"],
            &["4/6/2024,Sat,9:00 AM,1,2,North", "   "],
        );
        assert!(matches!(
            parse_schedule(&lines, false),
            Err(AppError::Format { line: 8, .. })
        ));
    }

    #[test]
    fn test_date_and_time_formats() {
        assert_eq!(parse_date("4/6/2024"), Some(date(2024, 4, 6)));
        assert_eq!(parse_date("04/06/2024"), Some(date(2024, 4, 6)));
        assert_eq!(parse_date("2024-04-06"), Some(date(2024, 4, 6)));
        assert_eq!(parse_date("13/45/2024"), None);
        assert_eq!(parse_date(""), None);

        assert_eq!(parse_time("6:00 PM"), Some(time(18, 0)));
        assert_eq!(parse_time("6:00pm"), Some(time(18, 0)));
        assert_eq!(parse_time("12:15 AM"), Some(time(0, 15)));
        assert_eq!(parse_time("18:45"), Some(time(18, 45)));
        assert_eq!(parse_time("25:00"), None);
    }
}
