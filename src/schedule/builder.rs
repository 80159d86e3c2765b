//! Assembles an imported schedule into a division document

use super::parser::{ParsedSchedule, parse_schedule};
use crate::error::AppError;
use crate::models::Division;
use crate::standings;
use chrono::NaiveDate;
use tracing::info;

/// What an import produced, reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub first_game_date: Option<NaiveDate>,
    pub last_game_date: Option<NaiveDate>,
    pub team_count: usize,
    pub game_count: usize,
    pub week_count: usize,
}

/// Splits schedule file contents into lines, accepting `\n` and `\r\n`
pub fn schedule_lines(contents: &str) -> Vec<&str> {
    contents.lines().collect()
}

/// Parses `lines` and installs roster, schedule and fresh standings into a
/// division document.
///
/// An `existing` document keeps its identity fields; otherwise a new one is
/// created for `organization`/`division_id`. Standings are recomputed before
/// returning, so the document never carries a schedule without a matching
/// table. Nothing is modified if any line fails to parse.
pub fn build_division<S: AsRef<str>>(
    existing: Option<Division>,
    organization: &str,
    division_id: &str,
    lines: &[S],
    uses_double_headers: bool,
) -> Result<(Division, ImportSummary), AppError> {
    let parsed = parse_schedule(lines, uses_double_headers)?;
    let summary = summarize(&parsed);

    let mut division = match existing {
        Some(division) => division,
        None => {
            info!("Creating new division document for {organization}/{division_id}");
            Division::new(organization, division_id)
        }
    };

    division.teams = parsed.teams;
    division.schedule = parsed.schedule;
    division.standings = parsed.standings;
    standings::recompute(&mut division.standings, &division.schedule);

    Ok((division, summary))
}

fn summarize(parsed: &ParsedSchedule) -> ImportSummary {
    ImportSummary {
        first_game_date: parsed.first_game_date,
        last_game_date: parsed.last_game_date,
        team_count: parsed.teams.len(),
        game_count: parsed.game_count(),
        week_count: parsed.week_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_build_new_division() {
        let contents = TestDataBuilder::sample_schedule_file();
        let lines = schedule_lines(&contents);

        let (division, summary) =
            build_division(None, "Westside Softball", "U12", &lines, false).unwrap();

        assert_eq!(division.organization, "Westside Softball");
        assert_eq!(division.id, "u12");
        assert_eq!(division.teams.len(), 4);
        assert_eq!(division.standings.len(), division.teams.len());
        assert_eq!(summary.team_count, 4);
        assert_eq!(summary.week_count, 2);
        assert_eq!(summary.game_count, 4);
        assert_eq!(
            summary.first_game_date,
            NaiveDate::from_ymd_opt(2024, 4, 6)
        );
        assert_eq!(
            summary.last_game_date,
            NaiveDate::from_ymd_opt(2024, 4, 13)
        );
    }

    #[test]
    fn test_build_reuses_existing_identity() {
        let contents = TestDataBuilder::sample_schedule_file();
        let lines = schedule_lines(&contents);
        let mut existing = TestDataBuilder::create_played_division();
        existing.organization = "Original Org".to_string();
        existing.id = "original".to_string();

        let (division, _) = build_division(Some(existing), "Other", "other", &lines, true).unwrap();

        assert_eq!(division.organization, "Original Org");
        assert_eq!(division.id, "original");
        // replaced schedule has no scores yet
        assert!(division.games().all(|g| !g.is_played()));
        assert!(division.standings.iter().all(|r| r.games_played() == 0));
    }

    #[test]
    fn test_build_fails_without_touching_existing() {
        let lines = vec!["h", "h", "h", "h", "Comets", "Rockets"];
        let result = build_division(None, "Org", "div", &lines, false);
        assert!(matches!(result, Err(AppError::Format { .. })));
    }

    #[test]
    fn test_schedule_lines_handles_crlf() {
        let lines = schedule_lines("a\r\nb\r\n\r\nc");
        assert_eq!(lines, vec!["a", "b", "", "c"]);
    }
}
