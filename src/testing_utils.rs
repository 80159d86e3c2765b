use crate::models::{Division, DivisionInfo, GameId, GameRecord, TeamId};
use crate::schedule::{build_division, schedule_lines};
use crate::scores::{ScoreSubmission, apply_score_updates};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Test utilities for creating schedule files and divisions
pub struct TestDataBuilder;

impl TestDataBuilder {
    pub const ORGANIZATION: &'static str = "Westside Softball";
    pub const DIVISION_ID: &'static str = "u12";

    /// Four teams, two weeks, four games. Game IDs:
    /// 0 = Week 1, 1 = Comets v Rockets, 2 = Meteors v Stars,
    /// 3 = Week 2, 4 = Rockets v Meteors, 5 = Stars v Comets
    pub fn sample_schedule_file() -> String {
        Self::schedule_file(
            &["Comets", "Rockets", "Meteors", "Stars"],
            &[
                "Week 1",
                "4/6/2024,Sat,9:00 AM,1,2,North",
                "4/6/2024,Sat,10:30 AM,3,4,North",
                "Week 2",
                "4/13/2024,Sat,9:00 AM,2,3,North",
                "4/13/2024,Sat,10:30 AM,4,1,South",
            ],
        )
    }

    /// Builds a schedule file with the standard four header lines
    pub fn schedule_file(teams: &[&str], rows: &[&str]) -> String {
        let mut lines = vec![
            "Westside Softball League".to_string(),
            "Spring 2024 - U12".to_string(),
            "Generated schedule".to_string(),
            "Date,Day,Time,Home,Visitor,Field".to_string(),
        ];
        lines.extend(teams.iter().map(|team| team.to_string()));
        lines.push(String::new());
        lines.extend(rows.iter().map(|row| row.to_string()));
        lines.join("\n")
    }

    /// The sample schedule imported with no results reported
    pub fn create_imported_division() -> Division {
        let contents = Self::sample_schedule_file();
        let (division, _) = build_division(
            None,
            Self::ORGANIZATION,
            Self::DIVISION_ID,
            &schedule_lines(&contents),
            false,
        )
        .expect("sample schedule parses");
        division
    }

    /// The sample schedule with three results:
    /// Comets 5-3 Rockets, Meteors 2-2 Stars, Rockets 1-6 Meteors.
    /// Game 5 is unplayed.
    pub fn create_played_division() -> Division {
        let mut division = Self::create_imported_division();
        apply_score_updates(
            &mut division,
            &[
                ScoreSubmission::final_score(1, 5, 3),
                ScoreSubmission::final_score(2, 2, 2),
                ScoreSubmission::final_score(4, 1, 6),
            ],
        );
        division
    }

    pub fn create_division_info() -> DivisionInfo {
        DivisionInfo::new(Self::ORGANIZATION, Self::DIVISION_ID, "Under 12")
    }

    /// Unplayed game on the sample's opening day
    pub fn create_game(game_id: GameId, home_id: TeamId, visitor_id: TeamId) -> GameRecord {
        GameRecord::new(
            game_id,
            Self::opening_day(),
            NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            "North",
            home_id,
            visitor_id,
        )
    }

    pub fn opening_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 6).expect("valid date")
    }

    /// Fixed timestamp for clock-dependent tests
    pub fn fixed_instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 14)
            .and_then(|d| d.and_hms_opt(20, 15, 0))
            .expect("valid timestamp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_schedule_file_layout() {
        let contents = TestDataBuilder::sample_schedule_file();
        let lines = schedule_lines(&contents);
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[4], "Comets");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "Week 1");
    }

    #[test]
    fn test_played_division_standings() {
        let division = TestDataBuilder::create_played_division();
        let names: Vec<(&str, u16, u16, u16)> = division
            .standings
            .iter()
            .map(|r| (r.name.as_str(), r.wins, r.losses, r.ties))
            .collect();

        assert_eq!(
            names,
            vec![
                ("Comets", 1, 0, 0),
                ("Rockets", 0, 2, 0),
                ("Meteors", 1, 0, 1),
                ("Stars", 0, 0, 1),
            ]
        );
    }
}
