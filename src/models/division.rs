use super::game::{GameId, GameRecord, ScheduleEntry};
use super::standings::StandingsRow;
use super::team::{Team, TeamId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Division IDs are compared and stored case-insensitively.
pub fn normalize_division_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// One season of one division: roster, schedule and standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub organization: String,
    pub id: String,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default)]
    pub standings: Vec<StandingsRow>,
}

impl Division {
    /// Empty division document with a normalized ID
    pub fn new(organization: impl Into<String>, id: &str) -> Self {
        Self {
            organization: organization.into(),
            id: normalize_division_id(id),
            teams: Vec::new(),
            schedule: Vec::new(),
            standings: Vec::new(),
        }
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    /// Case-insensitive lookup by team name
    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        let name = name.trim();
        self.teams
            .iter()
            .find(|team| team.name.eq_ignore_ascii_case(name))
    }

    /// Display name of a team, or a placeholder for unknown IDs
    pub fn team_name(&self, team_id: TeamId) -> &str {
        self.team(team_id)
            .map(|team| team.name.as_str())
            .unwrap_or("?")
    }

    /// First game (not week boundary) with the given ID
    pub fn game(&self, game_id: GameId) -> Option<&GameRecord> {
        self.games().find(|game| game.game_id == game_id)
    }

    /// Games in schedule order, week boundaries skipped
    pub fn games(&self) -> impl Iterator<Item = &GameRecord> {
        self.schedule.iter().filter_map(ScheduleEntry::as_game)
    }
}

/// Metadata record for a division, kept in the organization's division list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionInfo {
    pub organization: String,
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub updated: Option<NaiveDateTime>,
}

impl DivisionInfo {
    pub fn new(organization: impl Into<String>, id: &str, name: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            id: normalize_division_id(id),
            name: name.into(),
            updated: None,
        }
    }

    /// Whether this record describes the given division
    pub fn matches(&self, organization: &str, division_id: &str) -> bool {
        self.organization == organization
            && normalize_division_id(&self.id) == normalize_division_id(division_id)
    }
}
