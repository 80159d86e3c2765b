use super::team::TeamId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Sequential identifier of a schedule row, unique within a division
pub type GameId = u32;

/// A scheduled game between two roster teams.
///
/// `home_score`/`visitor_score` stay `None` until a result is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_id: GameId,
    pub day: NaiveDate,
    pub time: NaiveTime,
    pub field: String,
    pub home_id: TeamId,
    pub visitor_id: TeamId,
    #[serde(default)]
    pub home_score: Option<u16>,
    #[serde(default)]
    pub visitor_score: Option<u16>,
    #[serde(default)]
    pub home_forfeit: bool,
    #[serde(default)]
    pub visitor_forfeit: bool,
}

impl GameRecord {
    /// Creates an unplayed game
    pub fn new(
        game_id: GameId,
        day: NaiveDate,
        time: NaiveTime,
        field: impl Into<String>,
        home_id: TeamId,
        visitor_id: TeamId,
    ) -> Self {
        Self {
            game_id,
            day,
            time,
            field: field.into(),
            home_id,
            visitor_id,
            home_score: None,
            visitor_score: None,
            home_forfeit: false,
            visitor_forfeit: false,
        }
    }

    /// Both scores reported, as `(home, visitor)`
    pub fn scores(&self) -> Option<(u16, u16)> {
        self.home_score.zip(self.visitor_score)
    }

    pub fn is_played(&self) -> bool {
        self.scores().is_some()
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_id == team_id || self.visitor_id == team_id
    }
}

/// Marker row delimiting display weeks. Consumes a game ID but never
/// counts toward standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBoundary {
    pub game_id: GameId,
    pub label: String,
}

/// One row of a division schedule in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScheduleEntry {
    Game(GameRecord),
    WeekBoundary(WeekBoundary),
}

impl ScheduleEntry {
    pub fn game_id(&self) -> GameId {
        match self {
            ScheduleEntry::Game(game) => game.game_id,
            ScheduleEntry::WeekBoundary(week) => week.game_id,
        }
    }

    pub fn as_game(&self) -> Option<&GameRecord> {
        match self {
            ScheduleEntry::Game(game) => Some(game),
            ScheduleEntry::WeekBoundary(_) => None,
        }
    }

    pub fn as_game_mut(&mut self) -> Option<&mut GameRecord> {
        match self {
            ScheduleEntry::Game(game) => Some(game),
            ScheduleEntry::WeekBoundary(_) => None,
        }
    }

    pub fn is_week_boundary(&self) -> bool {
        matches!(self, ScheduleEntry::WeekBoundary(_))
    }
}
