use super::team::TeamId;
use serde::{Deserialize, Serialize};

/// Standings line for one team. Counters are rebuilt from the schedule on
/// every recompute; `games_behind` and `percentage` are derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub name: String,
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
    pub overtime_losses: u16,
    pub forfeits: u16,
    pub forfeits_charged: u16,
    pub runs_scored: u32,
    pub runs_against: u32,
    pub games_behind: f64,
    pub percentage: f64,
}

impl StandingsRow {
    /// Zeroed row for a roster team
    pub fn new(team_id: TeamId, name: impl Into<String>) -> Self {
        Self {
            team_id,
            name: name.into(),
            wins: 0,
            losses: 0,
            ties: 0,
            overtime_losses: 0,
            forfeits: 0,
            forfeits_charged: 0,
            runs_scored: 0,
            runs_against: 0,
            games_behind: 0.0,
            percentage: 0.0,
        }
    }

    /// Clears every counter, keeping the team identity
    pub fn reset(&mut self) {
        self.wins = 0;
        self.losses = 0;
        self.ties = 0;
        self.overtime_losses = 0;
        self.forfeits = 0;
        self.forfeits_charged = 0;
        self.runs_scored = 0;
        self.runs_against = 0;
        self.games_behind = 0.0;
        self.percentage = 0.0;
    }

    pub fn games_played(&self) -> u32 {
        u32::from(self.wins) + u32::from(self.losses) + u32::from(self.ties)
    }

    pub fn run_differential(&self) -> i64 {
        i64::from(self.runs_scored) - i64::from(self.runs_against)
    }
}
