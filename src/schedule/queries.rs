use crate::models::{Division, GameId, GameRecord, TeamId};

/// Games played on the same day and field as `game_id`, in schedule order.
/// Used to present every game of one site visit together for score entry.
/// Empty if `game_id` is unknown or names a week boundary.
pub fn games_at_same_site(division: &Division, game_id: GameId) -> Vec<&GameRecord> {
    let Some(anchor) = division.game(game_id) else {
        return Vec::new();
    };

    division
        .games()
        .filter(|game| game.day == anchor.day && game.field == anchor.field)
        .collect()
}

/// A single team's games, in schedule order
pub fn team_schedule(division: &Division, team_id: TeamId) -> Vec<&GameRecord> {
    division
        .games()
        .filter(|game| game.involves(team_id))
        .collect()
}
