//! Applying reported scores and forfeits to a division schedule

use crate::constants::forfeit::{FORFEIT_SCORE, WINNING_SCORE};
use crate::models::{Division, GameId, GameRecord};
use crate::standings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A reported result for one game. Only these fields can be changed after
/// import; everything else about a game is fixed by the schedule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub game_id: GameId,
    #[serde(default)]
    pub home_score: Option<u16>,
    #[serde(default)]
    pub visitor_score: Option<u16>,
    #[serde(default)]
    pub home_forfeit: bool,
    #[serde(default)]
    pub visitor_forfeit: bool,
}

impl ScoreSubmission {
    /// Result with both scores reported and no forfeits
    pub fn final_score(game_id: GameId, home_score: u16, visitor_score: u16) -> Self {
        Self {
            game_id,
            home_score: Some(home_score),
            visitor_score: Some(visitor_score),
            ..Default::default()
        }
    }

    /// Forfeit by either or both teams; scores are forced on apply
    pub fn forfeit(game_id: GameId, home_forfeit: bool, visitor_forfeit: bool) -> Self {
        Self {
            game_id,
            home_forfeit,
            visitor_forfeit,
            ..Default::default()
        }
    }
}

/// Forces the conventional forfeit score: 7-0 for the team that showed up,
/// 0-0 when both teams forfeit. Scores of non-forfeited games are left alone.
pub fn normalize_forfeit_scores(game: &mut GameRecord) {
    if game.visitor_forfeit {
        game.visitor_score = Some(FORFEIT_SCORE);
        game.home_score = Some(if game.home_forfeit {
            FORFEIT_SCORE
        } else {
            WINNING_SCORE
        });
    } else if game.home_forfeit {
        game.visitor_score = Some(WINNING_SCORE);
        game.home_score = Some(FORFEIT_SCORE);
    }
}

/// Applies submitted results to the division schedule and recomputes its
/// standings.
///
/// Each submission updates the first game with a matching ID. Submissions for
/// unknown IDs or week boundaries are ignored. Returns how many games were
/// updated.
pub fn apply_score_updates(division: &mut Division, submissions: &[ScoreSubmission]) -> usize {
    let mut updated = 0;

    for submission in submissions {
        let Some(game) = division
            .schedule
            .iter_mut()
            .filter_map(|entry| entry.as_game_mut())
            .find(|game| game.game_id == submission.game_id)
        else {
            debug!(
                "Ignoring score for unknown game {} in {}/{}",
                submission.game_id, division.organization, division.id
            );
            continue;
        };

        game.home_forfeit = submission.home_forfeit;
        game.home_score = submission.home_score;
        game.visitor_forfeit = submission.visitor_forfeit;
        game.visitor_score = submission.visitor_score;
        normalize_forfeit_scores(game);

        debug!(
            "Game {} updated: {:?}-{:?} (forfeits home={}, visitor={})",
            game.game_id, game.home_score, game.visitor_score, game.home_forfeit, game.visitor_forfeit
        );
        updated += 1;
    }

    standings::recompute(&mut division.standings, &division.schedule);

    info!(
        "Applied {} of {} score submissions to {}/{}",
        updated,
        submissions.len(),
        division.organization,
        division.id
    );

    updated
}
