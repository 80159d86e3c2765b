//! Full standings recompute from the schedule

use crate::models::{GameRecord, ScheduleEntry, StandingsRow};
use tracing::{debug, warn};

/// Rebuilds the standings table from scratch by replaying every game.
///
/// All counters are zeroed first, so the result depends only on the
/// schedule passed in and repeated calls are idempotent. Rows are indexed by
/// `team_id - 1`. Week boundaries are skipped, as are games whose team
/// references fall outside the table.
pub fn recompute(standings: &mut [StandingsRow], schedule: &[ScheduleEntry]) {
    for row in standings.iter_mut() {
        row.reset();
    }

    let mut applied = 0usize;
    for game in schedule.iter().filter_map(ScheduleEntry::as_game) {
        if apply_game(standings, game) {
            applied += 1;
        }
    }

    update_rankings(standings);

    debug!(
        "Recomputed standings: teams={}, games_applied={}",
        standings.len(),
        applied
    );
}

/// Folds one game into the table. Returns false if the game references a
/// team that is not in the table.
fn apply_game(standings: &mut [StandingsRow], game: &GameRecord) -> bool {
    let (Some(home), Some(visitor)) = (
        row_index(standings, game.home_id),
        row_index(standings, game.visitor_id),
    ) else {
        warn!(
            "Skipping game {}: team reference {} vs {} outside standings of {} teams",
            game.game_id,
            game.home_id,
            game.visitor_id,
            standings.len()
        );
        return false;
    };

    if let Some((home_score, visitor_score)) = game.scores() {
        standings[home].runs_scored += u32::from(home_score);
        standings[home].runs_against += u32::from(visitor_score);
        standings[visitor].runs_scored += u32::from(visitor_score);
        standings[visitor].runs_against += u32::from(home_score);
    }

    if game.home_forfeit {
        standings[home].forfeits += 1;
        standings[home].forfeits_charged += 1;
    }
    if game.visitor_forfeit {
        standings[visitor].forfeits += 1;
        standings[visitor].forfeits_charged += 1;
    }

    if game.home_forfeit && game.visitor_forfeit {
        // double forfeit is a loss for both, never a tie
        standings[home].losses += 1;
        standings[visitor].losses += 1;
    } else if let Some((home_score, visitor_score)) = game.scores() {
        if home_score > visitor_score {
            standings[home].wins += 1;
            standings[visitor].losses += 1;
        } else if home_score < visitor_score {
            standings[home].losses += 1;
            standings[visitor].wins += 1;
        } else {
            standings[home].ties += 1;
            standings[visitor].ties += 1;
        }
    }

    true
}

fn row_index(standings: &[StandingsRow], team_id: u16) -> Option<usize> {
    let index = usize::from(team_id).checked_sub(1)?;
    (index < standings.len()).then_some(index)
}

/// Games behind and winning percentage, measured against the team with the
/// most wins (first in roster order on equal wins).
fn update_rankings(standings: &mut [StandingsRow]) {
    let Some(leader) = standings
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.wins.cmp(&b.wins).then(ib.cmp(ia)))
        .map(|(_, row)| (row.wins, row.losses))
    else {
        return;
    };
    let (max_wins, max_losses) = leader;

    for row in standings.iter_mut() {
        let behind = (i32::from(max_wins) - i32::from(row.wins))
            + (i32::from(row.losses) - i32::from(max_losses));
        row.games_behind = f64::from(behind) / 2.0;

        row.percentage = if row.wins + row.losses == 0 {
            0.0
        } else {
            f64::from(row.wins) / f64::from(row.games_played())
        };
    }
}
