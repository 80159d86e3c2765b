pub mod engine;

pub use engine::recompute;

use crate::models::StandingsRow;
use std::cmp::Ordering;

/// Standings sorted for display: fewest games behind first, then highest
/// winning percentage. Teams that compare equal keep roster order.
pub fn display_order(standings: &[StandingsRow]) -> Vec<&StandingsRow> {
    let mut rows: Vec<&StandingsRow> = standings.iter().collect();
    rows.sort_by(|a, b| {
        a.games_behind
            .partial_cmp(&b.games_behind)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.percentage
                    .partial_cmp(&a.percentage)
                    .unwrap_or(Ordering::Equal)
            })
    });
    rows
}

/// Hockey leagues track overtime losses as a separate column
pub fn shows_overtime_losses(organization: &str) -> bool {
    organization.to_lowercase().contains("hockey")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team_id: u16, games_behind: f64, percentage: f64) -> StandingsRow {
        let mut row = StandingsRow::new(team_id, format!("Team {team_id}"));
        row.games_behind = games_behind;
        row.percentage = percentage;
        row
    }

    #[test]
    fn test_display_order() {
        let standings = vec![
            row(1, 1.5, 0.4),
            row(2, 0.0, 0.8),
            row(3, 1.5, 0.5),
            row(4, 0.5, 0.6),
        ];

        let order: Vec<u16> = display_order(&standings)
            .iter()
            .map(|r| r.team_id)
            .collect();

        assert_eq!(order, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_display_order_is_stable_for_equal_rows() {
        let standings = vec![row(1, 0.0, 0.0), row(2, 0.0, 0.0), row(3, 0.0, 0.0)];
        let order: Vec<u16> = display_order(&standings)
            .iter()
            .map(|r| r.team_id)
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_shows_overtime_losses() {
        assert!(shows_overtime_losses("Metro Hockey League"));
        assert!(shows_overtime_losses("HOCKEY"));
        assert!(!shows_overtime_losses("Westside Softball"));
    }
}
