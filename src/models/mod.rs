pub mod division;
pub mod game;
pub mod standings;
pub mod team;

pub use division::{Division, DivisionInfo, normalize_division_id};
pub use game::{GameId, GameRecord, ScheduleEntry, WeekBoundary};
pub use standings::StandingsRow;
pub use team::{Team, TeamId};
