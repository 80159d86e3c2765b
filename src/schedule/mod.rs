pub mod builder;
pub mod parser;
pub mod queries;

pub use builder::{ImportSummary, build_division, schedule_lines};
pub use parser::{ParsedSchedule, parse_schedule};
pub use queries::{games_at_same_site, team_schedule};
