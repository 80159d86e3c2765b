use serde::{Deserialize, Serialize};

/// 1-based roster position of a team within its division
pub type TeamId = u16;

/// A team on a division roster. IDs follow the roster order of the
/// imported schedule file and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
