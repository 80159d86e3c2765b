//! League operations over a division store
//!
//! `LeagueService` ties the schedule parser, score processor and standings
//! engine to a `DivisionStore` and a `Clock`. Every successful write of a
//! division document also stamps the division's metadata record with the
//! clock's current time.

use crate::clock::Clock;
use crate::error::AppError;
use crate::models::{
    Division, DivisionInfo, GameId, GameRecord, ScheduleEntry, StandingsRow, normalize_division_id,
};
use crate::schedule::{
    ImportSummary, build_division, games_at_same_site, schedule_lines, team_schedule,
};
use crate::scores::{ScoreSubmission, apply_score_updates};
use crate::standings::{display_order, shows_overtime_losses};
use crate::storage::DivisionStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, instrument, warn};

/// Message reported when importing into a division without a metadata record
pub const MISSING_DIVISION_MESSAGE: &str = "Division Does Not Exist";

/// Outcome of a schedule import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    pub error_message: Option<String>,
    pub first_game_date: Option<NaiveDate>,
    pub last_game_date: Option<NaiveDate>,
    #[serde(skip)]
    pub summary: Option<ImportSummary>,
}

impl ImportResult {
    fn imported(summary: ImportSummary) -> Self {
        Self {
            success: true,
            error_message: None,
            first_game_date: summary.first_game_date,
            last_game_date: summary.last_game_date,
            summary: Some(summary),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            first_game_date: None,
            last_game_date: None,
            summary: None,
        }
    }
}

/// Standings table of a division prepared for display
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsReport {
    pub info: DivisionInfo,
    /// Rows in display order
    pub rows: Vec<StandingsRow>,
    /// Full schedule, or only the selected team's games when filtered
    pub schedule: Vec<ScheduleEntry>,
    pub team_filter: Option<String>,
    pub show_overtime_losses: bool,
    pub division: Division,
}

type DivisionKey = (String, String);
type LockMap<K> = Mutex<HashMap<K, Arc<Mutex<()>>>>;

async fn acquire<K: Eq + Hash>(locks: &LockMap<K>, key: K) -> OwnedMutexGuard<()> {
    let lock = {
        let mut locks = locks.lock().await;
        locks.entry(key).or_default().clone()
    };
    lock.lock_owned().await
}

/// Lock order: a division lock is always taken before its organization's
/// lock, never the other way round.
pub struct LeagueService<S, C> {
    store: S,
    clock: C,
    division_locks: LockMap<DivisionKey>,
    organization_locks: LockMap<String>,
}

impl<S: DivisionStore, C: Clock> LeagueService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            division_locks: Mutex::new(HashMap::new()),
            organization_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes writers of one division within this process
    async fn lock_division(&self, organization: &str, division_id: &str) -> OwnedMutexGuard<()> {
        acquire(
            &self.division_locks,
            (organization.to_string(), division_id.to_string()),
        )
        .await
    }

    /// Serializes read-modify-write of an organization's division list,
    /// which every division of the organization shares
    async fn lock_organization(&self, organization: &str) -> OwnedMutexGuard<()> {
        acquire(&self.organization_locks, organization.to_string()).await
    }

    async fn require_info(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<DivisionInfo, AppError> {
        self.store
            .load_division_info(organization, division_id)
            .await?
            .ok_or_else(|| AppError::missing_division(organization, division_id))
    }

    async fn touch(&self, organization: &str, division_id: &str) -> Result<(), AppError> {
        let now = self.clock.now();
        let _guard = self.lock_organization(organization).await;
        if !self
            .store
            .touch_division_metadata(organization, division_id, now)
            .await?
        {
            warn!("No metadata record to stamp for {organization}/{division_id}");
        }
        Ok(())
    }

    /// Imports a schedule file into an existing division, replacing its
    /// roster, schedule and standings.
    ///
    /// Parse failures and a missing division are reported through the
    /// returned `ImportResult`; nothing is written in that case. Store
    /// failures are returned as errors.
    #[instrument(skip(self, contents), fields(bytes = contents.len()))]
    pub async fn import_schedule(
        &self,
        organization: &str,
        division_id: &str,
        contents: &str,
        uses_double_headers: bool,
    ) -> Result<ImportResult, AppError> {
        let division_id = normalize_division_id(division_id);
        let _guard = self.lock_division(organization, &division_id).await;

        if self
            .store
            .load_division_info(organization, &division_id)
            .await?
            .is_none()
        {
            warn!("Import rejected, {organization}/{division_id} does not exist");
            return Ok(ImportResult::failed(MISSING_DIVISION_MESSAGE));
        }

        let existing = self.store.load_division(organization, &division_id).await?;
        let lines = schedule_lines(contents);

        let (division, summary) = match build_division(
            existing,
            organization,
            &division_id,
            &lines,
            uses_double_headers,
        ) {
            Ok(built) => built,
            Err(e) if e.is_import_failure() => {
                warn!(line = ?e.line(), "Import of {organization}/{division_id} failed: {e}");
                return Ok(ImportResult::failed(e.to_string()));
            }
            Err(e) => return Err(e),
        };

        self.store.save_division(&division).await?;
        self.touch(organization, &division_id).await?;

        info!(
            "Imported {} teams and {} games into {organization}/{division_id}",
            summary.team_count, summary.game_count
        );
        Ok(ImportResult::imported(summary))
    }

    /// Applies submitted results and recomputes standings. Returns the number
    /// of games updated.
    #[instrument(skip(self, submissions), fields(count = submissions.len()))]
    pub async fn save_scores(
        &self,
        organization: &str,
        division_id: &str,
        submissions: &[ScoreSubmission],
    ) -> Result<usize, AppError> {
        let division_id = normalize_division_id(division_id);
        let _guard = self.lock_division(organization, &division_id).await;

        self.require_info(organization, &division_id).await?;
        let mut division = self
            .store
            .load_division(organization, &division_id)
            .await?
            .ok_or_else(|| AppError::missing_division(organization, &division_id))?;

        let updated = apply_score_updates(&mut division, submissions);

        self.store.save_division(&division).await?;
        self.touch(organization, &division_id).await?;
        Ok(updated)
    }

    /// Adds a metadata record for a new division
    #[instrument(skip(self))]
    pub async fn create_division(
        &self,
        organization: &str,
        division_id: &str,
        name: &str,
    ) -> Result<DivisionInfo, AppError> {
        let _guard = self.lock_organization(organization).await;
        let mut infos = self.store.load_division_infos(organization).await?;
        if infos
            .iter()
            .any(|info| info.matches(organization, division_id))
        {
            return Err(AppError::division_exists(
                organization,
                normalize_division_id(division_id),
            ));
        }

        let mut info = DivisionInfo::new(organization, division_id, name);
        info.updated = Some(self.clock.now());
        infos.push(info.clone());
        self.store.save_division_infos(organization, &infos).await?;

        info!("Created division {organization}/{}", info.id);
        Ok(info)
    }

    /// Renames a division. A division without a record gets one.
    #[instrument(skip(self))]
    pub async fn edit_division(
        &self,
        organization: &str,
        division_id: &str,
        name: &str,
    ) -> Result<DivisionInfo, AppError> {
        let _guard = self.lock_organization(organization).await;
        let mut infos = self.store.load_division_infos(organization).await?;

        let mut info = DivisionInfo::new(organization, division_id, name);
        info.updated = Some(self.clock.now());

        match infos
            .iter_mut()
            .find(|existing| existing.matches(organization, division_id))
        {
            Some(existing) => *existing = info.clone(),
            None => infos.push(info.clone()),
        }
        self.store.save_division_infos(organization, &infos).await?;

        Ok(info)
    }

    /// Removes a division's metadata record and its document. Returns whether
    /// a record existed.
    #[instrument(skip(self))]
    pub async fn delete_division(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<bool, AppError> {
        let division_id = normalize_division_id(division_id);
        let _guard = self.lock_division(organization, &division_id).await;

        let removed = {
            let _list_guard = self.lock_organization(organization).await;
            let mut infos = self.store.load_division_infos(organization).await?;
            let before = infos.len();
            infos.retain(|info| !info.matches(organization, &division_id));
            let removed = infos.len() != before;

            if removed {
                self.store.save_division_infos(organization, &infos).await?;
            }
            removed
        };
        self.store.delete_division(organization, &division_id).await?;

        info!("Deleted division {organization}/{division_id}");
        Ok(removed)
    }

    pub async fn list_divisions(&self, organization: &str) -> Result<Vec<DivisionInfo>, AppError> {
        self.store.load_division_infos(organization).await
    }

    /// Standings in display order, optionally with the schedule narrowed to
    /// one team's games
    #[instrument(skip(self))]
    pub async fn standings(
        &self,
        organization: &str,
        division_id: &str,
        team_name: Option<&str>,
    ) -> Result<StandingsReport, AppError> {
        let info = self.require_info(organization, division_id).await?;
        let division = self
            .store
            .load_division(organization, division_id)
            .await?
            .ok_or_else(|| AppError::missing_division(organization, division_id))?;

        let rows = display_order(&division.standings)
            .into_iter()
            .cloned()
            .collect();

        let schedule = match team_name {
            Some(name) => match division.team_by_name(name) {
                Some(team) => team_schedule(&division, team.id)
                    .into_iter()
                    .cloned()
                    .map(ScheduleEntry::Game)
                    .collect(),
                None => Vec::new(),
            },
            None => division.schedule.clone(),
        };

        Ok(StandingsReport {
            show_overtime_losses: shows_overtime_losses(&division.organization),
            info,
            rows,
            schedule,
            team_filter: team_name.map(str::to_string),
            division,
        })
    }

    /// Games played on the same day and field as `game_id`, for entering
    /// several results at once. Empty if the game does not exist.
    pub async fn games_for_score_entry(
        &self,
        organization: &str,
        division_id: &str,
        game_id: GameId,
    ) -> Result<Vec<GameRecord>, AppError> {
        let division = self
            .store
            .load_division(organization, division_id)
            .await?
            .ok_or_else(|| AppError::missing_division(organization, division_id))?;

        Ok(games_at_same_site(&division, game_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Loads a division document with its metadata record
    pub async fn division(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<(DivisionInfo, Division), AppError> {
        let info = self.require_info(organization, division_id).await?;
        let division = self
            .store
            .load_division(organization, division_id)
            .await?
            .ok_or_else(|| AppError::missing_division(organization, division_id))?;
        Ok((info, division))
    }
}
