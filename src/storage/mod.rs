//! Persistence of division documents and division metadata
//!
//! Stores hold two kinds of records per organization: one `Division` document
//! per division (roster, schedule, standings) and a single list of
//! `DivisionInfo` metadata records.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Division, DivisionInfo};
use chrono::NaiveDateTime;

/// Load/save interface for division data.
///
/// Writes are whole-document replacements; concurrent writers to the same
/// document are last-writer-wins at this level. The division list is
/// read, modified and saved as a whole, so callers serialize list updates
/// per organization.
#[allow(async_fn_in_trait)]
pub trait DivisionStore {
    /// Loads a division document, `None` if it was never saved
    async fn load_division(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<Option<Division>, AppError>;

    async fn save_division(&self, division: &Division) -> Result<(), AppError>;

    /// Removes a division document. Missing documents are not an error.
    async fn delete_division(&self, organization: &str, division_id: &str)
    -> Result<(), AppError>;

    /// All metadata records of an organization, empty if none were saved
    async fn load_division_infos(&self, organization: &str)
    -> Result<Vec<DivisionInfo>, AppError>;

    async fn save_division_infos(
        &self,
        organization: &str,
        infos: &[DivisionInfo],
    ) -> Result<(), AppError>;

    /// Metadata record of a single division
    async fn load_division_info(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<Option<DivisionInfo>, AppError> {
        let infos = self.load_division_infos(organization).await?;
        Ok(infos
            .into_iter()
            .find(|info| info.matches(organization, division_id)))
    }

    /// Sets the "last updated" timestamp of a division's metadata record.
    /// Returns false if no such record exists.
    async fn touch_division_metadata(
        &self,
        organization: &str,
        division_id: &str,
        timestamp: NaiveDateTime,
    ) -> Result<bool, AppError> {
        let mut infos = self.load_division_infos(organization).await?;
        let Some(info) = infos
            .iter_mut()
            .find(|info| info.matches(organization, division_id))
        else {
            return Ok(false);
        };
        info.updated = Some(timestamp);
        self.save_division_infos(organization, &infos).await?;
        Ok(true)
    }
}
