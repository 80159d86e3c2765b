use super::DivisionStore;
use crate::error::AppError;
use crate::models::{Division, DivisionInfo, normalize_division_id};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

type DivisionKey = (String, String);

/// Process-local store, used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    divisions: RwLock<HashMap<DivisionKey, Division>>,
    infos: RwLock<HashMap<String, Vec<DivisionInfo>>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, to exercise error paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored division documents
    pub async fn division_count(&self) -> usize {
        self.divisions.read().await.len()
    }

    fn check_writable(&self, context: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage_error(context, "store is read-only"));
        }
        Ok(())
    }
}

fn key(organization: &str, division_id: &str) -> DivisionKey {
    (organization.to_string(), normalize_division_id(division_id))
}

impl DivisionStore for MemoryStore {
    async fn load_division(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<Option<Division>, AppError> {
        let divisions = self.divisions.read().await;
        Ok(divisions.get(&key(organization, division_id)).cloned())
    }

    async fn save_division(&self, division: &Division) -> Result<(), AppError> {
        self.check_writable(&format!(
            "saving division {}/{}",
            division.organization, division.id
        ))?;
        let mut divisions = self.divisions.write().await;
        divisions.insert(key(&division.organization, &division.id), division.clone());
        debug!("Stored division {}/{}", division.organization, division.id);
        Ok(())
    }

    async fn delete_division(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<(), AppError> {
        self.check_writable(&format!("deleting division {organization}/{division_id}"))?;
        let mut divisions = self.divisions.write().await;
        divisions.remove(&key(organization, division_id));
        Ok(())
    }

    async fn load_division_infos(
        &self,
        organization: &str,
    ) -> Result<Vec<DivisionInfo>, AppError> {
        let infos = self.infos.read().await;
        Ok(infos.get(organization).cloned().unwrap_or_default())
    }

    async fn save_division_infos(
        &self,
        organization: &str,
        infos: &[DivisionInfo],
    ) -> Result<(), AppError> {
        self.check_writable(&format!("saving division list for {organization}"))?;
        let mut stored = self.infos.write().await;
        stored.insert(organization.to_string(), infos.to_vec());
        Ok(())
    }
}
