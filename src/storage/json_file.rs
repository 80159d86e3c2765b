use super::DivisionStore;
use crate::constants::storage::{DIVISION_FILE_EXTENSION, DIVISION_LIST_FILE, DIVISIONS_DIR};
use crate::error::AppError;
use crate::models::{Division, DivisionInfo, normalize_division_id};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Stores each organization under its own directory:
///
/// ```text
/// <root>/<organization>/division_list.json
/// <root>/<organization>/divisions/<division id>.json
/// ```
///
/// Documents are written to a temporary file and renamed into place so a
/// crashed write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn organization_dir(&self, organization: &str) -> PathBuf {
        self.root.join(file_name_component(organization))
    }

    fn division_list_path(&self, organization: &str) -> PathBuf {
        self.organization_dir(organization).join(DIVISION_LIST_FILE)
    }

    /// Path of a division document
    pub fn division_path(&self, organization: &str, division_id: &str) -> PathBuf {
        let file_name = format!(
            "{}.{}",
            file_name_component(&normalize_division_id(division_id)),
            DIVISION_FILE_EXTENSION
        );
        self.organization_dir(organization)
            .join(DIVISIONS_DIR)
            .join(file_name)
    }
}

fn is_plain_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ' ')
}

/// Maps an organization or division ID onto a safe file name component.
///
/// Names made of letters, digits, spaces, `-` and `_` are used as they are.
/// Any other name has its unusual characters replaced by underscores and
/// gets a `~` plus the hex bytes of the original name appended, so two
/// distinct names never share a path.
fn file_name_component(name: &str) -> String {
    if !name.is_empty() && name.trim() == name && name.chars().all(is_plain_char) {
        return name.to_string();
    }

    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if is_plain_char(c) { c } else { '_' })
        .collect();
    let hex: String = name.bytes().map(|b| format!("{b:02x}")).collect();
    format!("{cleaned}~{hex}")
}

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary sibling of `path`, unique per process and write
fn temp_path_for(path: &Path) -> PathBuf {
    let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(
        ".{file_name}.{}.{sequence}.tmp",
        std::process::id()
    ))
}

async fn read_json<T: DeserializeOwned>(path: &Path, context: &str) -> Result<Option<T>, AppError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AppError::storage_error(context, e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| AppError::storage_error(context, format!("{}: {e}", path.display())))
}

async fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    context: &str,
) -> Result<(), AppError> {
    let parent = path.parent().ok_or_else(|| {
        AppError::storage_error(context, format!("'{}' has no parent directory", path.display()))
    })?;
    fs::create_dir_all(parent)
        .await
        .map_err(|e| AppError::storage_error(context, e))?;

    let content =
        serde_json::to_string_pretty(value).map_err(|e| AppError::storage_error(context, e))?;

    let temp_path = temp_path_for(path);
    if let Err(e) = write_and_rename(&temp_path, path, content.as_bytes()).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(AppError::storage_error(context, e));
    }

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

async fn write_and_rename(temp_path: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(content).await?;
    file.flush().await?;
    drop(file);
    fs::rename(temp_path, path).await
}

impl DivisionStore for JsonFileStore {
    #[instrument(skip(self))]
    async fn load_division(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<Option<Division>, AppError> {
        let path = self.division_path(organization, division_id);
        read_json(
            &path,
            &format!("loading division {organization}/{division_id}"),
        )
        .await
    }

    #[instrument(skip(self, division), fields(organization = %division.organization, division_id = %division.id))]
    async fn save_division(&self, division: &Division) -> Result<(), AppError> {
        let path = self.division_path(&division.organization, &division.id);
        write_json(
            &path,
            division,
            &format!("saving division {}/{}", division.organization, division.id),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_division(
        &self,
        organization: &str,
        division_id: &str,
    ) -> Result<(), AppError> {
        let path = self.division_path(organization, division_id);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage_error(
                format!("deleting division {organization}/{division_id}"),
                e,
            )),
        }
    }

    async fn load_division_infos(
        &self,
        organization: &str,
    ) -> Result<Vec<DivisionInfo>, AppError> {
        let path = self.division_list_path(organization);
        let infos: Option<Vec<DivisionInfo>> = read_json(
            &path,
            &format!("loading division list for {organization}"),
        )
        .await?;
        Ok(infos.unwrap_or_default())
    }

    async fn save_division_infos(
        &self,
        organization: &str,
        infos: &[DivisionInfo],
    ) -> Result<(), AppError> {
        let path = self.division_list_path(organization);
        write_json(
            &path,
            infos,
            &format!("saving division list for {organization}"),
        )
        .await
    }
}
