use crate::clock::parse_time_zone;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Data directory, if set, cannot be empty
/// - Log file path, if set, cannot be empty and its parent directory must
///   exist or be creatable
/// - Time zone must be a known IANA name
pub fn validate_config(
    data_dir: &Option<String>,
    log_file_path: &Option<String>,
    time_zone: &str,
) -> Result<(), AppError> {
    if let Some(dir) = data_dir
        && dir.trim().is_empty()
    {
        return Err(AppError::config_error("Data directory cannot be empty"));
    }

    parse_time_zone(time_zone)?;

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
