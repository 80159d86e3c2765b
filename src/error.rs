use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Division lookup errors
    #[error("Division does not exist: {organization}/{division_id}")]
    MissingDivision {
        organization: String,
        division_id: String,
    },

    #[error("Division already exists: {organization}/{division_id}")]
    DivisionExists {
        organization: String,
        division_id: String,
    },

    // Schedule file errors
    #[error("Schedule format error on line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Cannot parse line {line} ({message}): {text}")]
    FieldParse {
        line: usize,
        text: String,
        message: String,
    },

    #[error("Team index {index} on line {line} is outside the roster (1-{roster_size})")]
    Reference {
        line: usize,
        index: i64,
        roster_size: usize,
    },

    // Persistence errors
    #[error("Storage error while {context}: {message}")]
    Storage { context: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a missing division error
    pub fn missing_division(
        organization: impl Into<String>,
        division_id: impl Into<String>,
    ) -> Self {
        Self::MissingDivision {
            organization: organization.into(),
            division_id: division_id.into(),
        }
    }

    /// Create a division exists error
    pub fn division_exists(
        organization: impl Into<String>,
        division_id: impl Into<String>,
    ) -> Self {
        Self::DivisionExists {
            organization: organization.into(),
            division_id: division_id.into(),
        }
    }

    /// Create a structural schedule file error
    pub fn format_error(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create a field parsing error carrying the raw line
    pub fn field_parse_error(
        line: usize,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::FieldParse {
            line,
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create a roster reference error
    pub fn reference_error(line: usize, index: i64, roster_size: usize) -> Self {
        Self::Reference {
            line,
            index,
            roster_size,
        }
    }

    /// Wrap an unexpected storage failure with context
    pub fn storage_error(context: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Storage {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create an error for an import reported as unsuccessful
    pub fn import_failed(msg: impl Into<String>) -> Self {
        Self::ImportFailed(msg.into())
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Check if error came from reading the schedule file itself.
    /// These are reported through `ImportResult` instead of being propagated.
    pub fn is_import_failure(&self) -> bool {
        matches!(
            self,
            AppError::Format { .. } | AppError::FieldParse { .. } | AppError::Reference { .. }
        )
    }

    /// Line number the error points at, for schedule file errors
    pub fn line(&self) -> Option<usize> {
        match self {
            AppError::Format { line, .. }
            | AppError::FieldParse { line, .. }
            | AppError::Reference { line, .. } => Some(*line),
            _ => None,
        }
    }
}
