// PlantCare - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every subsystem owns an enum; `PlantCareError` wraps them for callers
// that cross subsystem boundaries (headless mode, startup).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PlantCare operations.
#[derive(Debug)]
pub enum PlantCareError {
    /// Reading the chosen image failed.
    Selection(SelectionError),

    /// The prediction request failed.
    Predict(PredictError),

    /// Saving the article failed.
    Export(ExportError),

    /// Configuration is unusable.
    Config(ConfigError),
}

impl fmt::Display for PlantCareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection(e) => write!(f, "Image selection error: {e}"),
            Self::Predict(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for PlantCareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Selection(e) => Some(e),
            Self::Predict(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a user-chosen image from disk.
#[derive(Debug)]
pub enum SelectionError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The file exceeds the upload limit.
    TooLarge { path: PathBuf, size: u64, max_size: u64 },

    /// The file is empty.
    Empty { path: PathBuf },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::TooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Empty { path } => write!(f, "'{}' is empty", path.display()),
        }
    }
}

impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SelectionError> for PlantCareError {
    fn from(e: SelectionError) -> Self {
        Self::Selection(e)
    }
}

// ---------------------------------------------------------------------------
// Predict errors
// ---------------------------------------------------------------------------

/// Errors from the prediction round trip.
#[derive(Debug)]
pub enum PredictError {
    /// The HTTP client or request could not be built.
    Client { source: reqwest::Error },

    /// The request never produced a response (connection refused, reset, DNS).
    Transport { source: reqwest::Error },

    /// The service answered with a non-2xx status.
    Http { status: u16, status_text: String },

    /// The response body is not the expected JSON object.
    InvalidBody { reason: String },
}

impl PredictError {
    /// The single message shown to the user for this failure.
    ///
    /// Falls back to a generic message when the error renders as empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            super::constants::FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            msg
        }
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client { source } => write!(f, "Cannot prepare request: {source}"),
            Self::Transport { source } => write!(f, "{source}"),
            Self::Http { status_text, .. } => write!(f, "Server error: {status_text}"),
            Self::InvalidBody { reason } => write!(f, "Invalid response from server: {reason}"),
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client { source } | Self::Transport { source } => Some(source),
            _ => None,
        }
    }
}

impl From<PredictError> for PlantCareError {
    fn from(e: PredictError) -> Self {
        Self::Predict(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to saving an article.
#[derive(Debug)]
pub enum ExportError {
    /// There is no article to export.
    NothingToExport,

    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToExport => write!(f, "No article to export"),
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NothingToExport => None,
        }
    }
}

impl From<ExportError> for PlantCareError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration values.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The server base URL is not an absolute http(s) URL.
    InvalidServerUrl { value: String, reason: String },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::InvalidServerUrl { value, reason } => {
                write!(f, "Server URL '{value}' is invalid: {reason}")
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for PlantCareError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for PlantCare results.
pub type Result<T> = std::result::Result<T, PlantCareError>;
