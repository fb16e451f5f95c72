// PlantCare - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PlantCare";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "PlantCare";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Prediction service
// =============================================================================

/// Base URL used when neither the CLI nor config.toml names a server.
/// Matches the default bind address of the service's development server.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Path of the prediction endpoint, appended to the base URL.
pub const PREDICT_ENDPOINT_PATH: &str = "/api/predict";

/// Name of the multipart form field that carries the image.
pub const IMAGE_FIELD_NAME: &str = "image";

/// Shown when the service answers successfully but with no usable text.
pub const NO_CONTENT_MESSAGE: &str = "No content returned.";

/// Shown when a failure produces no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to analyze image.";

/// How often the UI re-polls the predict channel while a request is in flight (ms).
pub const PREDICT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// Image selection
// =============================================================================

/// Largest image accepted for upload, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 25 * 1024 * 1024; // 25 MB

/// Long-edge cap for the decoded preview texture, in pixels.
pub const MAX_PREVIEW_DIMENSION: u32 = 1024;

/// File extensions offered by the image picker.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// MIME type sent when the extension does not identify an image format.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// URI scheme for locally generated preview references.
pub const PREVIEW_URI_SCHEME: &str = "preview";

// =============================================================================
// UI
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 15.0;

/// Minimum user-configurable font size.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable font size.
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Files
// =============================================================================

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session file name inside the platform data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Suffix appended to the article title slug when exporting.
pub const EXPORT_FILE_SUFFIX: &str = "-care";

/// Export file stem used when the article has no heading.
pub const DEFAULT_EXPORT_STEM: &str = "plant";

// =============================================================================
// Logging
// =============================================================================

/// Log level used when neither RUST_LOG, --debug, nor config.toml set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
