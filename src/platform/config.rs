// PlantCare - platform/config.rs
//
// Where PlantCare keeps its files, and config.toml parsing. A bad config
// never blocks startup: each invalid value becomes a warning and the
// default is used instead.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Per-user directories for config.toml and the session file.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Holds config.toml (e.g. ~/.config/plantcare/).
    pub config_dir: PathBuf,

    /// Holds session.json.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Ask the OS for the per-user directories.
    ///
    /// Runs before logging is set up, so nothing is logged here; a fallback
    /// to the working directory comes back as a warning for the caller to
    /// report.
    pub fn resolve() -> (Self, Option<String>) {
        Self::from_project_dirs(ProjectDirs::from("", "", constants::APP_ID))
    }

    fn from_project_dirs(dirs: Option<ProjectDirs>) -> (Self, Option<String>) {
        match dirs {
            Some(dirs) => (
                Self {
                    config_dir: dirs.config_dir().to_path_buf(),
                    data_dir: dirs.data_dir().to_path_buf(),
                },
                None,
            ),
            None => (
                Self {
                    config_dir: PathBuf::from("."),
                    data_dir: PathBuf::from("."),
                },
                Some(
                    "No home directory; keeping config and session in the working directory."
                        .to_string(),
                ),
            ),
        }
    }

    /// Location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// config.toml as written by the user. Every key is optional and unknown
/// keys are ignored.
///
/// ```toml
/// [server]
/// base_url = "http://127.0.0.1:8000"
///
/// [ui]
/// theme = "dark"
/// font_size = 16
///
/// [logging]
/// level = "debug"
/// file = "/tmp/plantcare.log"
/// ```
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub server: ServerSection,
    pub ui: UiSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// "dark" | "light"
    pub theme: Option<String>,
    pub font_size: Option<f32>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: Option<String>,
    /// Empty string means stderr.
    pub file: Option<String>,
}

/// Settings in effect after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Service base URL, no trailing slash and no endpoint path.
    pub server_url: String,
    pub dark_mode: bool,
    /// Body text size in points.
    pub font_size: f32,
    /// Lower-cased level, consumed before tracing is up.
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: constants::DEFAULT_SERVER_URL.to_string(),
            dark_mode: false,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Replace the server URL (CLI override), validating it first.
    pub fn set_server_url(&mut self, url: &str) -> Result<(), ConfigError> {
        self.server_url = validate_server_url(url)?;
        Ok(())
    }
}

/// Check that `url` is an absolute http(s) URL and normalise away a trailing slash.
pub fn validate_server_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim();
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidServerUrl {
        value: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::InvalidServerUrl {
                value: url.to_string(),
                reason: format!("unsupported scheme '{other}', expected http or https"),
            })
        }
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidServerUrl {
            value: url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Read config.toml at `config_path`.
///
/// Returns the effective config plus one warning per problem found. A file
/// that does not exist is a normal first run and produces no warning.
/// Called before logging exists: problems travel in the returned warnings.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), Vec::new());
        }
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            return (AppConfig::default(), vec![format!("{err}. Using defaults.")]);
        }
    };

    match toml::from_str::<RawConfig>(&content) {
        Ok(raw) => validate(raw),
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            (AppConfig::default(), vec![format!("{err}. Using defaults.")])
        }
    }
}

/// Validate each field of a parsed config, accumulating all problems.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut warnings = Vec::new();
    let mut config = AppConfig::default();

    // -- Server: base_url --
    if let Some(ref url) = raw.server.base_url {
        match validate_server_url(url) {
            Ok(url) => config.server_url = url,
            Err(e) => warnings.push(format!(
                "[server] {e}. Using default ({}).",
                constants::DEFAULT_SERVER_URL
            )),
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(format!(
                "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (light).",
            )),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "ui.font_size".to_string(),
                value: size.to_string(),
                expected: format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_FONT_SIZE
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[server]
base_url = "https://plants.example.com/"

[ui]
theme = "Dark"
font_size = 18.0

[logging]
level = "DEBUG"
file = "/tmp/plantcare.log"

[future]
ignored = true
"#,
        );
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.server_url, "https://plants.example.com");
        assert!(config.dark_mode);
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/plantcare.log"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[server]
base_url = "ftp://plants.example.com"

[ui]
theme = "sepia"
font_size = 99.0

[logging]
level = "loud"
"#,
        );
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 4, "{warnings:?}");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unparseable_file_warns() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[server\nbase_url = ");
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }

    #[test]
    fn test_cli_override_validation() {
        let mut config = AppConfig::default();
        config.set_server_url("http://10.0.0.5:9000/").unwrap();
        assert_eq!(config.server_url, "http://10.0.0.5:9000");

        assert!(matches!(
            config.set_server_url("not a url"),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
        assert_eq!(config.server_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_missing_home_falls_back_with_warning() {
        let (paths, warning) = PlatformPaths::from_project_dirs(None);
        assert_eq!(paths.config_dir, PathBuf::from("."));
        assert_eq!(paths.config_file(), PathBuf::from(".").join("config.toml"));
        assert!(warning.unwrap().contains("working directory"));
    }
}
