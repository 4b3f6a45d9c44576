// Configuration loading and parsing (scorecast.toml).

use scorecast_baseball::format::RateStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE: &str = "scorecast.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// File path or http(s) URL of the analysis document.
    pub location: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub rate_style: RateStyle,
    #[serde(default = "default_top_batters")]
    pub top_batters: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            rate_style: RateStyle::default(),
            top_batters: default_top_batters(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Per-batter CSV output. Empty disables the export.
    #[serde(default)]
    pub csv_path: String,
}

impl ExportConfig {
    pub fn csv_path(&self) -> Option<&Path> {
        let trimmed = self.csv_path.trim();
        (!trimmed.is_empty()).then(|| Path::new(trimmed))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            directory: default_log_directory(),
            filter: default_log_filter(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_top_batters() -> usize {
    5
}

fn default_log_directory() -> String {
    "logs".into()
}

fn default_log_filter() -> String {
    "scorecast=info,warn".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/scorecast.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/scorecast.toml` from `defaults/scorecast.toml` when it is
/// missing. Returns the seeded path, or `None` when a config already exists.
/// An existing config is never overwritten.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_path = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !default_path.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {} in {} and no defaults/{} to seed it from",
                CONFIG_FILE,
                config_dir.display(),
                CONFIG_FILE
            ),
        });
    }

    let copy_err = |what: &str, path: &Path, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to {what} {}: {e}", path.display()),
    };

    std::fs::create_dir_all(&config_dir).map_err(|e| copy_err("create", &config_dir, e))?;
    let content = std::fs::read(&default_path).map_err(|e| copy_err("read", &default_path, e))?;

    // create_new: a config written concurrently since the check above wins.
    match std::fs::OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, &content)
                .map_err(|e| copy_err("write", &target, e))?;
            info!(path = %target.display(), "seeded config from defaults");
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(copy_err("create", &target, e)),
    }
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.source.location.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "source.location".into(),
            message: "must not be empty".into(),
        });
    }

    if config.source.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "source.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    if config.display.top_batters == 0 {
        return Err(ConfigError::ValidationError {
            field: "display.top_batters".into(),
            message: "must be > 0".into(),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// The workspace root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    /// Fresh temp dir with `config/scorecast.toml` holding `contents`.
    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), contents).unwrap();
        tmp
    }

    fn default_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE)).unwrap()
    }

    #[test]
    fn load_default_config() {
        let tmp = temp_config("scorecast_config_defaults", &default_text());
        let config = load_config_from(&tmp).expect("defaults should load");

        assert_eq!(config.source.location, "data/sample_game.json");
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.display.rate_style, RateStyle::Baseball);
        assert_eq!(config.display.top_batters, 5);
        assert!(config.export.csv_path().is_none());
        assert_eq!(config.logging.directory, "logs");
        assert_eq!(config.logging.filter, "scorecast=info,warn");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_default() {
        let tmp = temp_config(
            "scorecast_config_minimal",
            "[source]\nlocation = \"game.json\"\n",
        );
        let config = load_config_from(&tmp).expect("minimal config should load");
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.display.top_batters, 5);
        assert_eq!(config.logging.filter, "scorecast=info,warn");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn decimal_style_and_csv_path() {
        let tmp = temp_config(
            "scorecast_config_decimal",
            r#"
[source]
location = "https://example.test/games/1"

[display]
rate_style = "decimal"
top_batters = 3

[export]
csv_path = "out/batters.csv"
"#,
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.display.rate_style, RateStyle::Decimal);
        assert_eq!(config.display.top_batters, 3);
        assert_eq!(config.export.csv_path(), Some(Path::new("out/batters.csv")));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_location() {
        let tmp = temp_config("scorecast_config_empty_location", "[source]\nlocation = \"  \"\n");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "source.location"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let modified = default_text().replace("timeout_secs = 10", "timeout_secs = 0");
        let tmp = temp_config("scorecast_config_zero_timeout", &modified);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "source.timeout_secs"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_top_batters() {
        let modified = default_text().replace("top_batters = 5", "top_batters = 0");
        let tmp = temp_config("scorecast_config_zero_top", &modified);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "display.top_batters"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_rate_style() {
        let modified = default_text().replace("rate_style = \"baseball\"", "rate_style = \"roman\"");
        let tmp = temp_config("scorecast_config_bad_style", &modified);
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "got: {err}");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_config("scorecast_config_invalid", "this is not valid [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_when_missing() {
        let tmp = std::env::temp_dir().join("scorecast_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_seeds_missing_config() {
        let tmp = std::env::temp_dir().join("scorecast_config_ensure_seeds");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join(CONFIG_FILE), default_text()).unwrap();

        let seeded = ensure_config_file(&tmp).expect("should succeed");
        assert_eq!(seeded, Some(tmp.join("config").join(CONFIG_FILE)));
        let config = load_config_from(&tmp).expect("seeded config should load");
        assert_eq!(config.source.location, "data/sample_game.json");

        // Second call finds the config in place.
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_keeps_existing() {
        let tmp = temp_config("scorecast_config_ensure_keeps", "# custom\n");
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join(CONFIG_FILE), default_text()).unwrap();

        assert_eq!(ensure_config_file(&tmp).expect("should succeed"), None);
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn existing_config_needs_no_defaults() {
        let tmp = temp_config("scorecast_config_no_defaults", "# custom\n");
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_errors_without_config_or_defaults() {
        let tmp = std::env::temp_dir().join("scorecast_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_file(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no defaults/scorecast.toml"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        assert!(!tmp.join("config").exists());
        let _ = fs::remove_dir_all(&tmp);
    }
}
