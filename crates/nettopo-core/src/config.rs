//! TOML-based editor configuration.
//!
//! Reads and writes [`EditorConfig`] at the platform-appropriate location:
//! - Windows:  `%APPDATA%\NetTopo\config.toml`
//! - Linux:    `~/.config/nettopo/config.toml`
//! - macOS:    `~/Library/Application Support/NetTopo/config.toml`
//!
//! Every field carries a serde default so the editor works on first run
//! (before a config file exists) and when upgrading from an older file that
//! is missing newer fields.  Note that none of this touches diagram content:
//! topology files are separate documents handled by [`crate::persist`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level editor configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    pub general: GeneralConfig,
    pub canvas: CanvasConfig,
    pub placement: PlacementConfig,
    pub files: FileConfig,
}

/// General editor behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Logical canvas dimensions, in canvas units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f64,
    #[serde(default = "default_canvas_height")]
    pub height: f64,
    /// Margin kept between placed items and the canvas edge.
    #[serde(default = "default_canvas_padding")]
    pub padding: f64,
}

/// Grid used when placing new items without an explicit position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacementConfig {
    /// Canvas position of the first grid slot.
    #[serde(default = "default_placement_origin")]
    pub origin_x: f64,
    #[serde(default = "default_placement_origin")]
    pub origin_y: f64,
    /// Distance between neighbouring grid slots.
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,
    /// Slots per row before wrapping to the next one.
    #[serde(default = "default_grid_columns")]
    pub columns: usize,
}

/// File-handling preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    /// Whether to write the open diagram back to disk when the editor exits.
    #[serde(default)]
    pub autosave_on_exit: bool,
    /// The most recently opened topology file, reopened on start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<PathBuf>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_canvas_width() -> f64 {
    2000.0
}
fn default_canvas_height() -> f64 {
    2000.0
}
fn default_canvas_padding() -> f64 {
    30.0
}
fn default_placement_origin() -> f64 {
    80.0
}
fn default_grid_spacing() -> f64 {
    120.0
}
fn default_grid_columns() -> usize {
    8
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            canvas: CanvasConfig::default(),
            placement: PlacementConfig::default(),
            files: FileConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            padding: default_canvas_padding(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            origin_x: default_placement_origin(),
            origin_y: default_placement_origin(),
            grid_spacing: default_grid_spacing(),
            columns: default_grid_columns(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            autosave_on_exit: false,
            last_opened: None,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`EditorConfig`] from disk, returning `EditorConfig::default()` if
/// the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<EditorConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: EditorConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EditorConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to disk, creating the config directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &EditorConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("NetTopo"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("nettopo"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("NetTopo")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_editor_config_default_canvas_dimensions() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.canvas.width, 2000.0);
        assert_eq!(cfg.canvas.height, 2000.0);
        assert_eq!(cfg.canvas.padding, 30.0);
    }

    #[test]
    fn test_editor_config_default_placement_grid() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.placement.origin_x, 80.0);
        assert_eq!(cfg.placement.grid_spacing, 120.0);
        assert_eq!(cfg.placement.columns, 8);
    }

    #[test]
    fn test_editor_config_default_log_level_is_info() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.general.log_level, "info");
    }

    #[test]
    fn test_editor_config_default_has_no_last_opened_file() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.files.last_opened, None);
        assert!(!cfg.files.autosave_on_exit);
    }

    // ── TOML round-trip ───────────────────────────────────────────────────────

    #[test]
    fn test_editor_config_serializes_and_deserializes_round_trip() {
        // Arrange
        let mut cfg = EditorConfig::default();
        cfg.canvas.width = 4000.0;
        cfg.placement.columns = 4;
        cfg.files.last_opened = Some(PathBuf::from("/tmp/lab.json"));

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: EditorConfig = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_none_last_opened_is_omitted_from_toml() {
        let cfg = EditorConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        assert!(
            !toml_str.contains("last_opened"),
            "None last_opened must be omitted"
        );
    }

    #[test]
    fn test_deserialize_minimal_toml_uses_defaults() {
        let toml_str = r#"
[general]
[canvas]
[placement]
[files]
"#;

        let cfg: EditorConfig = toml::from_str(toml_str).expect("deserialize minimal");

        assert_eq!(cfg.canvas.width, 2000.0);
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.placement.columns, 8);
    }

    #[test]
    fn test_deserialize_partial_canvas_overrides_defaults() {
        let toml_str = r#"
[general]
[canvas]
width = 5000.0
[placement]
[files]
"#;

        let cfg: EditorConfig = toml::from_str(toml_str).expect("deserialize partial");

        assert_eq!(cfg.canvas.width, 5000.0);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.canvas.height, 2000.0);
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        let bad_toml = "[[[ not valid toml";
        let result: Result<EditorConfig, toml::de::Error> = toml::from_str(bad_toml);
        assert!(result.is_err());
    }

    // ── File round-trip via temp dir ──────────────────────────────────────────

    #[test]
    fn test_write_and_read_config_round_trip_via_temp_dir() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("nettopo_cfg_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let mut cfg = EditorConfig::default();
        cfg.general.log_level = "debug".to_string();
        cfg.placement.grid_spacing = 90.0;

        // Act – serialize and write manually (mirrors save_config logic)
        let content = toml::to_string_pretty(&cfg).unwrap();
        std::fs::write(&path, &content).unwrap();
        let loaded: EditorConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        // Assert
        assert_eq!(loaded.general.log_level, "debug");
        assert_eq!(loaded.placement.grid_spacing, 90.0);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    // ── config_dir path formation ─────────────────────────────────────────────

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }
}
