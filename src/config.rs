//! Configuration file support for the annotator.
//!
//! One JSON document describes a page variant: its classes, which
//! capabilities are enabled, interaction thresholds, render style and
//! keybindings. Every section has defaults, so a config file only needs the
//! fields it changes.

use serde::{Deserialize, Serialize};
use urchin_canvas::Color;

use crate::constants::{HIT_TOLERANCE, MAX_HISTORY, MIN_DRAG_SIZE};
use crate::keybindings::KeyBindings;
use crate::model::{ClassList, InteractionMode};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level (for loggers that take a single level).
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Optional behaviours that differ between page variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Dragging a selected box in edit mode moves it
    pub enable_move: bool,
    /// The redo shortcut is honoured
    pub enable_redo: bool,
    /// Keyboard shortcuts are honoured at all
    pub enable_keyboard: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            enable_move: true,
            enable_redo: true,
            enable_keyboard: true,
        }
    }
}

/// Pointer thresholds and history depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// A create-drag must exceed this size on both axes
    pub min_drag_size: f64,
    /// Edge tolerance for hit-testing
    pub hit_tolerance: f64,
    /// Maximum history snapshots
    pub max_history: usize,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            min_drag_size: MIN_DRAG_SIZE,
            hit_tolerance: HIT_TOLERANCE,
            max_history: MAX_HISTORY,
        }
    }
}

/// How boxes, labels and the selection are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub line_width: f64,
    pub selected_line_width: f64,
    /// Side length of the corner handles on the selected box
    pub handle_size: f64,
    /// Gap between the selected box and its dashed outer ring
    pub selection_ring_offset: f64,
    pub selection_color: Color,
    /// Alpha of the class-colored fill behind the selected box
    pub selection_fill_alpha: f32,
    pub preview_color: Color,
    pub dash: Vec<f64>,
    pub show_labels: bool,
    pub label_font_size: f64,
    pub label_font_family: String,
    pub label_text_color: Color,
    pub label_padding: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            selected_line_width: 3.0,
            handle_size: 8.0,
            selection_ring_offset: 3.0,
            selection_color: Color::rgb8(255, 215, 0),
            selection_fill_alpha: 0.2,
            preview_color: Color::WHITE,
            dash: vec![6.0, 4.0],
            show_labels: true,
            label_font_size: 14.0,
            label_font_family: "sans-serif".to_string(),
            label_text_color: Color::WHITE,
            label_padding: 3.0,
        }
    }
}

/// Annotator configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Class definitions, in class-id order
    #[serde(default)]
    pub classes: ClassList,

    #[serde(default)]
    pub capabilities: Capabilities,

    #[serde(default)]
    pub interaction: InteractionSettings,

    #[serde(default)]
    pub style: RenderStyle,

    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Mode the annotator starts in
    #[serde(default)]
    pub initial_mode: InteractionMode,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            classes: ClassList::default(),
            capabilities: Capabilities::default(),
            interaction: InteractionSettings::default(),
            style: RenderStyle::default(),
            keybindings: KeyBindings::default(),
            initial_mode: InteractionMode::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Basic page: one generic class, no moving, no redo shortcut.
    pub fn basic() -> Self {
        Self {
            classes: ClassList::single_class("object"),
            capabilities: Capabilities {
                enable_move: false,
                enable_redo: false,
                enable_keyboard: true,
            },
            ..Self::new()
        }
    }

    /// Classification page: male/female classes, boxes can be moved.
    pub fn classification() -> Self {
        Self {
            classes: ClassList::gonopore_sex(),
            capabilities: Capabilities {
                enable_move: true,
                enable_redo: false,
                enable_keyboard: true,
            },
            ..Self::new()
        }
    }

    /// Detector-labelling page: one gonopore class, every capability on.
    pub fn yolo() -> Self {
        Self {
            classes: ClassList::single_class("gonopore"),
            ..Self::new()
        }
    }

    /// Replace the class list.
    pub fn with_classes(mut self, classes: ClassList) -> Self {
        self.classes = classes;
        self
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "urchin-annotator.json"
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default config file path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("urchin").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config")
                    .join("urchin")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "urchin-annotator-config";

    /// Try to load configuration from localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

    /// Save configuration to localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &self.to_json()?)
            .map_err(|e| {
                ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e))
            })?;

        log::info!("Saved configuration to localStorage");
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}
