//! Journal configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Configuration is
//! sparse: stock defaults are the base layer and a user file overrides only
//! the keys it names. Unknown keys are rejected to catch typos early.
//!
//! ## Config File Location
//!
//! One `config.toml` next to the journal, in the directory given by
//! `--config-dir` (default: the working directory).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [collage]
//! title = "Castoff Journal"   # Header text on exported collages
//! prefix = "castoff"          # Artifact name prefix
//!
//! [collage.colors]            # All colors are #rrggbb hex
//! background = "#1e1e24"
//! cell_background = "#2e2e36"
//! border = "#4a4a55"
//! title_text = "#f5f0e8"
//! subtitle_text = "#b8b0a0"
//!
//! [processing]
//! max_workers = 4             # Max parallel decode workers (omit for auto = CPU cores)
//! ```
//!
//! The stored-image contract (512×512, JPEG quality 90) and the collage cell
//! geometry are fixed constants, not configuration — exports must stay
//! reproducible across machines.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// An `#rrggbb` color.
///
/// Parsed strictly at load time, so a typo in the config file fails the load
/// instead of silently rendering the wrong palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Render back to `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let digits = text
            .strip_prefix('#')
            .filter(|d| d.len() == 6)
            .ok_or_else(|| format!("invalid color {text:?}: expected #rrggbb"))?;
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| format!("invalid color {text:?}: expected #rrggbb"))
        };
        Ok(Self([channel(0)?, channel(1)?, channel(2)?]))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}

/// Journal configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    /// Collage presentation settings (title, artifact prefix, palette).
    pub collage: CollageConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl JournalConfig {
    /// Validate config values after merging.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collage.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "collage.prefix must not be empty".into(),
            ));
        }
        if self.collage.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "collage.prefix must not contain path separators".into(),
            ));
        }
        if self.processing.max_workers == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_workers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Collage presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    /// Header title drawn at the top of every collage.
    pub title: String,
    /// Filename prefix for exported artifacts
    /// (`<prefix>-<N>items-<millis>.png`).
    pub prefix: String,
    /// Canvas, cell and text palette.
    pub colors: CollageColors,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            title: "Castoff Journal".to_string(),
            prefix: "castoff".to_string(),
            colors: CollageColors::default(),
        }
    }
}

/// Collage palette, all `#rrggbb`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageColors {
    /// Canvas and header band background.
    pub background: Color,
    /// Fill behind each cell, visible where a payload failed to decode.
    pub cell_background: Color,
    /// 1px stroke around each cell.
    pub border: Color,
    /// Header title text.
    pub title_text: Color,
    /// Date-range subtitle text.
    pub subtitle_text: Color,
}

impl Default for CollageColors {
    fn default() -> Self {
        Self {
            background: Color([0x1e, 0x1e, 0x24]),
            cell_background: Color([0x2e, 0x2e, 0x36]),
            border: Color([0x4a, 0x4a, 0x55]),
            title_text: Color([0xf5, 0xf0, 0xe8]),
            subtitle_text: Color([0xb8, 0xb0, 0xa0]),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel cell-decode workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(JournalConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<JournalConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: JournalConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<JournalConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Castoff Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as config.toml in the directory passed via --config-dir
# (default: the working directory). Only the keys you want to override need
# to be present. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Collage presentation
# ---------------------------------------------------------------------------
[collage]
# Header title drawn at the top of every exported collage.
title = "Castoff Journal"

# Filename prefix for exported artifacts: <prefix>-<N>items-<millis>.png
prefix = "castoff"

# Collage palette. All values are #rrggbb hex.
[collage.colors]
background = "#1e1e24"        # Canvas and header band
cell_background = "#2e2e36"   # Fill behind each cell (shows for bad payloads)
border = "#4a4a55"            # 1px stroke around each cell
title_text = "#f5f0e8"
subtitle_text = "#b8b0a0"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel cell-decode workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4
"##
}
