//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `config.toml` files. Configuration
//! is hierarchical: stock defaults are overridden by the content root's file,
//! which is overridden by files in any directory between the root and an album:
//!
//! ```text
//! content/
//! ├── config.toml              # Root config (overrides stock defaults)
//! ├── 010-Landscapes/
//! │   └── ...
//! └── 020-Travel/
//!     ├── config.toml          # Group config (overrides root)
//!     └── 010-Japan/
//!         ├── config.toml      # Album config (overrides group)
//!         └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! min_photos_per_row = 2    # Fewest photos in any row but the last
//! max_photos_per_row = 8    # Most photos in any row
//! target_row_height = 240.0 # Height rows gravitate toward
//! container_width = 1200.0  # Width laid out when --width is not given
//!
//! [scan]
//! extensions = ["jpg", "jpeg", "png", "webp", "tif", "tiff"]
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::layout::{
    DEFAULT_MAX_PHOTOS_PER_ROW, DEFAULT_MIN_PHOTOS_PER_ROW, DEFAULT_TARGET_ROW_HEIGHT,
    LayoutOptions,
};
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

/// Gallery configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Row-layout settings.
    pub layout: LayoutConfig,
    /// Which files count as photos.
    pub scan: ScanConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// The layout engine copes with any options; this only keeps nonsense
    /// out of config files.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.min_photos_per_row == 0 || layout.max_photos_per_row == 0 {
            return Err(ConfigError::Validation(
                "layout row sizes must be at least 1".into(),
            ));
        }
        if layout.min_photos_per_row > layout.max_photos_per_row {
            return Err(ConfigError::Validation(
                "layout.min_photos_per_row must not exceed layout.max_photos_per_row".into(),
            ));
        }
        if !(layout.target_row_height.is_finite() && layout.target_row_height > 0.0) {
            return Err(ConfigError::Validation(
                "layout.target_row_height must be positive".into(),
            ));
        }
        check_container_width(layout.container_width)?;
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Check a container width from config or the command line.
pub fn check_container_width(width: f64) -> Result<f64, ConfigError> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(ConfigError::Validation(format!(
            "container width must be a positive number, got {width}"
        )))
    }
}

/// Row-layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub min_photos_per_row: usize,
    pub max_photos_per_row: usize,
    pub target_row_height: f64,
    /// Container width used when none is given on the command line.
    pub container_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_photos_per_row: DEFAULT_MIN_PHOTOS_PER_ROW,
            max_photos_per_row: DEFAULT_MAX_PHOTOS_PER_ROW,
            target_row_height: DEFAULT_TARGET_ROW_HEIGHT,
            container_width: 1200.0,
        }
    }
}

impl LayoutConfig {
    /// The engine options this config describes.
    pub fn options(&self) -> LayoutOptions {
        LayoutOptions {
            min_photos_per_row: self.min_photos_per_row,
            max_photos_per_row: self.max_photos_per_row,
            target_row_height: self.target_row_height,
        }
    }
}

/// Photo discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions (case-insensitive, without the dot) treated as photos.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp", "tif", "tiff"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ScanConfig {
    pub fn is_photo(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(&ext)))
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never below one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer every cascade starts from.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Resolve the config in effect for `dir`: stock defaults, then every
/// `config.toml` from `root` down to `dir` inclusive.
///
/// `dir` must be `root` or lie beneath it.
pub fn load_cascaded_config(root: &Path, dir: &Path) -> Result<SiteConfig, ConfigError> {
    let mut merged = stock_defaults_value();
    let mut current = root.to_path_buf();
    if let Some(raw) = load_raw_config(&current)? {
        merged = merge_toml(merged, raw);
    }
    if let Ok(rel) = dir.strip_prefix(root) {
        for component in rel.components() {
            current.push(component);
            if let Some(raw) = load_raw_config(&current)? {
                merged = merge_toml(merged, raw);
            }
        }
    }
    resolve_config(merged, None)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Justified Gallery Configuration
# ===============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Config files can be placed at any level of the directory tree:
#   content/config.toml                      -> root (overrides stock defaults)
#   content/020-Travel/config.toml           -> group (overrides root)
#   content/020-Travel/010-Japan/config.toml -> album (overrides group)
#
# Each level only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Row layout
# ---------------------------------------------------------------------------
[layout]
# Fewest photos in any row except the last one.
min_photos_per_row = 2

# Most photos in any row.
max_photos_per_row = 8

# Height rows gravitate toward. Rows never render taller than 350.
target_row_height = 240.0

# Container width to lay out for when --width is not passed.
container_width = 1200.0

# ---------------------------------------------------------------------------
# Photo discovery
# ---------------------------------------------------------------------------
[scan]
# File extensions treated as photos (case-insensitive).
extensions = ["jpg", "jpeg", "png", "webp", "tif", "tiff"]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for reading dimensions and laying out albums.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
