//! Post configuration module.
//!
//! Handles loading and validating `config.toml`. Config files are sparse —
//! override just the values you want; everything else keeps its stock
//! default. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! template = "assets/template.png"    # Background template image
//! font = "assets/DMSans-default.ttf"  # Font for name labels
//! output_dir = "output"               # Where Post<N>.jpg files land
//!
//! [layout]
//! mask_size = 150       # Portrait diameter in pixels
//! gap_size = 50         # Spacing between portraits
//! max_per_row = 5       # Portraits per row AND per post
//! vertical_bias = 100   # Downward shift of the centered block
//!
//! [border]
//! thickness = 3         # Ring width in pixels (0 disables the ring)
//! color = [255, 255, 255]
//!
//! [jpeg]
//! quality = 90          # JPEG encode quality (1-100)
//!
//! [[overlay]]           # Optional decorative stickers, applied in order
//! path = "assets/balloons.png"
//! position = [40, 40]
//! size = [200, 200]
//! ```

use crate::layout::GridParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
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

/// Post generation configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostConfig {
    /// Background template every post starts from.
    pub template: PathBuf,
    /// TrueType font used for name labels.
    pub font: PathBuf,
    /// Output directory for `Post<N>.jpg` files (created if missing).
    pub output_dir: PathBuf,
    /// Grid geometry (portrait size, spacing, per-post cap).
    pub layout: GridParams,
    /// Decorative ring around each portrait.
    pub border: BorderConfig,
    /// JPEG encoding settings.
    pub jpeg: JpegConfig,
    /// Decorative PNG stickers composited before any portraits.
    #[serde(rename = "overlay", skip_serializing_if = "Vec::is_empty")]
    pub overlays: Vec<OverlayConfig>,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("assets/template.png"),
            font: PathBuf::from("assets/DMSans-default.ttf"),
            output_dir: PathBuf::from("output"),
            layout: GridParams::default(),
            border: BorderConfig::default(),
            jpeg: JpegConfig::default(),
            overlays: Vec::new(),
        }
    }
}

impl PostConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// A zero mask or per-row count would produce degenerate geometry, so
    /// both are rejected here rather than left to misrender. A zero gap is
    /// legal — circles touch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.mask_size == 0 {
            return Err(ConfigError::Validation(
                "layout.mask_size must be non-zero".into(),
            ));
        }
        if self.layout.max_per_row == 0 {
            return Err(ConfigError::Validation(
                "layout.max_per_row must be non-zero".into(),
            ));
        }
        if self.jpeg.quality == 0 || self.jpeg.quality > 100 {
            return Err(ConfigError::Validation("jpeg.quality must be 1-100".into()));
        }
        for overlay in &self.overlays {
            if overlay.size[0] == 0 || overlay.size[1] == 0 {
                return Err(ConfigError::Validation(format!(
                    "overlay {} has a zero dimension",
                    overlay.path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Ring drawn just outside each circular portrait.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BorderConfig {
    /// Ring width in pixels; 0 disables the ring entirely.
    pub thickness: u32,
    /// RGB triple.
    pub color: [u8; 3],
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            thickness: 3,
            color: [255, 255, 255],
        }
    }
}

/// JPEG encoding settings for the final posts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegConfig {
    /// Encode quality (1-100).
    pub quality: u8,
}

impl Default for JpegConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// One decorative PNG sticker placed on the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    pub path: PathBuf,
    /// Top-left corner on the canvas.
    pub position: [i64; 2],
    /// Target size the sticker is resized to, as [width, height].
    pub size: [u32; 2],
}

/// Load config from an explicit `config.toml` path.
///
/// The file must exist and parse; for optional lookup see
/// [`load_config_or_default`].
pub fn load_config(path: &Path) -> Result<PostConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: PostConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path` if the file exists, otherwise return stock
/// defaults.
pub fn load_config_or_default(path: &Path) -> Result<PostConfig, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(PostConfig::default())
    }
}

/// A fully documented config file matching the stock defaults.
pub fn stock_config_toml() -> &'static str {
    r##"# bday-post Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Background template every post starts from
template = "assets/template.png"

# TrueType font used for name labels
font = "assets/DMSans-default.ttf"

# Output directory for Post<N>.jpg files (created if missing)
output_dir = "output"

# ---------------------------------------------------------------------------
# Portrait grid
# ---------------------------------------------------------------------------
[layout]
# Diameter of each circular portrait, in pixels.
mask_size = 150
# Spacing between adjacent portraits, in pixels. Zero is legal (circles touch).
gap_size = 50
# Maximum portraits per row. Also caps how many people share one post.
max_per_row = 5
# Downward shift of the vertically-centered block, in pixels. Templates
# usually carry headline artwork in the upper third.
vertical_bias = 100

# ---------------------------------------------------------------------------
# Portrait border ring
# ---------------------------------------------------------------------------
[border]
# Ring width in pixels. Set to 0 to disable the ring.
thickness = 3
# Ring color as [r, g, b].
color = [255, 255, 255]

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[jpeg]
# JPEG encode quality (1-100).
quality = 90

# ---------------------------------------------------------------------------
# Decorative overlays (optional, repeatable)
# ---------------------------------------------------------------------------
# PNG stickers composited onto the template, in order, before any portraits.
# [[overlay]]
# path = "assets/balloons.png"
# position = [40, 40]
# size = [200, 200]
"##
}
