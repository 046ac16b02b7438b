// src/config/model.rs

use serde::Deserialize;

use crate::errors::TechdagError;
use crate::layout::{Extent, LayoutOptions};

/// Top-level configuration as read from a TOML file:
///
/// ```toml
/// [data]
/// path = "techTreeData.json"
/// images_dir = "images"
///
/// [layout]
/// spacing = 150.0
/// level_gap = 200.0
/// padding = 100.0
/// collision_retries = 10
///
/// [view]
/// job_mode = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub data: DataSection,

    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub view: ViewSection,
}

/// `[data]` section: where the graph and images live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSection {
    /// Path to the JSON node collection.
    #[serde(default = "default_data_path")]
    pub path: String,

    /// Directory image uploads are written into.
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

fn default_data_path() -> String {
    "techTreeData.json".to_string()
}

fn default_images_dir() -> String {
    "images".to_string()
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            images_dir: default_images_dir(),
        }
    }
}

/// `[layout]` section: diagram geometry tunables.
///
/// `collision_retries` bounds how far the overlap nudge wanders; on
/// exhaustion the overlap is kept and logged, never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSection {
    /// Minimum horizontal spacing between sibling nodes.
    #[serde(default = "default_spacing")]
    pub spacing: f64,

    /// Vertical distance between levels.
    #[serde(default = "default_level_gap")]
    pub level_gap: f64,

    /// Padding added around the bounding box when sizing the container.
    #[serde(default = "default_padding")]
    pub padding: f64,

    #[serde(default = "default_collision_retries")]
    pub collision_retries: u32,

    /// Container size floor; 0 means no floor.
    #[serde(default)]
    pub viewport_width: f64,

    #[serde(default)]
    pub viewport_height: f64,
}

fn default_spacing() -> f64 {
    150.0
}

fn default_level_gap() -> f64 {
    200.0
}

fn default_padding() -> f64 {
    100.0
}

fn default_collision_retries() -> u32 {
    10
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            level_gap: default_level_gap(),
            padding: default_padding(),
            collision_retries: default_collision_retries(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

/// `[view]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ViewSection {
    /// Default state of the job-mode toggle.
    #[serde(default)]
    pub job_mode: bool,
}

/// A validated configuration (see [`super::validate`]).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub data: DataSection,
    pub layout: LayoutSection,
    pub view: ViewSection,
}

impl ConfigFile {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            spacing: self.layout.spacing,
            level_gap: self.layout.level_gap,
            collision_retries: self.layout.collision_retries,
        }
    }

    pub fn viewport(&self) -> Extent {
        Extent::new(self.layout.viewport_width, self.layout.viewport_height)
    }
}

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TechdagError;

    fn try_from(raw: RawConfigFile) -> Result<Self, Self::Error> {
        super::validate::validate_config(&raw)
            .map_err(|e| TechdagError::ConfigError(e.to_string()))?;
        Ok(Self {
            data: raw.data,
            layout: raw.layout,
            view: raw.view,
        })
    }
}
