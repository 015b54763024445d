use serde::{Deserialize, Serialize};

use crate::{Result, WavemarkError};

pub const DEFAULT_ZOOM_LEVELS: [u32; 4] = [512, 1024, 2048, 4096];

pub const DEFAULT_TEMPLATE: &str = concat!(
    "<div class=\"waveform\">",
    "<div class=\"zoom-container\"></div>",
    "<div class=\"overview-container\"></div>",
    "</div>"
);

/// Merged, validated configuration of a viewer. Shared read-only once the
/// viewer is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Samples per pixel for each zoom level, finest first.
    pub zoom_levels: Vec<u32>,
    pub keyboard: bool,
    /// Seconds moved by a single nudge.
    pub nudge_increment: f64,
    pub height: u32,
    pub colors: ColorScheme,
    pub data_uri: Option<DataUri>,
    pub template: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            keyboard: false,
            nudge_increment: 1.0,
            height: 200,
            colors: ColorScheme::default(),
            data_uri: None,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Overwrites every top-level field present in `overrides`. Nested
    /// objects such as `colors` are replaced as a whole, never merged.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            zoom_levels,
            keyboard,
            nudge_increment,
            height,
            colors,
            data_uri,
            template,
        } = overrides;

        if let Some(zoom_levels) = zoom_levels {
            self.zoom_levels = zoom_levels;
        }
        if let Some(keyboard) = keyboard {
            self.keyboard = keyboard;
        }
        if let Some(nudge_increment) = nudge_increment {
            self.nudge_increment = nudge_increment;
        }
        if let Some(height) = height {
            self.height = height;
        }
        if let Some(colors) = colors {
            self.colors = colors;
        }
        if let Some(data_uri) = data_uri {
            self.data_uri = Some(data_uri);
        }
        if let Some(template) = template {
            self.template = template;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.zoom_levels.is_empty() {
            return Err(WavemarkError::config("zoom_levels must not be empty"));
        }
        if self.zoom_levels.contains(&0) {
            return Err(WavemarkError::config("zoom levels must be positive"));
        }
        if !self.nudge_increment.is_finite() || self.nudge_increment <= 0.0 {
            return Err(WavemarkError::config("nudge_increment must be a positive number"));
        }
        Ok(())
    }
}

/// Display colors. Opaque to the core apart from the annotation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub zoom_waveform: String,
    pub overview_waveform: String,
    pub overview_highlight: String,
    pub segment: String,
    pub segment_start_marker: String,
    pub segment_end_marker: String,
    pub point_marker: String,
    pub playhead: String,
    pub playhead_text: String,
    pub axis_gridline: String,
    pub axis_label: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            zoom_waveform: "rgba(0, 225, 128, 1)".to_string(),
            overview_waveform: "rgba(0, 0, 0, 0.2)".to_string(),
            overview_highlight: "grey".to_string(),
            segment: "rgba(255, 161, 39, 1)".to_string(),
            segment_start_marker: "#a0a0a0".to_string(),
            segment_end_marker: "#a0a0a0".to_string(),
            point_marker: "#FF0000".to_string(),
            playhead: "rgba(0, 0, 0, 1)".to_string(),
            playhead_text: "#aaa".to_string(),
            axis_gridline: "#ccc".to_string(),
            axis_label: "#aaa".to_string(),
        }
    }
}

/// Where the waveform data provider should load precomputed peaks from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataUri {
    pub arraybuffer: Option<String>,
    pub json: Option<String>,
}

/// Caller supplied options; absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub zoom_levels: Option<Vec<u32>>,
    pub keyboard: Option<bool>,
    pub nudge_increment: Option<f64>,
    pub height: Option<u32>,
    pub colors: Option<ColorScheme>,
    pub data_uri: Option<DataUri>,
    pub template: Option<String>,
}

impl ConfigOverrides {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
