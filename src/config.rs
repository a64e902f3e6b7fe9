//! Editor settings, persisted as RON.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    color::{Color, DEFAULT_PALETTE},
    error::ConfigError,
    model::{ModelOptions, ModelTexturing},
    texture::MAX_UPSCALE,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Color every pixel starts with.
    pub default_color: Color,
    /// Paint color selected when the editor opens.
    pub initial_color: Color,
    /// Preset swatches.
    pub palette: Vec<Color>,
    /// Suggested file name for skin exports.
    pub skin_file_name: String,
    /// Suggested file name for model exports.
    pub model_file_name: String,
    pub model_texturing: ModelTexturing,
    /// Edge length of the exported cube.
    pub cube_size: f32,
    /// Magnification used when previewing a single face.
    pub preview_scale: u32,
    /// Log filter (e.g. "info", "skincrab=debug"). Empty defers to `RUST_LOG`.
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_color: Color::WHITE,
            initial_color: Color::WHITE,
            palette: DEFAULT_PALETTE.to_vec(),
            skin_file_name: "minecraft-skin.png".to_string(),
            model_file_name: "model.glb".to_string(),
            model_texturing: ModelTexturing::PerFace,
            cube_size: 2.0,
            preview_scale: 16,
            log_level: String::new(),
        }
    }
}

impl EditorConfig {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(ConfigError::Serialize)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_ron(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_ron()?;
        std::fs::write(path, text).map_err(ConfigError::Write)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Rejects values the exports cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model_options()
            .validate()
            .map_err(|error| ConfigError::Invalid {
                field: "cube_size",
                reason: error.to_string(),
            })?;
        if !(1..=MAX_UPSCALE).contains(&self.preview_scale) {
            return Err(ConfigError::Invalid {
                field: "preview_scale",
                reason: format!("expected 1..={}, got {}", MAX_UPSCALE, self.preview_scale),
            });
        }
        Ok(())
    }

    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            size: self.cube_size,
            texturing: self.model_texturing,
        }
    }
}
