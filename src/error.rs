use crate::face::Face;

/// Errors raised by the pixel grid store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SkinError {
    /// A pixel coordinate fell outside the 8x8 face grid.
    #[error("pixel ({x}, {y}) is outside the 8x8 face grid")]
    OutOfRange { x: i32, y: i32 },

    /// A face was named that is not one of the six cube faces.
    #[error("unknown face `{0}`")]
    InvalidFace(String),

    /// `replace` was handed fewer than six faces.
    #[error("incomplete face set, missing {missing:?}")]
    IncompleteFaceSet { missing: Vec<Face> },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color `{0}`")]
    Invalid(String),
}

/// Errors raised while converting between skins and atlas images.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("atlas is {width}x{height}, at least 32x16 is required to cover the head regions")]
    TooSmall { width: u32, height: u32 },

    #[error(transparent)]
    Skin(#[from] SkinError),

    #[error("failed to decode skin image: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("failed to encode skin image: {0}")]
    ImageEncode(#[source] image::ImageError),
}

/// Errors raised while building face textures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("preview scale {scale} is outside 1..={max}")]
    ScaleOutOfRange { scale: u32, max: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cube size must be a positive finite number, got {0}")]
    InvalidSize(f32),

    #[error("failed to encode face texture: {0}")]
    ImageEncode(#[source] image::ImageError),

    #[error("failed to serialize glTF document: {0}")]
    Json(#[from] gltf::json::Error),

    #[error("failed to write glTF binary: {0}")]
    Gltf(#[from] gltf::Error),
}

/// Errors surfaced by the editor controller.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Skin(#[from] SkinError),

    #[error(transparent)]
    Atlas(#[from] AtlasError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Another import has started and not finished yet.
    #[error("an import is already in progress")]
    ImportInProgress,

    /// The ticket does not belong to the pending import.
    #[error("import ticket does not match the pending import")]
    StaleImport,
}

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
