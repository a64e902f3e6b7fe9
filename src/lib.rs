//! Editing core for Minecraft-style head skins: six 8x8 face grids, the
//! packed 64x32 skin texture they are imported from and exported to, the
//! nearest-filtered face textures for a cube preview, and binary glTF export.

pub mod atlas;
pub mod color;
pub mod config;
pub mod cube;
pub mod editor;
pub mod error;
pub mod face;
pub mod geometry;
pub mod model;
pub mod skin;
pub mod texture;
pub mod vertex;

pub use atlas::AtlasImage;
pub use color::Color;
pub use config::EditorConfig;
pub use editor::{Editor, ImportTicket};
pub use error::{
    AtlasError, ColorError, ConfigError, EditorError, ModelError, SkinError, TextureError,
};
pub use face::{Face, FaceRegion};
pub use model::{ModelOptions, ModelTexturing};
pub use skin::{FaceGrid, SkinState};
pub use texture::{CubeRenderer, CubeTextures, FaceTexture};
