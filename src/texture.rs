use std::io::Cursor;

use image::{imageops::FilterType, ImageFormat, RgbaImage};

use crate::{
    color::Color,
    error::TextureError,
    face::{Face, FACE_SIZE},
    skin::{FaceGrid, SkinState},
};

/// Largest magnification `FaceTexture::upscale` accepts.
pub const MAX_UPSCALE: u32 = 512;

/// How texels are picked when a texture is stretched over a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
}

/// An 8x8 indexed-color raster built from one face grid.
///
/// `palette` holds every distinct color in the order it is first met while
/// scanning rows top to bottom; `indices` points into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceTexture {
    pub palette: Vec<Color>,
    pub indices: [[u8; FACE_SIZE]; FACE_SIZE],
}

impl FaceTexture {
    pub const FILTER: FilterMode = FilterMode::Nearest;

    pub fn from_grid(grid: &FaceGrid) -> Self {
        let mut palette: Vec<Color> = Vec::new();
        let mut indices = [[0; FACE_SIZE]; FACE_SIZE];

        for (x, y, color) in grid.enumerate() {
            let index = match palette.iter().position(|&entry| entry == color) {
                Some(index) => index,
                None => {
                    palette.push(color);
                    palette.len() - 1
                }
            };
            // At most 64 distinct colors fit in an 8x8 grid.
            indices[y][x] = index as u8;
        }

        Self { palette, indices }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.palette[self.indices[y][x] as usize]
    }

    /// Samples the texture at normalized coordinates, `(0, 0)` being the
    /// top-left corner. Picks the closest texel without blending; coordinates
    /// outside `[0, 1]` are clamped to the edge.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let texel = |coordinate: f32| {
            let scaled = (coordinate * FACE_SIZE as f32).floor();
            scaled.max(0.0).min((FACE_SIZE - 1) as f32) as usize
        };
        self.pixel(texel(u), texel(v))
    }

    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(FACE_SIZE as u32, FACE_SIZE as u32, |x, y| {
            self.pixel(x as usize, y as usize).into()
        })
    }

    /// Enlarges the texture `scale` times, each texel becoming a solid block.
    pub fn upscale(&self, scale: u32) -> Result<RgbaImage, TextureError> {
        let size = match (FACE_SIZE as u32).checked_mul(scale) {
            Some(size) if (1..=MAX_UPSCALE).contains(&scale) => size,
            _ => {
                return Err(TextureError::ScaleOutOfRange {
                    scale,
                    max: MAX_UPSCALE,
                })
            }
        };
        Ok(image::imageops::resize(
            &self.to_rgba(),
            size,
            size,
            FilterType::Nearest,
        ))
    }

    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Cursor::new(Vec::new());
        self.to_rgba().write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

/// The six face textures of the head, in material-slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeTextures {
    slots: [FaceTexture; 6],
}

impl CubeTextures {
    pub fn from_skin(skin: &SkinState) -> Self {
        Self {
            slots: Face::MATERIAL_ORDER.map(|face| FaceTexture::from_grid(skin.face(face))),
        }
    }

    pub fn slot(&self, slot: usize) -> Option<&FaceTexture> {
        self.slots.get(slot)
    }

    pub fn for_face(&self, face: Face) -> &FaceTexture {
        &self.slots[face.material_slot()]
    }

    /// Iterates over `(face, texture)` in material-slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &FaceTexture)> {
        Face::MATERIAL_ORDER.iter().copied().zip(self.slots.iter())
    }
}

/// A consumer of cube textures, such as a preview window.
pub trait CubeRenderer {
    /// Replaces the textures on the rendered cube.
    fn upload(&mut self, textures: &CubeTextures);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);

    fn checker() -> FaceGrid {
        let mut grid = FaceGrid::filled(RED);
        for (x, y) in itertools::iproduct!(0..FACE_SIZE, 0..FACE_SIZE) {
            if (x + y) % 2 == 1 {
                grid.set(x, y, GREEN);
            }
        }
        grid
    }

    #[test]
    fn palette_is_first_seen_order() {
        let texture = FaceTexture::from_grid(&checker());
        assert_eq!(texture.palette, vec![RED, GREEN]);
        assert_eq!(texture.indices[0][..3], [0, 1, 0]);
        assert_eq!(texture.pixel(1, 0), GREEN);
    }

    #[test]
    fn sample_is_nearest() {
        let texture = FaceTexture::from_grid(&checker());
        assert_eq!(texture.sample(0.0, 0.0), RED);
        assert_eq!(texture.sample(0.124, 0.0), RED);
        assert_eq!(texture.sample(0.126, 0.0), GREEN);
        assert_eq!(texture.sample(1.0, 1.0), texture.pixel(7, 7));
        assert_eq!(texture.sample(-3.0, 0.5), texture.pixel(0, 4));
    }

    #[test]
    fn upscale_keeps_hard_edges() {
        let texture = FaceTexture::from_grid(&checker());
        for scale in [1, 3, 4, 16] {
            let large = texture.upscale(scale).unwrap();
            assert_eq!(large.dimensions(), (8 * scale, 8 * scale));
            for (x, y, pixel) in large.enumerate_pixels() {
                let expected = texture.pixel((x / scale) as usize, (y / scale) as usize);
                assert_eq!(Color::from(*pixel), expected, "scale {} at ({}, {})", scale, x, y);
            }
        }
    }

    #[test]
    fn upscale_rejects_unusable_scales() {
        let texture = FaceTexture::from_grid(&checker());
        for scale in [0, MAX_UPSCALE + 1, u32::MAX / 4, u32::MAX] {
            assert_eq!(
                texture.upscale(scale).err(),
                Some(TextureError::ScaleOutOfRange {
                    scale,
                    max: MAX_UPSCALE
                })
            );
        }
        assert!(texture.upscale(MAX_UPSCALE).is_ok());
    }

    #[test]
    fn cube_textures_follow_material_order() {
        let mut skin = SkinState::new();
        for (i, face) in Face::ALL.iter().enumerate() {
            skin.set_pixel(*face, 0, 0, Color::rgb(i as u8, 0, 0)).unwrap();
        }

        let textures = CubeTextures::from_skin(&skin);
        let order: Vec<Face> = textures.iter().map(|(face, _)| face).collect();
        assert_eq!(order, Face::MATERIAL_ORDER.to_vec());
        for (slot, face) in Face::MATERIAL_ORDER.iter().enumerate() {
            let texture = textures.slot(slot).unwrap();
            assert_eq!(texture.pixel(0, 0), Color::rgb(face.index() as u8, 0, 0));
            assert_eq!(texture, textures.for_face(*face));
        }
        assert!(textures.slot(6).is_none());
    }
}
