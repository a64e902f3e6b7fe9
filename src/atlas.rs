//! Conversion between a `SkinState` and the packed skin texture.
//!
//! Only the six head regions of the standard layout are read or written.
//! Everything else in an imported texture (body parts, the hat overlay) is
//! ignored, and everything else in an exported texture is transparent.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use log::{info, warn};

use crate::{
    color::Color,
    error::AtlasError,
    face::{required_atlas_size, Face, FACE_SIZE},
    skin::{FaceGrid, SkinState},
};

/// A packed skin texture.
pub type AtlasImage = RgbaImage;

pub const ATLAS_WIDTH: u32 = 64;
pub const ATLAS_HEIGHT: u32 = 32;

/// Packs every face into a new 64x32 atlas with a transparent background.
pub fn encode(skin: &SkinState) -> AtlasImage {
    let mut atlas = RgbaImage::from_pixel(ATLAS_WIDTH, ATLAS_HEIGHT, Color::TRANSPARENT.into());

    for (face, grid) in skin.faces() {
        let region = face.region();
        for (x, y, color) in grid.enumerate() {
            atlas.put_pixel(region.x + x as u32, region.y + y as u32, color.into());
        }
    }

    atlas
}

/// Reads the six head regions of `atlas`, copying each pixel verbatim.
pub fn decode(atlas: &AtlasImage) -> Result<SkinState, AtlasError> {
    let (width, height) = atlas.dimensions();
    let (required_width, required_height) = required_atlas_size();
    if width < required_width || height < required_height {
        return Err(AtlasError::TooSmall { width, height });
    }

    if (width, height) != (ATLAS_WIDTH, ATLAS_HEIGHT) {
        warn!(
            "decoding {}x{} atlas, only the head regions are read",
            width, height
        );
    }

    let grids = Face::ALL.iter().map(|&face| {
        let region = face.region();
        let mut grid = FaceGrid::filled(Color::TRANSPARENT);
        for (x, y) in itertools::iproduct!(0..FACE_SIZE, 0..FACE_SIZE) {
            let pixel = *atlas.get_pixel(region.x + x as u32, region.y + y as u32);
            grid.set(x, y, pixel.into());
        }
        (face, grid)
    });

    Ok(SkinState::from_faces(grids)?)
}

/// Decodes an image file held in memory into an RGBA atlas.
pub fn decode_png(bytes: &[u8]) -> Result<AtlasImage, AtlasError> {
    let image = image::load_from_memory(bytes).map_err(AtlasError::ImageDecode)?;
    let atlas = image.into_rgba8();
    info!("decoded {}x{} skin image", atlas.width(), atlas.height());
    Ok(atlas)
}

pub fn encode_png(atlas: &AtlasImage) -> Result<Vec<u8>, AtlasError> {
    let mut bytes = Cursor::new(Vec::new());
    atlas
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(AtlasError::ImageEncode)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn patterned_skin() -> SkinState {
        let mut skin = SkinState::new();
        for (i, face) in Face::ALL.iter().enumerate() {
            for (x, y) in itertools::iproduct!(0..8, 0..8) {
                let color = Color::rgba((x * 30) as u8, (y * 30) as u8, (i * 40) as u8, (x * y) as u8);
                skin.set_pixel(*face, x, y, color).unwrap();
            }
        }
        skin
    }

    #[test]
    fn encode_places_faces_at_their_regions() {
        let mut skin = SkinState::new();
        skin.set_pixel(Face::Front, 0, 0, RED).unwrap();

        let atlas = encode(&skin);
        assert_eq!(atlas.dimensions(), (64, 32));
        assert_eq!(Color::from(*atlas.get_pixel(8, 8)), RED);
        assert_eq!(Color::from(*atlas.get_pixel(8, 9)), Color::WHITE);
    }

    #[test]
    fn encode_leaves_background_transparent() {
        let atlas = encode(&SkinState::new());
        for (x, y, pixel) in atlas.enumerate_pixels() {
            let inside = Face::ALL.iter().any(|face| face.region().contains(x, y));
            let expected = if inside { Color::WHITE } else { Color::TRANSPARENT };
            assert_eq!(Color::from(*pixel), expected, "pixel ({}, {})", x, y);
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let skin = patterned_skin();
        assert_eq!(decode(&encode(&skin)).unwrap(), skin);
    }

    #[test]
    fn encode_is_deterministic() {
        let skin = patterned_skin();
        assert_eq!(encode(&skin).into_raw(), encode(&skin).into_raw());
    }

    #[test]
    fn decode_reads_top_region() {
        let mut atlas = RgbaImage::from_pixel(64, 32, Color::rgb(9, 9, 9).into());
        for (x, y) in itertools::iproduct!(8..16, 0..8) {
            atlas.put_pixel(x, y, BLUE.into());
        }

        let skin = decode(&atlas).unwrap();
        assert_eq!(*skin.face(Face::Top), FaceGrid::filled(BLUE));
        for face in Face::ALL.iter().filter(|&&face| face != Face::Top) {
            assert_eq!(*skin.face(*face), FaceGrid::filled(Color::rgb(9, 9, 9)));
        }
    }

    #[test]
    fn decode_ignores_body_of_full_skin() {
        let skin = patterned_skin();
        let mut full = RgbaImage::from_pixel(64, 64, RED.into());
        for (x, y, pixel) in encode(&skin).enumerate_pixels() {
            if Face::ALL.iter().any(|face| face.region().contains(x, y)) {
                full.put_pixel(x, y, *pixel);
            }
        }
        assert_eq!(decode(&full).unwrap(), skin);
    }

    #[test]
    fn decode_rejects_small_atlas() {
        let atlas = RgbaImage::new(16, 16);
        assert!(matches!(
            decode(&atlas),
            Err(AtlasError::TooSmall {
                width: 16,
                height: 16
            })
        ));
        assert!(decode(&RgbaImage::new(32, 16)).is_ok());
        assert!(decode(&RgbaImage::new(31, 16)).is_err());
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let skin = patterned_skin();
        let bytes = encode_png(&encode(&skin)).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let atlas = decode_png(&bytes).unwrap();
        assert_eq!(decode(&atlas).unwrap(), skin);
    }

    #[test]
    fn decode_png_rejects_garbage() {
        assert!(matches!(
            decode_png(b"definitely not a png"),
            Err(AtlasError::ImageDecode(_))
        ));
    }
}
