use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SkinError;

/// Width and height of a face, in pixels.
pub const FACE_SIZE: usize = 8;

/// One of the six faces of the head cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Top,
    Bottom,
    Left,
    Front,
    Right,
    Back,
}

impl Face {
    /// All faces, in storage order.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Front,
        Face::Right,
        Face::Back,
    ];

    /// Material slots of the preview cube. Swapping two entries puts textures
    /// on the wrong sides of the head.
    pub const MATERIAL_ORDER: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position of the face in `MATERIAL_ORDER`.
    pub const fn material_slot(self) -> usize {
        match self {
            Face::Right => 0,
            Face::Left => 1,
            Face::Top => 2,
            Face::Bottom => 3,
            Face::Front => 4,
            Face::Back => 5,
        }
    }

    /// Top-left corner of this face's 8x8 region in the skin atlas.
    #[rustfmt::skip]
    pub const fn region(self) -> FaceRegion {
        match self {
            Face::Top    => FaceRegion { x:  8, y: 0 },
            Face::Bottom => FaceRegion { x: 16, y: 0 },
            Face::Left   => FaceRegion { x:  0, y: 8 },
            Face::Front  => FaceRegion { x:  8, y: 8 },
            Face::Right  => FaceRegion { x: 16, y: 8 },
            Face::Back   => FaceRegion { x: 24, y: 8 },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Left => "left",
            Face::Front => "front",
            Face::Right => "right",
            Face::Back => "back",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Face {
    type Err = SkinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .iter()
            .copied()
            .find(|face| face.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SkinError::InvalidFace(s.to_string()))
    }
}

/// Origin of an 8x8 face region inside the skin atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
}

impl FaceRegion {
    pub const SIZE: u32 = FACE_SIZE as u32;

    /// Exclusive lower-right corner.
    pub const fn end(self) -> (u32, u32) {
        (self.x + Self::SIZE, self.y + Self::SIZE)
    }

    pub fn contains(self, x: u32, y: u32) -> bool {
        let (end_x, end_y) = self.end();
        (self.x..end_x).contains(&x) && (self.y..end_y).contains(&y)
    }

    pub fn overlaps(self, other: FaceRegion) -> bool {
        let (end_x, end_y) = self.end();
        let (other_end_x, other_end_y) = other.end();
        self.x < other_end_x && other.x < end_x && self.y < other_end_y && other.y < end_y
    }
}

/// The smallest atlas size that covers every face region.
pub const fn required_atlas_size() -> (u32, u32) {
    let mut width = 0;
    let mut height = 0;
    let mut i = 0;
    while i < Face::ALL.len() {
        let (end_x, end_y) = Face::ALL[i].region().end();
        if end_x > width {
            width = end_x;
        }
        if end_y > height {
            height = end_y;
        }
        i += 1;
    }
    (width, height)
}
