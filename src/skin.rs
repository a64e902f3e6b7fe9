use log::debug;

use crate::{
    color::Color,
    error::SkinError,
    face::{Face, FACE_SIZE},
};

/// An 8x8 grid of colors, stored row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceGrid {
    pub pixels: [[Color; FACE_SIZE]; FACE_SIZE],
}

impl FaceGrid {
    pub const fn filled(color: Color) -> Self {
        Self {
            pixels: [[color; FACE_SIZE]; FACE_SIZE],
        }
    }

    /// Converts signed coordinates to grid indices, failing if either is outside `[0, 8)`.
    pub fn check_coordinates(x: i32, y: i32) -> Result<(usize, usize), SkinError> {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(col), Ok(row)) if col < FACE_SIZE && row < FACE_SIZE => Ok((col, row)),
            _ => Err(SkinError::OutOfRange { x, y }),
        }
    }

    /// Returns the pixel in column `x` of row `y`.
    ///
    /// Panics if the coordinates are outside the grid; use `SkinState::pixel`
    /// for checked access.
    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y][x] = color;
    }

    /// Iterates over `(x, y, color)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        itertools::iproduct!(0..FACE_SIZE, 0..FACE_SIZE).map(move |(y, x)| (x, y, self.get(x, y)))
    }
}

impl Default for FaceGrid {
    fn default() -> Self {
        Self::filled(Color::WHITE)
    }
}

/// The six face grids of a head. Always complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkinState {
    grids: [FaceGrid; 6],
}

impl SkinState {
    /// A skin with every pixel of every face opaque white.
    pub fn new() -> Self {
        Self::filled(Color::WHITE)
    }

    pub fn filled(color: Color) -> Self {
        Self {
            grids: [FaceGrid::filled(color); 6],
        }
    }

    /// Builds a skin from exactly one grid per face.
    pub fn from_faces<I>(grids: I) -> Result<Self, SkinError>
    where
        I: IntoIterator<Item = (Face, FaceGrid)>,
    {
        let mut slots: [Option<FaceGrid>; 6] = [None; 6];
        for (face, grid) in grids {
            slots[face.index()] = Some(grid);
        }

        let missing: Vec<Face> = Face::ALL
            .iter()
            .copied()
            .filter(|face| slots[face.index()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SkinError::IncompleteFaceSet { missing });
        }

        let mut result = Self::new();
        for face in Face::ALL {
            if let Some(grid) = slots[face.index()] {
                result.grids[face.index()] = grid;
            }
        }
        Ok(result)
    }

    pub fn face(&self, face: Face) -> &FaceGrid {
        &self.grids[face.index()]
    }

    /// Iterates over every face grid in storage order.
    pub fn faces(&self) -> impl Iterator<Item = (Face, &FaceGrid)> {
        Face::ALL.iter().copied().zip(self.grids.iter())
    }

    pub fn pixel(&self, face: Face, x: i32, y: i32) -> Result<Color, SkinError> {
        let (x, y) = FaceGrid::check_coordinates(x, y)?;
        Ok(self.face(face).get(x, y))
    }

    /// Sets a single pixel, leaving every other pixel untouched.
    pub fn set_pixel(&mut self, face: Face, x: i32, y: i32, color: Color) -> Result<(), SkinError> {
        let (col, row) = FaceGrid::check_coordinates(x, y)?;
        debug!("set {} ({}, {}) to {}", face, col, row, color);
        self.grids[face.index()].set(col, row, color);
        Ok(())
    }

    /// Swaps in a complete new set of face grids. On failure the skin is left as it was.
    pub fn replace<I>(&mut self, grids: I) -> Result<(), SkinError>
    where
        I: IntoIterator<Item = (Face, FaceGrid)>,
    {
        *self = Self::from_faces(grids)?;
        Ok(())
    }

    /// Consumes the skin, yielding every `(face, grid)` pair.
    pub fn into_faces(self) -> impl Iterator<Item = (Face, FaceGrid)> {
        Face::ALL.into_iter().zip(self.grids)
    }
}

impl Default for SkinState {
    fn default() -> Self {
        Self::new()
    }
}
