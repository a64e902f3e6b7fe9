use cgmath::{InnerSpace, Vector3};

use crate::{face::Face, geometry::Geometry, vertex::ModelVertex};

/// Vertices of a single face: top-left, top-right, bottom-right, bottom-left
/// as seen from outside the cube.
const CORNERS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Returns the outward normal, the rightward and the upward axis of `face`
/// when looking at it from outside the cube. Right is +X, up is +Y, front is +Z.
#[rustfmt::skip]
pub fn face_axes(face: Face) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    match face {
        Face::Right  => (Vector3::new( 1.0,  0.0,  0.0), Vector3::new( 0.0, 0.0, -1.0), Vector3::new(0.0, 1.0,  0.0)),
        Face::Left   => (Vector3::new(-1.0,  0.0,  0.0), Vector3::new( 0.0, 0.0,  1.0), Vector3::new(0.0, 1.0,  0.0)),
        Face::Top    => (Vector3::new( 0.0,  1.0,  0.0), Vector3::new( 1.0, 0.0,  0.0), Vector3::new(0.0, 0.0, -1.0)),
        Face::Bottom => (Vector3::new( 0.0, -1.0,  0.0), Vector3::new( 1.0, 0.0,  0.0), Vector3::new(0.0, 0.0,  1.0)),
        Face::Front  => (Vector3::new( 0.0,  0.0,  1.0), Vector3::new( 1.0, 0.0,  0.0), Vector3::new(0.0, 1.0,  0.0)),
        Face::Back   => (Vector3::new( 0.0,  0.0, -1.0), Vector3::new(-1.0, 0.0,  0.0), Vector3::new(0.0, 1.0,  0.0)),
    }
}

/// Builds the quad for one face of a cube of edge length `size` centered on
/// the origin. Triangles wind counter-clockwise seen from outside, and the
/// texture's top-left texel lands on the face's top-left corner.
pub fn face_geometry(face: Face, size: f32) -> Geometry<ModelVertex, u16> {
    let (normal, right, up) = face_axes(face);
    let center = normal * (size / 2.0);

    let vertices = CORNERS
        .iter()
        .map(|&(u, v)| {
            let position = center + right * ((u - 0.5) * size) + up * ((0.5 - v) * size);
            ModelVertex {
                position: position.into(),
                normal: normal.into(),
                texture_coordinates: [u, v],
            }
        })
        .collect();

    Geometry::new(vertices, vec![0, 3, 2, 0, 2, 1])
}

/// Component-wise minimum and maximum of the positions in `vertices`.
pub fn bounds(vertices: &[ModelVertex]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for vertex in vertices {
        for axis in 0..3 {
            min[axis] = min[axis].min(vertex.position[axis]);
            max[axis] = max[axis].max(vertex.position[axis]);
        }
    }
    (min, max)
}
