use std::mem::size_of;

use gltf::json::{accessor::Type, mesh::Semantic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSemantic {
    Position,
    Normal,
    TextureCoordinates,
}

impl AttributeSemantic {
    pub fn to_gltf(self) -> Semantic {
        match self {
            AttributeSemantic::Position => Semantic::Positions,
            AttributeSemantic::Normal => Semantic::Normals,
            AttributeSemantic::TextureCoordinates => Semantic::TexCoords(0),
        }
    }
}

/// Describes one float attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub semantic: AttributeSemantic,
    pub offset: usize,
    pub components: usize,
}

impl VertexAttribute {
    /// glTF accessor type for the component count.
    pub fn accessor_type(&self) -> Type {
        match self.components {
            1 => Type::Scalar,
            2 => Type::Vec2,
            3 => Type::Vec3,
            _ => Type::Vec4,
        }
    }
}

pub trait Vertex: bytemuck::Pod {
    const ATTRIBUTES: &'static [VertexAttribute];

    fn stride() -> usize {
        size_of::<Self>()
    }
}

/// Represents a vertex of the exported head model.
///
/// Texture coordinates follow the glTF convention of `(0, 0)` being the
/// top-left corner of the image.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texture_coordinates: [f32; 2],
}

const MODEL_VERTEX_ATTRIBUTES: &[VertexAttribute] = &[
    VertexAttribute {
        semantic: AttributeSemantic::Position,
        offset: 0,
        components: 3,
    },
    VertexAttribute {
        semantic: AttributeSemantic::Normal,
        offset: 12,
        components: 3,
    },
    VertexAttribute {
        semantic: AttributeSemantic::TextureCoordinates,
        offset: 24,
        components: 2,
    },
];

impl Vertex for ModelVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = MODEL_VERTEX_ATTRIBUTES;
}
