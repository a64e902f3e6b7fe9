use crate::vertex::Vertex;

/// Represents a set of triangles by its vertices and indices.
#[derive(Debug, Clone)]
pub struct Geometry<V: Vertex, I> {
    pub vertices: Vec<V>,
    pub indices: Vec<I>,
}

impl<V: Vertex, I> Geometry<V, I> {
    pub fn new(vertices: Vec<V>, indices: Vec<I>) -> Self {
        Self { vertices, indices }
    }

    /// Returns the number of indices in the geometry.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl<V: Vertex, I: bytemuck::Pod> Geometry<V, I> {
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
