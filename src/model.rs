//! Binary glTF export of the textured head cube.

use std::{borrow::Cow, collections::BTreeMap};

use gltf::{
    binary::{Glb, Header},
    json::{
        self,
        accessor::{ComponentType, GenericComponentType, Type},
        buffer::{Stride, Target},
        image::MimeType,
        material::{AlphaMode, PbrMetallicRoughness, StrengthFactor},
        mesh::{Mode, Primitive},
        texture::{MagFilter, MinFilter, Sampler, WrappingMode},
        validation::{Checked::Valid, USize64},
        Index,
    },
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    cube,
    error::ModelError,
    face::Face,
    texture::{CubeTextures, FaceTexture, FilterMode},
    vertex::{AttributeSemantic, ModelVertex, Vertex},
};

/// Which face grids end up on the faces of the exported cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelTexturing {
    /// Every face gets its own grid.
    PerFace,
    /// Every face gets the front grid.
    FrontOnly,
}

impl Default for ModelTexturing {
    fn default() -> Self {
        ModelTexturing::PerFace
    }
}

impl ModelTexturing {
    fn source(self, face: Face) -> Face {
        match self {
            ModelTexturing::PerFace => face,
            ModelTexturing::FrontOnly => Face::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOptions {
    /// Edge length of the cube.
    pub size: f32,
    pub texturing: ModelTexturing,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            size: 2.0,
            texturing: ModelTexturing::PerFace,
        }
    }
}

impl ModelOptions {
    /// Fails unless `size` is a positive finite number.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.size.is_finite() && self.size > 0.0 {
            Ok(())
        } else {
            Err(ModelError::InvalidSize(self.size))
        }
    }
}

/// Accumulates the BIN chunk, registering a buffer view for every slice
/// pushed into it.
struct BinaryChunk {
    buffer: Index<json::Buffer>,
    data: Vec<u8>,
}

impl BinaryChunk {
    fn new(root: &mut json::Root) -> Self {
        let buffer = root.push(json::Buffer {
            byte_length: USize64(0),
            name: None,
            uri: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
        Self {
            buffer,
            data: Vec::new(),
        }
    }

    fn pad(&mut self) {
        while self.data.len() % 4 != 0 {
            self.data.push(0);
        }
    }

    /// Appends `bytes` 4-byte aligned and returns the new buffer view.
    fn push(
        &mut self,
        root: &mut json::Root,
        bytes: &[u8],
        target: Option<Target>,
        stride: Option<usize>,
    ) -> Index<json::buffer::View> {
        self.pad();
        let view = root.push(json::buffer::View {
            buffer: self.buffer,
            byte_length: USize64::from(bytes.len()),
            byte_offset: Some(USize64::from(self.data.len())),
            byte_stride: stride.map(Stride),
            name: None,
            target: target.map(Valid),
            extensions: Default::default(),
            extras: Default::default(),
        });
        self.data.extend_from_slice(bytes);
        view
    }

    /// Pads the chunk and records its final length on the buffer.
    fn finish(mut self, root: &mut json::Root) -> Vec<u8> {
        self.pad();
        if let Some(buffer) = root.buffers.get_mut(self.buffer.value()) {
            buffer.byte_length = USize64::from(self.data.len());
        }
        self.data
    }
}

fn face_sampler(filter: FilterMode) -> Sampler {
    let (mag_filter, min_filter) = match filter {
        FilterMode::Nearest => (MagFilter::Nearest, MinFilter::Nearest),
    };
    Sampler {
        mag_filter: Some(Valid(mag_filter)),
        min_filter: Some(Valid(min_filter)),
        wrap_s: Valid(WrappingMode::ClampToEdge),
        wrap_t: Valid(WrappingMode::ClampToEdge),
        ..Default::default()
    }
}

/// Serializes a cube textured with `textures` as a binary glTF file.
///
/// The mesh has one primitive per material slot, in the order right, left,
/// top, bottom, front, back. Textures are embedded as PNG and sampled with
/// nearest filtering.
pub fn export_glb(textures: &CubeTextures, options: &ModelOptions) -> Result<Vec<u8>, ModelError> {
    options.validate()?;
    if options.texturing == ModelTexturing::FrontOnly {
        warn!("exporting model with the front texture on every face");
    }

    let mut root = json::Root {
        asset: json::Asset {
            generator: Some("skincrab".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut chunk = BinaryChunk::new(&mut root);
    let sampler = root.push(face_sampler(FaceTexture::FILTER));

    let mut texture_for_face: Vec<(Face, Index<json::Texture>)> = Vec::new();
    let mut primitives = Vec::new();

    for face in Face::MATERIAL_ORDER {
        let source = options.texturing.source(face);
        let texture = match texture_for_face.iter().find(|(f, _)| *f == source) {
            Some(&(_, texture)) => texture,
            None => {
                let png = textures
                    .for_face(source)
                    .to_png()
                    .map_err(ModelError::ImageEncode)?;
                let view = chunk.push(&mut root, &png, None, None);
                let image = root.push(json::Image {
                    buffer_view: Some(view),
                    mime_type: Some(MimeType("image/png".to_string())),
                    name: Some(source.name().to_string()),
                    uri: None,
                    extensions: Default::default(),
                    extras: Default::default(),
                });
                let texture = root.push(json::Texture {
                    name: None,
                    sampler: Some(sampler),
                    source: image,
                    extensions: Default::default(),
                    extras: Default::default(),
                });
                texture_for_face.push((source, texture));
                texture
            }
        };

        let material = root.push(json::Material {
            name: Some(face.name().to_string()),
            alpha_mode: Valid(AlphaMode::Mask),
            pbr_metallic_roughness: PbrMetallicRoughness {
                base_color_texture: Some(json::texture::Info {
                    index: texture,
                    tex_coord: 0,
                    extensions: Default::default(),
                    extras: Default::default(),
                }),
                metallic_factor: StrengthFactor(0.0),
                roughness_factor: StrengthFactor(1.0),
                ..Default::default()
            },
            ..Default::default()
        });

        let geometry = cube::face_geometry(face, options.size);
        let vertex_view = chunk.push(
            &mut root,
            geometry.vertex_bytes(),
            Some(Target::ArrayBuffer),
            Some(ModelVertex::stride()),
        );
        let index_view = chunk.push(
            &mut root,
            geometry.index_bytes(),
            Some(Target::ElementArrayBuffer),
            None,
        );
        let (min, max) = cube::bounds(&geometry.vertices);

        let mut attributes = BTreeMap::new();
        for attribute in ModelVertex::ATTRIBUTES {
            let (min, max) = match attribute.semantic {
                AttributeSemantic::Position => (
                    Some(json::Value::from(min.to_vec())),
                    Some(json::Value::from(max.to_vec())),
                ),
                _ => (None, None),
            };
            let accessor = root.push(json::Accessor {
                buffer_view: Some(vertex_view),
                byte_offset: Some(USize64::from(attribute.offset)),
                count: USize64::from(geometry.vertices.len()),
                component_type: Valid(GenericComponentType(ComponentType::F32)),
                type_: Valid(attribute.accessor_type()),
                min,
                max,
                name: None,
                normalized: false,
                sparse: None,
                extensions: Default::default(),
                extras: Default::default(),
            });
            attributes.insert(Valid(attribute.semantic.to_gltf()), accessor);
        }

        let indices = root.push(json::Accessor {
            buffer_view: Some(index_view),
            byte_offset: None,
            count: USize64::from(geometry.index_count()),
            component_type: Valid(GenericComponentType(ComponentType::U16)),
            type_: Valid(Type::Scalar),
            min: None,
            max: None,
            name: None,
            normalized: false,
            sparse: None,
            extensions: Default::default(),
            extras: Default::default(),
        });

        primitives.push(Primitive {
            attributes,
            indices: Some(indices),
            material: Some(material),
            mode: Valid(Mode::Triangles),
            targets: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
    }

    let mesh = root.push(json::Mesh {
        name: Some("head".to_string()),
        primitives,
        weights: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    let node = root.push(json::Node {
        name: Some("head".to_string()),
        mesh: Some(mesh),
        ..Default::default()
    });
    let scene = root.push(json::Scene {
        name: None,
        nodes: vec![node],
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene);

    let bin = chunk.finish(&mut root);
    let document = json::serialize::to_vec(&root)?;
    debug!(
        "writing glb: {} bytes json, {} bytes binary, {} images",
        document.len(),
        bin.len(),
        root.images.len()
    );

    // `to_vec` pads both chunks and writes the framed length itself.
    let glb = Glb {
        header: Header {
            magic: *b"glTF",
            version: 2,
            length: 0,
        },
        json: Cow::Owned(document),
        bin: Some(Cow::Owned(bin)),
    };
    Ok(glb.to_vec()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, skin::SkinState};

    fn skin() -> SkinState {
        let mut skin = SkinState::new();
        for (i, face) in Face::ALL.iter().enumerate() {
            skin.set_pixel(*face, 0, 0, Color::rgb(10 * i as u8, 0, 0)).unwrap();
        }
        skin
    }

    fn material_texture(document: &gltf::Gltf, slot: usize) -> usize {
        let material = document.materials().nth(slot).unwrap();
        material
            .pbr_metallic_roughness()
            .base_color_texture()
            .unwrap()
            .texture()
            .index()
    }

    #[test]
    fn glb_has_header_and_chunks() {
        let bytes = export_glb(&CubeTextures::from_skin(&skin()), &ModelOptions::default()).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 2);
        let length = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        assert_eq!(length as usize, bytes.len());
        assert_eq!(bytes.len() % 4, 0);
    }

    #[test]
    fn per_face_materials_are_in_slot_order() {
        let bytes = export_glb(&CubeTextures::from_skin(&skin()), &ModelOptions::default()).unwrap();
        let document = gltf::Gltf::from_slice(&bytes).unwrap();

        let names: Vec<&str> = document.materials().map(|material| material.name().unwrap()).collect();
        assert_eq!(names, ["right", "left", "top", "bottom", "front", "back"]);
        assert_eq!(document.images().count(), 6);
        for slot in 0..6 {
            assert_eq!(material_texture(&document, slot), slot);
        }

        let mesh = document.meshes().next().unwrap();
        let materials: Vec<Option<usize>> = mesh
            .primitives()
            .map(|primitive| primitive.material().index())
            .collect();
        assert_eq!(materials, (0..6).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn front_only_shares_one_texture() {
        let options = ModelOptions {
            texturing: ModelTexturing::FrontOnly,
            ..ModelOptions::default()
        };
        let bytes = export_glb(&CubeTextures::from_skin(&skin()), &options).unwrap();
        let document = gltf::Gltf::from_slice(&bytes).unwrap();

        assert_eq!(document.materials().count(), 6);
        assert_eq!(document.images().count(), 1);
        for slot in 0..6 {
            assert_eq!(material_texture(&document, slot), 0);
        }
    }

    #[test]
    fn textures_are_sampled_nearest() {
        let bytes = export_glb(&CubeTextures::from_skin(&skin()), &ModelOptions::default()).unwrap();
        let document = gltf::Gltf::from_slice(&bytes).unwrap();
        for texture in document.textures() {
            let sampler = texture.sampler();
            assert_eq!(sampler.mag_filter(), Some(gltf::texture::MagFilter::Nearest));
            assert_eq!(sampler.min_filter(), Some(gltf::texture::MinFilter::Nearest));
        }
    }

    #[test]
    fn embedded_images_hold_face_pixels() {
        let skin = skin();
        let bytes = export_glb(&CubeTextures::from_skin(&skin), &ModelOptions::default()).unwrap();
        let document = gltf::Gltf::from_slice(&bytes).unwrap();
        let blob = document.blob.as_ref().unwrap();

        for (slot, embedded) in document.images().enumerate() {
            let view = match embedded.source() {
                gltf::image::Source::View { view, mime_type } => {
                    assert_eq!(mime_type, "image/png");
                    view
                }
                gltf::image::Source::Uri { .. } => panic!("image should be embedded"),
            };
            let png = &blob[view.offset()..view.offset() + view.length()];
            let decoded = image::load_from_memory(png).unwrap().into_rgba8();
            let face = Face::MATERIAL_ORDER[slot];
            assert_eq!(
                Color::from(*decoded.get_pixel(0, 0)),
                skin.pixel(face, 0, 0).unwrap()
            );
        }
    }

    #[test]
    fn clamps_and_bounds_follow_cube_size() {
        let options = ModelOptions {
            size: 3.0,
            ..ModelOptions::default()
        };
        let bytes = export_glb(&CubeTextures::from_skin(&skin()), &options).unwrap();
        let document = gltf::Gltf::from_slice(&bytes).unwrap();

        let sampler = document.samplers().next().unwrap();
        assert_eq!(sampler.wrap_s(), gltf::texture::WrappingMode::ClampToEdge);
        assert_eq!(sampler.wrap_t(), gltf::texture::WrappingMode::ClampToEdge);

        let mesh = document.meshes().next().unwrap();
        for primitive in mesh.primitives() {
            assert_eq!(primitive.mode(), gltf::mesh::Mode::Triangles);
            let bounds = primitive.bounding_box();
            for axis in 0..3 {
                assert!(bounds.min[axis] >= -1.5 && bounds.max[axis] <= 1.5);
            }
            let positions = primitive.get(&gltf::Semantic::Positions).unwrap();
            assert_eq!(positions.count(), 4);
            assert_eq!(primitive.indices().unwrap().count(), 6);
        }
    }

    #[test]
    fn rejects_unusable_cube_sizes() {
        let textures = CubeTextures::from_skin(&skin());
        for size in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            let options = ModelOptions {
                size,
                ..ModelOptions::default()
            };
            assert!(matches!(
                export_glb(&textures, &options),
                Err(ModelError::InvalidSize(_))
            ));
        }
    }
}
