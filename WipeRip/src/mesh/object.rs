//! Object mesh reconstruction

use tracing::{debug, warn};

use super::{Corner, Material, MeshFace, MeshOptions, ReconstructedMesh, SpriteInstance, texel_to_uv};
use crate::formats::common::Rgb;
use crate::formats::prm::{Face, PlacedObject, Polygon, Shading, Sprite};
use crate::formats::tim::Image;

/// Stored slot emitted at each output corner of a triangle.
pub const TRIANGLE_WINDING: [usize; 3] = [2, 1, 0];

/// Stored slot emitted at each output corner of a quad.
pub const QUAD_WINDING: [usize; 4] = [3, 1, 0, 2];

/// Reconstruct one placed object.
///
/// `images` are the decoded images of the object's container; textured
/// faces index into them. Polygons are walked in file order.
#[must_use]
pub fn reconstruct_object(
    object: &PlacedObject,
    images: &[Image],
    options: &MeshOptions,
) -> ReconstructedMesh {
    let mut mesh = ReconstructedMesh::new(object.name.clone(), object.vertices.clone());
    mesh.offset = object.offset;

    for polygon in &object.polygons {
        match polygon {
            Polygon::Triangle(face) => push_face(&mut mesh, face, &TRIANGLE_WINDING, images, options),
            Polygon::Quad(face) => push_face(&mut mesh, face, &QUAD_WINDING, images, options),
            Polygon::Sprite(sprite) if options.include_sprites => push_sprite(&mut mesh, sprite),
            Polygon::Sprite(_) | Polygon::Reserved { .. } | Polygon::Unknown { .. } => {}
        }
    }

    debug!(
        "{}: {} faces, {} uvs, {} colors",
        mesh.name,
        mesh.faces.len(),
        mesh.uvs.len(),
        mesh.colors.len()
    );
    mesh
}

fn push_face<const N: usize>(
    mesh: &mut ReconstructedMesh,
    face: &Face<N>,
    winding: &[usize; N],
    images: &[Image],
    options: &MeshOptions,
) {
    if face.indices.iter().any(|&i| usize::from(i) >= mesh.positions.len()) {
        warn!("{}: face {:?} references a missing vertex", mesh.name, face.indices);
        mesh.stats.invalid_faces += 1;
        return;
    }

    if face.is_degenerate() {
        mesh.stats.degenerate_faces += 1;
        if options.suppress_degenerates {
            mesh.stats.suppressed_faces += 1;
            return;
        }
    }

    let mut material = Material::Untextured;
    let mut uv_base = None;
    if let Some(texturing) = &face.texturing {
        match images
            .get(usize::from(texturing.texture))
            .filter(|image| image.width > 0 && image.height > 0)
        {
            Some(image) => {
                uv_base = Some(mesh.uvs.len());
                mesh.uvs
                    .extend(texturing.texels.iter().map(|&texel| texel_to_uv(texel, image)));
                material = Material::Texture(texturing.texture);
            }
            None => {
                warn!(
                    "{}: texture {} not available, face left untextured",
                    mesh.name, texturing.texture
                );
                mesh.stats.missing_textures += 1;
            }
        }
    }

    let color_base = mesh.colors.len();
    let per_vertex = match &face.shading {
        Shading::Face(color) => {
            mesh.colors.push(*color);
            false
        }
        Shading::Vertex(colors) => {
            mesh.colors.extend_from_slice(colors);
            true
        }
    };

    let corners = winding
        .iter()
        .map(|&slot| Corner {
            position: usize::from(face.indices[slot]),
            uv: uv_base.map(|base| base + slot),
            color: if per_vertex { color_base + slot } else { color_base },
        })
        .collect();

    mesh.faces.push(MeshFace { corners, material });
}

fn push_sprite(mesh: &mut ReconstructedMesh, sprite: &Sprite) {
    let Some(&position) = mesh.positions.get(usize::from(sprite.index)) else {
        warn!("{}: sprite anchor {} out of range", mesh.name, sprite.index);
        mesh.stats.invalid_faces += 1;
        return;
    };
    mesh.sprites.push(SpriteInstance {
        anchor: sprite.anchor,
        position,
        width: sprite.width,
        height: sprite.height,
        texture: sprite.texture,
        color: Rgb::from_packed(sprite.color),
    });
}
