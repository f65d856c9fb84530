//! Track mesh reconstruction

use glam::IVec3;
use tracing::{debug, warn};

use super::{Corner, Material, MeshFace, ReconstructedMesh, track_face_uvs};
use crate::formats::common::Rgb;
use crate::formats::track::{FaceFlags, Track};

/// Face color used for speed-up pads.
pub const BOOST_COLOR: Rgb = Rgb::new(32, 32, 255);

/// Reconstruct the track surface.
///
/// Faces keep their stored corner order. Each face adds four UVs and one
/// color; a face with an index outside the vertex list is skipped.
#[must_use]
pub fn reconstruct_track(track: &Track) -> ReconstructedMesh {
    let positions = track.vertices.iter().map(|v| v.position).collect();
    let mut mesh = ReconstructedMesh::new("track", positions);

    for (number, face) in track.faces.iter().enumerate() {
        let Some(indices) = resolve_indices(face.indices, mesh.positions.len()) else {
            warn!("Track face {} references a missing vertex: {:?}", number, face.indices);
            mesh.stats.invalid_faces += 1;
            continue;
        };

        let color = mesh.colors.len();
        mesh.colors.push(if face.flags.contains(FaceFlags::BOOST) {
            BOOST_COLOR
        } else {
            face.color
        });

        let uv_base = mesh.uvs.len();
        mesh.uvs
            .extend(track_face_uvs(face.flags.contains(FaceFlags::FLIP)));

        let corners = indices
            .iter()
            .enumerate()
            .map(|(slot, &position)| Corner {
                position,
                uv: Some(uv_base + slot),
                color,
            })
            .collect();
        mesh.faces.push(MeshFace {
            corners,
            material: Material::TrackTile(face.tile),
        });
    }

    debug!("Track mesh: {} faces", mesh.faces.len());
    mesh
}

fn resolve_indices(indices: [i16; 4], count: usize) -> Option<[usize; 4]> {
    let mut resolved = [0; 4];
    for (slot, &index) in resolved.iter_mut().zip(&indices) {
        *slot = usize::try_from(index).ok().filter(|&i| i < count)?;
    }
    Some(resolved)
}

/// Section positions in file order.
#[must_use]
pub fn reconstruct_sections(track: &Track) -> Vec<IVec3> {
    track.sections.iter().map(|s| s.position).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::track::{SectionFlags, TrackFace, TrackSection, TrackVertex};
    use glam::Vec2;
    use pretty_assertions::assert_eq;

    fn vertex(x: i32) -> TrackVertex {
        TrackVertex {
            position: IVec3::new(x, 0, 0),
            padding: 0,
        }
    }

    fn face(indices: [i16; 4], tile: u8, flags: FaceFlags) -> TrackFace {
        TrackFace {
            indices,
            normal: [0, -4096, 0],
            tile,
            flags,
            color: Rgb::new(200, 100, 50),
        }
    }

    fn track(faces: Vec<TrackFace>) -> Track {
        Track {
            vertices: (0..6).map(vertex).collect(),
            faces,
            ..Track::default()
        }
    }

    #[test]
    fn test_faces_in_stored_order() {
        let mesh = reconstruct_track(&track(vec![
            face([3, 2, 1, 0], 4, FaceFlags::TRACK),
            face([5, 4, 3, 2], 1, FaceFlags::TRACK),
        ]));
        assert_eq!(mesh.faces.len(), 2);
        let second: Vec<usize> = mesh.faces[1].corners.iter().map(|c| c.position).collect();
        assert_eq!(second, vec![5, 4, 3, 2]);
        let uvs: Vec<Option<usize>> = mesh.faces[1].corners.iter().map(|c| c.uv).collect();
        assert_eq!(uvs, vec![Some(4), Some(5), Some(6), Some(7)]);
        assert_eq!(mesh.faces[1].corners[0].color, 1);
        assert_eq!(mesh.faces[0].material, Material::TrackTile(4));
        assert!(mesh.indices_in_range());
    }

    #[test]
    fn test_boost_and_flip() {
        let flags = FaceFlags(FaceFlags::BOOST.0 | FaceFlags::FLIP.0);
        let mesh = reconstruct_track(&track(vec![
            face([0, 1, 2, 3], 0, FaceFlags::TRACK),
            face([0, 1, 2, 3], 0, flags),
        ]));
        assert_eq!(mesh.colors, vec![Rgb::new(200, 100, 50), BOOST_COLOR]);
        assert_eq!(mesh.uvs[0], Vec2::new(1.0, 0.0));
        assert_eq!(mesh.uvs[4], Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_invalid_indices_skipped() {
        let mesh = reconstruct_track(&track(vec![
            face([0, 1, 2, -1], 0, FaceFlags::TRACK),
            face([0, 1, 2, 6], 0, FaceFlags::TRACK),
            face([0, 1, 2, 3], 0, FaceFlags::TRACK),
        ]));
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.colors.len(), 1);
        assert_eq!(mesh.uvs.len(), 4);
        assert_eq!(mesh.stats.invalid_faces, 2);
    }

    #[test]
    fn test_section_points() {
        let section = TrackSection {
            next_junction: -1,
            previous: 0,
            next: 1,
            position: IVec3::new(10, 20, 30),
            first_face: 0,
            face_count: 0,
            flags: SectionFlags::default(),
        };
        let track = Track {
            sections: vec![section; 2],
            ..Track::default()
        };
        assert_eq!(reconstruct_sections(&track), vec![IVec3::new(10, 20, 30); 2]);
    }
}
